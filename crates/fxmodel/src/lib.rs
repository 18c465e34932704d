//! Particle effect model (`.fx`) loader.
//!
//! An effect file declares a list of named effects, each with an optional material and an optional
//! particle simulation. Simulations live in separate files holding one point cloud per frame.
//!
//! ```text
//! effect "spark" {
//!     material "fx/spark"
//!     simuation "particles/spark.sim"
//! }
//! ```

mod error;
mod lexer;
mod material;
mod options;
mod parser;
mod render;

pub use error::Error;
pub use lexer::Location;
pub use material::{Material, MaterialRef, MaterialRegistry, MaterialTable, DEFAULT_MATERIAL};
pub use options::{LoadOptions, NumberParsing};
pub use parser::{SIMULATION_IDENT, SIMULATION_KEYWORD, SIMULATION_VERSION};
pub use render::{Aabb, DynamicModelKind, RenderEntity, RenderModel, ViewDef, FX_BOUNDS_HALF_EXTENT};

use glam::Vec3;
use smol_str::SmolStr;
use std::fs;
use tracing::{info, warn};

////////////////////////////////////////////////////////////////////////////////////////////////////

/// One simulation time step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Particle positions, in file order.
    pub points: Vec<Vec3>,
}

/// Animated point data of an effect.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Simulation {
    pub frames: Vec<Frame>,
}

impl Simulation {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Loads a simulation file.
    ///
    /// `name` is resolved against `options.root`.
    pub fn load(name: &str, options: &LoadOptions) -> Result<Simulation, Error> {
        parser::load_simulation(name, options)
    }

    /// Parses the contents of a simulation file. `name` is only used in diagnostics.
    pub fn parse(name: &str, source: &str, options: &LoadOptions) -> Result<Simulation, Error> {
        parser::parse_simulation(name, source, options)
    }
}

/// A named effect.
#[derive(Clone, Debug)]
pub struct Effect {
    pub name: SmolStr,
    /// `None` if the effect block has no `material` line.
    pub material: Option<MaterialRef>,
    /// Empty if the effect block has no simulation line.
    pub simulation: Simulation,
}

impl Effect {
    pub fn new(name: impl Into<SmolStr>) -> Effect {
        Effect {
            name: name.into(),
            material: None,
            simulation: Simulation::default(),
        }
    }
}

/// A loaded effect file.
///
/// The model owns its effects. It is built by a single load pass and not modified afterwards.
#[derive(Clone, Debug, Default)]
pub struct FxModel {
    name: String,
    effects: Vec<Effect>,
    num_frames: usize,
}

impl FxModel {
    /// Creates an empty, unloaded model.
    pub fn new(name: impl Into<String>) -> FxModel {
        FxModel {
            name: name.into(),
            effects: Vec::new(),
            num_frames: 0,
        }
    }

    /// Loads an effect file.
    ///
    /// If the file can't be read, a warning is emitted and an empty (unloaded) model is returned.
    /// Any other problem, including in a referenced simulation file, is an error.
    pub fn load(name: &str, materials: &dyn MaterialRegistry, options: &LoadOptions) -> Result<FxModel, Error> {
        let path = options.resolve(name);
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                warn!("failed to load FX {}: {err}", path.display());
                return Ok(FxModel::new(name));
            }
        };
        FxModel::parse(name, &source, materials, options)
    }

    /// Parses the contents of an effect file. `name` becomes the model name.
    pub fn parse(
        name: &str,
        source: &str,
        materials: &dyn MaterialRegistry,
        options: &LoadOptions,
    ) -> Result<FxModel, Error> {
        let effects = parser::parse_effects(name, source, materials, options)?;
        let model = FxModel::from_effects(name, effects);
        info!(
            "loaded FX {}: {} effects, {} frames",
            model.name,
            model.effects.len(),
            model.num_frames
        );
        Ok(model)
    }

    /// Builds a model from already parsed effects.
    pub fn from_effects(name: impl Into<String>, effects: Vec<Effect>) -> FxModel {
        // the effect with the most simulation frames gives the frame count
        let num_frames = effects
            .iter()
            .map(|effect| effect.simulation.frame_count())
            .max()
            .unwrap_or(0);
        FxModel {
            name: name.into(),
            effects,
            num_frames,
        }
    }

    /// Name of the file the model was loaded from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Finds the first effect with the given name.
    pub fn effect(&self, name: &str) -> Option<&Effect> {
        self.effects.iter().find(|e| e.name == name)
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn is_loaded(&self) -> bool {
        !self.effects.is_empty()
    }
}

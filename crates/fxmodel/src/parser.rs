mod effect;
mod simulation;

use crate::lexer::Lexer;
use crate::{Effect, Error, LoadOptions, MaterialRegistry, Simulation};
use std::fs;
use tracing::debug;

pub use effect::SIMULATION_KEYWORD;
pub use simulation::{SIMULATION_IDENT, SIMULATION_VERSION};

/// What effect blocks need to resolve their references.
pub(crate) struct Context<'a> {
    pub(crate) materials: &'a dyn MaterialRegistry,
    pub(crate) options: &'a LoadOptions,
}

fn read_effects(p: &mut Lexer, cx: &Context) -> Result<Vec<Effect>, Error> {
    let mut effects = Vec::new();
    while !p.end_of_file() {
        let (token, span) = p.expect_any("`effect`")?;
        if token.text() != "effect" {
            return Err(p.unexpected(&span, "`effect`", token));
        }
        let (name, _) = p.expect_any("effect name")?;
        let effect = effect::read_effect(p, name.text(), cx)?;
        debug!(
            "effect `{}`: {} simulation frames",
            effect.name,
            effect.simulation.frame_count()
        );
        effects.push(effect);
    }
    Ok(effects)
}

pub(crate) fn parse_effects(
    file: &str,
    source: &str,
    materials: &dyn MaterialRegistry,
    options: &LoadOptions,
) -> Result<Vec<Effect>, Error> {
    let mut p = Lexer::new(file, source, options.numbers);
    let cx = Context { materials, options };
    read_effects(&mut p, &cx)
}

pub(crate) fn parse_simulation(file: &str, source: &str, options: &LoadOptions) -> Result<Simulation, Error> {
    let mut p = Lexer::new(file, source, options.numbers);
    simulation::read_simulation(&mut p, options)
}

pub(crate) fn load_simulation(name: &str, options: &LoadOptions) -> Result<Simulation, Error> {
    let path = options.resolve(name);
    let source = fs::read_to_string(&path).map_err(|source| Error::SimulationNotFound { path, source })?;
    parse_simulation(name, &source, options)
}

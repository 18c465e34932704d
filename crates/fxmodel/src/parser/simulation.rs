//! Particle simulation files.
//!
//! ```text
//! ParticleSim 1
//! NumFrames <N>
//! ParticleFrame {
//!     NumParticles <M>
//!     <x> <y> <z>     // M times
//! }
//! // N times
//! ```
use crate::lexer::Lexer;
use crate::{Error, Frame, LoadOptions, Simulation};
use glam::Vec3;
use tracing::debug;

/// Format identifier at the top of simulation files.
pub const SIMULATION_IDENT: &str = "ParticleSim";
/// Format version following the identifier.
pub const SIMULATION_VERSION: &str = "1";

fn read_point(p: &mut Lexer) -> Result<Vec3, Error> {
    let x = p.parse_float()?;
    let y = p.parse_float()?;
    let z = p.parse_float()?;
    Ok(Vec3::new(x, y, z))
}

fn read_frame(p: &mut Lexer) -> Result<Frame, Error> {
    p.expect_token("ParticleFrame")?;
    p.expect_token("{")?;
    p.expect_token("NumParticles")?;
    let particle_count = p.parse_count("particle")?;
    let mut points = Vec::new();
    for _ in 0..particle_count {
        points.push(read_point(p)?);
    }
    p.expect_token("}")?;
    Ok(Frame { points })
}

/// Reads a whole simulation. Anything after the last declared frame is ignored.
pub(crate) fn read_simulation(p: &mut Lexer, options: &LoadOptions) -> Result<Simulation, Error> {
    if options.validate_preamble {
        p.expect_token(SIMULATION_IDENT)?;
        p.expect_token(SIMULATION_VERSION)?;
    } else {
        p.expect_any("format identifier")?;
        p.expect_any("format version")?;
    }

    p.expect_token("NumFrames")?;
    let frame_count = p.parse_count("frame")?;
    let mut frames = Vec::new();
    for _ in 0..frame_count {
        frames.push(read_frame(p)?);
    }
    debug!("parsed particle simulation: {} frames", frames.len());
    Ok(Simulation { frames })
}

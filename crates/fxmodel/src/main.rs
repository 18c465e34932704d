//! Loads an effect file and prints a summary of its contents.
//!
//! Usage: `fxinfo <file.fx> [options.json]`
use anyhow::{bail, Context};
use fxmodel::{FxModel, LoadOptions, MaterialTable, RenderModel};
use std::{env, fs};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut args = env::args().skip(1);
    let Some(name) = args.next() else {
        bail!("usage: fxinfo <file.fx> [options.json]");
    };
    let options = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
            LoadOptions::from_json(&json)?
        }
        None => LoadOptions::default(),
    };

    // every material resolves to the default one
    let materials = MaterialTable::new();
    let model = FxModel::load(&name, &materials, &options)?;
    if !model.is_loaded() {
        println!("{}: no effects", model.name());
        return Ok(());
    }

    let bounds = model.bounds(None);
    println!(
        "{}: {} effects, {} frames, bounds {} .. {}",
        model.name(),
        model.effects().len(),
        model.num_frames(),
        bounds.min,
        bounds.max
    );
    for effect in model.effects() {
        let points: usize = effect.simulation.frames.iter().map(|f| f.points.len()).sum();
        println!(
            "  {}: material {}, {} frames, {} points",
            effect.name,
            effect.material.as_ref().map_or("<none>", |m| m.name()),
            effect.simulation.frame_count(),
            points
        );
    }
    Ok(())
}

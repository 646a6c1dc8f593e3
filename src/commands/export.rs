use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{Cli, ExportArgs};
use crate::render::write_geojson;

pub fn run(_cli: &Cli, args: &ExportArgs) -> Result<()> {
    let pipeline = super::run_pipeline(&args.input)?;
    let config = super::load_config(&args.input)?;

    let out_path: PathBuf = args.output.clone()
        .unwrap_or_else(|| PathBuf::from("visited.geojson"));

    write_geojson(&pipeline.county, &pipeline.state, &config, &out_path)?;
    println!("Wrote {}", out_path.display());

    Ok(())
}

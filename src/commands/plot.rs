use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::{Cli, PlotArgs};
use crate::plot::{CONTIGUOUS_EPSG, NON_CONTIGUOUS_CODES, build_plot_tables, default_regions};
use crate::render::render_svg;

pub fn run(_cli: &Cli, args: &PlotArgs) -> Result<()> {
    let pipeline = super::run_pipeline(&args.input)?;
    let config = super::load_config(&args.input)?;

    let regions = default_regions(NON_CONTIGUOUS_CODES, CONTIGUOUS_EPSG, args.alaska_meridian);
    let tables = build_plot_tables(&pipeline.county, &pipeline.state, &regions)?;

    let out_dir: PathBuf = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    for table in &tables {
        let path = out_dir.join(format!("{}.svg", table.label));
        render_svg(table, &config, &path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

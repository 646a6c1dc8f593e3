use std::path::PathBuf;

/// Counties-visited tracker CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "county-tracker", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render one static choropleth SVG per region
    Plot(PlotArgs),

    /// Export styled GeoJSON for the interactive web map
    Export(ExportArgs),
}

/// Inputs shared by both commands.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Visit log CSV (state_code, county_code, date, ...)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub visits: PathBuf,

    /// County boundary shapefile (.shp)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub counties: PathBuf,

    /// State boundary shapefile (.shp)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub states: PathBuf,

    /// Optional render style config (JSON)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub style: Option<PathBuf>,

    /// Warn about visit records with no matching geometry instead of
    /// dropping them silently
    #[arg(long)]
    pub report_unmatched: bool,
}

#[derive(clap::Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory for the region SVGs, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Fold meridian for the Alaska panel (degrees longitude)
    #[arg(long, default_value_t = crate::DEFAULT_ALASKA_MERIDIAN)]
    pub alaska_meridian: f64,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output GeoJSON file, defaults to "./visited.geojson"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

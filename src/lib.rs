#![doc = "County visit tracker: joins a visit log against Census boundaries and builds render-ready map tables"]
pub mod cli;
pub mod commands;
mod geom;
mod io;
mod layer;
mod pipeline;
mod plot;
mod render;
mod types;
mod visit;

#[doc(inline)]
pub use types::{GeoId, GeoType, zero_pad};

#[doc(inline)]
pub use visit::{
    DATE_FORMAT, StateVisitSummary, VisitLog, VisitRecord, VisitStats, is_visited,
    parse_visit_date, placeholder_date, visit_epoch,
};

#[doc(inline)]
pub use layer::{Entity, JoinPolicy, JoinReport, Layer};

#[doc(inline)]
pub use geom::{recenter, reproject};

#[doc(inline)]
pub use plot::{
    Adjust, CONTIGUOUS_EPSG, DEFAULT_ALASKA_MERIDIAN, NON_CONTIGUOUS_CODES, PlotTable,
    RegionSpec, Selector, build_plot_tables, default_regions,
};

#[doc(inline)]
pub use pipeline::{Pipeline, PipelineInputs};

#[doc(inline)]
pub use render::{RenderConfig, render_svg, write_geojson};

#[doc(inline)]
pub use io::{read_boundaries, read_visit_log, read_visit_log_str};

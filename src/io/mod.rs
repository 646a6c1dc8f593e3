mod csv;
mod shp;

pub use csv::{read_visit_log, read_visit_log_str};
pub use shp::read_boundaries;

mod geojson;
mod style;
mod svg;

pub use geojson::write_geojson;
pub use style::{Dimensions, EntityStyles, RenderConfig, Style};
pub use svg::render_svg;

mod proj;
mod recenter;

pub use proj::reproject;
pub use recenter::recenter;

//! Render style configuration.
//!
//! An explicit structure passed into the renderers, enumerated per entity type
//! and visit status. Loaded from JSON or built from defaults; there is no
//! global config object.

use std::{collections::BTreeMap, fs::File, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::GeoType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

/// Style pair keyed by the visited flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStyles {
    pub visited: Style,
    pub not_visited: Style,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub state: EntityStyles,
    pub county: EntityStyles,
    /// Figure size per region label; regions not listed use the fallback.
    pub dimensions: BTreeMap<String, Dimensions>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let style = |fill: &str, stroke: &str, stroke_width: f64, opacity: f64| Style {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            stroke_width,
            opacity,
        };

        let dimensions = [
            ("contiguous", 1400.0, 900.0),
            ("alaska", 900.0, 600.0),
            ("hawaii", 700.0, 500.0),
            ("north_carolina", 900.0, 500.0),
            ("southeast", 1000.0, 700.0),
        ]
        .into_iter()
        .map(|(label, width, height)| (label.to_string(), Dimensions { width, height }))
        .collect();

        Self {
            county: EntityStyles {
                visited: style("#2b8cbe", "#636363", 0.3, 0.85),
                not_visited: style("#e5e7eb", "#636363", 0.3, 0.85),
            },
            state: EntityStyles {
                visited: style("none", "#111827", 1.2, 0.9),
                not_visited: style("none", "#111827", 1.2, 0.4),
            },
            dimensions,
        }
    }
}

impl RenderConfig {
    /// Loads a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[render] Failed to open style config: {}", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("[render] Failed to parse style config: {}", path.display()))
    }

    pub fn style_for(&self, ty: GeoType, visited: bool) -> &Style {
        let styles = match ty {
            GeoType::State => &self.state,
            GeoType::County => &self.county,
        };
        if visited { &styles.visited } else { &styles.not_visited }
    }

    pub fn dimensions_for(&self, label: &str) -> Dimensions {
        self.dimensions.get(label).copied()
            .unwrap_or(Dimensions { width: 1000.0, height: 600.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_lookup_is_keyed_by_visited_flag() {
        let config = RenderConfig::default();
        assert_ne!(
            config.style_for(GeoType::County, true).fill,
            config.style_for(GeoType::County, false).fill,
        );
    }

    #[test]
    fn unknown_region_gets_fallback_dimensions() {
        let config = RenderConfig::default();
        let dims = config.dimensions_for("nowhere");
        assert!(dims.width > 0.0 && dims.height > 0.0);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = RenderConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.county.visited.fill, config.county.visited.fill);
    }
}

use std::{fmt, sync::Arc};

use anyhow::{Result, bail};

use super::geo_type::GeoType;

/// Stable key for any entity across levels.
/// Keep the original GEOID text (with leading zeros) but avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeoId {
    pub ty: GeoType,
    pub id: Arc<str>, // e.g. "31" for state, "31001" for county
}

impl GeoId {
    pub fn new(ty: GeoType, id: &str) -> Self {
        Self { ty, id: Arc::from(id) }
    }

    /// Builds a county GeoId from raw state/county FIPS codes, zero-padding
    /// each to its fixed width (2 + 3 = 5 characters total).
    pub fn county(state_code: &str, county_code: &str) -> Result<Self> {
        let id = format!("{}{}", zero_pad(state_code, 2)?, zero_pad(county_code, 3)?);
        Ok(Self { ty: GeoType::County, id: Arc::from(id.as_str()) })
    }

    /// Builds a state GeoId from a raw state FIPS code.
    pub fn state(state_code: &str) -> Result<Self> {
        let id = zero_pad(state_code, 2)?;
        Ok(Self { ty: GeoType::State, id: Arc::from(id.as_str()) })
    }

    /// Returns the `GeoId` of the state containing this entity
    /// by truncating the GEOID string to its 2-character prefix.
    pub fn to_state(&self) -> GeoId {
        let prefix: Arc<str> = Arc::from(&self.id[..self.id.len().min(2)]);

        GeoId {
            ty: GeoType::State,
            id: prefix,
        }
    }

    pub fn id(&self) -> &str { &self.id }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Left-pads a FIPS code with zeros to `width` characters.
/// An overlong code is an input-validation error, never truncated.
pub fn zero_pad(code: &str, width: usize) -> Result<String> {
    let code = code.trim();
    if code.len() > width {
        bail!("FIPS code {code:?} is longer than {width} characters");
    }
    Ok(format!("{code:0>width$}"))
}

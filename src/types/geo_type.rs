#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoType {
    State,      // Highest-level entity
    County,     // County -> State
}

impl GeoType {
    pub fn to_str(&self) -> &'static str {
        match self {
            GeoType::State => "state",
            GeoType::County => "county",
        }
    }

    /// Expected GEOID width for this level (2-digit state, 5-digit county).
    pub fn id_width(&self) -> usize {
        match self {
            GeoType::State => 2,
            GeoType::County => 5,
        }
    }
}

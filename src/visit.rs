//! Visit-log normalization and state-level aggregation.

use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result, ensure};
use chrono::NaiveDate;
use polars::{frame::DataFrame, prelude::DataType};

use crate::types::GeoId;

/// Input format of the raw `date` column, e.g. "01/15/23".
pub const DATE_FORMAT: &str = "%m/%d/%y";

/// Sentinel for "no visit recorded". Chosen strictly before [`visit_epoch`]
/// so missing dates always classify as not-visited.
pub fn placeholder_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()
}

/// A county counts as visited iff its resolved date is on or after this epoch.
pub fn visit_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

/// Resolve a raw date field to a canonical date.
///
/// Genuinely missing values (empty cell) get the placeholder; a non-empty
/// string that does not match [`DATE_FORMAT`] is a hard error rather than a
/// silent default.
pub fn parse_visit_date(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(s) if !s.trim().is_empty() => {
            NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .with_context(|| format!("malformed visit date {s:?} (expected MM/DD/YY)"))
        }
        _ => Ok(placeholder_date()),
    }
}

pub fn is_visited(date: NaiveDate) -> bool {
    date >= visit_epoch()
}

/// One row of the visit log, with derived GEOID, visited flag and canonical
/// date. Immutable after construction.
#[derive(Debug, Clone)]
pub struct VisitRecord {
    pub geo_id: GeoId,
    pub state_name: Arc<str>,
    pub county_name: Arc<str>,
    pub visited: bool,
    pub date: NaiveDate,
}

impl VisitRecord {
    pub fn state_code(&self) -> GeoId {
        self.geo_id.to_state()
    }
}

/// State-level visit summary: visited iff any county in the state is visited,
/// date is the earliest visit (placeholder when none).
#[derive(Debug, Clone)]
pub struct StateVisitSummary {
    pub geo_id: GeoId,
    pub state_name: Arc<str>,
    pub visited: bool,
    pub date: NaiveDate,
}

/// Headline numbers for the sidebar/stats log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitStats {
    pub counties_visited: usize,
    pub states_visited: usize,
}

/// The normalized visit log, one record per county row in the source CSV.
#[derive(Debug, Clone, Default)]
pub struct VisitLog {
    pub records: Vec<VisitRecord>,
}

impl VisitLog {
    /// Builds the log from a raw DataFrame (see `io::read_visit_log`).
    ///
    /// The input's `visited` and `geoid` columns, if present, are ignored and
    /// recomputed from the date and FIPS code columns.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        fn str_column<'a>(
            df: &'a DataFrame,
            name: &str,
        ) -> Result<polars::prelude::StringChunked> {
            Ok(df
                .column(name)
                .with_context(|| format!("visit log is missing column {name:?}"))?
                .cast(&DataType::String)?
                .str()?
                .clone())
        }

        let state_codes = str_column(df, "state_code")?;
        let state_names = str_column(df, "state_name")?;
        let county_codes = str_column(df, "county_code")?;
        let county_names = str_column(df, "county_name")?;
        let dates = str_column(df, "date")?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let state_code = state_codes.get(row)
                .with_context(|| format!("visit log row {row}: empty state_code"))?;
            let county_code = county_codes.get(row)
                .with_context(|| format!("visit log row {row}: empty county_code"))?;

            let geo_id = GeoId::county(state_code, county_code)
                .with_context(|| format!("visit log row {row}"))?;
            let date = parse_visit_date(dates.get(row))
                .with_context(|| format!("visit log row {row} ({geo_id})"))?;

            records.push(VisitRecord {
                geo_id,
                state_name: Arc::from(state_names.get(row).unwrap_or_default()),
                county_name: Arc::from(county_names.get(row).unwrap_or_default()),
                visited: is_visited(date),
                date,
            });
        }

        Ok(Self { records })
    }

    /// Index records by GEOID for the geometry join.
    pub fn by_geoid(&self) -> Result<HashMap<GeoId, &VisitRecord>> {
        let mut index = HashMap::with_capacity(self.records.len());
        for record in &self.records {
            let prior = index.insert(record.geo_id.clone(), record);
            ensure!(prior.is_none(), "duplicate GEOID {} in visit log", record.geo_id);
        }
        Ok(index)
    }

    /// Per-state summary: visited = OR over the state's counties, date = the
    /// earliest date among visited counties only. One row per distinct state
    /// code, in order of first appearance.
    pub fn summarize_states(&self) -> Vec<StateVisitSummary> {
        let mut order: Vec<GeoId> = Vec::new();
        let mut summaries: HashMap<GeoId, StateVisitSummary> = HashMap::new();

        for record in &self.records {
            let state = record.state_code();
            let entry = summaries.entry(state.clone()).or_insert_with(|| {
                order.push(state.clone());
                StateVisitSummary {
                    geo_id: state,
                    state_name: record.state_name.clone(),
                    visited: false,
                    date: placeholder_date(),
                }
            });

            if record.visited {
                if !entry.visited || record.date < entry.date {
                    entry.date = record.date;
                }
                entry.visited = true;
            }
        }

        order.into_iter()
            .filter_map(|id| summaries.remove(&id))
            .collect()
    }

    pub fn stats(&self) -> VisitStats {
        let counties_visited = self.records.iter().filter(|r| r.visited).count();
        let states_visited = self.summarize_states().iter().filter(|s| s.visited).count();
        VisitStats { counties_visited, states_visited }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, county: &str, date: &str) -> VisitRecord {
        let geo_id = GeoId::county(state, county).unwrap();
        let date = parse_visit_date(if date.is_empty() { None } else { Some(date) }).unwrap();
        VisitRecord {
            geo_id,
            state_name: Arc::from("Test State"),
            county_name: Arc::from("Test County"),
            visited: is_visited(date),
            date,
        }
    }

    #[test]
    fn parses_dates_in_fixed_format() {
        let date = parse_visit_date(Some("01/15/23")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert!(is_visited(date));
    }

    #[test]
    fn missing_date_gets_placeholder_and_not_visited() {
        let date = parse_visit_date(None).unwrap();
        assert_eq!(date, placeholder_date());
        assert!(!is_visited(date));

        let date = parse_visit_date(Some("  ")).unwrap();
        assert_eq!(date, placeholder_date());
    }

    #[test]
    fn malformed_date_is_an_error() {
        assert!(parse_visit_date(Some("2023-01-15")).is_err());
        assert!(parse_visit_date(Some("not a date")).is_err());
    }

    #[test]
    fn placeholder_is_before_epoch() {
        assert!(placeholder_date() < visit_epoch());
    }

    #[test]
    fn epoch_boundary_counts_as_visited() {
        assert!(is_visited(visit_epoch()));
        let day_before = visit_epoch().pred_opt().unwrap();
        assert!(!is_visited(day_before));
    }

    #[test]
    fn scenario_unpadded_codes_produce_canonical_geoid() {
        let r = record("6", "1", "01/15/23");
        assert_eq!(r.geo_id.id(), "06001");
        assert!(r.visited);
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
    }

    #[test]
    fn state_summary_takes_or_of_counties_and_earliest_date() {
        let log = VisitLog {
            records: vec![
                record("06", "001", "01/15/23"),
                record("06", "003", ""),
                record("06", "005", "03/02/19"),
                record("37", "183", ""),
            ],
        };

        let summary = log.summarize_states();
        assert_eq!(summary.len(), 2);

        assert_eq!(summary[0].geo_id.id(), "06");
        assert!(summary[0].visited);
        assert_eq!(summary[0].date, NaiveDate::from_ymd_opt(2019, 3, 2).unwrap());

        assert_eq!(summary[1].geo_id.id(), "37");
        assert!(!summary[1].visited);
        assert_eq!(summary[1].date, placeholder_date());
    }

    #[test]
    fn stats_count_distinct_visited_states() {
        let log = VisitLog {
            records: vec![
                record("06", "001", "01/15/23"),
                record("06", "005", "03/02/19"),
                record("37", "183", ""),
            ],
        };
        assert_eq!(log.stats(), VisitStats { counties_visited: 2, states_visited: 1 });
    }
}

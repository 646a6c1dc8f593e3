//! Visit-log CSV reading.

use std::{fs::File, io::Cursor, path::Path, sync::Arc};

use anyhow::{Context, Result};
use polars::{
    frame::DataFrame,
    io::SerReader,
    prelude::{CsvReadOptions, CsvReader, DataType, Field, Schema, SchemaRef},
};

/// Reads the visit log from `path` into a Polars DataFrame.
///
/// FIPS code columns are forced to String so leading zeros survive; the date
/// column stays String (empty cells become nulls) for the normalizer to
/// resolve.
pub fn read_visit_log(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv] Failed to open visit log: {}", path.display()))?;

    let options = CsvReadOptions::default()
        .with_schema_overwrite(Some(visit_csv_schema()));

    CsvReader::new(file)
        .with_options(options)
        .finish()
        .with_context(|| format!("[io::csv] Failed to read visit log from {:?}", path))
}

/// Reads a visit log from an in-memory CSV string.
pub fn read_visit_log_str(csv: &str) -> Result<DataFrame> {
    let options = CsvReadOptions::default()
        .with_schema_overwrite(Some(visit_csv_schema()));

    CsvReader::new(Cursor::new(csv.as_bytes()))
        .with_options(options)
        .finish()
        .context("[io::csv] Failed to read visit log from string")
}

/// Schema overwrite for the visit log. The input's own `visited` and `geoid`
/// columns are left to inference; both are recomputed downstream.
fn visit_csv_schema() -> SchemaRef {
    Arc::new(Schema::from_iter([
        Field::new("state_code".into(), DataType::String),
        Field::new("state_name".into(), DataType::String),
        Field::new("county_code".into(), DataType::String),
        Field::new("county_name".into(), DataType::String),
        Field::new("date".into(), DataType::String),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::VisitLog;

    #[test]
    fn codes_keep_leading_zeros() {
        let df = read_visit_log_str(
            "state_code,state_name,county_code,county_name,visited,geoid,date\n\
             06,California,001,Alameda County,1,06001,01/15/23\n",
        )
        .unwrap();

        let log = VisitLog::from_dataframe(&df).unwrap();
        assert_eq!(log.records[0].geo_id.id(), "06001");
    }

    #[test]
    fn empty_date_cell_reads_as_missing() {
        let df = read_visit_log_str(
            "state_code,state_name,county_code,county_name,visited,geoid,date\n\
             06,California,001,Alameda County,0,06001,\n",
        )
        .unwrap();

        let log = VisitLog::from_dataframe(&df).unwrap();
        assert!(!log.records[0].visited);
        assert_eq!(log.records[0].date, crate::visit::placeholder_date());
    }
}

//! End-to-end data pipeline: load, normalize, join.
//!
//! All loading happens before any table is produced, so a missing or
//! malformed input halts the run instead of rendering an incomplete map.

use std::path::PathBuf;

use anyhow::Result;

use crate::io::{read_boundaries, read_visit_log};
use crate::layer::{JoinPolicy, JoinReport, Layer};
use crate::types::GeoType;
use crate::visit::VisitLog;

/// Input file locations, supplied by the caller (no directory searching).
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub visit_log: PathBuf,
    pub county_shapefile: PathBuf,
    pub state_shapefile: PathBuf,
}

/// The joined, render-ready datasets.
#[derive(Debug)]
pub struct Pipeline {
    pub log: VisitLog,
    pub county: Layer,
    pub state: Layer,
    pub report: JoinReport,
}

impl Pipeline {
    pub fn run(inputs: &PipelineInputs, policy: JoinPolicy) -> Result<Self> {
        let df = read_visit_log(&inputs.visit_log)?;
        let log = VisitLog::from_dataframe(&df)?;
        log::info!("visit log: {} county records", log.records.len());

        let county = read_boundaries(&inputs.county_shapefile, GeoType::County)?;
        let state = read_boundaries(&inputs.state_shapefile, GeoType::State)?;
        log::info!("boundaries: {} counties, {} states", county.len(), state.len());

        Self::join(log, county, state, policy)
    }

    /// Join step, separated out so tests can drive it with in-memory layers.
    pub fn join(
        log: VisitLog,
        county: Layer,
        state: Layer,
        policy: JoinPolicy,
    ) -> Result<Self> {
        let (county, report) = county.join_visits(&log, policy)?;
        let state = state.join_state_summaries(&log.summarize_states())?;

        let stats = log.stats();
        log::info!(
            "visited {} counties across {} states",
            stats.counties_visited,
            stats.states_visited,
        );

        Ok(Self { log, county, state, report })
    }
}

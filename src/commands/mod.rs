pub mod export;
pub mod plot;

use anyhow::Result;

use crate::cli::InputArgs;
use crate::layer::JoinPolicy;
use crate::pipeline::{Pipeline, PipelineInputs};
use crate::render::RenderConfig;

/// Load + join from the shared input args.
fn run_pipeline(input: &InputArgs) -> Result<Pipeline> {
    let inputs = PipelineInputs {
        visit_log: input.visits.clone(),
        county_shapefile: input.counties.clone(),
        state_shapefile: input.states.clone(),
    };

    let policy = if input.report_unmatched {
        JoinPolicy::WarnUnmatched
    } else {
        JoinPolicy::DropUnmatched
    };

    Pipeline::run(&inputs, policy)
}

fn load_config(input: &InputArgs) -> Result<RenderConfig> {
    match &input.style {
        Some(path) => RenderConfig::from_path(path),
        None => Ok(RenderConfig::default()),
    }
}

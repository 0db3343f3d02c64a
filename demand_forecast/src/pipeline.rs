//! Pipeline orchestration
//!
//! Splits an upload by parent category and forecasts each category on its
//! own. A category that fails (no model, corrupt model, prediction error) is
//! recorded in the report and never stops the others.

use crate::config::ForecastConfig;
use crate::data::{DataLoader, Observation, ObservationTable};
use crate::engine;
use crate::error::{ForecastError, Result};
use crate::frame::build_future_frame;
use crate::output::ForecastTable;
use crate::registry::ModelRegistry;
use retail_calendar::{category_label, parent_of};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of forecasting one category
pub type CategoryOutcome = Result<ForecastTable>;

/// Per-category results of one run, ordered by parent code
#[derive(Debug)]
pub struct PipelineReport {
    horizon: usize,
    outcomes: BTreeMap<String, CategoryOutcome>,
}

impl PipelineReport {
    /// Horizon the run was made with
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// All outcomes in ascending parent code order
    pub fn outcomes(&self) -> &BTreeMap<String, CategoryOutcome> {
        &self.outcomes
    }

    /// Outcome for one parent code
    pub fn get(&self, code: &str) -> Option<&CategoryOutcome> {
        self.outcomes.get(code)
    }

    /// Parent codes in report order
    pub fn codes(&self) -> Vec<&str> {
        self.outcomes.keys().map(String::as_str).collect()
    }

    /// Successful forecasts in report order
    pub fn successes(&self) -> Vec<&ForecastTable> {
        self.outcomes
            .values()
            .filter_map(|outcome| outcome.as_ref().ok())
            .collect()
    }

    /// Failed categories with their errors, in report order
    pub fn failures(&self) -> Vec<(&str, &ForecastError)> {
        self.outcomes
            .iter()
            .filter_map(|(code, outcome)| outcome.as_ref().err().map(|e| (code.as_str(), e)))
            .collect()
    }

    /// Whether every category produced a forecast
    pub fn is_complete_success(&self) -> bool {
        self.outcomes.values().all(|outcome| outcome.is_ok())
    }

    pub fn into_outcomes(self) -> BTreeMap<String, CategoryOutcome> {
        self.outcomes
    }
}

/// Drives resolver, registry, frame builder and engine for every category
#[derive(Debug)]
pub struct ForecastPipeline<R: ModelRegistry> {
    config: ForecastConfig,
    registry: R,
}

impl<R: ModelRegistry> ForecastPipeline<R> {
    /// Create a pipeline; the configuration is validated here
    pub fn new(config: ForecastConfig, registry: R) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Load a CSV upload and forecast it
    pub fn run_csv<P: AsRef<Path>>(&self, path: P, horizon: usize) -> Result<PipelineReport> {
        let table = DataLoader::from_csv(path, &self.config.columns)?;
        self.run(&table, horizon)
    }

    /// Forecast every parent category present in `table`
    ///
    /// Only an out-of-range horizon fails the whole run; everything else is
    /// reported per category.
    pub fn run(&self, table: &ObservationTable, horizon: usize) -> Result<PipelineReport> {
        self.config.check_horizon(horizon)?;

        let groups = group_by_parent(table.observations());
        info!(
            rows = table.len(),
            categories = groups.len(),
            horizon,
            "starting forecast run"
        );

        let mut outcomes = BTreeMap::new();
        for (code, history) in groups {
            let outcome = self.forecast_category(&code, &history, horizon);
            match &outcome {
                Ok(forecast) => info!(
                    code = %code,
                    label = category_label(&code).unwrap_or_default(),
                    periods = forecast.len(),
                    "category forecast ready"
                ),
                Err(e) => warn!(code = %code, error = %e, "category forecast failed"),
            }
            outcomes.insert(code, outcome);
        }

        Ok(PipelineReport { horizon, outcomes })
    }

    fn forecast_category(
        &self,
        code: &str,
        history: &[Observation],
        horizon: usize,
    ) -> CategoryOutcome {
        let predictor = self.registry.load(code)?;
        let frame = build_future_frame(history, horizon, self.config.quarter_anchor).map_err(
            |e| ForecastError::PredictionFailed {
                code: code.to_string(),
                reason: e.to_string(),
            },
        )?;
        engine::predict(predictor.as_ref(), code, &frame)
    }
}

/// Resolve every row's parent code, then group and sort each group by date
pub fn group_by_parent(observations: &[Observation]) -> BTreeMap<String, Vec<Observation>> {
    let mut groups: BTreeMap<String, Vec<Observation>> = BTreeMap::new();

    for obs in observations {
        let parent = parent_of(&obs.category_code);
        if parent.chars().all(|c| c == '0') {
            warn!(raw = %obs.category_code, "category code resolved to {}", parent);
        }
        groups.entry(parent).or_default().push(obs.clone());
    }

    for history in groups.values_mut() {
        history.sort_by_key(|obs| obs.ds);
    }

    groups
}

//! Future covariate frames
//!
//! A predictor needs the exogenous regressors for every period it forecasts.
//! Nothing is known about the future, so the last observed value of each
//! covariate is held constant across the whole horizon.

use crate::data::Observation;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, NamedFrom, Series};
use retail_calendar::QuarterAnchor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Covariate column names understood by [`FutureFrame::regressor`]
pub const COVARIATE_COLUMNS: [&str; 4] = ["price", "deflator", "unemployment_rate", "is_holiday"];

/// One future period with carried-forward covariates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureRow {
    pub ds: NaiveDate,
    pub price: f64,
    pub deflator: f64,
    pub unemployment_rate: f64,
    pub is_holiday: bool,
}

/// Future timestamps plus covariates, without the target column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureFrame {
    rows: Vec<FutureRow>,
}

impl FutureFrame {
    /// Build a frame from explicit rows
    pub fn from_rows(rows: Vec<FutureRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[FutureRow] {
        &self.rows
    }

    /// Number of future periods
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Future timestamps in frame order
    pub fn timestamps(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.ds).collect()
    }

    /// A covariate column by name; `is_holiday` is returned as 0.0 / 1.0
    pub fn regressor(&self, name: &str) -> Option<Vec<f64>> {
        let pick: fn(&FutureRow) -> f64 = match name {
            "price" => |r| r.price,
            "deflator" => |r| r.deflator,
            "unemployment_rate" => |r| r.unemployment_rate,
            "is_holiday" => |r| if r.is_holiday { 1.0 } else { 0.0 },
            _ => return None,
        };

        Some(self.rows.iter().map(pick).collect())
    }

    /// Project the frame into a polars DataFrame with a `ds` date column
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self
            .rows
            .iter()
            .map(|r| r.ds.format("%Y-%m-%d").to_string())
            .collect();

        let mut columns = vec![Series::new("ds", dates)];
        for name in COVARIATE_COLUMNS {
            let values = self.regressor(name).unwrap_or_default();
            columns.push(Series::new(name, values));
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Build the future frame for one category
///
/// `history` must be non-empty. The most recent observation supplies the
/// covariates; `horizon` quarters are generated starting at the first quarter
/// boundary strictly after its date.
pub fn build_future_frame(
    history: &[Observation],
    horizon: usize,
    anchor: QuarterAnchor,
) -> Result<FutureFrame> {
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon(
            "Horizon must be at least one quarter".to_string(),
        ));
    }

    let last = history
        .iter()
        .max_by_key(|obs| obs.ds)
        .ok_or_else(|| ForecastError::DataError("Empty category history".to_string()))?;

    let dates = anchor.dates_after(last.ds, horizon)?;
    debug!(
        last = %last.ds,
        first = ?dates.first(),
        horizon,
        %anchor,
        "building future frame"
    );

    let rows = dates
        .into_iter()
        .map(|ds| FutureRow {
            ds,
            price: last.price,
            deflator: last.deflator,
            unemployment_rate: last.unemployment_rate,
            is_holiday: last.is_holiday,
        })
        .collect();

    Ok(FutureFrame { rows })
}

//! Additive decomposition models
//!
//! A fitted piecewise-linear trend, Fourier seasonalities and standardized
//! extra regressors, evaluated the way Prophet computes its point forecast
//! (`yhat`). Parameters are stored in the scaled space the model was fitted in.

use crate::error::{ForecastError, Result};
use crate::frame::FutureFrame;
use crate::models::Predictor;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// How a component combines with the trend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentMode {
    #[default]
    Additive,
    Multiplicative,
}

/// Piecewise-linear trend in scaled time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Base growth rate
    pub k: f64,
    /// Base offset
    pub m: f64,
    /// Changepoint locations in scaled time, ascending
    #[serde(default)]
    pub changepoints: Vec<f64>,
    /// Rate adjustment at each changepoint
    #[serde(default)]
    pub deltas: Vec<f64>,
}

/// A Fourier seasonality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub name: String,
    /// Period length in days
    pub period_days: f64,
    pub fourier_order: usize,
    #[serde(default)]
    pub mode: ComponentMode,
    /// `[sin_1, cos_1, sin_2, cos_2, ...]`
    pub coefficients: Vec<f64>,
}

/// An extra regressor read from the future frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regressor {
    /// Covariate column name
    pub name: String,
    /// Mean used for standardization when fitting
    pub mu: f64,
    /// Standard deviation used for standardization when fitting
    pub std: f64,
    pub coefficient: f64,
    #[serde(default)]
    pub mode: ComponentMode,
}

/// Fitted additive decomposition model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveModel {
    /// Name of the model
    #[serde(default = "default_name")]
    pub name: String,
    /// First training date, origin of scaled time
    pub start: NaiveDate,
    /// Length of the training span in days
    pub t_scale_days: f64,
    /// Target scale
    pub y_scale: f64,
    pub trend: Trend,
    #[serde(default)]
    pub seasonalities: Vec<Seasonality>,
    #[serde(default)]
    pub regressors: Vec<Regressor>,
}

fn default_name() -> String {
    "Additive decomposition".to_string()
}

impl AdditiveModel {
    /// Create a model with a straight-line trend and no other components
    pub fn linear(start: NaiveDate, t_scale_days: f64, y_scale: f64, k: f64, m: f64) -> Result<Self> {
        let model = Self {
            name: default_name(),
            start,
            t_scale_days,
            y_scale,
            trend: Trend {
                k,
                m,
                changepoints: Vec::new(),
                deltas: Vec::new(),
            },
            seasonalities: Vec::new(),
            regressors: Vec::new(),
        };
        model.validate()?;
        Ok(model)
    }

    /// Add a trend changepoint
    pub fn with_changepoint(mut self, at: f64, delta: f64) -> Self {
        self.trend.changepoints.push(at);
        self.trend.deltas.push(delta);
        self
    }

    /// Add a seasonality component
    pub fn with_seasonality(mut self, seasonality: Seasonality) -> Self {
        self.seasonalities.push(seasonality);
        self
    }

    /// Add an extra regressor
    pub fn with_regressor(mut self, regressor: Regressor) -> Self {
        self.regressors.push(regressor);
        self
    }

    /// Check the fitted parameters are usable
    pub fn validate(&self) -> Result<()> {
        if !(self.t_scale_days.is_finite() && self.t_scale_days > 0.0) {
            return Err(ForecastError::InvalidParameter(
                "t_scale_days must be positive".to_string(),
            ));
        }

        if !self.y_scale.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "y_scale must be finite".to_string(),
            ));
        }

        if self.trend.changepoints.len() != self.trend.deltas.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "{} changepoints but {} deltas",
                self.trend.changepoints.len(),
                self.trend.deltas.len()
            )));
        }

        for season in &self.seasonalities {
            if !(season.period_days > 0.0) {
                return Err(ForecastError::InvalidParameter(format!(
                    "Seasonality '{}' needs a positive period",
                    season.name
                )));
            }
            if season.coefficients.len() != 2 * season.fourier_order {
                return Err(ForecastError::InvalidParameter(format!(
                    "Seasonality '{}' of order {} needs {} coefficients, found {}",
                    season.name,
                    season.fourier_order,
                    2 * season.fourier_order,
                    season.coefficients.len()
                )));
            }
        }

        for regressor in &self.regressors {
            if !(regressor.std > 0.0) {
                return Err(ForecastError::InvalidParameter(format!(
                    "Regressor '{}' needs a positive standard deviation",
                    regressor.name
                )));
            }
        }

        Ok(())
    }

    /// Scaled trend at scaled time `t`
    fn trend_at(&self, t: f64) -> f64 {
        let mut k = self.trend.k;
        let mut m = self.trend.m;
        for (&at, &delta) in self.trend.changepoints.iter().zip(&self.trend.deltas) {
            if t >= at {
                k += delta;
                m -= at * delta;
            }
        }
        k * t + m
    }
}

impl Seasonality {
    /// Seasonal effect at `days` since 1970-01-01
    fn effect_at(&self, days: f64) -> f64 {
        (1..=self.fourier_order)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 * days / self.period_days;
                self.coefficients[2 * (n - 1)] * angle.sin()
                    + self.coefficients[2 * (n - 1) + 1] * angle.cos()
            })
            .sum()
    }
}

impl Predictor for AdditiveModel {
    fn predict(&self, frame: &FutureFrame) -> Result<Vec<f64>> {
        // hand-built models never went through `linear`
        self.validate()?;

        let mut regressor_values = Vec::with_capacity(self.regressors.len());
        for regressor in &self.regressors {
            let values = frame.regressor(&regressor.name).ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Future frame has no regressor '{}'",
                    regressor.name
                ))
            })?;
            regressor_values.push(values);
        }

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
        let mut predictions = Vec::with_capacity(frame.len());

        for (i, row) in frame.rows().iter().enumerate() {
            let t = (row.ds - self.start).num_days() as f64 / self.t_scale_days;
            let days = (row.ds - epoch).num_days() as f64;

            let mut additive = 0.0;
            let mut multiplicative = 0.0;

            for season in &self.seasonalities {
                let effect = season.effect_at(days);
                match season.mode {
                    ComponentMode::Additive => additive += effect,
                    ComponentMode::Multiplicative => multiplicative += effect,
                }
            }

            for (regressor, values) in self.regressors.iter().zip(&regressor_values) {
                let effect = regressor.coefficient * (values[i] - regressor.mu) / regressor.std;
                match regressor.mode {
                    ComponentMode::Additive => additive += effect,
                    ComponentMode::Multiplicative => multiplicative += effect,
                }
            }

            let trend = self.trend_at(t) * self.y_scale;
            predictions.push(trend * (1.0 + multiplicative) + additive * self.y_scale);
        }

        Ok(predictions)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

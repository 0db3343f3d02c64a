//! Forecast configuration
//!
//! A [`ForecastConfig`] is built once (defaults, or a TOML file) and handed to
//! the pipeline by value. Nothing in the crate reads process-wide settings.

use crate::error::{ForecastError, Result};
use retail_calendar::QuarterAnchor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Names of the columns an upload must provide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub ds: String,
    pub category: String,
    pub volume: String,
    pub price: String,
    pub deflator: String,
    pub unemployment_rate: String,
    pub is_holiday: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            ds: "ds".to_string(),
            category: "coicop_code".to_string(),
            volume: "volume".to_string(),
            price: "price".to_string(),
            deflator: "deflator".to_string(),
            unemployment_rate: "unemployment_rate".to_string(),
            is_holiday: "is_holiday".to_string(),
        }
    }
}

impl ColumnNames {
    /// All required columns in upload order
    pub fn required(&self) -> [&str; 7] {
        [
            self.ds.as_str(),
            self.category.as_str(),
            self.volume.as_str(),
            self.price.as_str(),
            self.deflator.as_str(),
            self.unemployment_rate.as_str(),
            self.is_holiday.as_str(),
        ]
    }
}

/// Settings for one forecasting deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Directory holding one model artifact per parent category code
    pub model_dir: PathBuf,
    /// Artifact file name prefix, followed by the parent code
    pub artifact_prefix: String,
    /// Artifact file extension, without the dot
    pub artifact_extension: String,
    /// Column names of the upload
    pub columns: ColumnNames,
    /// Quarter convention the models were fitted with
    pub quarter_anchor: QuarterAnchor,
    /// Smallest accepted horizon in quarters
    pub min_horizon: usize,
    /// Largest accepted horizon in quarters
    pub max_horizon: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("saved_models"),
            artifact_prefix: "prophet_model_coicop_".to_string(),
            artifact_extension: "json".to_string(),
            columns: ColumnNames::default(),
            quarter_anchor: QuarterAnchor::Start,
            min_horizon: 2,
            max_horizon: 8,
        }
    }
}

impl ForecastConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ForecastConfig =
            toml::from_str(content).map_err(|e| ForecastError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ForecastError::Config(format!(
                "Cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Same configuration with a different model directory
    pub fn with_model_dir<P: Into<PathBuf>>(mut self, model_dir: P) -> Self {
        self.model_dir = model_dir.into();
        self
    }

    /// Same configuration with a different quarter anchor
    pub fn with_quarter_anchor(mut self, anchor: QuarterAnchor) -> Self {
        self.quarter_anchor = anchor;
        self
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.min_horizon == 0 {
            return Err(ForecastError::Config(
                "min_horizon must be at least 1".to_string(),
            ));
        }

        if self.min_horizon > self.max_horizon {
            return Err(ForecastError::Config(format!(
                "min_horizon ({}) is greater than max_horizon ({})",
                self.min_horizon, self.max_horizon
            )));
        }

        if self.artifact_prefix.is_empty() {
            return Err(ForecastError::Config(
                "artifact_prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Reject horizons outside `min_horizon..=max_horizon`
    pub fn check_horizon(&self, horizon: usize) -> Result<()> {
        if horizon < self.min_horizon || horizon > self.max_horizon {
            return Err(ForecastError::InvalidHorizon(format!(
                "{} quarters requested, expected between {} and {}",
                horizon, self.min_horizon, self.max_horizon
            )));
        }
        Ok(())
    }
}

//! Pre-fitted forecasting models
//!
//! The pipeline only ever sees a [`Predictor`]: something that turns a future
//! covariate frame into one value per row. Fitting happens elsewhere; this
//! module knows how to read the fitted artifacts back.

use crate::error::{ForecastError, Result};
use crate::frame::FutureFrame;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod additive;

pub use additive::{AdditiveModel, ComponentMode, Regressor, Seasonality, Trend};

/// A fitted model able to forecast from a future frame
pub trait Predictor: Debug + Send + Sync {
    /// One predicted value per frame row, in frame order
    fn predict(&self, frame: &FutureFrame) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// A serialized fitted model, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelArtifact {
    Additive(AdditiveModel),
}

impl ModelArtifact {
    /// Parse and validate an artifact from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(text)
            .map_err(|e| ForecastError::DataError(format!("Malformed model artifact: {}", e)))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Serialize the artifact as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ForecastError::DataError(format!("Cannot serialize model: {}", e)))
    }

    /// Check the fitted parameters are internally consistent
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::Additive(model) => model.validate(),
        }
    }

    /// Turn the artifact into a boxed predictor
    pub fn into_predictor(self) -> Box<dyn Predictor> {
        match self {
            ModelArtifact::Additive(model) => Box::new(model),
        }
    }
}

impl From<AdditiveModel> for ModelArtifact {
    fn from(model: AdditiveModel) -> Self {
        ModelArtifact::Additive(model)
    }
}

//! Model registry: parent category code to fitted predictor

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::models::{ModelArtifact, Predictor};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of fitted predictors, one per parent category code
pub trait ModelRegistry {
    /// Load the predictor for `parent_code`
    ///
    /// Fails with [`ForecastError::ModelNotFound`] when no model exists for the
    /// code and with [`ForecastError::ModelLoad`] when one exists but cannot be
    /// used.
    fn load(&self, parent_code: &str) -> Result<Box<dyn Predictor>>;
}

impl<T: ModelRegistry + ?Sized> ModelRegistry for &T {
    fn load(&self, parent_code: &str) -> Result<Box<dyn Predictor>> {
        (**self).load(parent_code)
    }
}

impl<T: ModelRegistry + ?Sized> ModelRegistry for Box<T> {
    fn load(&self, parent_code: &str) -> Result<Box<dyn Predictor>> {
        (**self).load(parent_code)
    }
}

/// Registry reading one JSON artifact per code from a directory
#[derive(Debug, Clone)]
pub struct FileModelRegistry {
    model_dir: PathBuf,
    prefix: String,
    extension: String,
}

impl FileModelRegistry {
    pub fn new<P: Into<PathBuf>>(model_dir: P, prefix: &str, extension: &str) -> Self {
        Self {
            model_dir: model_dir.into(),
            prefix: prefix.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Registry laid out as described by the configuration
    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(
            config.model_dir.clone(),
            &config.artifact_prefix,
            &config.artifact_extension,
        )
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Artifact location for a parent code
    pub fn artifact_path(&self, parent_code: &str) -> PathBuf {
        self.model_dir
            .join(format!("{}{}.{}", self.prefix, parent_code, self.extension))
    }

    /// Parent codes with an artifact in the model directory, sorted
    pub fn available_codes(&self) -> Result<Vec<String>> {
        let suffix = format!(".{}", self.extension);
        let mut codes = Vec::new();

        for entry in fs::read_dir(&self.model_dir)? {
            let file_name = entry?.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(code) = name
                .strip_prefix(self.prefix.as_str())
                .and_then(|rest| rest.strip_suffix(suffix.as_str()))
            {
                if !code.is_empty() {
                    codes.push(code.to_string());
                }
            }
        }

        codes.sort();
        Ok(codes)
    }
}

impl ModelRegistry for FileModelRegistry {
    fn load(&self, parent_code: &str) -> Result<Box<dyn Predictor>> {
        let path = self.artifact_path(parent_code);
        debug!(code = parent_code, path = %path.display(), "loading model artifact");

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ForecastError::ModelNotFound {
                    code: parent_code.to_string(),
                })
            }
            Err(e) => {
                return Err(ForecastError::ModelLoad {
                    code: parent_code.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let artifact = ModelArtifact::from_json(&text).map_err(|e| ForecastError::ModelLoad {
            code: parent_code.to_string(),
            reason: e.to_string(),
        })?;

        Ok(artifact.into_predictor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_path() {
        let registry = FileModelRegistry::new("/models", "prophet_model_coicop_", "json");
        assert_eq!(
            registry.artifact_path("05"),
            PathBuf::from("/models/prophet_model_coicop_05.json")
        );
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let registry = FileModelRegistry::new("/nonexistent/models", "m_", "json");
        let err = registry.load("01").unwrap_err();
        assert!(matches!(err, ForecastError::ModelNotFound { ref code } if code == "01"));
    }
}

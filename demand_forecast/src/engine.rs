//! Forecast engine: run a predictor over a future frame

use crate::error::{ForecastError, Result};
use crate::frame::FutureFrame;
use crate::models::Predictor;
use crate::output::ForecastTable;

/// Predict one category and align the values with the frame timestamps
///
/// The frame is passed to the predictor unchanged. Predictor errors, a value
/// count that differs from the frame length and non-finite values are all
/// reported as [`ForecastError::PredictionFailed`] for `code`.
pub fn predict(predictor: &dyn Predictor, code: &str, frame: &FutureFrame) -> Result<ForecastTable> {
    let failed = |reason: String| ForecastError::PredictionFailed {
        code: code.to_string(),
        reason,
    };

    let values = predictor.predict(frame).map_err(|e| failed(e.to_string()))?;

    if values.len() != frame.len() {
        return Err(failed(format!(
            "{} returned {} values for {} periods",
            predictor.name(),
            values.len(),
            frame.len()
        )));
    }

    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(failed(format!(
            "{} returned a non-finite value for {}",
            predictor.name(),
            frame.rows()[pos].ds
        )));
    }

    ForecastTable::new(code, frame.timestamps(), values)
}

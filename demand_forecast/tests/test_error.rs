use demand_forecast::error::ForecastError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);

    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let calendar_error = retail_calendar::Quarter::new(2022, 7).unwrap_err();
    let forecast_error = ForecastError::from(calendar_error);

    assert!(matches!(forecast_error, ForecastError::DataError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::ModelNotFound {
        code: "11".to_string(),
    };
    assert_eq!(error.to_string(), "No model found for COICOP 11");

    let error = ForecastError::ModelLoad {
        code: "11".to_string(),
        reason: "unexpected end of file".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Failed to load model for COICOP 11: unexpected end of file"
    );

    let error = ForecastError::from(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "permission denied",
    ));
    let error_string = format!("{}", error);

    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}

#[test]
fn test_category_scope() {
    let scoped = [
        ForecastError::ModelNotFound {
            code: "01".to_string(),
        },
        ForecastError::ModelLoad {
            code: "01".to_string(),
            reason: "bad".to_string(),
        },
        ForecastError::PredictionFailed {
            code: "01".to_string(),
            reason: "bad".to_string(),
        },
    ];
    assert!(scoped.iter().all(ForecastError::is_category_scoped));

    let global = [
        ForecastError::Ingestion("Missing required columns".to_string()),
        ForecastError::InvalidHorizon("9".to_string()),
        ForecastError::Config("bad".to_string()),
    ];
    assert!(!global.iter().any(ForecastError::is_category_scoped));
}

//! # Demand Forecast
//!
//! Quarterly retail demand forecasting per COICOP category with pre-fitted
//! models.
//!
//! ## Features
//!
//! - Upload validation (CSV or polars DataFrame) with fail-fast column checks
//! - One fitted model per parent category, loaded from a model directory
//! - Future covariate frames built by carrying the last observation forward
//! - Per-category isolation: a missing or broken model only affects its category
//! - Forecast tables exportable as CSV and as plottable series
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::{FileModelRegistry, ForecastConfig, ForecastPipeline};
//!
//! let config = ForecastConfig::default().with_model_dir("saved_models");
//! let registry = FileModelRegistry::from_config(&config);
//! let pipeline = ForecastPipeline::new(config, registry)?;
//!
//! let report = pipeline.run_csv("upload.csv", 4)?;
//! for (code, outcome) in report.outcomes() {
//!     match outcome {
//!         Ok(table) => println!("{}: {:?}", code, table.series()),
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! # Ok::<(), demand_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod frame;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod registry;

// Re-export commonly used types
pub use crate::config::{ColumnNames, ForecastConfig};
pub use crate::data::{DataLoader, Observation, ObservationTable};
pub use crate::error::{ForecastError, Result};
pub use crate::frame::{build_future_frame, FutureFrame, FutureRow};
pub use crate::models::{ModelArtifact, Predictor};
pub use crate::output::{ForecastRecord, ForecastTable};
pub use crate::pipeline::{ForecastPipeline, PipelineReport};
pub use crate::registry::{FileModelRegistry, ModelRegistry};
pub use retail_calendar::{parent_of, QuarterAnchor};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

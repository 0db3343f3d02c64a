//! # Retail Forecast
//!
//! Workspace facade for quarterly UK retail demand forecasting.
//!
//! - [`retail_calendar`]: COICOP category codes and quarter arithmetic
//! - [`demand_forecast`]: upload validation, model registry, future frames,
//!   forecasting pipeline and output tables
//!
//! ## Example
//!
//! ```
//! use retail_forecast_workspace::prelude::*;
//!
//! assert_eq!(parent_of("05.1"), "05");
//! assert_eq!(category_label("05"), Some("Furnishings & Routine Household Maintenance"));
//! ```

pub use demand_forecast;
pub use retail_calendar;

/// Types most callers need
pub mod prelude {
    pub use demand_forecast::{
        DataLoader, FileModelRegistry, ForecastConfig, ForecastError, ForecastPipeline,
        ForecastTable, ModelRegistry, ObservationTable, PipelineReport, Predictor,
    };
    pub use retail_calendar::{category_label, parent_of, Quarter, QuarterAnchor};
}

//! Forecast tables handed back to callers
//!
//! Column names are part of the contract with downstream consumers:
//! `forecast_quarter` (YYYY-MM-DD) and `forecast_volume`.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Header of the period column
pub const FORECAST_QUARTER_COLUMN: &str = "forecast_quarter";

/// Header of the value column
pub const FORECAST_VOLUME_COLUMN: &str = "forecast_volume";

/// One forecast period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub forecast_quarter: NaiveDate,
    pub forecast_volume: f64,
}

/// Forecast for one parent category
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTable {
    code: String,
    records: Vec<ForecastRecord>,
}

impl ForecastTable {
    /// Create a table from timestamps and values of equal length
    pub fn new(code: &str, timestamps: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Timestamps length ({}) doesn't match values length ({})",
                timestamps.len(),
                values.len()
            )));
        }

        let records = timestamps
            .into_iter()
            .zip(values)
            .map(|(forecast_quarter, forecast_volume)| ForecastRecord {
                forecast_quarter,
                forecast_volume,
            })
            .collect();

        Ok(Self {
            code: code.to_string(),
            records,
        })
    }

    /// Parent category code
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    /// Number of forecast periods
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ordered (timestamp, value) pairs for plotting
    pub fn series(&self) -> Vec<(NaiveDate, f64)> {
        self.records
            .iter()
            .map(|r| (r.forecast_quarter, r.forecast_volume))
            .collect()
    }

    /// File name used when the table is exported on its own
    pub fn export_file_name(&self) -> String {
        format!("forecast_coicop_{}.csv", self.code)
    }

    /// Write the table as CSV with a header row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// The table as CSV text
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ForecastError::CsvError(e.to_string()))
    }

    /// Parse a table previously written with [`ForecastTable::write_csv`]
    pub fn from_csv_reader<R: Read>(code: &str, reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let expected = [FORECAST_QUARTER_COLUMN, FORECAST_VOLUME_COLUMN];
        if headers.iter().collect::<Vec<_>>() != expected {
            return Err(ForecastError::CsvError(format!(
                "Expected columns {:?}, found {:?}",
                expected,
                headers.iter().collect::<Vec<_>>()
            )));
        }

        let records = csv_reader
            .deserialize()
            .collect::<std::result::Result<Vec<ForecastRecord>, csv::Error>>()?;

        Ok(Self {
            code: code.to_string(),
            records,
        })
    }

    /// Project the table into a polars DataFrame
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let quarters: Vec<String> = self
            .records
            .iter()
            .map(|r| r.forecast_quarter.format("%Y-%m-%d").to_string())
            .collect();
        let volumes: Vec<f64> = self.records.iter().map(|r| r.forecast_volume).collect();

        Ok(DataFrame::new(vec![
            Series::new(FORECAST_QUARTER_COLUMN, quarters),
            Series::new(FORECAST_VOLUME_COLUMN, volumes),
        ])?)
    }
}

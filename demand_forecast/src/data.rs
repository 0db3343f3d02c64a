//! Loading and validating uploaded quarterly observations

use crate::config::ColumnNames;
use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Days between 0001-01-01 and 1970-01-01, the polars `Date` epoch
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One category's figures for one quarter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Quarter start date
    pub ds: NaiveDate,
    /// Category code as uploaded, possibly a sub-division such as `05.1`
    pub category_code: String,
    /// Sales volume, the forecast target
    pub volume: f64,
    pub price: f64,
    pub deflator: f64,
    /// Unemployment rate in percent
    pub unemployment_rate: f64,
    pub is_holiday: bool,
}

/// A validated upload: every row carries all required fields
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    observations: Vec<Observation>,
}

/// Data loader for uploaded observation tables
#[derive(Debug)]
pub struct DataLoader;

impl ObservationTable {
    /// Wrap already validated observations
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(ForecastError::Ingestion(
                "Upload contains no observations".to_string(),
            ));
        }

        Ok(Self { observations })
    }

    /// Get the observations in upload order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl DataLoader {
    /// Load observations from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P, columns: &ColumnNames) -> Result<ObservationTable> {
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "reading upload");

        Self::from_reader(file, columns)
    }

    /// Load observations from any CSV byte source
    ///
    /// Column types are inferred from every row. Category codes are always
    /// read as text and the measures as `Float64`, so a late `05.1` or a
    /// decimal volume does not break an otherwise integer column.
    pub fn from_reader<R: Read>(mut reader: R, columns: &ColumnNames) -> Result<ObservationTable> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let dtypes = Self::upload_dtypes(&bytes, columns)?;
        let df = CsvReader::new(Cursor::new(bytes))
            .infer_schema(None)
            .has_header(true)
            .with_dtypes(Some(Arc::new(dtypes)))
            .finish()
            .map_err(|e| ForecastError::Ingestion(format!("Could not read file: {}", e)))?;

        Self::from_dataframe(df, columns)
    }

    /// Fixed dtypes for the required columns present in the header
    ///
    /// Absent columns are left out so that `from_dataframe` can report them.
    fn upload_dtypes(bytes: &[u8], columns: &ColumnNames) -> Result<Schema> {
        let mut header_reader = ::csv::Reader::from_reader(bytes);
        let headers = header_reader
            .headers()
            .map_err(|e| ForecastError::Ingestion(format!("Could not read file: {}", e)))?
            .clone();

        let fixed = [
            (columns.category.as_str(), DataType::Utf8),
            (columns.volume.as_str(), DataType::Float64),
            (columns.price.as_str(), DataType::Float64),
            (columns.deflator.as_str(), DataType::Float64),
            (columns.unemployment_rate.as_str(), DataType::Float64),
        ];

        Ok(fixed
            .into_iter()
            .filter(|(name, _)| headers.iter().any(|h| h == *name))
            .map(|(name, dtype)| Field::new(name, dtype))
            .collect())
    }

    /// Validate an existing DataFrame and convert it to observations
    ///
    /// Columns beyond the required ones are ignored. The whole upload is
    /// rejected if any required column is missing or holds a null.
    pub fn from_dataframe(df: DataFrame, columns: &ColumnNames) -> Result<ObservationTable> {
        Self::check_required_columns(&df, columns)?;

        let dates = Self::column_as_dates(&df, &columns.ds)?;
        let codes = Self::column_as_strings(&df, &columns.category)?;
        let volumes = Self::column_as_f64(&df, &columns.volume)?;
        let prices = Self::column_as_f64(&df, &columns.price)?;
        let deflators = Self::column_as_f64(&df, &columns.deflator)?;
        let unemployment = Self::column_as_f64(&df, &columns.unemployment_rate)?;
        let holidays = Self::column_as_flags(&df, &columns.is_holiday)?;

        let mut observations = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            observations.push(Observation {
                ds: dates[i],
                category_code: codes[i].clone(),
                volume: volumes[i],
                price: prices[i],
                deflator: deflators[i],
                unemployment_rate: unemployment[i],
                is_holiday: holidays[i],
            });
        }

        debug!(rows = observations.len(), "upload validated");
        ObservationTable::new(observations)
    }

    /// Fail with every missing column named
    fn check_required_columns(df: &DataFrame, columns: &ColumnNames) -> Result<()> {
        let present = df.get_column_names();
        let missing: Vec<&str> = columns
            .required()
            .into_iter()
            .filter(|name| !present.contains(name))
            .collect();

        if !missing.is_empty() {
            return Err(ForecastError::Ingestion(format!(
                "Missing required columns: {:?}",
                missing
            )));
        }

        Ok(())
    }

    fn null_error(column_name: &str, row: usize) -> ForecastError {
        ForecastError::Ingestion(format!(
            "Column '{}' has a missing or invalid value at row {}",
            column_name,
            row + 1
        ))
    }

    /// Helper method to get a column as f64 values, rejecting nulls
    fn column_as_f64(df: &DataFrame, column_name: &str) -> Result<Vec<f64>> {
        let col = df.column(column_name)?;
        if !col.dtype().is_numeric() {
            return Err(ForecastError::Ingestion(format!(
                "Column '{}' must be numeric, found {}",
                column_name,
                col.dtype()
            )));
        }

        let cast = col.cast(&DataType::Float64)?;
        cast.f64()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| value.ok_or_else(|| Self::null_error(column_name, row)))
            .collect()
    }

    /// Helper method to get a column as text, whatever type polars inferred
    fn column_as_strings(df: &DataFrame, column_name: &str) -> Result<Vec<String>> {
        let col = df.column(column_name)?;
        let cast = col.cast(&DataType::Utf8)?;
        cast.utf8()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value
                    .map(|v| v.to_string())
                    .ok_or_else(|| Self::null_error(column_name, row))
            })
            .collect()
    }

    /// Helper method to get a 0/1 or boolean column as flags
    fn column_as_flags(df: &DataFrame, column_name: &str) -> Result<Vec<bool>> {
        let col = df.column(column_name)?;
        if col.dtype() == &DataType::Boolean {
            return col
                .bool()?
                .into_iter()
                .enumerate()
                .map(|(row, value)| value.ok_or_else(|| Self::null_error(column_name, row)))
                .collect();
        }

        Ok(Self::column_as_f64(df, column_name)?
            .into_iter()
            .map(|v| v != 0.0)
            .collect())
    }

    /// Helper method to get a column as calendar dates
    fn column_as_dates(df: &DataFrame, column_name: &str) -> Result<Vec<NaiveDate>> {
        let col = df.column(column_name)?;

        match col.dtype() {
            DataType::Date => col
                .date()?
                .into_iter()
                .enumerate()
                .map(|(row, days)| {
                    days.and_then(|d| {
                        NaiveDate::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE)
                    })
                    .ok_or_else(|| Self::null_error(column_name, row))
                })
                .collect(),
            DataType::Datetime(unit, _) => {
                let per_second: i64 = match unit {
                    TimeUnit::Nanoseconds => 1_000_000_000,
                    TimeUnit::Microseconds => 1_000_000,
                    TimeUnit::Milliseconds => 1_000,
                };
                col.datetime()?
                    .into_iter()
                    .enumerate()
                    .map(|(row, ts)| {
                        ts.and_then(|ts| {
                            DateTime::from_timestamp(ts.div_euclid(per_second), 0)
                                .map(|dt| dt.date_naive())
                        })
                        .ok_or_else(|| Self::null_error(column_name, row))
                    })
                    .collect()
            }
            _ => Self::column_as_strings(df, column_name)?
                .iter()
                .enumerate()
                .map(|(row, text)| {
                    parse_date(text).ok_or_else(|| {
                        ForecastError::Ingestion(format!(
                            "Column '{}' has an unparseable date '{}' at row {}",
                            column_name,
                            text,
                            row + 1
                        ))
                    })
                })
                .collect(),
        }
    }
}

/// Parse the date formats accepted in uploads
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

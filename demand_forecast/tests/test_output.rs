use chrono::NaiveDate;
use demand_forecast::output::{FORECAST_QUARTER_COLUMN, FORECAST_VOLUME_COLUMN};
use demand_forecast::{ForecastError, ForecastTable};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_table() -> ForecastTable {
    ForecastTable::new(
        "05",
        vec![date(2022, 10, 1), date(2023, 1, 1), date(2023, 4, 1)],
        vec![18812.345678901, 18790.5, 0.1 + 0.2],
    )
    .unwrap()
}

#[test]
fn test_csv_layout() {
    let csv = create_table().to_csv_string().unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "forecast_quarter,forecast_volume");
    assert_eq!(lines[2], "2023-01-01,18790.5");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_csv_round_trip() {
    let table = create_table();
    let csv = table.to_csv_string().unwrap();

    let parsed = ForecastTable::from_csv_reader("05", csv.as_bytes()).unwrap();

    assert_eq!(parsed.series(), table.series());
    assert_eq!(parsed, table);
}

#[test]
fn test_csv_with_unexpected_header() {
    let csv = "ds,yhat\n2022-10-01,1.0\n";
    let err = ForecastTable::from_csv_reader("05", csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ForecastError::CsvError(_)));
}

#[test]
fn test_mismatched_lengths() {
    let result = ForecastTable::new("01", vec![date(2022, 10, 1)], vec![1.0, 2.0]);
    assert!(result.is_err());
}

#[test]
fn test_export_file_name() {
    assert_eq!(create_table().export_file_name(), "forecast_coicop_05.csv");
}

#[test]
fn test_to_dataframe() {
    let df = create_table().to_dataframe().unwrap();

    assert_eq!(df.height(), 3);
    assert_eq!(
        df.get_column_names(),
        vec![FORECAST_QUARTER_COLUMN, FORECAST_VOLUME_COLUMN]
    );
}

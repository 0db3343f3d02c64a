use chrono::NaiveDate;
use demand_forecast::data::{DataLoader, ObservationTable};
use demand_forecast::{parent_of, ColumnNames, ForecastError};
use polars::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "ds,coicop_code,volume,price,deflator,unemployment_rate,is_holiday";

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_data_loader_from_csv() {
    let file = csv_file(&[
        HEADER,
        "2022-01-01,05,18769,11000.0,101.5,4.1,0",
        "2022-04-01,05,18700,11120.0,100.9,4.2,0",
        "2022-07-01,05,18800,11230.0,101.3,4.0,1",
    ]);

    let table = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap();

    assert_eq!(table.len(), 3);
    assert!(!table.is_empty());

    let last = &table.observations()[2];
    assert_eq!(last.ds, NaiveDate::from_ymd_opt(2022, 7, 1).unwrap());
    assert_eq!(parent_of(&last.category_code), "05");
    assert_eq!(last.volume, 18800.0);
    assert_eq!(last.price, 11230.0);
    assert_eq!(last.deflator, 101.3);
    assert_eq!(last.unemployment_rate, 4.0);
    assert!(last.is_holiday);
    assert!(!table.observations()[0].is_holiday);
}

#[test]
fn test_sub_codes_survive_ingestion() {
    let file = csv_file(&[
        HEADER,
        "2022-01-01,05.1,100,10.0,101.5,4.1,0",
        "2022-01-01,01,200,20.0,101.5,4.1,0",
    ]);

    let table = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap();
    let parents: Vec<String> = table
        .observations()
        .iter()
        .map(|obs| parent_of(&obs.category_code))
        .collect();

    assert_eq!(parents, vec!["05".to_string(), "01".to_string()]);
}

// Upload longer than any schema sample, with `late` rows at the end
fn long_upload(rows: usize, late: usize, early_row: &str, late_row: &str) -> String {
    let mut data = format!("{}\n", HEADER);
    for i in 0..rows {
        let row = if i < rows - late { early_row } else { late_row };
        data.push_str(row);
        data.push('\n');
    }
    data
}

#[test]
fn test_late_sub_code_is_accepted() {
    let data = long_upload(
        120,
        10,
        "2022-01-01,05,18769,11000.0,101.5,4.1,0",
        "2022-01-01,05.1,18769,11000.0,101.5,4.1,0",
    );

    let table = DataLoader::from_reader(data.as_bytes(), &ColumnNames::default()).unwrap();

    assert_eq!(table.len(), 120);
    assert_eq!(table.observations()[0].category_code, "05");
    assert_eq!(table.observations()[119].category_code, "05.1");
    assert!(table
        .observations()
        .iter()
        .all(|obs| parent_of(&obs.category_code) == "05"));
}

#[test]
fn test_late_decimal_volume_is_accepted() {
    let data = long_upload(
        120,
        1,
        "2022-01-01,05,18769,11000,101.5,4.1,0",
        "2022-01-01,05,18769.5,11000.25,101.5,4.1,0",
    );

    let table = DataLoader::from_reader(data.as_bytes(), &ColumnNames::default()).unwrap();

    assert_eq!(table.observations()[0].volume, 18769.0);
    assert_eq!(table.observations()[119].volume, 18769.5);
    assert_eq!(table.observations()[119].price, 11000.25);
}

#[test]
fn test_missing_column_rejects_upload() {
    let file = csv_file(&[
        "ds,coicop_code,volume,price,deflator,is_holiday",
        "2022-01-01,05,18769,11000.0,101.5,0",
    ]);

    let err = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap_err();
    match err {
        ForecastError::Ingestion(msg) => assert!(msg.contains("unemployment_rate")),
        other => panic!("Expected Ingestion error, got {:?}", other),
    }
}

#[test]
fn test_null_value_rejects_upload() {
    let file = csv_file(&[
        HEADER,
        "2022-01-01,05,18769,11000.0,101.5,4.1,0",
        "2022-04-01,05,,11120.0,100.9,4.2,0",
    ]);

    let err = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap_err();
    match err {
        ForecastError::Ingestion(msg) => {
            assert!(msg.contains("volume"));
            assert!(msg.contains("row 2"));
        }
        other => panic!("Expected Ingestion error, got {:?}", other),
    }
}

#[test]
fn test_bad_date_rejects_upload() {
    let file = csv_file(&[HEADER, "last spring,05,18769,11000.0,101.5,4.1,0"]);

    let err = DataLoader::from_csv(file.path(), &ColumnNames::default()).unwrap_err();
    assert!(matches!(err, ForecastError::Ingestion(_)));
}

#[test]
fn test_extra_columns_are_ignored() {
    let data = format!(
        "{},region\n2022-01-01,03,500,12.5,99.0,3.9,0,north\n",
        HEADER
    );

    let table = DataLoader::from_reader(data.as_bytes(), &ColumnNames::default()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(parent_of(&table.observations()[0].category_code), "03");
}

#[test]
fn test_header_only_upload_is_rejected() {
    let data = format!("{}\n", HEADER);
    let result = DataLoader::from_reader(data.as_bytes(), &ColumnNames::default());
    assert!(result.is_err());
}

#[test]
fn test_data_loader_error_handling() {
    let result = DataLoader::from_csv("nonexistent_file.csv", &ColumnNames::default());
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}

#[test]
fn test_from_dataframe_with_custom_names() {
    let columns = ColumnNames {
        ds: "quarter".to_string(),
        category: "division".to_string(),
        ..ColumnNames::default()
    };

    let df = DataFrame::new(vec![
        Series::new("quarter", vec!["2023-01-01", "2023-04-01"]),
        Series::new("division", vec!["7", "07.2"]),
        Series::new("volume", vec![10.0, 11.0]),
        Series::new("price", vec![1.0, 1.1]),
        Series::new("deflator", vec![100.0, 100.5]),
        Series::new("unemployment_rate", vec![4.0, 4.1]),
        Series::new("is_holiday", vec![false, true]),
    ])
    .unwrap();

    let table: ObservationTable = DataLoader::from_dataframe(df, &columns).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.observations()[1].category_code, "07.2");
    assert!(table.observations()[1].is_holiday);
    assert_eq!(
        table.observations()[1].ds,
        NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
    );
}

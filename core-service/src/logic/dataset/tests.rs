use super::{parse_timestamp, DatasetError, HistoricalDataset};
use chrono::Timelike;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE_CSV: &str = "\
timestamp,battery_temp,ambient_temp,device_state,measured_health_impact
2025-07-01 08:15:00,31.2,24.0,idle,0.12
2025-07-01 13:40:00,44.8,29.5,charging,0.58
2025-07-01T21:05:00,38.1,26.0,discharging,0.31
";

#[test]
fn test_load_from_reader() {
    let dataset = HistoricalDataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.skipped(), 0);
    assert_eq!(dataset.records()[0].hour(), 8);
    assert_eq!(dataset.records()[2].hour(), 21);
    assert_eq!(dataset.records()[1].device_state, "charging");
    assert_eq!(dataset.targets(), vec![0.12, 0.58, 0.31]);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

    let dataset = HistoricalDataset::load(file.path()).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.source().map(|p| p.as_path()), Some(file.path()));
}

#[test]
fn test_missing_file_is_not_found() {
    let err = HistoricalDataset::load("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, DatasetError::NotFound(_)));
}

#[test]
fn test_column_order_and_extra_columns_are_free() {
    let csv = "\
device_state,measured_health_impact,note,timestamp,ambient_temp,battery_temp
idle,0.2,ok,2025-07-02 03:00:00,20.0,28.0
";
    let dataset = HistoricalDataset::from_reader(csv.as_bytes()).unwrap();
    let record = &dataset.records()[0];

    assert_eq!(record.battery_temp, 28.0);
    assert_eq!(record.ambient_temp, 20.0);
    assert_eq!(record.hour(), 3);
}

#[test]
fn test_missing_columns_reported() {
    let csv = "timestamp,battery_temp,device_state\n2025-07-01 08:00:00,30.0,idle\n";
    let err = HistoricalDataset::from_reader(csv.as_bytes()).unwrap_err();

    match err {
        DatasetError::MissingColumns(cols) => {
            assert_eq!(cols, vec!["ambient_temp", "measured_health_impact"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bad_rows_are_skipped() {
    let csv = "\
timestamp,battery_temp,ambient_temp,device_state,measured_health_impact
2025-07-01 08:00:00,30.0,22.0,idle,0.1
not-a-date,30.0,22.0,idle,0.1
2025-07-01 09:00:00,hot,22.0,idle,0.1
2025-07-01 10:00:00,30.0,22.0,idle,NaN
2025-07-01 11:00:00,33.0,23.0,charging,0.4
";
    let dataset = HistoricalDataset::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.skipped(), 3);
}

#[test]
fn test_zero_usable_rows_is_error() {
    let csv = "\
timestamp,battery_temp,ambient_temp,device_state,measured_health_impact
garbage,1,2,idle,0.1
";
    let err = HistoricalDataset::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DatasetError::NoUsableRows { skipped: 1 }));

    let header_only = "timestamp,battery_temp,ambient_temp,device_state,measured_health_impact\n";
    let err = HistoricalDataset::from_reader(header_only.as_bytes()).unwrap_err();
    assert!(matches!(err, DatasetError::NoUsableRows { skipped: 0 }));
}

#[test]
fn test_from_records_rejects_empty() {
    assert!(HistoricalDataset::from_records(Vec::new()).is_err());
}

#[test]
fn test_parse_timestamp_formats() {
    let cases = [
        ("2025-07-27 14:03:11", 14),
        ("2025-07-27 14:03:11.250", 14),
        ("2025-07-27T09:00:00", 9),
        ("2025-07-27 23:59", 23),
        ("2025-07-27T05:30:00+02:00", 5),
        ("2025-07-27", 0),
    ];

    for (raw, hour) in cases {
        let ts = parse_timestamp(raw).unwrap_or_else(|| panic!("failed to parse {raw}"));
        assert_eq!(ts.hour(), hour, "{raw}");
    }

    assert!(parse_timestamp("27/07/2025").is_none());
}

use core_types::Value;
use ingest::{CsvLoader, IngestError, LoadReport};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;

const EXPORT: &str = "\
SYMBOL,SERIES,Adjusted_52_Week_High,52_Week_High_Date,Adjusted_52_Week_Low,52_Week_Low_DT
ABC,EQ,120.5,12-Mar-2024,100,01-Jun-2023
XYZ,EQ,-,-,45.2,01-Jun-2023
";

#[test]
fn cells_are_loaded_as_trimmed_text() {
    let loaded = CsvLoader::new().from_reader(EXPORT.as_bytes()).expect("loads");

    assert_eq!(loaded.table.columns().len(), 6);
    assert_eq!(loaded.table.len(), 2);
    assert_eq!(
        loaded.table.value(0, "Adjusted_52_Week_High"),
        Some(&Value::from("120.5"))
    );
    assert_eq!(
        loaded.table.value(1, "Adjusted_52_Week_High"),
        Some(&Value::from("-"))
    );
    assert_eq!(
        loaded.report,
        LoadReport {
            rows_loaded: 2,
            skipped_lines: vec![],
        }
    );
}

#[test]
fn over_long_lines_are_skipped_and_short_lines_padded() {
    let input = "SYMBOL,HIGH,LOW\nA, 10 ,8\nB,1\nC,3,2,extra\nD,5,4\n";

    let loaded = CsvLoader::new().from_reader(input.as_bytes()).expect("loads");

    assert_eq!(loaded.report.skipped_lines, vec![4]);
    assert_eq!(loaded.report.rows_loaded, 3);
    assert_eq!(loaded.table.value(0, "HIGH"), Some(&Value::from("10")));
    assert_eq!(loaded.table.value(1, "HIGH"), Some(&Value::from("1")));
    assert_eq!(loaded.table.value(1, "LOW"), Some(&Value::Absent));
    assert_eq!(loaded.table.value(2, "SYMBOL"), Some(&Value::from("D")));
}

#[test]
fn row_missing_its_trailing_sector_is_kept() {
    let input = "\
SYMBOL,Adjusted_52_Week_High,Adjusted_52_Week_Low,SECTOR
AAA,110,100,Tech
BBB,120,100
";

    let loaded = CsvLoader::new().from_reader(input.as_bytes()).expect("loads");

    assert_eq!(
        loaded.report,
        LoadReport {
            rows_loaded: 2,
            skipped_lines: vec![],
        }
    );
    assert_eq!(loaded.table.value(1, "SYMBOL"), Some(&Value::from("BBB")));
    assert_eq!(
        loaded.table.value(1, "Adjusted_52_Week_High"),
        Some(&Value::from("120"))
    );
    assert_eq!(loaded.table.value(1, "SECTOR"), Some(&Value::Absent));
}

#[test]
fn byte_order_mark_is_stripped_from_the_header() {
    let input = "\u{feff}SYMBOL,HIGH,LOW\nA,10,8\n";

    let loaded = CsvLoader::new().from_reader(input.as_bytes()).expect("loads");

    assert!(loaded.table.has_column("SYMBOL"));
}

#[test]
fn custom_delimiter() {
    let input = "SYMBOL;HIGH;LOW\nA;10,5;8\n";

    let loaded = CsvLoader::new()
        .with_delimiter(b';')
        .from_reader(input.as_bytes())
        .expect("loads");

    assert_eq!(loaded.table.value(0, "HIGH"), Some(&Value::from("10,5")));
}

#[test]
fn empty_input_has_no_header() {
    let err = CsvLoader::new().from_reader("".as_bytes()).unwrap_err();
    assert!(matches!(err, IngestError::MissingHeader));
}

#[test]
fn csv_loader_rejects_spreadsheets_by_extension() {
    let err = CsvLoader::new().load("52_week.XLSX").unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(ref ext) if ext == "xlsx"));
}

#[test]
fn unknown_extensions_are_unsupported() {
    let err = ingest::load("52_week.parquet").unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(ref ext) if ext == "parquet"));
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn first_worksheet_of_a_workbook_is_loaded_as_text() {
    let loaded = ingest::load(fixture("52_week.xlsx")).expect("loads");

    assert_eq!(
        loaded.table.columns(),
        ["SYMBOL", "Adjusted_52_Week_High", "Adjusted_52_Week_Low", "SECTOR"]
    );
    assert_eq!(
        loaded.report,
        LoadReport {
            rows_loaded: 2,
            skipped_lines: vec![],
        }
    );
    assert_eq!(loaded.table.value(0, "SYMBOL"), Some(&Value::from("ABC")));
    assert_eq!(
        loaded.table.value(0, "Adjusted_52_Week_High"),
        Some(&Value::from("120.5"))
    );
    assert_eq!(
        loaded.table.value(0, "Adjusted_52_Week_Low"),
        Some(&Value::from("100"))
    );
    assert_eq!(
        loaded.table.value(1, "Adjusted_52_Week_High"),
        Some(&Value::from("-"))
    );
    assert_eq!(loaded.table.value(1, "SECTOR"), Some(&Value::Absent));
}

#[test]
fn missing_workbook_is_a_workbook_error() {
    let err = ingest::load("/definitely/not/here/52_week.xlsx").unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = CsvLoader::new()
        .load("/definitely/not/here/export.csv")
        .unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

#[test]
fn loads_from_disk() {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    file.write_all(EXPORT.as_bytes()).expect("write export");

    let loaded = CsvLoader::new().load(file.path()).expect("loads");

    assert_eq!(loaded.table.len(), 2);
}

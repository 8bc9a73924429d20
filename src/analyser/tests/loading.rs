use super::*;
use crate::error::AnalyzerError;
use std::path::PathBuf;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_csv_load_counts_rows_and_infers_types() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "sample_data.csv", SAMPLE_CSV);

    let analyzer = Analyzer::new(&path)?;
    assert_eq!(analyzer.source_name(), "sample_data.csv");
    assert_eq!(analyzer.row_count(), 10);

    let df = analyzer.frame();
    assert_eq!(df.column("sales")?.dtype(), &DataType::Int64);
    assert_eq!(df.column("satisfaction")?.dtype(), &DataType::Float64);
    assert_eq!(df.column("customer_type")?.dtype(), &DataType::String);
    Ok(())
}

#[test]
fn test_extension_match_ignores_case() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "SAMPLE.CSV", SAMPLE_CSV);

    assert_eq!(SourceFormat::from_path(&path)?, SourceFormat::Tabular);
    assert_eq!(Analyzer::new(&path)?.row_count(), 10);
    Ok(())
}

#[test]
fn test_txt_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "notes.txt", SAMPLE_CSV);

    match Analyzer::new(&path) {
        Err(AnalyzerError::UnsupportedFormat(ext)) => assert_eq!(ext, "txt"),
        Err(other) => panic!("expected UnsupportedFormat, got {other}"),
        Ok(_) => panic!("a .txt file must not load"),
    }
}

#[test]
fn test_missing_extension_is_rejected() {
    let err = SourceFormat::from_path(std::path::Path::new("data")).unwrap_err();
    assert!(matches!(err, AnalyzerError::UnsupportedFormat(ref ext) if ext.is_empty()));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Analyzer::new(dir.path().join("absent.csv")).err().unwrap();
    assert!(matches!(err, AnalyzerError::Io { .. }), "got {err}");
}

#[test]
fn test_json_record_array() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "records.json",
        r#"[
            {"sales": 100, "customer_type": "A", "satisfaction": 4.5},
            {"sales": 150, "customer_type": "B", "satisfaction": 3.8},
            {"sales": 200, "customer_type": "A", "satisfaction": 4.2}
        ]"#,
    );

    let analyzer = Analyzer::new(&path)?;
    assert_eq!(analyzer.row_count(), 3);
    assert_eq!(
        analyzer.column_names(),
        vec!["sales", "customer_type", "satisfaction"]
    );
    let stats = analyzer.generate_summary_statistics()?;
    assert_eq!(stats.column_names(), vec!["sales", "satisfaction"]);
    Ok(())
}

#[test]
fn test_json_column_object() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "columns.json",
        r#"{"sales": [100, 150, 200, 120], "customer_type": ["A", "B", "A", "C"]}"#,
    );

    let analyzer = Analyzer::new(&path)?;
    assert_eq!(analyzer.row_count(), 4);
    assert_eq!(analyzer.column_names(), vec!["sales", "customer_type"]);
    assert_eq!(
        analyzer.analyze_categorical_data("customer_type")?.get("A"),
        Some(2)
    );
    Ok(())
}

#[test]
fn test_json_index_keyed_columns_follow_index_order() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "indexed.json",
        r#"{"sales": {"10": 300, "2": 200, "1": 100}}"#,
    );

    let analyzer = Analyzer::new(&path)?;
    let sales: Vec<Option<i64>> = analyzer
        .frame()
        .column("sales")?
        .as_materialized_series()
        .i64()?
        .into_iter()
        .collect();
    assert_eq!(sales, vec![Some(100), Some(200), Some(300)]);
    Ok(())
}

#[test]
fn test_malformed_json_fails_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "broken.json", r#"[{"sales": 1},"#);

    let err = Analyzer::new(&path).err().unwrap();
    assert!(matches!(err, AnalyzerError::Json(_)), "got {err}");
}

#[test]
fn test_scalar_json_is_rejected() {
    let err = crate::analyser::io::read_json_records(b"42".to_vec()).unwrap_err();
    assert!(matches!(err, AnalyzerError::Json(_)));
}

#[test]
fn test_save_csv_round_trip_keeps_shape() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.csv");
    let mut df = sample_frame();

    crate::analyser::io::save_csv(&mut df, &path)?;
    let reloaded = Analyzer::new(&path)?;
    assert_eq!(reloaded.row_count(), 10);
    assert_eq!(reloaded.column_names(), sample_analyzer().column_names());
    Ok(())
}

#[test]
fn test_late_decimal_does_not_break_integer_guess() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let mut text = String::from("amount\n");
    for i in 0..10_050 {
        text.push_str(&format!("{i}\n"));
    }
    text.push_str("1.5\n");
    let path = write_file(&dir, "long.csv", &text);

    let analyzer = Analyzer::new(&path)?;
    assert_eq!(analyzer.row_count(), 10_051);
    assert_eq!(analyzer.frame().column("amount")?.dtype(), &DataType::Float64);

    let stats = analyzer.generate_summary_statistics()?;
    assert_eq!(stats.total_rows, 10_051);
    assert_eq!(stats.get("amount").unwrap().max, 10_049.0);
    Ok(())
}

#[test]
fn test_empty_csv_column_is_summarised_as_nan() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "gaps.csv", "a,b\n1,\n2,\n3,\n");

    let analyzer = Analyzer::new(&path)?;
    assert_eq!(analyzer.frame().column("b")?.dtype(), &DataType::Float64);

    let stats = analyzer.generate_summary_statistics()?;
    assert_eq!(stats.column_names(), vec!["a", "b"]);
    let b = stats.get("b").unwrap();
    assert!(b.mean.is_nan() && b.median.is_nan() && b.std.is_nan());
    assert!(b.min.is_nan() && b.max.is_nan());
    Ok(())
}

#[test]
fn test_directory_with_csv_name_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folder.csv");
    std::fs::create_dir(&path).unwrap();

    let err = Analyzer::new(&path).err().unwrap();
    assert!(matches!(err, AnalyzerError::Io { .. }), "got {err}");
}

#[test]
fn test_reader_io_failure_stays_io_and_names_path() {
    let path = std::path::Path::new("locked.csv");
    let polars_err = PolarsError::from(std::io::Error::from(
        std::io::ErrorKind::PermissionDenied,
    ));

    match crate::analyser::io::read_error(path, polars_err) {
        AnalyzerError::Io { path: p, source } => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected Io, got {other}"),
    }

    let parse_err = PolarsError::ComputeError("bad".into());
    assert!(matches!(
        crate::analyser::io::read_error(path, parse_err),
        AnalyzerError::Data(_)
    ));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name_is_kept_lossily() {
    use std::os::unix::ffi::OsStrExt as _;

    let name = std::ffi::OsStr::from_bytes(b"sales\xff.csv");
    let path = std::path::Path::new("/data").join(name);
    assert_eq!(display_name(&path), "sales\u{FFFD}.csv");
    assert_eq!(display_name(std::path::Path::new("/")), "Unknown");
}

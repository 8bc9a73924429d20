//! Property-based tests for summary statistics and frequency tables.
//!
//! - For any numeric column with at least one value:
//!   min <= mean <= max and min <= median <= max
//! - total_rows always equals the number of rows loaded, including rows
//!   whose values are missing
//! - Frequency counts are non-increasing and add up to the non-missing
//!   values

#![expect(clippy::unwrap_used, clippy::indexing_slicing)]

use polars::prelude::*;
use proptest::prelude::*;
use tabscope::analyser::Analyzer;
use tabscope::config::Settings;

fn analyzer_for(df: DataFrame) -> Analyzer {
    Analyzer::from_frame("generated.csv", df, Settings::default())
}

proptest! {
    #[test]
    fn test_mean_and_median_lie_within_extrema(
        values in prop::collection::vec(prop::option::weighted(0.8, -1.0e6..1.0e6f64), 1..200)
    ) {
        prop_assume!(values.iter().any(Option::is_some));
        let df = df!("value" => &values).unwrap();
        let stats = analyzer_for(df).generate_summary_statistics().unwrap();
        let s = stats.get("value").unwrap();

        let eps = 1e-6 * s.max.abs().max(s.min.abs()).max(1.0);
        prop_assert!(s.min <= s.mean + eps && s.mean <= s.max + eps);
        prop_assert!(s.min <= s.median && s.median <= s.max);
        prop_assert_eq!(stats.total_rows, values.len());
    }

    #[test]
    fn test_integer_columns_report_exact_extrema(
        values in prop::collection::vec(-10_000i64..10_000, 1..200)
    ) {
        let df = df!("count" => &values).unwrap();
        let stats = analyzer_for(df).generate_summary_statistics().unwrap();
        let s = stats.get("count").unwrap();

        prop_assert_eq!(s.min, *values.iter().min().unwrap() as f64);
        prop_assert_eq!(s.max, *values.iter().max().unwrap() as f64);
    }

    #[test]
    fn test_csv_row_count_is_preserved(
        rows in prop::collection::vec((0i64..1000, "[a-d]"), 1..100)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let mut text = String::from("amount,label\n");
        for (amount, label) in &rows {
            text.push_str(&format!("{amount},{label}\n"));
        }
        std::fs::write(&path, text).unwrap();

        let stats = Analyzer::new(&path).unwrap().generate_summary_statistics().unwrap();
        prop_assert_eq!(stats.total_rows, rows.len());
    }

    #[test]
    fn test_frequency_counts_are_sorted_and_complete(
        labels in prop::collection::vec(prop::option::weighted(0.9, "[a-e]"), 0..150)
    ) {
        let df = df!("label" => &labels).unwrap();
        let table = analyzer_for(df).analyze_categorical_data("label").unwrap();

        let counts: Vec<usize> = table.iter().map(|e| e.count).collect();
        prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        prop_assert_eq!(table.total(), labels.iter().flatten().count());
    }
}

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

/// Descriptive statistics for one numeric column.
///
/// All figures ignore missing values. A column without any value yields
/// NaN throughout; NaN is written to JSON as `null` and read back as NaN.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    #[serde(deserialize_with = "nullable_f64")]
    pub mean: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub median: f64,
    /// Sample standard deviation (divisor n - 1)
    #[serde(deserialize_with = "nullable_f64")]
    pub std: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub min: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub max: f64,
}

fn nullable_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryStatistics {
    pub total_rows: usize,
    /// Numeric columns in dataset order
    pub column_stats: Vec<(String, ColumnStatistics)>,
}

impl SummaryStatistics {
    pub fn get(&self, column: &str) -> Option<&ColumnStatistics> {
        self.column_stats
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, stats)| stats)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.column_stats.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.column_stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_stats.is_empty()
    }
}

/// Only 64-bit integer and 64-bit float columns are summarised.
pub fn is_summarised_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Int64 | DataType::Float64)
}

pub fn summary_statistics(df: &DataFrame) -> Result<SummaryStatistics> {
    let mut column_stats = Vec::new();

    for col in df.get_columns() {
        if !is_summarised_dtype(col.dtype()) {
            continue;
        }
        let stats = column_statistics(col)?;
        tracing::debug!("Column '{}': {stats:?}", col.name());
        column_stats.push((col.name().to_string(), stats));
    }

    Ok(SummaryStatistics {
        total_rows: df.height(),
        column_stats,
    })
}

pub fn column_statistics(col: &Column) -> Result<ColumnStatistics> {
    let series = col.as_materialized_series().cast(&DataType::Float64)?;
    // NaN counts as missing, same as null.
    let ca: Float64Chunked = series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();

    Ok(ColumnStatistics {
        mean: ca.mean().unwrap_or(f64::NAN),
        median: ca.median().unwrap_or(f64::NAN),
        std: ca.std(1).unwrap_or(f64::NAN),
        min: ca.min().unwrap_or(f64::NAN),
        max: ca.max().unwrap_or(f64::NAN),
    })
}

use crate::error::{AnalyzerError, Result};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Occurrence counts for one column, most frequent first.
///
/// Values with equal counts keep the order in which they first appear in
/// the data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    column: String,
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-missing values tabulated.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyEntry;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Looks a column up by name, mapping absence to [`AnalyzerError::ColumnNotFound`].
pub fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| AnalyzerError::ColumnNotFound(name.to_owned()))
}

pub fn frequency_table(df: &DataFrame, column_name: &str) -> Result<FrequencyTable> {
    let col = column(df, column_name)?;
    let series = col.as_materialized_series().cast(&DataType::String)?;
    let ca = series.str()?;

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<FrequencyEntry> = Vec::new();
    for value in ca.into_iter().flatten() {
        match positions.get(value).and_then(|&i| entries.get_mut(i)) {
            Some(entry) => entry.count += 1,
            None => {
                positions.insert(value, entries.len());
                entries.push(FrequencyEntry {
                    value: value.to_owned(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort: ties stay in first-seen order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    tracing::debug!(
        "Column '{column_name}': {} distinct values",
        entries.len()
    );
    Ok(FrequencyTable {
        column: column_name.to_owned(),
        entries,
    })
}

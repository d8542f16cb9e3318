//! Columnar-to-row conversion.

use chrono::Utc;
use tracing::warn;

use super::envelope::{QueryMetadata, Row};
use crate::platform::ColumnarResult;

/// Converts a columnar result into rows.
///
/// Row `i` maps every column name to that column's value at position `i`,
/// in column order. Columns of unequal length are paired positionally, so
/// the output stops at the shortest column. A repeated column name keeps its
/// first position and takes the value of its last occurrence.
pub fn to_rows(result: &ColumnarResult) -> Vec<Row> {
    let num_rows = result.num_rows();

    if result.is_ragged() {
        warn!(
            "Result columns have unequal lengths, truncating to {} rows",
            num_rows
        );
    }

    (0..num_rows)
        .map(|i| {
            result
                .iter()
                .map(|(field, values)| (field.name.clone(), values[i].to_json()))
                .collect()
        })
        .collect()
}

/// Builds success metadata, stamped with the current time.
pub fn build_metadata(result: &ColumnarResult, row_count: usize, query: &str) -> QueryMetadata {
    QueryMetadata {
        row_count,
        column_names: result
            .column_names()
            .into_iter()
            .map(String::from)
            .collect(),
        column_types: result
            .column_types()
            .into_iter()
            .map(|(_, data_type)| data_type.to_string())
            .collect(),
        query_time: Utc::now(),
        query: query.to_string(),
    }
}

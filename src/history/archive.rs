use crate::history::error::HistoryError;
use crate::history::frame::rows_to_frame;
use crate::types::time_row::TimeRow;
use chrono::NaiveDateTime;
use polars::prelude::DataFrame;
use std::collections::BTreeMap;

/// Merges `new_rows` on top of `existing`.
///
/// Each timestamp appears once in the result. When a timestamp occurs in both
/// inputs the whole row from `new_rows` is kept, and when it occurs several
/// times within one input the last occurrence wins. The result is sorted by
/// time, ascending.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use yr_to_polars::{merge_rows, TimeRow};
///
/// let t = |h| NaiveDate::from_ymd_opt(2021, 12, 25).unwrap().and_hms_opt(h, 0, 0).unwrap();
/// let old = vec![TimeRow::new(t(1)).with_field("v", 1.0), TimeRow::new(t(2)).with_field("v", 2.0)];
/// let new = vec![TimeRow::new(t(2)).with_field("v", 20.0), TimeRow::new(t(3)).with_field("v", 30.0)];
///
/// let merged = merge_rows(old, new);
/// let values: Vec<_> = merged.iter().map(|r| r.get("v").and_then(|v| v.as_f64())).collect();
/// assert_eq!(values, vec![Some(1.0), Some(20.0), Some(30.0)]);
/// ```
pub fn merge_rows(existing: Vec<TimeRow>, new_rows: Vec<TimeRow>) -> Vec<TimeRow> {
    let mut by_time: BTreeMap<NaiveDateTime, TimeRow> = BTreeMap::new();
    for row in existing.into_iter().chain(new_rows) {
        by_time.insert(row.time, row);
    }
    by_time.into_values().collect()
}

/// All rows ever recorded for one resource identifier, one per timestamp,
/// sorted ascending by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryArchive {
    rows: Vec<TimeRow>,
}

impl HistoryArchive {
    /// Builds an archive from rows in any order, deduplicating by timestamp.
    pub fn from_rows(rows: Vec<TimeRow>) -> Self {
        Self {
            rows: merge_rows(Vec::new(), rows),
        }
    }

    /// Returns the archive with `new_rows` merged in (see [`merge_rows`]).
    pub fn merge(self, new_rows: Vec<TimeRow>) -> Self {
        Self {
            rows: merge_rows(self.rows, new_rows),
        }
    }

    pub fn rows(&self) -> &[TimeRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TimeRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_time(&self) -> Option<NaiveDateTime> {
        self.rows.first().map(|r| r.time)
    }

    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.rows.last().map(|r| r.time)
    }

    /// The archive as a polars frame: a `time` column followed by one column
    /// per field.
    pub fn to_dataframe(&self) -> Result<DataFrame, HistoryError> {
        Ok(rows_to_frame(&self.rows)?)
    }
}

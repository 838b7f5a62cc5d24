//! Conversion between time rows and polars frames.

use crate::history::error::HistoryError;
use crate::types::time_row::{FieldValue, TimeRow};
use chrono::NaiveDateTime;
use log::warn;
use polars::prelude::*;
use std::collections::BTreeSet;

pub const TIME_COLUMN: &str = "time";

/// Union of the field names of all rows, sorted by name. A field named like
/// the time column is left out, the row timestamp takes its place.
fn field_names(rows: &[TimeRow]) -> Vec<&str> {
    let names: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.fields.keys().map(String::as_str))
        .collect();
    if names.contains(TIME_COLUMN) {
        warn!("Dropping field {:?}, it clashes with the timestamp column", TIME_COLUMN);
    }
    names.into_iter().filter(|name| *name != TIME_COLUMN).collect()
}

/// Builds a frame with a `time` column (`Datetime(ns)`, no time zone) and one
/// column per field. A field column is `Float64` if all its values are
/// numbers, otherwise `String`; absent fields become nulls.
pub(crate) fn rows_to_frame(rows: &[TimeRow]) -> PolarsResult<DataFrame> {
    let times = DatetimeChunked::from_naive_datetime(
        TIME_COLUMN.into(),
        rows.iter().map(|row| row.time),
        TimeUnit::Nanoseconds,
    );
    let mut columns: Vec<Column> = vec![times.into_series().into()];

    for name in field_names(rows) {
        let values: Vec<Option<&FieldValue>> = rows.iter().map(|row| row.fields.get(name)).collect();
        let all_numeric = values
            .iter()
            .flatten()
            .all(|value| matches!(value, FieldValue::Number(_)));

        let column = if all_numeric {
            let numbers: Vec<Option<f64>> = values
                .iter()
                .copied()
                .map(|value| value.and_then(FieldValue::as_f64))
                .collect();
            Column::new(name.into(), numbers)
        } else {
            let texts: Vec<Option<String>> = values
                .iter()
                .copied()
                .map(|value| value.map(ToString::to_string))
                .collect();
            Column::new(name.into(), texts)
        };
        columns.push(column);
    }

    DataFrame::new(columns)
}

/// Reads rows back from a frame produced by [`rows_to_frame`]. String columns
/// become text fields, every other column is read as `Float64`.
pub(crate) fn frame_to_rows(df: &DataFrame) -> Result<Vec<TimeRow>, HistoryError> {
    let time_column = df
        .column(TIME_COLUMN)
        .map_err(|e| HistoryError::ColumnNotFound(TIME_COLUMN.to_string(), e))?;
    let times: Vec<Option<NaiveDateTime>> = time_column.datetime()?.as_datetime_iter().collect();

    let mut rows = times
        .into_iter()
        .enumerate()
        .map(|(idx, time)| time.map(TimeRow::new).ok_or(HistoryError::NullTimestamp(idx)))
        .collect::<Result<Vec<_>, _>>()?;

    for column in df.get_columns() {
        let name = column.name().as_str();
        if name == TIME_COLUMN {
            continue;
        }
        match column.dtype() {
            DataType::String => {
                for (row, value) in rows.iter_mut().zip(column.str()?) {
                    if let Some(value) = value {
                        row.fields
                            .insert(name.to_string(), FieldValue::Text(value.to_string()));
                    }
                }
            }
            _ => {
                let numbers = column.cast(&DataType::Float64)?;
                for (row, value) in rows.iter_mut().zip(numbers.f64()?) {
                    if let Some(value) = value {
                        row.fields.insert(name.to_string(), FieldValue::Number(value));
                    }
                }
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 1, 3)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    fn sample_rows() -> Vec<TimeRow> {
        vec![
            TimeRow::new(t(1))
                .with_field("air_temperature", -3.5)
                .with_field("next_1_hours_symbol_code", "snow"),
            TimeRow::new(t(2)).with_field("air_temperature", -4.0),
            TimeRow::new(t(3))
                .with_field("air_temperature", -4.5)
                .with_field("wind_speed", 2.1)
                .with_field("next_1_hours_symbol_code", "cloudy"),
        ]
    }

    #[test]
    fn test_frame_schema() -> Result<(), Box<dyn std::error::Error>> {
        let df = rows_to_frame(&sample_rows())?;

        assert_eq!(df.height(), 3);
        assert_eq!(
            df.column(TIME_COLUMN)?.dtype(),
            &DataType::Datetime(TimeUnit::Nanoseconds, None)
        );
        assert_eq!(df.column("air_temperature")?.dtype(), &DataType::Float64);
        assert_eq!(df.column("next_1_hours_symbol_code")?.dtype(), &DataType::String);
        assert_eq!(df.column("wind_speed")?.null_count(), 2);
        Ok(())
    }

    #[test]
    fn test_rows_survive_frame_conversion() -> Result<(), Box<dyn std::error::Error>> {
        let rows = sample_rows();
        let df = rows_to_frame(&rows)?;

        assert_eq!(frame_to_rows(&df)?, rows);
        Ok(())
    }

    #[test]
    fn test_mixed_column_stored_as_text() -> Result<(), Box<dyn std::error::Error>> {
        let rows = vec![
            TimeRow::new(t(1)).with_field("quality", 1.0),
            TimeRow::new(t(2)).with_field("quality", "unknown"),
        ];
        let df = rows_to_frame(&rows)?;

        assert_eq!(df.column("quality")?.dtype(), &DataType::String);
        let back = frame_to_rows(&df)?;
        assert_eq!(back[0].get("quality"), Some(&FieldValue::Text("1".to_string())));
        Ok(())
    }

    #[test]
    fn test_empty_rows_make_empty_frame() -> Result<(), Box<dyn std::error::Error>> {
        let df = rows_to_frame(&[])?;

        assert_eq!(df.height(), 0);
        assert!(frame_to_rows(&df)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_time_column() -> Result<(), Box<dyn std::error::Error>> {
        let df = DataFrame::new(vec![Column::new("value".into(), vec![1.0f64])])?;

        assert!(matches!(
            frame_to_rows(&df),
            Err(HistoryError::ColumnNotFound(..))
        ));
        Ok(())
    }

    #[test]
    fn test_sub_second_times_kept_exactly() -> Result<(), Box<dyn std::error::Error>> {
        let time = NaiveDate::from_ymd_opt(2022, 1, 3)
            .and_then(|d| d.and_hms_nano_opt(8, 0, 0, 123_456_789))
            .unwrap();
        let rows = vec![TimeRow::new(time).with_field("air_temperature", 1.0)];

        let back = frame_to_rows(&rows_to_frame(&rows)?)?;

        assert_eq!(back[0].time, time);
        Ok(())
    }

    #[test]
    fn test_field_named_time_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let rows = vec![TimeRow::new(t(1))
            .with_field(TIME_COLUMN, "2022-01-03T01:00:00Z")
            .with_field("air_temperature", -3.5)];

        let df = rows_to_frame(&rows)?;

        assert_eq!(df.width(), 2);
        assert_eq!(
            df.column(TIME_COLUMN)?.dtype(),
            &DataType::Datetime(TimeUnit::Nanoseconds, None)
        );
        let back = frame_to_rows(&df)?;
        assert_eq!(back[0].time, t(1));
        assert!(back[0].get(TIME_COLUMN).is_none());
        Ok(())
    }

    #[test]
    fn test_columns_sorted_by_name() -> Result<(), Box<dyn std::error::Error>> {
        let rows = vec![
            TimeRow::new(t(1)).with_field("wind_speed", 3.0),
            TimeRow::new(t(2)).with_field("air_temperature", 1.0),
        ];

        let df = rows_to_frame(&rows)?;

        let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec![TIME_COLUMN, "air_temperature", "wind_speed"]);
        Ok(())
    }
}

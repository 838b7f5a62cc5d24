//! `locationforecast/2.0/compact`: one row per forecast step.

use crate::parsers::datetime::utc_to_local;
use crate::parsers::error::ParseError;
use crate::parsers::{decode, Timeseries};
use crate::types::endpoint::Endpoint;
use crate::types::time_row::{FieldValue, TimeRow};
use serde_json::{Map, Value};

/// Flattens each step into its instant details plus, for the next 1, 6 and
/// 12 hour periods, `next_<n>_hours_precipitation_amount` (when reported) and
/// `next_<n>_hours_symbol_code`.
pub fn parse_location_forecast(body: &Map<String, Value>) -> Result<Vec<TimeRow>, ParseError> {
    let response: Timeseries = decode(Endpoint::LocationForecastCompact, body)?;

    let mut rows = Vec::with_capacity(response.properties.timeseries.len());
    for step in response.properties.timeseries {
        let mut row = TimeRow::new(utc_to_local(&step.time)?);
        for (name, value) in &step.data.instant.details {
            if let Some(value) = FieldValue::from_json(value) {
                row.fields.insert(name.clone(), value);
            }
        }

        let periods = [
            ("next_1_hours", &step.data.next_1_hours),
            ("next_6_hours", &step.data.next_6_hours),
            ("next_12_hours", &step.data.next_12_hours),
        ];
        for (prefix, period) in periods {
            let Some(period) = period else { continue };
            if let Some(amount) = period
                .details
                .get("precipitation_amount")
                .and_then(FieldValue::from_json)
            {
                row.fields
                    .insert(format!("{}_precipitation_amount", prefix), amount);
            }
            if let Some(summary) = &period.summary {
                row.fields.insert(
                    format!("{}_symbol_code", prefix),
                    FieldValue::Text(summary.symbol_code.clone()),
                );
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

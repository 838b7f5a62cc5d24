//! `nowcast/2.0/complete`: radar nowcast steps.

use crate::parsers::datetime::utc_to_local;
use crate::parsers::error::ParseError;
use crate::parsers::{decode, Timeseries};
use crate::types::endpoint::Endpoint;
use crate::types::time_row::{FieldValue, TimeRow};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Only the first nowcast step carries every detail; later steps report a
/// subset. Each row therefore holds the last known value of every field seen
/// so far.
pub fn parse_nowcast(body: &Map<String, Value>) -> Result<Vec<TimeRow>, ParseError> {
    let response: Timeseries = decode(Endpoint::Nowcast, body)?;

    let mut last_known: BTreeMap<String, FieldValue> = BTreeMap::new();
    let mut rows = Vec::with_capacity(response.properties.timeseries.len());
    for step in response.properties.timeseries {
        for (name, value) in &step.data.instant.details {
            if let Some(value) = FieldValue::from_json(value) {
                last_known.insert(name.clone(), value);
            }
        }
        rows.push(TimeRow {
            time: utc_to_local(&step.time)?,
            fields: last_known.clone(),
        });
    }
    Ok(rows)
}

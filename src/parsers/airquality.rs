//! `airqualityforecast/0.1`: hourly air quality per area.

use crate::parsers::datetime::utc_to_local;
use crate::parsers::decode;
use crate::parsers::error::ParseError;
use crate::types::endpoint::Endpoint;
use crate::types::time_row::{FieldValue, TimeRow};
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    data: AirQualityData,
}

#[derive(Debug, Deserialize)]
struct AirQualityData {
    time: Vec<AirQualityStep>,
}

#[derive(Debug, Deserialize)]
struct AirQualityStep {
    from: String,
    to: String,
    #[serde(default)]
    variables: BTreeMap<String, AirQualityVariable>,
}

#[derive(Debug, Deserialize)]
struct AirQualityVariable {
    value: Value,
    units: Option<String>,
}

/// Keeps the hourly records, which are the steps whose `from` equals `to`.
/// A variable with units other than `"1"` is named `"<name> [<units>]"`.
pub fn parse_airquality(body: &Map<String, Value>) -> Result<Vec<TimeRow>, ParseError> {
    let response: AirQualityResponse = decode(Endpoint::AirQuality, body)?;

    let mut rows = Vec::new();
    for step in response.data.time {
        let from = utc_to_local(&step.from)?;
        let to = utc_to_local(&step.to)?;
        if from != to {
            debug!("Looking for hourly data, skipping {} - {}", step.from, step.to);
            continue;
        }

        let mut row = TimeRow::new(from);
        for (name, variable) in step.variables {
            let column = match variable.units.as_deref() {
                Some(units) if units != "1" => format!("{} [{}]", name, units),
                _ => name,
            };
            if let Some(value) = FieldValue::from_json(&variable.value) {
                row.fields.insert(column, value);
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

//! Turn decoded API responses into time rows, one parser per endpoint.

pub mod airquality;
pub mod datetime;
pub mod error;
pub mod location_forecast;
pub mod nowcast;

use crate::parsers::error::ParseError;
use crate::types::endpoint::Endpoint;
use crate::types::time_row::TimeRow;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use airquality::parse_airquality;
pub use location_forecast::parse_location_forecast;
pub use nowcast::parse_nowcast;

/// Parses `body` with the parser belonging to `endpoint`.
pub fn parse_rows(endpoint: Endpoint, body: &Map<String, Value>) -> Result<Vec<TimeRow>, ParseError> {
    match endpoint {
        Endpoint::LocationForecastCompact => parse_location_forecast(body),
        Endpoint::Nowcast => parse_nowcast(body),
        Endpoint::AirQuality => parse_airquality(body),
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &Map<String, Value>) -> Result<T, ParseError> {
    serde_json::from_value(Value::Object(body.clone()))
        .map_err(|source| ParseError::Json { endpoint, source })
}

// GeoJSON timeseries layout shared by locationforecast and nowcast.

#[derive(Debug, Deserialize)]
struct Timeseries {
    properties: TimeseriesProperties,
}

#[derive(Debug, Deserialize)]
struct TimeseriesProperties {
    timeseries: Vec<TimeseriesStep>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesStep {
    time: String,
    data: StepData,
}

#[derive(Debug, Deserialize)]
struct StepData {
    instant: Instant,
    next_1_hours: Option<Period>,
    next_6_hours: Option<Period>,
    next_12_hours: Option<Period>,
}

#[derive(Debug, Deserialize)]
struct Instant {
    #[serde(default)]
    details: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Period {
    summary: Option<Summary>,
    #[serde(default)]
    details: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    symbol_code: String,
}

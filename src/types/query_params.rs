//! Query parameters sent to the weather API, with the coordinate truncation
//! required by the met.no terms of service.

use std::collections::BTreeMap;
use std::fmt;

/// Keys rounded to 4 decimals.
const COORDINATE_KEYS: [&str; 2] = ["lat", "lon"];
/// Key rounded to whole meters.
const ALTITUDE_KEY: &str = "altitude";

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    fn rounded(&self, decimals: usize) -> ParamValue {
        match self.as_number() {
            Some(n) if n.is_finite() => ParamValue::Text(format!("{:.*}", decimals, n)),
            // Not a number: sent as given.
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// Mapping of query keys to values.
///
/// `lat` and `lon` are rounded to 4 decimals and `altitude` to 0 decimals by
/// [`QueryParams::normalized`]. Values that are not numbers are left untouched.
///
/// # Examples
///
/// ```
/// use yr_to_polars::QueryParams;
///
/// let params = QueryParams::new().with("lat", 59.719491234).with("lon", 10.83576);
/// let normalized = params.normalized();
/// assert_eq!(normalized.get("lat").unwrap().to_string(), "59.7195");
/// assert_eq!(normalized.normalized(), normalized);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a normalized copy; `self` is not modified.
    pub fn normalized(&self) -> QueryParams {
        let normalized = self
            .0
            .iter()
            .map(|(key, value)| {
                let value = if COORDINATE_KEYS.contains(&key.as_str()) {
                    value.rounded(4)
                } else if key == ALTITUDE_KEY {
                    value.rounded(0)
                } else {
                    value.clone()
                };
                (key.clone(), value)
            })
            .collect();
        QueryParams(normalized)
    }

    /// Key/value pairs in the form the HTTP transport sends them.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> ParamValue {
        ParamValue::Text(value.to_string())
    }

    #[test]
    fn test_coordinates_rounded_to_four_decimals() {
        let params = QueryParams::new()
            .with("lat", 59.719491234)
            .with("lon", 10.83576);
        let normalized = params.normalized();

        assert_eq!(normalized.get("lat"), Some(&text("59.7195")));
        assert_eq!(normalized.get("lon"), Some(&text("10.8358")));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = QueryParams::new().with("lat", 59.719491234).normalized();
        let twice = once.normalized();

        assert_eq!(once, twice);
        assert_eq!(twice.get("lat"), Some(&text("59.7195")));
    }

    #[test]
    fn test_altitude_rounded_to_whole_number() {
        let normalized = QueryParams::new().with("altitude", 123.6).normalized();
        assert_eq!(normalized.get("altitude"), Some(&text("124")));

        let from_int = QueryParams::new().with("altitude", 90_i64).normalized();
        assert_eq!(from_int.get("altitude"), Some(&text("90")));
    }

    #[test]
    fn test_numeric_strings_are_rounded() {
        let normalized = QueryParams::new().with("lat", " -33.868812 ").normalized();
        assert_eq!(normalized.get("lat"), Some(&text("-33.8688")));
    }

    #[test]
    fn test_non_numeric_values_pass_through() {
        let params = QueryParams::new()
            .with("lat", "north")
            .with("altitude", "sea level");
        assert_eq!(params.normalized(), params);
    }

    #[test]
    fn test_other_keys_untouched_and_original_unchanged() {
        let params = QueryParams::new()
            .with("lat", 1.123456)
            .with("areaclass", "grunnkrets")
            .with("zoom", 3.14159);
        let normalized = params.normalized();

        assert_eq!(normalized.get("areaclass"), Some(&text("grunnkrets")));
        assert_eq!(normalized.get("zoom"), Some(&ParamValue::Number(3.14159)));
        assert_eq!(params.get("lat"), Some(&ParamValue::Number(1.123456)));
    }

    #[test]
    fn test_to_pairs_sorted_by_key() {
        let pairs = QueryParams::new()
            .with("lon", 10.8358)
            .with("lat", "59.7195")
            .to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("lat".to_string(), "59.7195".to_string()),
                ("lon".to_string(), "10.8358".to_string()),
            ]
        );
    }
}

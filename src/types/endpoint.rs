//! The met.no endpoints this crate knows how to turn into time rows.

use std::fmt;

/// A met.no weather API product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `locationforecast/2.0/compact`: hourly forecast for roughly ten days.
    LocationForecastCompact,
    /// `nowcast/2.0/complete`: radar based nowcast for the next two hours.
    Nowcast,
    /// `airqualityforecast/0.1`: air quality forecast for Norwegian areas.
    AirQuality,
}

impl Endpoint {
    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            Endpoint::LocationForecastCompact => "locationforecast/2.0/compact",
            Endpoint::Nowcast => "nowcast/2.0/complete",
            Endpoint::AirQuality => "airqualityforecast/0.1",
        }
    }

    pub(crate) fn resource_prefix(&self) -> &'static str {
        match self {
            Endpoint::LocationForecastCompact => "yr-locationforecast",
            Endpoint::Nowcast => "yr-nowcast",
            Endpoint::AirQuality => "yr-airquality",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Area size used by the air quality forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AreaClass {
    #[default]
    Grunnkrets,
    Delomrade,
    Kommune,
    Fylke,
}

impl AreaClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaClass::Grunnkrets => "grunnkrets",
            AreaClass::Delomrade => "delomrade",
            AreaClass::Kommune => "kommune",
            AreaClass::Fylke => "fylke",
        }
    }
}

impl fmt::Display for AreaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! High level access to the met.no endpoints: fetch through the cache, parse
//! into rows and keep the history on disk.

use crate::config::YrConfig;
use crate::error::YrError;
use crate::fetch_cache::fetcher::ConditionalFetcher;
use crate::fetch_cache::transport::{HttpTransport, ReqwestTransport};
use crate::history::archive::HistoryArchive;
use crate::history::store::HistoryStore;
use crate::parsers::parse_rows;
use crate::resource_lock::ResourceLocks;
use crate::types::endpoint::{AreaClass, Endpoint};
use crate::types::query_params::QueryParams;
use crate::types::resource_id::ResourceId;
use crate::utils::ensure_storage_root_exists;
use bon::bon;
use log::debug;
use polars::prelude::DataFrame;
use reqwest::header::HeaderMap;

/// Result of one client call.
#[derive(Debug, Clone)]
pub struct ForecastFrame {
    /// The full history for the location when new data arrived, otherwise
    /// the rows of the cached response.
    pub frame: DataFrame,
    /// `true` when the response came from the local cache (or the server
    /// answered 304) and the history was left alone.
    pub was_cached: bool,
}

/// Client for the met.no weather API that caches responses and keeps history.
///
/// Each call fetches one resource through [`ConditionalFetcher`], parses it into
/// rows and, if new data arrived, merges the rows into the parquet history
/// for that resource.
///
/// # Examples
///
/// ```no_run
/// use yr_to_polars::{YrClient, YrError};
///
/// # fn main() -> Result<(), YrError> {
/// let client = YrClient::new()?;
/// let forecast = client.hourly_forecast(59.71949, 10.83576)?;
/// println!("{} rows, cached: {}", forecast.frame.height(), forecast.was_cached);
/// # Ok(())
/// # }
/// ```
pub struct YrClient<T = ReqwestTransport> {
    config: YrConfig,
    fetcher: ConditionalFetcher<T>,
    history: HistoryStore,
    locks: ResourceLocks,
}

impl YrClient<ReqwestTransport> {
    /// Client with default settings, storing files in the user's cache directory.
    pub fn new() -> Result<Self, YrError> {
        Self::with_config(YrConfig::with_default_storage()?)
    }

    pub fn with_config(config: YrConfig) -> Result<Self, YrError> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

#[bon]
impl<T: HttpTransport> YrClient<T> {
    /// Client sending its requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`YrError::CacheDirCreation`] if the storage root cannot be
    /// created or is not a directory.
    pub fn with_transport(config: YrConfig, transport: T) -> Result<Self, YrError> {
        ensure_storage_root_exists(&config.storage_root)
            .map_err(|e| YrError::CacheDirCreation(config.storage_root.clone(), e))?;
        Ok(Self {
            fetcher: ConditionalFetcher::with_transport(
                transport,
                &config.storage_root,
                config.default_headers.clone(),
            ),
            history: HistoryStore::new(&config.storage_root),
            locks: ResourceLocks::new(),
            config,
        })
    }

    pub fn config(&self) -> &YrConfig {
        &self.config
    }

    /// Hourly forecast from `locationforecast/2.0/compact`.
    pub fn hourly_forecast(&self, lat: f64, lon: f64) -> Result<ForecastFrame, YrError> {
        let params = QueryParams::new().with("lat", lat).with("lon", lon);
        self.refresh(Endpoint::LocationForecastCompact, params, None)
    }

    /// Two hour radar nowcast from `nowcast/2.0/complete`.
    pub fn nowcast(&self, lat: f64, lon: f64) -> Result<ForecastFrame, YrError> {
        let params = QueryParams::new().with("lat", lat).with("lon", lon);
        self.refresh(Endpoint::Nowcast, params, None)
    }

    /// Hourly air quality forecast from `airqualityforecast/0.1`.
    ///
    /// `area_class` defaults to [`AreaClass::Grunnkrets`].
    ///
    /// ```no_run
    /// # use yr_to_polars::{AreaClass, YrClient, YrError};
    /// # fn main() -> Result<(), YrError> {
    /// let client = YrClient::new()?;
    /// let air = client
    ///     .airquality()
    ///     .lat(59.71949)
    ///     .lon(10.83576)
    ///     .area_class(AreaClass::Kommune)
    ///     .call()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn airquality(
        &self,
        lat: f64,
        lon: f64,
        #[builder(default)] area_class: AreaClass,
    ) -> Result<ForecastFrame, YrError> {
        let params = QueryParams::new()
            .with("lat", lat)
            .with("lon", lon)
            .with("areaclass", area_class.as_str());
        self.refresh(Endpoint::AirQuality, params, Some(area_class))
    }

    /// Stored history for an endpoint and location, without any network access.
    ///
    /// `area_class` only applies to [`Endpoint::AirQuality`] and defaults to
    /// [`AreaClass::Grunnkrets`].
    ///
    /// ```no_run
    /// # use yr_to_polars::{AreaClass, Endpoint, YrClient, YrError};
    /// # fn main() -> Result<(), YrError> {
    /// let client = YrClient::new()?;
    /// let archive = client
    ///     .history()
    ///     .endpoint(Endpoint::AirQuality)
    ///     .lat(59.71949)
    ///     .lon(10.83576)
    ///     .area_class(AreaClass::Kommune)
    ///     .call()?;
    /// println!("{} stored rows", archive.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn history(
        &self,
        endpoint: Endpoint,
        lat: f64,
        lon: f64,
        #[builder(default)] area_class: AreaClass,
    ) -> Result<HistoryArchive, YrError> {
        let params = QueryParams::new().with("lat", lat).with("lon", lon);
        let area_class = (endpoint == Endpoint::AirQuality).then_some(area_class);
        let resource_id = resource_id_for(endpoint, &params, area_class)?;
        Ok(self.history.load(&resource_id)?)
    }

    fn refresh(
        &self,
        endpoint: Endpoint,
        params: QueryParams,
        area_class: Option<AreaClass>,
    ) -> Result<ForecastFrame, YrError> {
        let resource_id = resource_id_for(endpoint, &params, area_class)?;
        let url = self.config.endpoint_url(endpoint);

        self.locks.with_lock(&resource_id, || -> Result<ForecastFrame, YrError> {
            let response = self
                .fetcher
                .fetch(&resource_id, &url, &HeaderMap::new(), &params)?;
            let rows = parse_rows(endpoint, response.body())?;

            if response.was_cached {
                debug!(
                    "Skipping history write for {} as the response is already cached",
                    resource_id
                );
                return Ok(ForecastFrame {
                    frame: HistoryArchive::from_rows(rows).to_dataframe()?,
                    was_cached: true,
                });
            }

            let archive = self.history.merge_and_persist(&resource_id, rows)?;
            Ok(ForecastFrame {
                frame: archive.to_dataframe()?,
                was_cached: false,
            })
        })
    }
}

/// `yr-<endpoint>-<lat>-<lon>[-<areaclass>]`, using the normalized coordinates
/// so that requests sent with the same parameters share one cache entry.
fn resource_id_for(
    endpoint: Endpoint,
    params: &QueryParams,
    area_class: Option<AreaClass>,
) -> Result<ResourceId, YrError> {
    let normalized = params.normalized();
    let coordinate = |key: &str| {
        normalized
            .get(key)
            .map(ToString::to_string)
            .unwrap_or_default()
    };
    let mut id = format!(
        "{}-{}-{}",
        endpoint.resource_prefix(),
        coordinate("lat"),
        coordinate("lon")
    );
    if let Some(area_class) = area_class {
        id.push('-');
        id.push_str(area_class.as_str());
    }
    Ok(ResourceId::new(id)?)
}

//! Fetches the hourly forecast and the nowcast for one location and keeps
//! their history in the default cache directory.
//!
//! Run with `RUST_LOG=debug cargo run --example yr_run` to watch the cache at
//! work: a second run within the validity window makes no requests.

use reqwest::header::{HeaderValue, USER_AGENT};
use std::env;
use yr_to_polars::{default_headers, YrClient, YrConfig, YrError};

const LAT: f64 = 59.71949;
const LON: f64 = 10.83576;

fn main() -> Result<(), YrError> {
    env_logger::init();
    configure_polars_display();

    let mut headers = default_headers();
    if let Some(agent) = env::var("YR_USER_AGENT")
        .ok()
        .and_then(|agent| HeaderValue::from_str(&agent).ok())
    {
        headers.insert(USER_AGENT, agent);
    }
    let mut config = YrConfig::with_default_storage()?;
    config.default_headers = headers;
    let client = YrClient::with_config(config)?;

    log::info!("Getting hourly forecast and nowcast for {}, {}", LAT, LON);
    let forecast = client.hourly_forecast(LAT, LON)?;
    println!("Forecast (cached: {}):\n{}", forecast.was_cached, forecast.frame);

    let nowcast = client.nowcast(LAT, LON)?;
    println!("Nowcast (cached: {}):\n{}", nowcast.was_cached, nowcast.frame);

    Ok(())
}

fn configure_polars_display() {
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}

use anyhow::{Context, Result};
use today_weather::{EtlConfig, WeatherClient, logging, run_collection};
use tracing::info;

fn main() -> Result<()> {
    let config = EtlConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    let client = WeatherClient::new(&config.weather).context("Failed to create weather client")?;
    let summary = run_collection(&client, &config.files);

    info!(
        "Done: {} cities loaded, {} fetched, {} failed, {} written to {:?}",
        summary.cities_loaded,
        summary.fetched,
        summary.failed,
        summary.written,
        config.files.weather_xml
    );
    Ok(())
}

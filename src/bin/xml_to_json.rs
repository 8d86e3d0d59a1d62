use anyhow::{Context, Result};
use today_weather::{EtlConfig, logging, run_conversion};
use tracing::{error, info};

fn main() -> Result<()> {
    let config = EtlConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    match run_conversion(&config.files) {
        Ok(summary) => {
            info!(
                "Done: {} cities converted, {} skipped",
                summary.cities_converted, summary.cities_skipped
            );
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(anyhow::anyhow!(e.user_message()))
        }
    }
}

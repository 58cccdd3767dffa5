use crate::app_config::AppConfig;
use crate::domain::TwinRecord;
use crate::registry::domain::TwinGet;
use crate::registry::map_twin::from_external_twin;
use reqwest::Client;
use std::error::Error;
use tracing::{info, instrument};

#[instrument(skip(client, config))]
pub async fn fetch_twin(client: &Client, config: &AppConfig, device_id: &str) -> Result<TwinRecord, Box<dyn Error>> {
    info!("Retrieving twin for device '{}'...", device_id);

    let registry_url = config.registry().url();
    let response = client
        .get(format!("{}/twins/{}", registry_url, device_id))
        .query(&[("api-version", config.registry().api_version())])
        .send()
        .await?
        .error_for_status()?;

    let twin = response.json::<TwinGet>().await?;
    let record = from_external_twin(Some(twin))?;
    info!("Retrieving twin for device '{}'... OK, {} tag(s)", device_id, record.tags.len());

    Ok(record)
}

#[instrument(skip(client, config))]
pub async fn fetch_module_twin(
    client: &Client,
    config: &AppConfig,
    device_id: &str,
    module_id: &str,
) -> Result<TwinRecord, Box<dyn Error>> {
    info!("Retrieving twin for module '{}/{}'...", device_id, module_id);

    let registry_url = config.registry().url();
    let response = client
        .get(format!("{}/twins/{}/modules/{}", registry_url, device_id, module_id))
        .query(&[("api-version", config.registry().api_version())])
        .send()
        .await?
        .error_for_status()?;

    let twin = response.json::<TwinGet>().await?;
    let record = from_external_twin(Some(twin))?;
    info!("Retrieving twin for module '{}/{}'... OK", device_id, module_id);

    Ok(record)
}

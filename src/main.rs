use crate::app_config::AppConfig;
use crate::domain::TwinRecord;
use crate::registry::{ConversionError, TwinCollection};
use std::collections::HashMap;
use tracing::info;

mod app_config;
mod domain;
mod registry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();
    tracing_subscriber::fmt().with_max_level(config.core().log_level()).init();

    info!("🪞 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    info!("✅  Loaded configuration");

    let client = registry::client::new_client(&config)?;

    for address in config.registry().twins() {
        let mut record = match address.split_once('/') {
            Some((device_id, module_id)) => registry::fetch_module_twin(&client, &config, device_id, module_id).await?,
            None => registry::fetch_twin(&client, &config, address).await?,
        };

        // Module twins are read-only here; tag stamping targets device twins
        if record.module_id.is_none() {
            let stamped = stamp_tags(&mut record, config.registry().tags())?;
            if stamped > 0 {
                record = registry::push_twin(&client, &config, &record).await?;
                info!("🏷️ Stamped {} tag(s) on '{}'", stamped, record.device_id);
            }
        }

        info!(
            "🪞 Twin '{}': module={} simulated={} tags={} desired={} reported={}",
            record.device_id,
            record.module_id.as_deref().unwrap_or("-"),
            record.is_simulated,
            record.tags.len(),
            record.desired_properties.len(),
            record.reported_properties.len()
        );
    }

    info!("🔍 Inspected {} twin(s)", config.registry().twins().len());

    Ok(())
}

/// Merges the configured raw-text tags into the record. Returns the number of
/// tags that actually changed, so unchanged twins skip the registry write.
fn stamp_tags(record: &mut TwinRecord, tags: &HashMap<String, String>) -> Result<usize, ConversionError> {
    let mut collection = TwinCollection::new();
    for (key, raw) in tags {
        collection.insert_text(key, raw);
    }

    let mut changed = 0;
    for (key, value) in registry::collection_to_map(collection)? {
        if record.tags.get(&key) != Some(&value) {
            record.tags.insert(key, value);
            changed += 1;
        }
    }

    Ok(changed)
}

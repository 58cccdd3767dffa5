use crate::domain::TwinRecord;
use crate::registry::domain::{CollectionError, CollectionValue, TwinCollection, TwinGet, TwinUpdate, WriteProperties};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

const SIMULATED_TAG: &str = "IsSimulated";

/// Maps a registry twin onto a [`TwinRecord`]. An absent twin yields the zero
/// record and is not an error.
pub fn from_external_twin(twin: Option<TwinGet>) -> Result<TwinRecord, ConversionError> {
    let Some(twin) = twin else {
        return Ok(TwinRecord::default());
    };

    let tags = collection_to_map(twin.tags)?;
    let desired_properties = collection_to_map(twin.properties.desired)?;
    let reported_properties = collection_to_map(twin.properties.reported)?;

    // Exact match on "Y" by convention; "y", "yes" and boolean true do not count
    let is_simulated = tags.get(SIMULATED_TAG).is_some_and(|value| match value {
        Value::String(s) => s == "Y",
        other => other.to_string() == "Y",
    });

    Ok(TwinRecord {
        etag: twin.etag,
        device_id: twin.device_id,
        module_id: twin.module_id,
        is_simulated,
        tags,
        desired_properties,
        reported_properties,
    })
}

/// Maps a [`TwinRecord`] onto a registry write body. Only the device id, etag,
/// tags and desired properties go back; reported properties and the module id
/// are read-only from the service's side.
pub fn to_external_twin(record: &TwinRecord) -> Result<TwinUpdate, ConversionError> {
    Ok(TwinUpdate {
        device_id: record.device_id.clone(),
        etag: record.etag.clone(),
        tags: map_to_collection(&record.tags)?,
        properties: WriteProperties {
            desired: map_to_collection(&record.desired_properties)?,
        },
    })
}

/// Resolves every entry of a twin collection into generic tree form. A raw
/// text entry that does not parse as JSON fails the whole conversion; no
/// partially converted mapping is returned.
pub fn collection_to_map(collection: TwinCollection) -> Result<HashMap<String, Value>, ConversionError> {
    collection
        .into_iter()
        .map(|(key, value)| match value {
            CollectionValue::Tree(tree) => Ok((key, tree)),
            CollectionValue::Text(raw) => match serde_json::from_str(&raw) {
                Ok(tree) => Ok((key, tree)),
                Err(_) => Err(ConversionError::Parse { key, value: raw }),
            },
        })
        .collect()
}

fn map_to_collection(map: &HashMap<String, Value>) -> Result<TwinCollection, ConversionError> {
    let mut collection = TwinCollection::new();
    for (key, value) in map {
        collection
            .try_insert(key, value.clone())
            .map_err(|source| ConversionError::Assign { key: key.clone(), source })?;
    }

    Ok(collection)
}

#[derive(Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error("value for key '{key}' is not valid JSON: '{value}'")]
    Parse { key: String, value: String },
    #[error("key '{key}' cannot be written to a twin collection")]
    Assign {
        key: String,
        #[source]
        source: CollectionError,
    },
}

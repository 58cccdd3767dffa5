use crate::registry::domain::TwinCollection;
use serde::Serialize;

/// Write body for a twin update. Module id and reported properties are
/// deliberately absent: reported properties are device-owned and module
/// scoping is not a twin-write concern.
#[derive(Debug, PartialEq, Serialize)]
pub struct TwinUpdate {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    pub tags: TwinCollection,
    pub properties: WriteProperties,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct WriteProperties {
    pub desired: TwinCollection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_without_etag_when_absent() {
        let update = TwinUpdate {
            device_id: "chiller-01".to_string(),
            etag: None,
            tags: TwinCollection::new(),
            properties: WriteProperties {
                desired: TwinCollection::new(),
            },
        };

        let value = serde_json::to_value(&update).unwrap();

        assert_eq!(
            value,
            json!({
                "deviceId": "chiller-01",
                "tags": {},
                "properties": { "desired": {} }
            })
        );
    }
}

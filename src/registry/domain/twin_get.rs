use crate::registry::domain::TwinCollection;
use serde::Deserialize;

// API: https://learn.microsoft.com/en-us/rest/api/iothub/service/devices/get-twin
#[derive(Debug, Deserialize)]
pub struct TwinGet {
    #[serde(rename = "deviceId")]
    pub device_id: String,
    #[serde(rename = "moduleId", default)]
    pub module_id: Option<String>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub tags: TwinCollection,
    #[serde(default)]
    pub properties: TwinProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct TwinProperties {
    #[serde(default)]
    pub desired: TwinCollection,
    #[serde(default)]
    pub reported: TwinCollection,
}

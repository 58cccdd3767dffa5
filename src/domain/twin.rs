use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Service-facing view of a registry twin. Built fresh on every read, owned by
/// the operation that created it and discarded after the write or response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwinRecord {
    /// Opaque concurrency token, passed back verbatim on writes.
    pub etag: Option<String>,
    pub device_id: String,
    /// Set when the twin belongs to a module under a device. Read-only.
    pub module_id: Option<String>,
    pub is_simulated: bool,
    pub tags: HashMap<String, Value>,
    pub desired_properties: HashMap<String, Value>,
    pub reported_properties: HashMap<String, Value>,
}

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Deepest object/array nesting the registry accepts in a twin collection.
pub const MAX_TWIN_DEPTH: usize = 10;

const MAX_KEY_LENGTH: usize = 1024;

/// A single entry in a twin collection: either a value already in generic
/// JSON tree form, or raw text that still needs a JSON parse. Text entries
/// never come off the wire; they are built programmatically, e.g. from
/// configured raw values.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionValue {
    Tree(Value),
    Text(String),
}

/// The registry's tags/desired/reported collection. Key order carries no
/// meaning. Inserting through [`try_insert`](TwinCollection::try_insert)
/// enforces the registry's key and nesting rules; entries deserialized from
/// the registry itself bypass them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TwinCollection {
    entries: HashMap<String, CollectionValue>,
}

impl TwinCollection {
    pub fn new() -> Self {
        TwinCollection { entries: HashMap::new() }
    }

    pub fn try_insert(&mut self, key: &str, value: Value) -> Result<(), CollectionError> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH || key.chars().any(|c| c == '.' || c == '$' || c.is_control()) {
            return Err(CollectionError::InvalidKey);
        }

        if depth_of(&value) > MAX_TWIN_DEPTH {
            return Err(CollectionError::NestsTooDeep);
        }

        self.entries.insert(key.to_string(), CollectionValue::Tree(value));
        Ok(())
    }

    pub fn insert_text(&mut self, key: &str, raw: &str) {
        self.entries.insert(key.to_string(), CollectionValue::Text(raw.to_string()));
    }
}

impl IntoIterator for TwinCollection {
    type Item = (String, CollectionValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, CollectionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'de> Deserialize<'de> for TwinCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Value>::deserialize(deserializer)?;

        // Registry bookkeeping entries ($metadata, $version) are not user data
        let entries = raw
            .into_iter()
            .filter(|(key, _)| !key.starts_with('$'))
            .map(|(key, value)| (key, CollectionValue::Tree(value)))
            .collect();

        Ok(TwinCollection { entries })
    }
}

impl Serialize for TwinCollection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            match value {
                CollectionValue::Tree(tree) => map.serialize_entry(key, tree)?,
                CollectionValue::Text(raw) => {
                    let tree = serde_json::from_str::<Value>(raw)
                        .map_err(|_| ser::Error::custom(format!("value for key '{}' is not valid JSON", key)))?;
                    map.serialize_entry(key, &tree)?;
                }
            }
        }
        map.end()
    }
}

fn depth_of(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(depth_of).max().unwrap_or(0),
        Value::Object(fields) => 1 + fields.values().map(depth_of).max().unwrap_or(0),
        _ => 0,
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CollectionError {
    #[error("key is empty, longer than 1024 bytes or contains '.', '$' or a control character")]
    InvalidKey,
    #[error("value nests deeper than 10 levels")]
    NestsTooDeep,
}

use config::Config;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::Level;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    registry: Registry,
}

impl AppConfig {
    pub fn load() -> Self {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    log_level: String,
}

impl Core {
    /// Maximum tracing level; an unrecognized value falls back to info.
    pub fn log_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[derive(Debug, Deserialize)]
pub struct Registry {
    url: String,
    api_version: String,
    shared_access_signature: String,
    /// Twin addresses to manage, either "deviceId" or "deviceId/moduleId".
    twins: Vec<String>,
    /// Tags stamped on every managed device twin; values are raw JSON text.
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl Registry {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn shared_access_signature(&self) -> &str {
        &self.shared_access_signature
    }

    pub fn twins(&self) -> &[String] {
        &self.twins
    }

    pub fn tags(&self) -> &HashMap<String, String> {
        &self.tags
    }
}


#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    log_level: "info".to_string(),
                },
                registry: Registry {
                    url: "https://registry.url".to_string(),
                    api_version: "2021-04-12".to_string(),
                    shared_access_signature: "SharedAccessSignature sr=test".to_string(),
                    twins: vec!["chiller-01".to_string()],
                    tags: HashMap::new(),
                },
            },
        }
    }

    pub fn registry_url(mut self, url: String) -> Self {
        self.config.registry.url = url;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

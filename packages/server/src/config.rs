use std::time::Duration;

use common::StorageAppConfig;
use config::{Config, ConfigError, Environment, File};
use menu::WorkflowOptions;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Settings of the add-dish form flow.
#[derive(Debug, Deserialize, Clone)]
pub struct FormConfig {
    /// Delay between the success notification and the redirect. Default: 3000.
    #[serde(default = "default_redirect_grace_ms")]
    pub redirect_grace_ms: u64,
    /// Collection holding the per-owner menu documents. Default: "menu".
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Key prefix of uploaded dish images. Default: "menu".
    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,
}

fn default_redirect_grace_ms() -> u64 {
    3000
}
fn default_collection() -> String {
    "menu".into()
}
fn default_image_prefix() -> String {
    "menu".into()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            redirect_grace_ms: default_redirect_grace_ms(),
            collection: default_collection(),
            image_prefix: default_image_prefix(),
        }
    }
}

impl FormConfig {
    pub fn workflow_options(&self) -> WorkflowOptions {
        WorkflowOptions {
            collection: self.collection.clone(),
            image_prefix: self.image_prefix.clone(),
            redirect_grace: Duration::from_millis(self.redirect_grace_ms),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageAppConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub form: FormConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .add_source(File::with_name("config/config").required(false))
            // e.g. MENUDESK__AUTH__JWT_SECRET
            .add_source(Environment::with_prefix("MENUDESK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

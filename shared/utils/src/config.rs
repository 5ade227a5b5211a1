use config::{Config, ConfigError, Environment, File};
use labstock_models::InventorySource;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub inventory: InventoryConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Searched in the order listed
    pub sources: Vec<SourceConfig>,
    pub cache_ttl_seconds: u64,
    pub fetch_timeout_seconds: u64,
    /// Treat a value filter naming a source as "list everything this owner has"
    pub owner_shortcut: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding `to_be_ordered.txt`
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub metrics_enabled: bool,
    pub prometheus_namespace: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with LABSTOCK prefix
            .add_source(Environment::with_prefix("LABSTOCK").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl InventoryConfig {
    pub fn inventory_sources(&self) -> Vec<InventorySource> {
        self.sources
            .iter()
            .map(|source| InventorySource::new(source.name.clone(), source.url.clone()))
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let base_url = "http://localhost:9000/inventory";
        let sources = ["workshop", "federico", "federico_printer_room", "marcel", "hemal", "abasalt"]
            .iter()
            .map(|name| SourceConfig {
                name: name.to_string(),
                url: format!("{}/extracted_texts_{}.txt", base_url, labstock_models::owner_label(name)),
            })
            .collect();

        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_request_size: 64 * 1024, // 64KB
                timeout_seconds: 30,
            },
            inventory: InventoryConfig {
                sources,
                cache_ttl_seconds: 3600,
                fetch_timeout_seconds: 30,
                owner_shortcut: true,
            },
            ledger: LedgerConfig {
                directory: "data".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                file_path: None,
            },
            monitoring: MonitoringConfig {
                metrics_enabled: true,
                prometheus_namespace: "labstock".to_string(),
            },
        }
    }
}

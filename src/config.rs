use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Hanko Relay
///
/// The registry app id, its field codes, and the tenant base URL were
/// deployment constants in earlier customizations; here they are all
/// injected at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HankoRelayConfig {
    /// Host platform connection settings
    pub platform: PlatformConfig,
    /// Stamp registry settings
    pub registry: RegistryConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// Tenant base URL, e.g. https://your-tenant.example.com
    pub base_url: String,
    /// Platform API token (can be set via env var)
    pub api_token: Option<String>,
    /// Anti-forgery token attached to file uploads, when the tenant
    /// requires one
    pub request_token: Option<String>,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    pub requests_per_second: u32,
    /// Burst capacity
    pub burst_capacity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// App id of the stamp registry collection
    pub app_id: u64,
    /// Field code holding the owning user's code
    pub user_code_field: String,
    /// Attachment field code holding the registered stamp image
    pub stamp_file_field: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Enable structured tracing output
    pub tracing_enabled: bool,
    /// Log level
    pub log_level: String,
}

impl Default for HankoRelayConfig {
    fn default() -> Self {
        Self {
            platform: PlatformConfig {
                base_url: "https://your-tenant.example.com".to_string(),
                api_token: None, // Read from env var or hanko-relay.toml
                request_token: None,
                rate_limit: RateLimitConfig {
                    requests_per_second: 10,
                    burst_capacity: 20,
                },
            },
            registry: RegistryConfig {
                app_id: 6,
                user_code_field: "approver".to_string(),
                stamp_file_field: "stamp_image".to_string(),
            },
            observability: ObservabilityConfig {
                tracing_enabled: true,
                log_level: "info".to_string(),
            },
        }
    }
}

impl HankoRelayConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (hanko-relay.toml)
    /// 3. Environment variables (prefixed with HANKO_RELAY_)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("hanko-relay.toml").exists() {
            builder = builder.add_source(File::with_name("hanko-relay"));
        }

        builder = builder.add_source(
            Environment::with_prefix("HANKO_RELAY")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut relay_config: HankoRelayConfig = config.try_deserialize()?;

        // Special handling for the API token - check multiple sources
        if relay_config.platform.api_token.is_none() {
            if let Ok(token) = std::env::var("HANKO_RELAY_API_TOKEN") {
                relay_config.platform.api_token = Some(token);
            } else if let Ok(token) = std::env::var("PLATFORM_API_TOKEN") {
                relay_config.platform.api_token = Some(token);
            }
        }

        Ok(relay_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }

    /// Deep link to the stamp registry app, used in registration
    /// guidance shown to users without a registered stamp.
    pub fn registry_url(&self) -> String {
        format!(
            "{}/app/{}/",
            self.platform.base_url.trim_end_matches('/'),
            self.registry.app_id
        )
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<HankoRelayConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = HankoRelayConfig::load_env_file();
        HankoRelayConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static HankoRelayConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_url_joins_base_and_app_id() {
        let mut config = HankoRelayConfig::default();
        config.platform.base_url = "https://tenant.example.com/".to_string();
        config.registry.app_id = 6;
        assert_eq!(config.registry_url(), "https://tenant.example.com/app/6/");
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let config = HankoRelayConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: HankoRelayConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.registry.app_id, config.registry.app_id);
        assert_eq!(parsed.platform.rate_limit.requests_per_second, 10);
    }
}

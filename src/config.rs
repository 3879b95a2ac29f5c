use std::env;
use thiserror::Error;

use crate::services::pricing_service::PricingPolicy;
use crate::services::wizard_service::{WizardConfig, WizardPreset};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "EcoEase";
const SESSION_TTL_MINUTES: i64 = 60;
#[cfg(debug_assertions)]
const DEV_JWT_SECRET: &str = "ecoease-dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Mongo { uri: String, database: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub jwt_secret: String,
    pub pricing: PricingPolicy,
    pub wizard_preset: WizardPreset,
    pub session_ttl_minutes: i64,
    pub cors_origin: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from the process environment, loading
    /// `.env` first in debug builds.
    pub fn from_env() -> Result<Self, ConfigError> {
        if cfg!(debug_assertions) {
            dotenv::dotenv().ok();
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| HOST.to_string());
        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => PORT,
        };

        let use_memory = matches!(lookup("BOOKING_STORE").as_deref(), Some("memory"));
        let store = match lookup("MONGODB_URI") {
            Some(uri) if !use_memory => StoreBackend::Mongo {
                uri,
                database: lookup("MONGODB_DATABASE").unwrap_or_else(|| DATABASE.to_string()),
            },
            _ => StoreBackend::Memory,
        };

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None => Self::fallback_jwt_secret()?,
        };

        let pricing = match lookup("APPLY_FREQUENCY_DISCOUNT").as_deref() {
            None | Some("false") | Some("0") => PricingPolicy::Observed,
            Some("true") | Some("1") => PricingPolicy::ApplyFrequencyDiscount,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "APPLY_FREQUENCY_DISCOUNT",
                    value: other.to_string(),
                })
            }
        };

        let wizard_preset = match lookup("WIZARD_PRESET") {
            Some(name) => WizardPreset::from_name(&name).ok_or(ConfigError::Invalid {
                name: "WIZARD_PRESET",
                value: name.clone(),
            })?,
            None => WizardPreset::default(),
        };

        let session_ttl_minutes = match lookup("WIZARD_SESSION_TTL_MINUTES") {
            Some(value) => match value.parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "WIZARD_SESSION_TTL_MINUTES",
                        value,
                    })
                }
            },
            None => SESSION_TTL_MINUTES,
        };

        Ok(AppConfig {
            host,
            port,
            store,
            jwt_secret,
            pricing,
            wizard_preset,
            session_ttl_minutes,
            cors_origin: lookup("CORS_ORIGIN"),
        })
    }

    #[cfg(debug_assertions)]
    fn fallback_jwt_secret() -> Result<String, ConfigError> {
        log::warn!("JWT_SECRET not set, using the development secret");
        Ok(DEV_JWT_SECRET.to_string())
    }

    #[cfg(not(debug_assertions))]
    fn fallback_jwt_secret() -> Result<String, ConfigError> {
        Err(ConfigError::Missing("JWT_SECRET"))
    }

    pub fn wizard_config(&self) -> WizardConfig {
        self.wizard_config_for(self.wizard_preset)
    }

    pub fn wizard_config_for(&self, preset: WizardPreset) -> WizardConfig {
        WizardConfig::preset(preset, self.pricing)
    }
}

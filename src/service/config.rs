use std::{env, sync::Arc};

use crate::config::Config;

pub trait ConfigService: Send + Sync {
    fn port(&self) -> u16;
    fn values(&self) -> &Config;
}

pub struct ConfigServiceImpl {
    config: Arc<Config>,
}

impl ConfigServiceImpl {
    fn strip_wrapping_quotes(value: &str) -> &str {
        if value.len() >= 2 {
            let bytes = value.as_bytes();
            let first = bytes[0];
            let last = bytes[value.len() - 1];
            if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
                return &value[1..value.len() - 1];
            }
        }
        value
    }

    fn env_nonempty(key: &str) -> Option<String> {
        env::var(key).ok().and_then(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return None;
            }
            let normalized = Self::strip_wrapping_quotes(trimmed).trim();
            if normalized.is_empty() {
                None
            } else {
                Some(normalized.to_string())
            }
        })
    }

    fn env_u16(key: &str) -> Option<u16> {
        Self::env_nonempty(key).and_then(|value| value.parse::<u16>().ok())
    }

    fn env_u64(key: &str) -> Option<u64> {
        Self::env_nonempty(key).and_then(|value| value.parse::<u64>().ok())
    }

    /// Reads the full configuration surface from the environment. The
    /// identity key has no default on purpose: starting without one would
    /// silently mint tokens nobody else can decrypt.
    pub fn new() -> Self {
        let port = Self::env_u16("PORT").unwrap_or(8080);
        let identity_secret_key =
            Self::env_nonempty("IDENTITY_SECRET_KEY").expect("IDENTITY_SECRET_KEY is not set");
        let default_role_id =
            Self::env_nonempty("DEFAULT_ROLE_ID").unwrap_or_else(|| "ROLE_MEMBER".to_string());
        let default_event_level =
            Self::env_nonempty("DEFAULT_EVENT_LEVEL").unwrap_or_else(|| "INFO".to_string());
        let admin_role_id =
            Self::env_nonempty("ADMIN_ROLE_ID").unwrap_or_else(|| "ROLE_ADMIN".to_string());
        let page_size = Self::env_u64("PAGE_SIZE").unwrap_or(10);

        Self {
            config: Arc::new(Config {
                port,
                identity_secret_key,
                default_role_id,
                default_event_level,
                admin_role_id,
                page_size,
            }),
        }
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl ConfigService for ConfigServiceImpl {
    fn port(&self) -> u16 {
        self.config.port
    }

    fn values(&self) -> &Config {
        &self.config
    }
}

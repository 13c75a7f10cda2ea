//! # esi-config
//!
//! Layered configuration loading for the ESI contact backend using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ESI_*` prefix, `__` as separator)
//! 2. Flat variables the site has always used (`PORT`, `SMTP_HOST`, `SMTP_PORT`,
//!    `SMTP_SECURE`, `SMTP_USER`, `SMTP_PASS`, `TO_EMAIL`, `FROM_EMAIL`,
//!    `INBOX_PATH`, `SITE_ROOT`)
//! 3. An explicit config file (`esi --config <file>`), else `./esi.toml`
//! 4. User-level `~/.config/esi/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ESI_SMTP__HOST` -> `smtp.host`, `ESI_SERVER__PORT` -> `server.port`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use esi_config::EsiConfig;
//!
//! let config = EsiConfig::load_with_dotenv(None).expect("config");
//! if config.smtp.is_configured() {
//!     println!("Relaying to {}", config.smtp.recipient());
//! }
//! ```

mod de;
mod error;
mod inbox;
mod server;
mod smtp;

pub use error::ConfigError;
pub use inbox::InboxConfig;
pub use server::ServerConfig;
pub use smtp::SmtpConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Flat environment variables and the config keys they populate.
const LEGACY_ENV_KEYS: [(&str, &str); 10] = [
    ("PORT", "server.port"),
    ("SITE_ROOT", "server.site_root"),
    ("INBOX_PATH", "inbox.path"),
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_SECURE", "smtp.secure"),
    ("SMTP_USER", "smtp.user"),
    ("SMTP_PASS", "smtp.pass"),
    ("TO_EMAIL", "smtp.to_email"),
    ("FROM_EMAIL", "smtp.from_email"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EsiConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub inbox: InboxConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl EsiConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config_file` is given but missing, if a
    /// source cannot be parsed, or if a value is out of range.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }
        let config: Self = Self::figment(config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building
    /// the figment. Variables already set in the process environment win.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_file)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = config_file.map_or_else(|| PathBuf::from("esi.toml"), Path::to_path_buf);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Self::legacy_env())
            .merge(Env::prefixed("ESI_").split("__"))
    }

    /// Flat, unprefixed variables from the site's existing `.env` layout.
    fn legacy_env() -> Env {
        let names: Vec<&'static str> = LEGACY_ENV_KEYS.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|key| {
            LEGACY_ENV_KEYS
                .iter()
                .find(|(name, _)| key == *name)
                .map_or_else(|| key.as_str().to_owned().into(), |(_, path)| (*path).into())
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("esi").join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "smtp.timeout_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.body_limit_bytes".into(),
                reason: "must be greater than zero".into(),
            });
        }
        self.server.socket_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = EsiConfig::default();
        assert!(!config.smtp.is_configured());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.inbox.path, PathBuf::from("inbox.jsonl"));
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: EsiConfig = EsiConfig::figment(None).extract()?;
            assert!(!config.smtp.is_configured());
            assert_eq!(config.smtp.timeout_secs, 10);
            Ok(())
        });
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = EsiConfig::default();
        config.smtp.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}

use anyhow::Result;
use axum_extra::extract::cookie::Key;
use config::{Config, ConfigError, Environment, File};
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use service::OwnershipPolicy;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::schemas::AppState;

/// Shortest secret accepted for signing session cookies.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSettings {
    /// Cookie signing secret. A random per-process key is used when unset.
    #[serde(default)]
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteSettings {
    #[serde(default)]
    pub ownership: OwnershipPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub notes: NoteSettings,
}

impl Settings {
    /// Layer defaults, an optional config file and `NOTEKEEPER_*` variables.
    ///
    /// Nested keys use `__` in variable names, e.g. `NOTEKEEPER_DATABASE__URL`.
    ///
    /// `.env` must already be loaded, see [`crate::cli::load_dotenv`].
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name("notekeeper").required(false),
        };

        Config::builder()
            .set_default("server.bind_address", "0.0.0.0:5000")?
            .set_default("database.url", "sqlite://notekeeper.db?mode=rwc")?
            .set_default("notes.ownership", OwnershipPolicy::default().as_str())?
            .add_source(file)
            .add_source(
                Environment::with_prefix("NOTEKEEPER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Build the cookie signing key from the configured secret.
    pub fn signing_key(&self) -> Result<Key> {
        match &self.session.secret {
            Some(secret) => {
                if secret.len() < MIN_SECRET_LEN {
                    anyhow::bail!(
                        "session.secret must be at least {} bytes, got {}",
                        MIN_SECRET_LEN,
                        secret.len()
                    );
                }
                Key::try_from(secret.as_bytes())
                    .map_err(|e| anyhow::anyhow!("Invalid session.secret: {:?}", e))
            }
            None => {
                warn!("No session.secret configured; sessions will not survive a restart");
                Ok(Key::generate())
            }
        }
    }
}

/// Username to user id lookups. Users are never renamed or deleted.
pub fn user_id_cache() -> Cache<String, i32> {
    Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build()
}

/// Initialize application state from loaded settings
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database.url);
    let db = Database::connect(&settings.database.url).await?;
    debug!("Note ownership policy: {:?}", settings.notes.ownership);

    Ok(AppState {
        db,
        user_ids: user_id_cache(),
        key: settings.signing_key()?,
        ownership: settings.notes.ownership,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings_with_secret(secret: Option<&str>) -> Settings {
        Settings {
            server: ServerSettings {
                bind_address: "127.0.0.1:0".to_string(),
            },
            database: DatabaseSettings {
                url: "sqlite::memory:".to_string(),
            },
            session: SessionSettings {
                secret: secret.map(str::to_string),
            },
            notes: NoteSettings::default(),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert!(!settings.server.bind_address.is_empty());
        assert!(!settings.database.url.is_empty());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
bind_address = "127.0.0.1:8080"

[database]
url = "sqlite::memory:"

[notes]
ownership = "strict"
"#
        )
        .unwrap();

        let settings = Settings::load(file.path().to_str()).unwrap();
        assert_eq!(settings.server.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert_eq!(settings.notes.ownership, OwnershipPolicy::Strict);
        assert!(settings.session.secret.is_none());
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        assert!(Settings::load(Some("/nonexistent/notekeeper-config.toml")).is_err());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let settings = settings_with_secret(Some("too-short"));
        assert!(settings.signing_key().is_err());
    }

    #[test]
    fn test_long_secret_is_accepted() {
        let secret = "s".repeat(MIN_SECRET_LEN);
        let settings = settings_with_secret(Some(&secret));
        assert!(settings.signing_key().is_ok());
    }

    #[test]
    fn test_missing_secret_generates_key() {
        let settings = settings_with_secret(None);
        assert!(settings.signing_key().is_ok());
    }
}

//! Process settings loaded via OrthoConfig.
//!
//! Values layer from config files, `DIRECTORY_*` environment variables, and
//! command-line flags (`--redis-addr`, `--is-production`, ...).

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ViewMode;
use crate::outbound::redis_store::RedisStoreConfig;
use crate::seeding::SeedSettings;

const DEFAULT_REDIS_ADDR: &str = "localhost:6379";
const DEFAULT_REDIS_TIMEOUT_MS: u64 = 500;
const DEFAULT_LISTEN_ADDR: &str = "localhost:8080";

/// Settings controlling the store connection, the HTTP listener, and which
/// page is served.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct DirectorySettings {
    /// Redis address, `host:port` or a `redis://` URL.
    pub redis_addr: Option<String>,
    /// Redis dial timeout in milliseconds.
    pub redis_timeout_ms: Option<u64>,
    /// Address the HTTP server binds to.
    pub listen_addr: Option<String>,
    /// Serve the usernames-only page and seed the directory at startup.
    #[ortho_config(default = false)]
    pub is_production: bool,
    /// Print emoji in the page heading.
    #[ortho_config(default = false)]
    pub print_emoji: bool,
    /// JSON file to seed from instead of the built-in directory.
    pub seed_path: Option<PathBuf>,
}

impl DirectorySettings {
    /// Configured Redis address, falling back to `localhost:6379`.
    pub fn redis_addr(&self) -> &str {
        self.redis_addr.as_deref().unwrap_or(DEFAULT_REDIS_ADDR)
    }

    /// Configured dial timeout, falling back to 500 ms.
    pub fn redis_timeout(&self) -> Duration {
        Duration::from_millis(self.redis_timeout_ms.unwrap_or(DEFAULT_REDIS_TIMEOUT_MS))
    }

    /// Configured listen address, falling back to `localhost:8080`.
    pub fn listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }

    /// Page served at `/`.
    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_production_flag(self.is_production)
    }

    /// Connection parameters for the Redis adapter.
    pub fn redis_config(&self) -> RedisStoreConfig {
        RedisStoreConfig::new(self.redis_addr()).with_dial_timeout(self.redis_timeout())
    }

    /// Startup seeding settings. Production deployments seed; development
    /// deployments read whatever is already stored.
    pub fn seed_settings(&self) -> SeedSettings {
        SeedSettings {
            enabled: self.is_production,
            seed_path: self.seed_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "DIRECTORY_REDIS_ADDR",
        "DIRECTORY_REDIS_TIMEOUT_MS",
        "DIRECTORY_LISTEN_ADDR",
        "DIRECTORY_IS_PRODUCTION",
        "DIRECTORY_PRINT_EMOJI",
        "DIRECTORY_SEED_PATH",
    ];

    fn load_from_empty_args() -> DirectorySettings {
        DirectorySettings::load_from_iter([OsString::from("user-directory")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.redis_addr(), DEFAULT_REDIS_ADDR);
        assert_eq!(settings.redis_timeout(), Duration::from_millis(500));
        assert_eq!(settings.listen_addr(), DEFAULT_LISTEN_ADDR);
        assert!(!settings.is_production);
        assert!(!settings.print_emoji);
        assert_eq!(settings.view_mode(), ViewMode::Detail);
        assert!(!settings.seed_settings().enabled);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DIRECTORY_REDIS_ADDR", Some("cache:6380".to_owned())),
            ("DIRECTORY_REDIS_TIMEOUT_MS", Some("250".to_owned())),
            ("DIRECTORY_LISTEN_ADDR", Some("0.0.0.0:9000".to_owned())),
            ("DIRECTORY_IS_PRODUCTION", Some("true".to_owned())),
            ("DIRECTORY_PRINT_EMOJI", Some("true".to_owned())),
            ("DIRECTORY_SEED_PATH", Some("/tmp/seed.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.redis_addr(), "cache:6380");
        assert_eq!(settings.redis_timeout(), Duration::from_millis(250));
        assert_eq!(settings.listen_addr(), "0.0.0.0:9000");
        assert!(settings.print_emoji);
        assert_eq!(settings.view_mode(), ViewMode::Summary);

        let seeding = settings.seed_settings();
        assert!(seeding.enabled);
        assert_eq!(seeding.seed_path, Some(PathBuf::from("/tmp/seed.json")));

        let redis = settings.redis_config();
        assert_eq!(redis.connection_url(), "redis://cache:6380/");
        assert_eq!(redis.dial_timeout(), Duration::from_millis(250));
    }
}

//! Database configuration.
//!
//! Settings are layered: built-in defaults, then an optional
//! `config/config.toml`, then `UMBRELLA_*` environment variables
//! (e.g. `UMBRELLA_HOST`, `UMBRELLA_PASSWORD`).

use serde::Deserialize;

/// Connection settings for the forum database.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_dbname")]
    pub dbname: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5433
}

fn default_dbname() -> String {
    "umbrella_flask".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_password() -> String {
    "postgres".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: default_password(),
        }
    }
}

impl DatabaseConfig {
    /// Load configuration from `config/config.toml` (if present) and
    /// `UMBRELLA_*` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/config.toml").required(false))
            .add_source(config::Environment::with_prefix("UMBRELLA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Render the key-value connection string `may_postgres` expects.
    ///
    /// Key-value form avoids percent-encoding concerns with passwords that
    /// would not survive a URI.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            self.host, self.port, self.dbname, self.user, self.password
        )
    }
}

//! Process configuration read from environment variables.
//!
//! | Variable                | Default             |
//! |-------------------------|---------------------|
//! | `ADDRESS`               | `localhost`         |
//! | `PORT`                  | `4000`              |
//! | `TEST_MODE`             | `false`             |
//! | `DB_URI`                | required unless `TEST_MODE` |
//! | `DB_MIGRATIONS_DIR`     | `file://migrations` |
//! | `DB_MIGRATIONS_VERBOSE` | `false`             |
//!
//! Values are read through [`mockable::Env`] so tests can supply them without
//! touching the process environment. Unparsable values log a warning and fall
//! back to the default.

use std::str::FromStr;

use mockable::Env;
use tracing::warn;

const ADDRESS_ENV: &str = "ADDRESS";
const PORT_ENV: &str = "PORT";
const TEST_MODE_ENV: &str = "TEST_MODE";
pub(crate) const DB_URI_ENV: &str = "DB_URI";
const DB_MIGRATIONS_DIR_ENV: &str = "DB_MIGRATIONS_DIR";
const DB_MIGRATIONS_VERBOSE_ENV: &str = "DB_MIGRATIONS_VERBOSE";

const DEFAULT_ADDRESS: &str = "localhost";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MIGRATIONS_DIR: &str = "file://migrations";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Errors raised while assembling the configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the variable.
        name: &'static str,
    },
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Interface to bind, `ADDRESS`.
    pub address: String,
    /// Listening port, `PORT`.
    pub port: u16,
}

/// Application behaviour toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppSettings {
    /// Serve from the in-memory store instead of PostgreSQL.
    pub test_mode: bool,
}

/// Database settings.
///
/// Migrations are applied outside the service; the directory and verbosity
/// are carried for the tooling that runs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Connection string, `DB_URI`; required outside test mode.
    pub uri: Option<String>,
    /// Migration source, `DB_MIGRATIONS_DIR`.
    pub migrations_dir: String,
    /// Verbose migration logging, `DB_MIGRATIONS_VERBOSE`.
    pub migrations_log_verbose: bool,
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Listener settings.
    pub server: ServerSettings,
    /// Behaviour toggles.
    pub app: AppSettings,
    /// Store settings.
    pub database: DatabaseSettings,
}

impl AdminConfig {
    /// Read the configuration from `env`, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when `DB_URI` is unset and test
    /// mode is off.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_api::config::AdminConfig;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "TEST_MODE" => Some("yes".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let config = AdminConfig::from_env(&env).expect("test mode needs no DB_URI");
    /// assert_eq!(config.server.port, 4000);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let app = AppSettings {
            test_mode: bool_from_env(env, TEST_MODE_ENV, false),
        };
        let uri = env.string(DB_URI_ENV).filter(|uri| !uri.is_empty());
        if uri.is_none() && !app.test_mode {
            return Err(ConfigError::MissingEnv { name: DB_URI_ENV });
        }

        Ok(Self {
            server: ServerSettings {
                address: env
                    .string(ADDRESS_ENV)
                    .unwrap_or_else(|| DEFAULT_ADDRESS.to_owned()),
                port: parsed_from_env(env, PORT_ENV, DEFAULT_PORT),
            },
            app,
            database: DatabaseSettings {
                uri,
                migrations_dir: env
                    .string(DB_MIGRATIONS_DIR_ENV)
                    .unwrap_or_else(|| DEFAULT_MIGRATIONS_DIR.to_owned()),
                migrations_log_verbose: bool_from_env(env, DB_MIGRATIONS_VERBOSE_ENV, false),
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn bool_from_env<E: Env>(env: &E, name: &'static str, default_value: bool) -> bool {
    let Some(value) = env.string(name) else {
        return default_value;
    };
    parse_bool(&value).unwrap_or_else(|| {
        warn!(
            value = %value,
            expected = BOOL_EXPECTED,
            "invalid {name}; defaulting to {default_value}"
        );
        default_value
    })
}

fn parsed_from_env<E: Env, T>(env: &E, name: &'static str, default_value: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(value) = env.string(name) else {
        return default_value;
    };
    value.trim().parse().unwrap_or_else(|_| {
        warn!(value = %value, "invalid {name}; defaulting to {default_value}");
        default_value
    })
}

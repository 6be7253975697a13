use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

pub mod models;
pub use models::*;

/// Prefix for environment overrides, e.g. `PSI__BOOKING__SESSION_PRICE=180`.
pub const ENV_PREFIX: &str = "PSI";

/// Marker value replaced by an environment variable named after the config path.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Loads the layered configuration.
///
/// Sources, later ones winning: built-in defaults, `config/default.*`,
/// `config/{RUN_ENV}.*`, then `PSI__SECTION__KEY` environment variables.
/// The config directory can be moved with `PSICONNECT_CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("PSICONNECT_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env)
}

/// Same as [`load_config`] but with an explicit directory and environment name.
pub fn load_config_from(config_dir: &std::path::Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("booking.time_slots")
                .with_list_parse_key("booking.extra_holidays")
                .try_parsing(true),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    let config = apply_env_overrides_from_marker(raw_config)?;
    config.validate()?;
    Ok(config)
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    warn!("env var {} not found for {}", env_key, SECRET_MARKER);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

impl AppConfig {
    /// Rejects values that would make the booking flow meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let booking = &self.booking;
        if booking.max_selected_slots == 0 {
            return Err(ConfigError::Message(
                "booking.max_selected_slots must be at least 1".to_string(),
            ));
        }
        if booking.days_per_period == 0 {
            return Err(ConfigError::Message(
                "booking.days_per_period must be at least 1".to_string(),
            ));
        }
        if booking.session_price < 0 {
            return Err(ConfigError::Message(
                "booking.session_price must not be negative".to_string(),
            ));
        }
        if booking.time_slots.is_empty() {
            return Err(ConfigError::Message(
                "booking.time_slots must not be empty".to_string(),
            ));
        }
        for time in &booking.time_slots {
            NaiveTime::parse_from_str(time, "%H:%M").map_err(|err| {
                ConfigError::Message(format!("invalid time slot '{time}': {err}"))
            })?;
        }
        for day in &booking.extra_holidays {
            NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|err| {
                ConfigError::Message(format!("invalid holiday '{day}': {err}"))
            })?;
        }
        self.time_zone()?;
        Ok(())
    }

    /// The configured booking time zone.
    pub fn time_zone(&self) -> Result<Tz, ConfigError> {
        self.booking.time_zone.parse::<Tz>().map_err(|err| {
            ConfigError::Message(format!(
                "invalid time zone '{}': {err}",
                self.booking.time_zone
            ))
        })
    }
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file once per process.
///
/// The path comes from `DOTENV_OVERRIDE`, else from the first command line
/// argument when it starts with `.env`, else `.env`. Returns the path used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

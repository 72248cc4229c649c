use app_error::AppError;
use app_log::LogLevel;
use dotenv::dotenv;
use log::*;
use serde::{Deserialize, Serialize};
use std::{env, fs, io::Read};

/// Account created at bootstrap when no user with that username exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_bind: String, // 0.0.0.0:5000
    #[serde(default)]
    pub log_level: LogLevel, // Off, Error, Warn, Info, Debug, Trace
    pub database_url: String, // sqlite://chatbot.db
    #[serde(default = "default_db_connection")]
    pub db_connection: u32,
    pub jwt_access_key: String,
    #[serde(default = "default_jwt_session_hours")]
    pub jwt_session_hours: i64,
    #[serde(default = "default_match_threshold")]
    pub match_threshold: usize,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default)]
    pub seed_admin: Option<SeedAdmin>,
}

fn default_db_connection() -> u32 {
    5
}

fn default_jwt_session_hours() -> i64 {
    24
}

fn default_match_threshold() -> usize {
    1
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl AppConfig {
    /// Reads the JSON file named by `APP_CONFIG`; `DATABASE_URL` overrides `database_url`.
    pub fn new() -> Result<Self, AppError> {
        dotenv().ok();
        let config_file_path = env::var("APP_CONFIG").map_err(|e| {
            debug!("{}", &e);
            AppError::config(format!(
                "Cannot locate config file; please set APP_CONFIG env variable! {e}"
            ))
        })?;
        let config_file = fs::File::open(&config_file_path).map_err(|e| {
            debug!("{}", &e);
            AppError::config(format!("Cannot read config file {config_file_path}! {e}"))
        })?;
        let mut config = Self::from_reader(config_file)?;
        if let Ok(database_url) = env::var("DATABASE_URL") {
            config.database_url = database_url;
        }
        Ok(config)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        serde_json::from_reader(reader).map_err(|e| {
            debug!("{}", &e);
            AppError::config(format!("Cannot parse json! {e}"))
        })
    }

    pub fn effective_threshold(&self) -> usize {
        self.match_threshold.max(1)
    }
}

use std::env;
use std::time::Duration;

use followers_common::error::{FollowersError, FollowersResult};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub neo4j_uri: String,
    pub neo4j_username: String,
    pub neo4j_password: String,
    pub neo4j_database: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub startup_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> FollowersResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            neo4j_uri: get_var("NEO4J_DB")?,
            neo4j_username: get_var("NEO4J_USERNAME")?,
            neo4j_password: get_var("NEO4J_PASS")?,
            neo4j_database: get_var_or("NEO4J_DATABASE", "neo4j"),
            host: get_var_or("HOST", "0.0.0.0"),
            port: get_var_or("PORT", "8080")
                .parse()
                .map_err(|e| FollowersError::Config(format!("invalid PORT: {e}")))?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            startup_timeout_secs: get_var_or("STARTUP_TIMEOUT_SECS", "90")
                .parse()
                .map_err(|e| {
                    FollowersError::Config(format!("invalid STARTUP_TIMEOUT_SECS: {e}"))
                })?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}

fn get_var(key: &str) -> FollowersResult<String> {
    env::var(key).map_err(|_| FollowersError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

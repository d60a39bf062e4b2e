use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an unparsable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an unparsable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Every variable has a default; a fresh checkout runs on curated data with no
/// environment at all. `META_ACCESS_TOKEN` is the only credential and is optional.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ARUMA_ENV", "development"));

    let bind_addr = parse_addr("ARUMA_BIND_ADDR", "0.0.0.0:4000")?;
    let log_level = or_default("ARUMA_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("ARUMA_DATA_DIR", "./data"));
    let watchlist_path = PathBuf::from(or_default(
        "ARUMA_WATCHLIST_PATH",
        "./config/watchlist.yaml",
    ));
    let region = or_default("ARUMA_REGION", "PE");
    let meta_access_token = lookup("META_ACCESS_TOKEN").ok().filter(|t| !t.is_empty());

    let refresh_interval_secs = parse_u64("ARUMA_REFRESH_INTERVAL_SECS", "3600")?;
    let graph_request_timeout_secs = parse_u64("ARUMA_GRAPH_REQUEST_TIMEOUT_SECS", "10")?;
    let graph_post_limit = parse_u32("ARUMA_GRAPH_POST_LIMIT", "15")?;
    let graph_inter_request_delay_ms = parse_u64("ARUMA_GRAPH_INTER_REQUEST_DELAY_MS", "2000")?;
    let collector_user_agent = or_default(
        "ARUMA_COLLECTOR_USER_AGENT",
        "aruma-intel/0.1 (trend-intelligence)",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        watchlist_path,
        region,
        meta_access_token,
        refresh_interval_secs,
        graph_request_timeout_secs,
        graph_post_limit,
        graph_inter_request_delay_ms,
        collector_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

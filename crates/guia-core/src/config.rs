use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Endpoint of the directory's WordPress backend.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://clientes.estudioresortera.cl/graphql";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("GUIA_ENV", "development"));
    let bind_addr = parse_addr("GUIA_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("GUIA_LOG_LEVEL", "info");

    let graphql_endpoint = or_default("GUIA_GRAPHQL_ENDPOINT", DEFAULT_GRAPHQL_ENDPOINT);

    let request_timeout_secs = parse_u64("GUIA_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GUIA_USER_AGENT", "guia-comercios/0.1");
    let cache_ttl_secs = parse_u64("GUIA_CACHE_TTL_SECS", "300")?;
    let cache_max_entries = parse_u64("GUIA_CACHE_MAX_ENTRIES", "1000")?;
    let session_idle_secs = parse_u64("GUIA_SESSION_IDLE_SECS", "1800")?;
    let max_sessions = parse_u64("GUIA_MAX_SESSIONS", "10000")?;
    let rate_limit_per_minute = parse_usize("GUIA_RATE_LIMIT_PER_MINUTE", "300")?;
    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "GUIA_RATE_LIMIT_PER_MINUTE",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        graphql_endpoint,
        request_timeout_secs,
        user_agent,
        cache_ttl_secs,
        cache_max_entries,
        session_idle_secs,
        max_sessions,
        rate_limit_per_minute,
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

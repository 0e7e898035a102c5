use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_API_URL: &str = "http://localhost:8000";

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
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // The frontend build exposed the origin as NEXT_PUBLIC_API_URL; honour it
    // when the native variable is unset.
    let api_url = lookup("REVDASH_API_URL")
        .or_else(|_| lookup("NEXT_PUBLIC_API_URL"))
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    validate_api_url(&api_url)?;

    let env = parse_environment(&or_default("REVDASH_ENV", "development"));
    let log_level = or_default("REVDASH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("REVDASH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("REVDASH_USER_AGENT", "revdash/0.1 (review-dashboard)");

    let page_size = parse_usize("REVDASH_PAGE_SIZE", "10")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REVDASH_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        api_url: api_url.trim_end_matches('/').to_string(),
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        page_size,
    })
}

fn validate_api_url(raw: &str) -> Result<(), ConfigError> {
    let rest = raw
        .strip_prefix("http://")
        .or_else(|| raw.strip_prefix("https://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => Err(ConfigError::InvalidEnvVar {
            var: "REVDASH_API_URL".to_string(),
            reason: format!("'{raw}' is not an http(s) URL"),
        }),
    }
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

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

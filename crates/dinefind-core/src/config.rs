use crate::app_config::{AppConfig, CompletionConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_num = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let narrow = |var: &str, value: u64| -> Result<u32, ConfigError> {
        u32::try_from(value).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let places_api_key = require("GOOGLE_MAPS_API_KEY")?;
    let env = parse_environment(&or_default("DINEFIND_ENV", "development"))?;

    let bind_addr_raw = or_default("DINEFIND_BIND_ADDR", "0.0.0.0:8000");
    let bind_addr =
        bind_addr_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "DINEFIND_BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;
    let log_level = or_default("DINEFIND_LOG_LEVEL", "info");

    let places_base_url = or_default(
        "DINEFIND_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place",
    );
    let places_timeout_secs = parse_num("DINEFIND_PLACES_TIMEOUT_SECS", "10")?;
    let place_type = or_default("DINEFIND_PLACE_TYPE", "restaurant");
    let search_radius_m = narrow(
        "DINEFIND_SEARCH_RADIUS_M",
        parse_num("DINEFIND_SEARCH_RADIUS_M", "5000")?,
    )?;
    let detail_concurrency = usize::try_from(parse_num("DINEFIND_DETAIL_CONCURRENCY", "4")?)
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "DINEFIND_DETAIL_CONCURRENCY".to_string(),
            reason: e.to_string(),
        })?;
    if detail_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DINEFIND_DETAIL_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let search_max_retries = narrow(
        "DINEFIND_SEARCH_MAX_RETRIES",
        parse_num("DINEFIND_SEARCH_MAX_RETRIES", "2")?,
    )?;
    let retry_backoff_base_ms = parse_num("DINEFIND_RETRY_BACKOFF_BASE_MS", "500")?;
    let user_agent = or_default("DINEFIND_USER_AGENT", "dinefind/0.1 (restaurant-discovery)");

    let completion = match optional("DINEFIND_COMPLETION_API_KEY") {
        Some(api_key) => Some(CompletionConfig {
            api_key,
            base_url: or_default("DINEFIND_COMPLETION_BASE_URL", "https://api.kluster.ai/v1"),
            model: or_default(
                "DINEFIND_COMPLETION_MODEL",
                "meta-llama/Llama-4-Maverick-17B-128E-Instruct-FP8",
            ),
            timeout_secs: parse_num("DINEFIND_COMPLETION_TIMEOUT_SECS", "20")?,
        }),
        None => None,
    };
    let recommendations_enabled = parse_bool(
        "DINEFIND_RECOMMENDATIONS",
        &or_default("DINEFIND_RECOMMENDATIONS", "true"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        places_api_key,
        places_base_url,
        places_timeout_secs,
        place_type,
        search_radius_m,
        detail_concurrency,
        search_max_retries,
        retry_backoff_base_ms,
        user_agent,
        completion,
        recommendations_enabled,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DINEFIND_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

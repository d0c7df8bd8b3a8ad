use crate::app_config::AppConfig;
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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let dataforseo_login = require("DATAFORSEO_LOGIN")?;
    let dataforseo_password = require("DATAFORSEO_PASSWORD")?;

    let log_level = or_default("SERPINTEL_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SERPINTEL_REQUEST_TIMEOUT_SECS", "30")?;

    // 2380 / "it" is the Italian market the tool was built for.
    let location_code = parse_u32("SERPINTEL_LOCATION_CODE", "2380")?;
    let language_code = or_default("SERPINTEL_LANGUAGE_CODE", "it");

    let task_wait_secs = parse_u64("SERPINTEL_TASK_WAIT_SECS", "5")?;
    let task_poll_interval_secs = parse_u64("SERPINTEL_TASK_POLL_INTERVAL_SECS", "5")?;
    let task_poll_max_attempts = parse_u32("SERPINTEL_TASK_POLL_MAX_ATTEMPTS", "6")?;
    let forecast_delay_ms = parse_u64("SERPINTEL_FORECAST_DELAY_MS", "1000")?;
    let keyword_concurrency = parse_usize("SERPINTEL_KEYWORD_CONCURRENCY", "1")?;

    Ok(AppConfig {
        dataforseo_login,
        dataforseo_password,
        log_level,
        request_timeout_secs,
        location_code,
        language_code,
        task_wait_secs,
        task_poll_interval_secs,
        task_poll_max_attempts,
        forecast_delay_ms,
        keyword_concurrency,
    })
}

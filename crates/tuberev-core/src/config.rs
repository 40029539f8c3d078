use crate::app_config::{AppConfig, Environment};
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
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    // Request handlers clamp video counts into 1..=cap, so a zero here
    // would make that range empty and panic at request time.
    let parse_positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = parse_u32(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    // The API credential is the only hard requirement: without it every
    // outbound call would be rejected, so startup fails instead.
    let youtube_api_key = require("YOUTUBE_API_KEY")?;

    let env = parse_environment(&or_default("TUBEREV_ENV", "development"));
    let bind_addr = parse_addr("TUBEREV_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("TUBEREV_LOG_LEVEL", "info");

    let youtube_timeout_secs = parse_u64("TUBEREV_YOUTUBE_TIMEOUT_SECS", "30")?;
    let youtube_max_retries = parse_u32("TUBEREV_YOUTUBE_MAX_RETRIES", "2")?;
    let youtube_retry_backoff_base_ms = parse_u64("TUBEREV_YOUTUBE_RETRY_BACKOFF_BASE_MS", "500")?;

    let max_videos_default = parse_positive_u32("TUBEREV_MAX_VIDEOS_DEFAULT", "30")?;
    let max_videos_cap = parse_positive_u32("TUBEREV_MAX_VIDEOS_CAP", "200")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        youtube_api_key,
        youtube_timeout_secs,
        youtube_max_retries,
        youtube_retry_backoff_base_ms,
        max_videos_default,
        max_videos_cap,
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

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("YOUTUBE_API_KEY", "test-api-key");
        m
    }

    #[test]
    fn parse_environment_development() {
        assert_eq!(parse_environment("development"), Environment::Development);
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "YOUTUBE_API_KEY"),
            "expected MissingEnvVar(YOUTUBE_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("TUBEREV_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TUBEREV_BIND_ADDR"),
            "expected InvalidEnvVar(TUBEREV_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.youtube_api_key, "test-api-key");
        assert_eq!(cfg.youtube_timeout_secs, 30);
        assert_eq!(cfg.youtube_max_retries, 2);
        assert_eq!(cfg.youtube_retry_backoff_base_ms, 500);
        assert_eq!(cfg.max_videos_default, 30);
        assert_eq!(cfg.max_videos_cap, 200);
    }

    #[test]
    fn youtube_timeout_secs_override() {
        let mut map = full_env();
        map.insert("TUBEREV_YOUTUBE_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.youtube_timeout_secs, 60);
    }

    #[test]
    fn youtube_timeout_secs_invalid() {
        let mut map = full_env();
        map.insert("TUBEREV_YOUTUBE_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TUBEREV_YOUTUBE_TIMEOUT_SECS"),
            "expected InvalidEnvVar(TUBEREV_YOUTUBE_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn youtube_max_retries_override() {
        let mut map = full_env();
        map.insert("TUBEREV_YOUTUBE_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.youtube_max_retries, 5);
    }

    #[test]
    fn max_videos_default_override() {
        let mut map = full_env();
        map.insert("TUBEREV_MAX_VIDEOS_DEFAULT", "50");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_videos_default, 50);
    }

    #[test]
    fn max_videos_cap_invalid() {
        let mut map = full_env();
        map.insert("TUBEREV_MAX_VIDEOS_CAP", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TUBEREV_MAX_VIDEOS_CAP"),
            "expected InvalidEnvVar(TUBEREV_MAX_VIDEOS_CAP), got: {result:?}"
        );
    }

    #[test]
    fn max_videos_cap_zero_is_rejected() {
        let mut map = full_env();
        map.insert("TUBEREV_MAX_VIDEOS_CAP", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TUBEREV_MAX_VIDEOS_CAP"),
            "a zero cap would panic the request clamp, got: {result:?}"
        );
    }

    #[test]
    fn max_videos_default_zero_is_rejected() {
        let mut map = full_env();
        map.insert("TUBEREV_MAX_VIDEOS_DEFAULT", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TUBEREV_MAX_VIDEOS_DEFAULT"),
            "expected InvalidEnvVar(TUBEREV_MAX_VIDEOS_DEFAULT), got: {result:?}"
        );
    }

    #[test]
    fn app_config_debug_redacts_api_key() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("test-api-key"), "got: {rendered}");
        assert!(rendered.contains("[redacted]"), "got: {rendered}");
    }
}

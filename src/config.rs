//! Configuration loader: merges env vars, .env file, and ttime.toml.

use common::config::AppConfig;
use common::Error;
use std::path::Path;

const CONFIG_FILE: &str = "ttime.toml";

fn parse_positive_u64(raw: &str, env_name: &str) -> Result<u64, Error> {
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn parse_bool(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    lowered != "0" && lowered != "false" && lowered != "no" && lowered != "off"
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn validate_config(config: &AppConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.enable_caching && config.cache_duration_secs == 0 {
        issues.push("cache_duration_secs must be > 0 when caching is enabled".into());
    }
    if config.request_timeout_secs == 0 {
        issues.push("request_timeout_secs must be > 0".into());
    }
    if config.refresh_interval_secs == 0 {
        issues.push("refresh_interval_secs must be > 0".into());
    }
    if config.weather.location.trim().is_empty() {
        issues.push("weather.location must not be empty".into());
    }
    if config.news.sources.is_empty() {
        if config.news.country.trim().is_empty() {
            issues.push("news.country must not be empty when news.sources is empty".into());
        }
        if config.news.category.trim().is_empty() {
            issues.push("news.category must not be empty when news.sources is empty".into());
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Apply environment overrides on top of file/default values.
fn apply_env_overrides(
    config: &mut AppConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), Error> {
    if let Some(key) = env("WEATHER_API_KEY") {
        config.weather.api_key = key;
    }
    if let Some(key) = env("NEWS_API_KEY") {
        config.news.api_key = key;
    }
    if let Some(raw) = env("TTIME_USE_LIVE_DATA") {
        config.use_live_data = parse_bool(&raw);
    }
    if let Some(raw) = env("TTIME_ENABLE_CACHING") {
        config.enable_caching = parse_bool(&raw);
    }
    if let Some(raw) = env("TTIME_CACHE_DURATION_SECS") {
        config.cache_duration_secs = parse_positive_u64(&raw, "TTIME_CACHE_DURATION_SECS")?;
    }
    if let Some(raw) = env("TTIME_REQUEST_TIMEOUT_SECS") {
        config.request_timeout_secs = parse_positive_u64(&raw, "TTIME_REQUEST_TIMEOUT_SECS")?;
    }
    if let Some(raw) = env("TTIME_REFRESH_INTERVAL_SECS") {
        config.refresh_interval_secs = parse_positive_u64(&raw, "TTIME_REFRESH_INTERVAL_SECS")?;
    }
    if let Some(raw) = env("TTIME_DEBUG_API_REQUESTS") {
        config.debug_api_requests = parse_bool(&raw);
    }
    if let Some(location) = env("TTIME_WEATHER_LOCATION") {
        config.weather.location = location.trim().to_string();
    }
    if let Some(category) = env("TTIME_NEWS_CATEGORY") {
        config.news.category = category.trim().to_ascii_lowercase();
    }
    if let Some(country) = env("TTIME_NEWS_COUNTRY") {
        config.news.country = country.trim().to_ascii_lowercase();
    }
    if let Some(raw) = env("TTIME_NEWS_SOURCES") {
        config.news.sources = parse_list(&raw);
    }
    Ok(())
}

/// Load app configuration from environment and optional config file.
pub fn load_config() -> Result<AppConfig, Error> {
    // 1. Load .env file from the working directory or its parents.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = AppConfig::default();

    // 3. Try loading ttime.toml if it exists.
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read {CONFIG_FILE}: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {CONFIG_FILE}: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    // 5. Validate.
    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = AppConfig::default();
        let env = env_from(&[
            ("WEATHER_API_KEY", "wk"),
            ("TTIME_USE_LIVE_DATA", "off"),
            ("TTIME_CACHE_DURATION_SECS", "120"),
            ("TTIME_NEWS_SOURCES", "bbc-news, ,the-verge"),
            ("TTIME_NEWS_COUNTRY", " GB "),
        ]);
        apply_env_overrides(&mut config, env).unwrap();

        assert_eq!(config.weather.api_key, "wk");
        assert!(!config.use_live_data);
        assert_eq!(config.cache_duration_secs, 120);
        assert_eq!(config.news.sources, vec!["bbc-news", "the-verge"]);
        assert_eq!(config.news.country, "gb");
    }

    #[test]
    fn test_zero_duration_env_is_rejected() {
        let mut config = AppConfig::default();
        let env = env_from(&[("TTIME_CACHE_DURATION_SECS", "0")]);
        assert!(matches!(
            apply_env_overrides(&mut config, env),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_toml_file_shape() {
        let config: AppConfig = toml::from_str(
            r#"
            use_live_data = false
            cache_duration_secs = 600

            [weather]
            location = "Berlin"

            [news]
            sources = ["reuters"]
            "#,
        )
        .unwrap();
        assert!(!config.use_live_data);
        assert_eq!(config.cache_duration_secs, 600);
        assert_eq!(config.weather.location, "Berlin");
        assert_eq!(config.news.category, "general");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_collects_all_issues() {
        let mut config = AppConfig::default();
        config.request_timeout_secs = 0;
        config.refresh_interval_secs = 0;
        config.weather.location = "  ".into();

        let Err(Error::Config(msg)) = validate_config(&config) else {
            panic!("expected config error");
        };
        assert!(msg.contains("request_timeout_secs"));
        assert!(msg.contains("refresh_interval_secs"));
        assert!(msg.contains("weather.location"));
    }

    #[test]
    fn test_zero_cache_duration_allowed_when_caching_off() {
        let mut config = AppConfig::default();
        config.enable_caching = false;
        config.cache_duration_secs = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
        assert!(!parse_bool("OFF"));
        assert!(!parse_bool(" false "));
    }
}

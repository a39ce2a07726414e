use std::{env, fmt::Display, str::FromStr, time::Duration};

pub mod cors;

pub use cors::create_cors_layer;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when `DATABASE_URL` is unset; requests then fail with a configuration error.
    pub database_url: Option<String>,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        if database_url.is_none() {
            tracing::warn!("DATABASE_URL is not set; store-backed routes will return 500");
        }

        Self {
            database_url,
            port: parse_or("PORT", DEFAULT_PORT),
            max_connections: parse_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            acquire_timeout: Duration::from_secs(parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )),
            cors_allowed_origins: split_origins(
                &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            cors_allowed_origins: Vec::new(),
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("{key}='{raw}' is invalid ({e}), using {default}");
            default
        }),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins_skips_blanks() {
        let origins = split_origins(" http://a.test, ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_split_origins_empty() {
        assert!(split_origins("").is_empty());
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        std::env::set_var("SCHEDULER_TEST_PORT", "not-a-port");
        assert_eq!(parse_or("SCHEDULER_TEST_PORT", 8080u16), 8080);

        std::env::set_var("SCHEDULER_TEST_PORT", "9000");
        assert_eq!(parse_or("SCHEDULER_TEST_PORT", 8080u16), 9000);
        std::env::remove_var("SCHEDULER_TEST_PORT");
    }

    #[test]
    fn test_default_has_no_database() {
        let config = Config::default();
        assert!(config.database_url.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
    }
}

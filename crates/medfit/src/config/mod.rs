use crate::assessment::Locale;
use std::env;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub content: ContentConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let directory = env::var("APP_CONTENT_DIR")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let locale_raw = env::var("APP_LOCALE").unwrap_or_else(|_| "en".to_string());
        let default_locale =
            Locale::parse(&locale_raw).ok_or(ConfigError::InvalidLocale(locale_raw))?;

        let cache_capacity = match env::var("APP_CONTENT_CACHE_CAPACITY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or(ConfigError::InvalidCacheCapacity)?,
            Err(_) => NonZeroUsize::new(DEFAULT_CACHE_CAPACITY)
                .ok_or(ConfigError::InvalidCacheCapacity)?,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = environment == AppEnvironment::Development;

        Ok(Self {
            environment,
            content: ContentConfig {
                directory,
                default_locale,
                cache_capacity,
            },
            telemetry: TelemetryConfig { log_level, ansi },
        })
    }
}

/// Where localized content banks come from and how many stay cached.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub directory: Option<PathBuf>,
    pub default_locale: Locale,
    pub cache_capacity: NonZeroUsize,
}

/// Tracing controls. Colored output is only used in development.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLocale(String),
    InvalidCacheCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLocale(value) => {
                write!(f, "APP_LOCALE must be a two-letter tag, got '{value}'")
            }
            ConfigError::InvalidCacheCapacity => {
                write!(f, "APP_CONTENT_CACHE_CAPACITY must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

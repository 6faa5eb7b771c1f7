use crate::i18n::LocaleSet;
use crate::routing::detect::DEFAULT_COOKIE_NAME;
use crate::routing::LocaleDetection;
use thiserror::Error;

/// Errors in startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown locale code: '{0}'")]
    UnknownLocale(String),

    #[error("At least one locale must be supported")]
    EmptyLocaleSet,

    #[error("Locale '{0}' is listed more than once")]
    DuplicateLocale(String),

    #[error("Default locale '{0}' is not in the supported locales")]
    DefaultNotSupported(String),

    #[error("Invalid PORT: '{0}'")]
    InvalidPort(String),

    #[error("Invalid boolean for {var}: '{value}'")]
    InvalidBool { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Locales
    pub locales: LocaleSet,
    pub detection: LocaleDetection,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Server
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            Err(_) => 8080,
        };

        // Locales
        let supported = std::env::var("SUPPORTED_LOCALES").unwrap_or_else(|_| "en,zh-CN".to_string());
        let codes: Vec<&str> = supported
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .collect();
        let default = std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string());
        let locales = LocaleSet::from_codes(&codes, default.trim())?;

        // Detection
        let enabled = match std::env::var("LOCALE_DETECTION") {
            Ok(value) => parse_bool("LOCALE_DETECTION", &value)?,
            Err(_) => true,
        };
        let cookie_name = std::env::var("LOCALE_COOKIE_NAME")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        Ok(Self {
            port,
            locales,
            detection: LocaleDetection {
                enabled,
                cookie_name,
            },
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

//! Locale set: the supported locales and the designated default.
//!
//! A `LocaleSet` is validated once when it is built and is immutable
//! afterwards. It is handed to the router explicitly rather than read from
//! a global, so routers with different sets can coexist (tests do this).

use crate::config::ConfigError;
use crate::i18n::Locale;

/// Validated, immutable set of served locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    default: Locale,
}

impl LocaleSet {
    /// Build a locale set.
    ///
    /// # Errors
    /// * `ConfigError::EmptyLocaleSet` if `locales` is empty
    /// * `ConfigError::DuplicateLocale` if a locale appears twice
    /// * `ConfigError::DefaultNotSupported` if `default` is not in `locales`
    pub fn new(locales: Vec<Locale>, default: Locale) -> Result<Self, ConfigError> {
        if locales.is_empty() {
            return Err(ConfigError::EmptyLocaleSet);
        }

        for (i, locale) in locales.iter().enumerate() {
            if locales[..i].contains(locale) {
                return Err(ConfigError::DuplicateLocale(locale.code().to_string()));
            }
        }

        if !locales.contains(&default) {
            return Err(ConfigError::DefaultNotSupported(default.code().to_string()));
        }

        Ok(Self { locales, default })
    }

    /// Build a locale set from configuration strings.
    ///
    /// `codes` is a list of exact locale codes; `default` must be one of them.
    pub fn from_codes<S: AsRef<str>>(codes: &[S], default: &str) -> Result<Self, ConfigError> {
        let locales = codes
            .iter()
            .map(|code| {
                let code = code.as_ref();
                Locale::from_code(code).ok_or_else(|| ConfigError::UnknownLocale(code.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let default =
            Locale::from_code(default).ok_or_else(|| ConfigError::UnknownLocale(default.to_string()))?;

        Self::new(locales, default)
    }

    /// The locale served without a URL prefix.
    pub fn default_locale(&self) -> Locale {
        self.default
    }

    /// All supported locales, in configuration order.
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Supported locales that are served under a URL prefix.
    pub fn prefixed(&self) -> impl Iterator<Item = Locale> + '_ {
        self.locales.iter().copied().filter(move |l| *l != self.default)
    }

    /// Check whether a locale is served by this set.
    pub fn contains(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }

    /// Look up a supported locale by its exact code.
    ///
    /// Returns `None` for unknown codes and for known locales that are not
    /// part of this set.
    pub fn get_by_code(&self, code: &str) -> Option<Locale> {
        Locale::from_code(code).filter(|locale| self.contains(*locale))
    }

    /// Check whether `locale` is the default locale.
    pub fn is_default(&self, locale: Locale) -> bool {
        locale == self.default
    }
}

impl Default for LocaleSet {
    /// English (default) and Simplified Chinese.
    fn default() -> Self {
        Self {
            locales: vec![Locale::En, Locale::ZhCn],
            default: Locale::En,
        }
    }
}

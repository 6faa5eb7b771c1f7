//! Locale type: the closed set of languages the site can be served in.
//!
//! Every locale the site knows about is a variant of [`Locale`]. Which of
//! them are actually served, and which one is the default, is decided by a
//! [`LocaleSet`](crate::i18n::LocaleSet) built from configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language the site has translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// English
    #[serde(rename = "en")]
    En,

    /// Simplified Chinese (mainland China)
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    /// Every known locale, in declaration order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::ZhCn];

    /// Look up a locale by its exact BCP 47 code.
    ///
    /// Matching is case-sensitive: `"zh-CN"` is a locale, `"zh-cn"` is not.
    /// URL segments and cookie values are compared through this function.
    ///
    /// # Example
    /// ```
    /// use locale_site::i18n::Locale;
    ///
    /// assert_eq!(Locale::from_code("zh-CN"), Some(Locale::ZhCn));
    /// assert_eq!(Locale::from_code("fr"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Locale> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }

    /// The BCP 47 code used in URLs, cookies and `<html lang>`.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        }
    }

    /// The primary language subtag (e.g. `"zh"` for `zh-CN`).
    pub fn language(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh",
        }
    }

    /// English name of the locale.
    pub fn name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::ZhCn => "Chinese (Simplified)",
        }
    }

    /// Name of the locale in its own language, as shown in the language switcher.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::ZhCn => "中文",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

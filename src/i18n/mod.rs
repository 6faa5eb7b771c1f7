//! Internationalization (i18n) module for multi-language support.
//!
//! # Architecture
//!
//! - `locale`: The closed set of locales the site has translations for
//! - `registry`: Validated set of served locales and the default one
//! - `dictionary`: Per-locale translation dictionaries with dotted-key lookup
//!
//! # Example
//!
//! ```rust
//! use locale_site::i18n::{Locale, LocaleSet, Translations};
//!
//! let locales = LocaleSet::default();
//! assert_eq!(locales.default_locale(), Locale::En);
//!
//! let translations = Translations::load().unwrap();
//! assert_eq!(translations.get(Locale::ZhCn).t("common.home"), "首页");
//! ```

mod dictionary;
mod locale;
mod registry;

pub use dictionary::{Dictionary, Translations};
pub use locale::Locale;
pub use registry::LocaleSet;

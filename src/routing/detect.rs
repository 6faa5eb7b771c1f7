//! Locale detection from request headers.
//!
//! Browsers hint at a preferred locale in two ways: a cookie written when
//! the visitor last picked a locale explicitly, and the `Accept-Language`
//! header. The cookie wins because it reflects a deliberate choice.

use crate::i18n::{Locale, LocaleSet};
use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::HeaderMap;
use std::cmp::Ordering;

/// Default name of the locale preference cookie.
pub const DEFAULT_COOKIE_NAME: &str = "NEXT_LOCALE";

/// How request headers are turned into a locale signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleDetection {
    /// Whether cookie and `Accept-Language` are consulted at all
    pub enabled: bool,

    /// Name of the cookie holding the remembered locale
    pub cookie_name: String,
}

impl Default for LocaleDetection {
    fn default() -> Self {
        Self {
            enabled: true,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }
}

/// One entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    pub tag: String,
    pub quality: f32,
}

impl LanguageRange {
    /// The primary language subtag (`"zh"` for `"zh-TW"`).
    pub fn primary(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }
}

/// Parse an `Accept-Language` header.
///
/// Ranges are returned highest quality first; ties keep header order.
/// Wildcards, malformed tags and ranges with `q=0` are dropped. A missing
/// or unparsable q-value counts as 1.0.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(|part| {
            let mut params = part.split(';');
            let tag = params.next()?.trim();

            if tag.is_empty()
                || tag == "*"
                || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            {
                return None;
            }

            let quality = params
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0)
                .min(1.0);

            if quality.is_nan() || quality <= 0.0 {
                return None;
            }

            Some(LanguageRange {
                tag: tag.to_string(),
                quality,
            })
        })
        .collect();

    ranges.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    ranges
}

/// Pick the supported locale that best satisfies an `Accept-Language` header.
///
/// Ranges are tried in preference order. A range matches a locale when the
/// tags are equal ignoring ASCII case, or failing that, when their primary
/// language subtags are (`zh-TW` matches `zh-CN`).
pub fn negotiate(header: &str, locales: &LocaleSet) -> Option<Locale> {
    parse_accept_language(header).iter().find_map(|range| {
        let supported = locales.locales();

        supported
            .iter()
            .find(|l| l.code().eq_ignore_ascii_case(&range.tag))
            .or_else(|| {
                supported
                    .iter()
                    .find(|l| l.language().eq_ignore_ascii_case(range.primary()))
            })
            .copied()
    })
}

/// Find the value of cookie `name` in a `Cookie` header.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"'))
    })
}

/// The locale stored in cookie `name`, if it names a supported locale exactly.
pub fn cookie_locale(cookie_header: &str, name: &str, locales: &LocaleSet) -> Option<Locale> {
    cookie_value(cookie_header, name).and_then(|code| locales.get_by_code(code))
}

/// The visitor's preferred locale according to the request headers.
///
/// Returns `None` when detection is disabled or no header names a
/// supported locale.
pub fn preferred_signal(
    headers: &HeaderMap,
    detection: &LocaleDetection,
    locales: &LocaleSet,
) -> Option<Locale> {
    if !detection.enabled {
        return None;
    }

    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| cookie_locale(cookies, &detection.cookie_name, locales));

    from_cookie.or_else(|| {
        headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| negotiate(header, locales))
    })
}

//! Translation dictionaries.
//!
//! Each locale has one JSON dictionary of nested objects, embedded in the
//! binary and parsed once at startup. Lookups use dotted keys such as
//! `"pages.home.title"` and fall back to the key itself when nothing is
//! found, so a missing translation shows up on the page instead of failing
//! the request.

use crate::i18n::Locale;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::warn;

const EN_JSON: &str = include_str!("../../locales/en.json");
const ZH_CN_JSON: &str = include_str!("../../locales/zh-CN.json");

/// A single locale's translation strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    root: Value,
}

impl Dictionary {
    /// Parse a dictionary from a JSON document.
    ///
    /// The document must be a JSON object; anything else is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json).context("Failed to parse dictionary JSON")?;

        if !root.is_object() {
            bail!("Dictionary root must be a JSON object");
        }

        Ok(Self { root })
    }

    /// Look up a translation by dotted key.
    ///
    /// Returns the key itself if any segment is missing or the value at the
    /// end of the path is not a string.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Look up a translation by dotted key, without fallback.
    pub fn get(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.root, |value, segment| value.get(segment))
            .and_then(Value::as_str)
    }

    /// All dotted keys that lead to a string, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, String::new(), &mut keys);
        keys.sort();
        keys
    }

    /// Keys present in `self` that `other` cannot resolve.
    pub fn missing_in(&self, other: &Dictionary) -> Vec<String> {
        self.keys()
            .into_iter()
            .filter(|key| other.get(key).is_none())
            .collect()
    }
}

fn collect_keys(value: &Value, prefix: String, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", prefix, name)
                };
                collect_keys(child, key, out);
            }
        }
        Value::String(_) => out.push(prefix),
        _ => {}
    }
}

/// The dictionaries of every known locale.
///
/// Holds one dictionary per [`Locale`] variant; selection is a `match`, so
/// adding a locale without a dictionary does not compile.
#[derive(Debug, Clone)]
pub struct Translations {
    en: Dictionary,
    zh_cn: Dictionary,
}

impl Translations {
    /// Parse the dictionaries embedded in the binary.
    pub fn load() -> Result<Self> {
        Ok(Self {
            en: Dictionary::from_json(EN_JSON).context("Invalid en dictionary")?,
            zh_cn: Dictionary::from_json(ZH_CN_JSON).context("Invalid zh-CN dictionary")?,
        })
    }

    /// The dictionary for `locale`.
    pub fn get(&self, locale: Locale) -> &Dictionary {
        match locale {
            Locale::En => &self.en,
            Locale::ZhCn => &self.zh_cn,
        }
    }

    /// Report keys of the `reference` dictionary that other locales lack.
    ///
    /// Each gap is logged as a warning; the returned list holds
    /// `"<locale>: <key>"` entries. Gaps are not fatal since lookups fall
    /// back to the key.
    pub fn check_completeness(&self, reference: Locale, locales: &[Locale]) -> Vec<String> {
        let base = self.get(reference);
        let mut gaps = Vec::new();

        for &locale in locales.iter().filter(|l| **l != reference) {
            for key in base.missing_in(self.get(locale)) {
                warn!(locale = %locale, key = %key, "Missing translation");
                gaps.push(format!("{}: {}", locale, key));
            }
        }

        gaps
    }
}

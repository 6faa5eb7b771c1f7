//! Multilingual website server.
//!
//! Serves every page in English and Simplified Chinese. English is the
//! default locale and lives at the site root; other locales live under a
//! `/<code>` prefix.

pub mod config;
pub mod i18n;
pub mod pages;
pub mod routing;
pub mod server;

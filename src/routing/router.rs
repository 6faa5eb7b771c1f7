//! Locale-prefix routing.
//!
//! URLs follow the "as-needed" convention: the default locale is served
//! without a prefix (`/about`), every other locale under its code
//! (`/zh-CN/about`). All functions here are pure; the router holds nothing
//! but its immutable [`LocaleSet`].

use crate::i18n::{Locale, LocaleSet};

/// Where a resolved locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    /// The first path segment named the locale.
    Prefix,
    /// A preference signal (cookie, `Accept-Language`) named the locale.
    Signal,
    /// Nothing usable was supplied.
    Default,
}

/// The outcome of routing one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingDecision {
    /// Locale the page is rendered in
    pub locale: Locale,

    /// How `locale` was determined
    pub source: LocaleSource,

    /// Request path with any locale prefix removed
    pub stripped_path: String,

    /// Preferred URL for (`locale`, `stripped_path`)
    pub canonical_path: String,

    /// Whether the client should be sent to `canonical_path`
    pub redirect: bool,

    /// Locale to remember for later visits, set when the URL named one explicitly
    pub persist: Option<Locale>,
}

/// Maps request paths to locales and back.
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    locales: LocaleSet,
}

impl LocaleRouter {
    pub fn new(locales: LocaleSet) -> Self {
        Self { locales }
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Determine the locale of a request and the path without its locale prefix.
    ///
    /// A leading segment only counts as a locale when it exactly matches a
    /// supported, non-default locale code; `/fr/about` is an ordinary path.
    /// Otherwise `preferred` is used if it names a supported locale, and the
    /// default locale if it does not. Never fails.
    ///
    /// # Example
    /// ```
    /// use locale_site::i18n::{Locale, LocaleSet};
    /// use locale_site::routing::LocaleRouter;
    ///
    /// let router = LocaleRouter::new(LocaleSet::default());
    /// assert_eq!(router.resolve_locale("/zh-CN/about", None), (Locale::ZhCn, "/about"));
    /// assert_eq!(router.resolve_locale("/about", Some("de")), (Locale::En, "/about"));
    /// ```
    pub fn resolve_locale<'a>(&self, path: &'a str, preferred: Option<&str>) -> (Locale, &'a str) {
        let (locale, stripped, _) = self.resolve_with_source(path, preferred);
        (locale, stripped)
    }

    fn resolve_with_source<'a>(
        &self,
        path: &'a str,
        preferred: Option<&str>,
    ) -> (Locale, &'a str, LocaleSource) {
        if let Some((segment, rest)) = split_first_segment(path) {
            if let Some(locale) = self.prefixed_locale(segment) {
                return (locale, or_root(rest), LocaleSource::Prefix);
            }
        }

        match preferred.and_then(|code| self.locales.get_by_code(code)) {
            Some(locale) => (locale, path, LocaleSource::Signal),
            None => (self.locales.default_locale(), path, LocaleSource::Default),
        }
    }

    /// The preferred URL for a page in a locale.
    ///
    /// Default-locale pages are unprefixed. Other locales get `/<code>`
    /// prepended, with the root page rendered as `/<code>` rather than
    /// `/<code>/`. A locale outside the set is treated like the default.
    pub fn canonical_path(&self, locale: Locale, stripped_path: &str) -> String {
        if self.locales.is_default(locale) || !self.locales.contains(locale) {
            return stripped_path.to_string();
        }
        prefixed_path(locale, stripped_path)
    }

    /// The URL of the current page in another locale.
    ///
    /// Any locale prefix on `current_path` (including an explicit default
    /// prefix such as `/en/...`) is removed first, so prefixes never stack.
    pub fn locale_switch_path(&self, current_path: &str, target: Locale) -> String {
        self.canonical_path(target, self.strip_locale_prefix(current_path))
    }

    /// Canonical URL of the page at `current_path` in every supported
    /// locale, in set order. Used for `hreflang` alternates.
    pub fn alternate_links(&self, current_path: &str) -> Vec<(Locale, String)> {
        self.locales
            .locales()
            .iter()
            .map(|&locale| (locale, self.locale_switch_path(current_path, locale)))
            .collect()
    }

    /// Language switcher links for the page at `current_path`, in set order.
    ///
    /// The default-locale link keeps an explicit prefix (`/en/about`): the
    /// server records that choice before redirecting to the unprefixed URL,
    /// so a remembered preference for another locale does not bounce the
    /// visitor back.
    pub fn switch_links(&self, current_path: &str) -> Vec<(Locale, String)> {
        let stripped = self.strip_locale_prefix(current_path);

        self.locales
            .locales()
            .iter()
            .map(|&locale| {
                let href = if self.locales.is_default(locale) {
                    prefixed_path(locale, stripped)
                } else {
                    self.canonical_path(locale, stripped)
                };
                (locale, href)
            })
            .collect()
    }

    /// Route a request path.
    ///
    /// An explicit default-locale prefix (`/en/about`) is always redirected
    /// to its unprefixed form. Otherwise the request is redirected whenever
    /// it differs from the canonical path of its resolved locale, e.g.
    /// `/about` with a `zh-CN` preference goes to `/zh-CN/about`, and
    /// `/zh-CN/` goes to `/zh-CN`.
    ///
    /// Repeated leading slashes in the locale-free path are collapsed, so a
    /// redirect target is never scheme-relative (`/en//host` goes to `/host`).
    pub fn decide(&self, path: &str, preferred: Option<&str>) -> RoutingDecision {
        let default = self.locales.default_locale();

        if let Some((segment, rest)) = split_first_segment(path) {
            if segment == default.code() {
                let stripped = collapse_leading_slashes(or_root(rest));
                return RoutingDecision {
                    locale: default,
                    source: LocaleSource::Prefix,
                    stripped_path: stripped.to_string(),
                    canonical_path: stripped.to_string(),
                    redirect: true,
                    persist: Some(default),
                };
            }
        }

        let (locale, stripped, source) = self.resolve_with_source(path, preferred);
        let stripped = collapse_leading_slashes(stripped);
        let canonical_path = self.canonical_path(locale, stripped);

        RoutingDecision {
            locale,
            source,
            stripped_path: stripped.to_string(),
            redirect: canonical_path != path,
            canonical_path,
            persist: (source == LocaleSource::Prefix).then_some(locale),
        }
    }

    /// A supported, non-default locale named exactly by `segment`.
    fn prefixed_locale(&self, segment: &str) -> Option<Locale> {
        self.locales.prefixed().find(|locale| locale.code() == segment)
    }

    fn strip_locale_prefix<'a>(&self, path: &'a str) -> &'a str {
        match split_first_segment(path) {
            Some((segment, rest)) if self.locales.get_by_code(segment).is_some() => {
                collapse_leading_slashes(or_root(rest))
            }
            _ => collapse_leading_slashes(path),
        }
    }
}

/// Split `/first/rest...` into `("first", "/rest...")`.
///
/// Returns `None` for paths that do not start with `/`.
fn split_first_segment(path: &str) -> Option<(&str, &str)> {
    let rest = path.strip_prefix('/')?;
    match rest.find('/') {
        Some(idx) => Some((&rest[..idx], &rest[idx..])),
        None => Some((rest, "")),
    }
}

/// Reduce a run of leading slashes to one: `//host/x` becomes `/host/x`.
fn collapse_leading_slashes(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    if path.len() - trimmed.len() > 1 {
        &path[path.len() - trimmed.len() - 1..]
    } else {
        path
    }
}

fn or_root(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

fn prefixed_path(locale: Locale, stripped_path: &str) -> String {
    if stripped_path == "/" {
        format!("/{}", locale.code())
    } else {
        format!("/{}{}", locale.code(), stripped_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> LocaleRouter {
        LocaleRouter::new(LocaleSet::default())
    }

    // ==================== resolve_locale Tests ====================

    #[test]
    fn test_resolve_unprefixed_path_is_default() {
        assert_eq!(router().resolve_locale("/about", None), (Locale::En, "/about"));
        assert_eq!(router().resolve_locale("/", None), (Locale::En, "/"));
    }

    #[test]
    fn test_resolve_prefixed_path() {
        assert_eq!(
            router().resolve_locale("/zh-CN/about", None),
            (Locale::ZhCn, "/about")
        );
        assert_eq!(
            router().resolve_locale("/zh-CN/blog/post-1", None),
            (Locale::ZhCn, "/blog/post-1")
        );
    }

    #[test]
    fn test_resolve_bare_prefix_becomes_root() {
        assert_eq!(router().resolve_locale("/zh-CN", None), (Locale::ZhCn, "/"));
    }

    #[test]
    fn test_resolve_prefix_with_trailing_slash() {
        assert_eq!(router().resolve_locale("/zh-CN/", None), (Locale::ZhCn, "/"));
    }

    #[test]
    fn test_resolve_unsupported_segment_is_literal() {
        assert_eq!(
            router().resolve_locale("/fr/about", None),
            (Locale::En, "/fr/about")
        );
    }

    #[test]
    fn test_resolve_prefix_match_is_exact() {
        assert_eq!(
            router().resolve_locale("/zh-cn/about", None),
            (Locale::En, "/zh-cn/about")
        );
        assert_eq!(
            router().resolve_locale("/zh-CNabout", None),
            (Locale::En, "/zh-CNabout")
        );
    }

    #[test]
    fn test_resolve_default_prefix_is_not_stripped() {
        assert_eq!(router().resolve_locale("/en/about", None), (Locale::En, "/en/about"));
    }

    #[test]
    fn test_resolve_uses_valid_signal() {
        assert_eq!(
            router().resolve_locale("/about", Some("zh-CN")),
            (Locale::ZhCn, "/about")
        );
    }

    #[test]
    fn test_resolve_prefix_beats_signal() {
        assert_eq!(
            router().resolve_locale("/zh-CN/about", Some("en")),
            (Locale::ZhCn, "/about")
        );
    }

    #[test]
    fn test_resolve_unknown_signal_falls_back() {
        assert_eq!(router().resolve_locale("/about", Some("de")), (Locale::En, "/about"));
        assert_eq!(router().resolve_locale("/about", Some("")), (Locale::En, "/about"));
    }

    #[test]
    fn test_resolve_signal_outside_set_falls_back() {
        let english_only =
            LocaleRouter::new(LocaleSet::new(vec![Locale::En], Locale::En).unwrap());
        assert_eq!(
            english_only.resolve_locale("/about", Some("zh-CN")),
            (Locale::En, "/about")
        );
        assert_eq!(
            english_only.resolve_locale("/zh-CN/about", None),
            (Locale::En, "/zh-CN/about")
        );
    }

    #[test]
    fn test_resolve_with_chinese_default() {
        let router = LocaleRouter::new(LocaleSet::new(vec![Locale::En, Locale::ZhCn], Locale::ZhCn).unwrap());
        assert_eq!(router.resolve_locale("/en/about", None), (Locale::En, "/about"));
        assert_eq!(router.resolve_locale("/about", None), (Locale::ZhCn, "/about"));
    }

    // ==================== canonical_path Tests ====================

    #[test]
    fn test_canonical_default_is_unprefixed() {
        assert_eq!(router().canonical_path(Locale::En, "/about"), "/about");
        assert_eq!(router().canonical_path(Locale::En, "/"), "/");
    }

    #[test]
    fn test_canonical_non_default_is_prefixed() {
        assert_eq!(router().canonical_path(Locale::ZhCn, "/about"), "/zh-CN/about");
    }

    #[test]
    fn test_canonical_root_has_no_trailing_slash() {
        assert_eq!(router().canonical_path(Locale::ZhCn, "/"), "/zh-CN");
    }

    #[test]
    fn test_canonical_roundtrip_examples() {
        let router = router();
        for (locale, path) in [
            (Locale::En, "/"),
            (Locale::En, "/about"),
            (Locale::ZhCn, "/"),
            (Locale::ZhCn, "/about/team"),
        ] {
            let canonical = router.canonical_path(locale, path);
            assert_eq!(router.resolve_locale(&canonical, None), (locale, path));
        }
    }

    // ==================== locale_switch_path Tests ====================

    #[test]
    fn test_switch_to_default_strips_prefix() {
        assert_eq!(router().locale_switch_path("/zh-CN/about", Locale::En), "/about");
        assert_eq!(router().locale_switch_path("/zh-CN", Locale::En), "/");
    }

    #[test]
    fn test_switch_to_non_default_adds_prefix() {
        assert_eq!(router().locale_switch_path("/about", Locale::ZhCn), "/zh-CN/about");
        assert_eq!(router().locale_switch_path("/", Locale::ZhCn), "/zh-CN");
    }

    #[test]
    fn test_switch_never_double_prefixes() {
        assert_eq!(
            router().locale_switch_path("/zh-CN/about", Locale::ZhCn),
            "/zh-CN/about"
        );
        assert_eq!(router().locale_switch_path("/en/about", Locale::ZhCn), "/zh-CN/about");
    }

    #[test]
    fn test_switch_keeps_unsupported_segment() {
        assert_eq!(
            router().locale_switch_path("/fr/about", Locale::ZhCn),
            "/zh-CN/fr/about"
        );
    }

    // ==================== switch_links Tests ====================

    #[test]
    fn test_switch_links_from_chinese_page() {
        assert_eq!(
            router().switch_links("/zh-CN/about"),
            vec![
                (Locale::En, "/en/about".to_string()),
                (Locale::ZhCn, "/zh-CN/about".to_string()),
            ]
        );
    }

    #[test]
    fn test_switch_links_from_root() {
        assert_eq!(
            router().switch_links("/"),
            vec![
                (Locale::En, "/en".to_string()),
                (Locale::ZhCn, "/zh-CN".to_string()),
            ]
        );
    }

    // ==================== alternate_links Tests ====================

    #[test]
    fn test_alternate_links_use_canonical_paths() {
        assert_eq!(
            router().alternate_links("/zh-CN/about"),
            vec![
                (Locale::En, "/about".to_string()),
                (Locale::ZhCn, "/zh-CN/about".to_string()),
            ]
        );
        assert_eq!(
            router().alternate_links("/"),
            vec![(Locale::En, "/".to_string()), (Locale::ZhCn, "/zh-CN".to_string())]
        );
    }

    // ==================== decide Tests ====================

    #[test]
    fn test_decide_canonical_default_path() {
        let decision = router().decide("/about", None);
        assert_eq!(decision.locale, Locale::En);
        assert_eq!(decision.source, LocaleSource::Default);
        assert_eq!(decision.stripped_path, "/about");
        assert_eq!(decision.canonical_path, "/about");
        assert!(!decision.redirect);
        assert_eq!(decision.persist, None);
    }

    #[test]
    fn test_decide_prefixed_path_rewrites_and_persists() {
        let decision = router().decide("/zh-CN/about", None);
        assert_eq!(decision.locale, Locale::ZhCn);
        assert_eq!(decision.source, LocaleSource::Prefix);
        assert_eq!(decision.stripped_path, "/about");
        assert!(!decision.redirect);
        assert_eq!(decision.persist, Some(Locale::ZhCn));
    }

    #[test]
    fn test_decide_explicit_default_prefix_redirects() {
        let decision = router().decide("/en/about", Some("zh-CN"));
        assert_eq!(decision.locale, Locale::En);
        assert_eq!(decision.canonical_path, "/about");
        assert!(decision.redirect);
        assert_eq!(decision.persist, Some(Locale::En));
    }

    #[test]
    fn test_decide_bare_default_prefix_redirects_to_root() {
        let decision = router().decide("/en", None);
        assert_eq!(decision.canonical_path, "/");
        assert!(decision.redirect);
    }

    #[test]
    fn test_decide_signal_redirects_to_prefix() {
        let decision = router().decide("/about", Some("zh-CN"));
        assert_eq!(decision.locale, Locale::ZhCn);
        assert_eq!(decision.source, LocaleSource::Signal);
        assert_eq!(decision.canonical_path, "/zh-CN/about");
        assert!(decision.redirect);
        assert_eq!(decision.persist, None);
    }

    #[test]
    fn test_decide_trailing_slash_on_prefix_redirects() {
        let decision = router().decide("/zh-CN/", None);
        assert_eq!(decision.canonical_path, "/zh-CN");
        assert!(decision.redirect);
        assert_eq!(decision.persist, Some(Locale::ZhCn));
    }

    #[test]
    fn test_decide_default_signal_does_not_redirect() {
        let decision = router().decide("/", Some("en"));
        assert_eq!(decision.locale, Locale::En);
        assert!(!decision.redirect);
    }

    #[test]
    fn test_decide_default_prefix_double_slash_stays_local() {
        for (path, target) in [
            ("/en//evil-host", "/evil-host"),
            ("/en//3627734734/login", "/3627734734/login"),
            ("/en///localhost", "/localhost"),
            ("/en//", "/"),
        ] {
            let decision = router().decide(path, None);
            assert!(decision.redirect);
            assert_eq!(decision.canonical_path, target);
            assert_eq!(decision.stripped_path, target);
        }
    }

    #[test]
    fn test_decide_prefixed_double_slash_redirects() {
        let decision = router().decide("/zh-CN//evil-host", None);
        assert_eq!(decision.locale, Locale::ZhCn);
        assert_eq!(decision.stripped_path, "/evil-host");
        assert_eq!(decision.canonical_path, "/zh-CN/evil-host");
        assert!(decision.redirect);
    }

    #[test]
    fn test_decide_unprefixed_double_slash_redirects() {
        let decision = router().decide("//evil-host", None);
        assert_eq!(decision.locale, Locale::En);
        assert_eq!(decision.canonical_path, "/evil-host");
        assert!(decision.redirect);
    }

    #[test]
    fn test_switch_path_collapses_double_slash() {
        assert_eq!(router().locale_switch_path("/zh-CN//evil-host", Locale::En), "/evil-host");
        assert_eq!(router().locale_switch_path("//evil-host", Locale::En), "/evil-host");
    }

    // ==================== Helper Tests ====================

    #[test]
    fn test_collapse_leading_slashes() {
        assert_eq!(collapse_leading_slashes("//host/x"), "/host/x");
        assert_eq!(collapse_leading_slashes("///"), "/");
        assert_eq!(collapse_leading_slashes("/a//b"), "/a//b");
        assert_eq!(collapse_leading_slashes("/"), "/");
        assert_eq!(collapse_leading_slashes(""), "");
    }

    #[test]
    fn test_split_first_segment() {
        assert_eq!(split_first_segment("/a/b/c"), Some(("a", "/b/c")));
        assert_eq!(split_first_segment("/a"), Some(("a", "")));
        assert_eq!(split_first_segment("/"), Some(("", "")));
        assert_eq!(split_first_segment("a/b"), None);
    }
}

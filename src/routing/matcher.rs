//! Which request paths take part in locale routing.
//!
//! API routes, framework internals and static files are served as-is: they
//! have no localized variant and must never be redirected.

/// Path prefixes (after the leading `/`) that bypass locale routing.
const BYPASS_PREFIXES: [&str; 2] = ["api", "_next"];

/// Check whether `path` should be run through the locale router.
///
/// Returns `false` when the path after its leading `/` starts with a bypass
/// prefix (`/api/users`, but also `/apiary`), or when it contains a `.`
/// anywhere (`/favicon.ico`, `/assets/site.css`).
pub fn is_localized(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);

    if BYPASS_PREFIXES.iter().any(|prefix| rest.starts_with(prefix)) {
        return false;
    }

    !path.contains('.')
}

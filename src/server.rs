//! HTTP server.
//!
//! # Responsibilities
//! - Run the locale router in front of the page routes
//! - Redirect non-canonical URLs, rewrite prefixed URLs to their locale-free
//!   path before page routing
//! - Remember explicit locale choices in a cookie
//! - Serve the home page and a localized 404

use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    http::{
        header::SET_COOKIE,
        uri::{PathAndQuery, Uri},
        HeaderValue, StatusCode,
    },
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::i18n::{Locale, Translations};
use crate::pages::{self, PageContext};
use crate::routing::{is_localized, preferred_signal, LocaleDetection, LocaleRouter};

/// Lifetime of the locale preference cookie (one year).
const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Shared, immutable application state.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<LocaleRouter>,
    pub translations: Arc<Translations>,
    pub detection: Arc<LocaleDetection>,
}

impl AppState {
    pub fn new(config: &Config, translations: Translations) -> Self {
        Self {
            router: Arc::new(LocaleRouter::new(config.locales.clone())),
            translations: Arc::new(translations),
            detection: Arc::new(config.detection.clone()),
        }
    }

    fn page_context(&self, locale: Locale, path: &str) -> PageContext<'_> {
        PageContext {
            locale,
            dict: self.translations.get(locale),
            home_href: self.router.canonical_path(locale, "/"),
            switch_links: self.router.switch_links(path),
            alternates: self.router.alternate_links(path),
        }
    }
}

/// Locale resolved by the middleware, attached to request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

/// Build the application.
///
/// The locale middleware wraps the page router as a whole rather than being
/// added with `Router::layer`, because it rewrites the URI and must run
/// before routing.
pub fn build_app(state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(home))
        .fallback(not_found)
        .with_state(state.clone());

    let localized = tower::Layer::layer(
        &middleware::from_fn_with_state(state, locale_middleware),
        pages,
    );

    Router::new()
        .fallback_service(localized)
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured port and serve until Ctrl-C.
pub async fn run(config: Config, translations: Translations) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        address = %addr,
        default_locale = %config.locales.default_locale(),
        detection = config.detection.enabled,
        "HTTP server starting"
    );

    let app = build_app(AppState::new(&config, translations));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Apply the locale router to a request.
///
/// Non-localized paths (API, static files) pass through untouched.
pub async fn locale_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if !is_localized(&path) {
        return next.run(req).await;
    }

    let preferred = preferred_signal(req.headers(), &state.detection, state.router.locales());
    let decision = state.router.decide(&path, preferred.map(|l| l.code()));

    let mut response = if decision.redirect {
        let target = with_query(&decision.canonical_path, req.uri().query());
        debug!(
            from = %path,
            to = %target,
            locale = %decision.locale,
            "Redirecting to canonical locale path"
        );
        Redirect::temporary(&target).into_response()
    } else {
        match rewrite_path(req.uri(), &decision.stripped_path) {
            Ok(uri) => *req.uri_mut() = uri,
            Err(e) => warn!(path = %path, "Failed to rewrite request path: {:#}", e),
        }
        req.extensions_mut().insert(RequestLocale(decision.locale));
        next.run(req).await
    };

    if let Some(locale) = decision.persist {
        let cookie = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            state.detection.cookie_name,
            locale.code(),
            COOKIE_MAX_AGE_SECS
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!("Invalid locale cookie header: {}", e),
        }
    }

    response
}

fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path.to_string(),
    }
}

/// Replace the path of `uri`, keeping its query string.
fn rewrite_path(uri: &Uri, path: &str) -> Result<Uri> {
    let path_and_query: PathAndQuery = with_query(path, uri.query())
        .parse()
        .context("Invalid rewritten path")?;

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);

    Uri::from_parts(parts).context("Invalid rewritten URI")
}

fn request_locale(state: &AppState, locale: Option<Extension<RequestLocale>>) -> Locale {
    locale
        .map(|Extension(RequestLocale(locale))| locale)
        .unwrap_or_else(|| state.router.locales().default_locale())
}

async fn home(
    State(state): State<AppState>,
    locale: Option<Extension<RequestLocale>>,
    uri: Uri,
) -> Html<String> {
    let locale = request_locale(&state, locale);
    Html(pages::render_home(&state.page_context(locale, uri.path())))
}

async fn not_found(
    State(state): State<AppState>,
    locale: Option<Extension<RequestLocale>>,
    uri: Uri,
) -> (StatusCode, Html<String>) {
    let locale = request_locale(&state, locale);
    debug!(path = %uri.path(), locale = %locale, "No page for path");

    (
        StatusCode::NOT_FOUND,
        Html(pages::render_not_found(&state.page_context(locale, uri.path()))),
    )
}

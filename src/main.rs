use anyhow::Result;
use locale_site::{config::Config, i18n::Translations, server};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_site=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting locale-site");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        locales = ?config.locales.locales(),
        default = %config.locales.default_locale(),
        "Loaded locale configuration"
    );
    for locale in config.locales.locales() {
        debug!(code = %locale, name = locale.name(), "Serving locale");
    }

    // Parse embedded dictionaries and report gaps against the default locale
    let translations = Translations::load()?;
    let gaps = translations.check_completeness(
        config.locales.default_locale(),
        config.locales.locales(),
    );
    if !gaps.is_empty() {
        warn!("{} translation keys missing; pages will show raw keys", gaps.len());
    }

    server::run(config, translations).await
}

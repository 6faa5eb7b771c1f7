//! HTML pages.
//!
//! Markup is deliberately plain: a shared header and footer around each
//! page body, with every piece of text taken from the request locale's
//! dictionary and escaped before it is written out.

use crate::i18n::{Dictionary, Locale};

/// Everything a page needs to render in one locale.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    /// Locale the page is rendered in
    pub locale: Locale,

    /// Dictionary for `locale`
    pub dict: &'a Dictionary,

    /// Canonical URL of the home page in `locale`
    pub home_href: String,

    /// Language switcher entries for the current page
    pub switch_links: Vec<(Locale, String)>,

    /// Canonical URL of the current page in each locale, for `hreflang` links
    pub alternates: Vec<(Locale, String)>,
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// The home page.
pub fn render_home(ctx: &PageContext) -> String {
    let t = |key: &str| escape_html(ctx.dict.t(key));

    let main = format!(
        r#"<main>
<section class="hero">
<h1>{title}</h1>
<p>{subtitle}</p>
<a class="btn-primary" href="{home}">{cta}</a>
</section>
<section class="about">
<h2>{about_heading}</h2>
<p>{description}</p>
</section>
</main>"#,
        title = t("pages.home.title"),
        subtitle = t("pages.home.subtitle"),
        home = escape_html(&ctx.home_href),
        cta = t("pages.home.cta"),
        about_heading = t("pages.home.about_heading"),
        description = t("pages.home.description"),
    );

    layout(ctx, &t("meta.title"), &t("meta.description"), &main)
}

/// The page shown for unknown paths.
pub fn render_not_found(ctx: &PageContext) -> String {
    let t = |key: &str| escape_html(ctx.dict.t(key));

    let main = format!(
        r#"<main>
<section class="not-found">
<h1>{title}</h1>
<p>{message}</p>
<a href="{home}">{back}</a>
</section>
</main>"#,
        title = t("errors.not_found_title"),
        message = t("errors.not_found"),
        home = escape_html(&ctx.home_href),
        back = t("errors.back_home"),
    );

    layout(ctx, &t("errors.not_found_title"), &t("meta.description"), &main)
}

/// `title` and `description` must already be escaped.
fn layout(ctx: &PageContext, title: &str, description: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
{alternates}
</head>
<body>
{header}
{main}
{footer}
</body>
</html>
"#,
        lang = ctx.locale.code(),
        alternates = alternate_links(ctx),
        header = header(ctx),
        footer = footer(ctx),
    )
}

fn alternate_links(ctx: &PageContext) -> String {
    ctx.alternates
        .iter()
        .map(|(locale, href)| {
            format!(
                r#"<link rel="alternate" hreflang="{}" href="{}">"#,
                locale.code(),
                escape_html(href)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn language_list(ctx: &PageContext) -> String {
    ctx.switch_links
        .iter()
        .map(|(locale, href)| {
            let current = if *locale == ctx.locale {
                r#" aria-current="true""#
            } else {
                ""
            };
            format!(
                r#"<li><a href="{}" hreflang="{}"{}>{}</a></li>"#,
                escape_html(href),
                locale.code(),
                current,
                escape_html(locale.native_name())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn header(ctx: &PageContext) -> String {
    let home = escape_html(&ctx.home_href);

    format!(
        r#"<header>
<a class="logo" href="{home}">{logo}</a>
<nav><a href="{home}">{home_label}</a></nav>
<ul class="language-switcher" aria-label="{language}">
{languages}
</ul>
</header>"#,
        logo = escape_html(ctx.dict.t("common.logo")),
        home_label = escape_html(ctx.dict.t("common.home")),
        language = escape_html(ctx.dict.t("common.language")),
        languages = language_list(ctx),
    )
}

fn footer(ctx: &PageContext) -> String {
    let t = |key: &str| escape_html(ctx.dict.t(key));

    format!(
        r##"<footer>
<div>
<h3>{site_name}</h3>
<p>{description}</p>
</div>
<div>
<h4>{language}</h4>
<ul>
{languages}
</ul>
</div>
<div>
<h4>{links}</h4>
<ul>
<li><a href="#">{privacy}</a></li>
<li><a href="#">{terms}</a></li>
</ul>
</div>
<p class="copyright">{copyright}</p>
</footer>"##,
        site_name = t("footer.site_name"),
        description = t("footer.description"),
        language = t("common.language"),
        languages = language_list(ctx),
        links = t("footer.links"),
        privacy = t("footer.privacy"),
        terms = t("footer.terms"),
        copyright = t("footer.copyright"),
    )
}

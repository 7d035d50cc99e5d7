//! Extraction of pinned repository records from profile markup.
//!
//! Extraction runs in two phases. The structural phase is synchronous: it
//! locates the mandatory fields (repository link, owner, repo) in one
//! pinned-item node and fails the item on malformed markup. The enrichment
//! phase is asynchronous: it fetches the repository page and looks for a
//! homepage link, absorbing any failure so a broken secondary fetch never
//! loses the record. The parsed document stays inside the synchronous
//! helpers and never crosses an await point.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::AppError;
use crate::models::{GITHUB_URL, OPENGRAPH_URL, RepositoryRecord};
use crate::traits::Fetcher;

static PINNED_ITEM: LazyLock<Selector> = LazyLock::new(|| sel(".js-pinned-item-list-item"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| sel("p.pinned-item-desc"));
static LANGUAGE: LazyLock<Selector> =
    LazyLock::new(|| sel(r#"span[itemprop="programmingLanguage"]"#));
static LANGUAGE_COLOR: LazyLock<Selector> = LazyLock::new(|| sel(".repo-language-color"));
static METRIC: LazyLock<Selector> = LazyLock::new(|| sel("a.pinned-item-meta"));
static HOMEPAGE: LazyLock<Selector> = LazyLock::new(|| sel(r#".BorderGrid-cell a[href^="http"]"#));

fn sel(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector is valid")
}

/// Everything extractable from a pinned-item node without a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PinnedItem {
    pub owner: String,
    pub repo: String,
    pub link: String,
    pub description: String,
    pub image: String,
    pub language: String,
    pub language_color: String,
    pub stars: u32,
    pub forks: u32,
}

impl PinnedItem {
    pub fn into_record(self, website: String) -> RepositoryRecord {
        RepositoryRecord {
            owner: self.owner,
            repo: self.repo,
            link: self.link,
            description: self.description,
            image: self.image,
            website,
            language: self.language,
            language_color: self.language_color,
            stars: self.stars,
            forks: self.forks,
        }
    }
}

/// Parse all pinned-item nodes out of a profile page, in document order.
///
/// Returns an empty vec when the page has no pinned section; the first
/// structural error aborts the whole parse.
pub(crate) fn parse_profile(html: &str) -> Result<Vec<PinnedItem>, AppError> {
    let document = Html::parse_document(html);
    document
        .select(&PINNED_ITEM)
        .map(parse_pinned_item)
        .collect()
}

/// Structural parse of a single pinned-item node.
fn parse_pinned_item(item: ElementRef<'_>) -> Result<PinnedItem, AppError> {
    let anchor = item.select(&ANCHOR).next().ok_or(AppError::MissingLink)?;
    let href = anchor.value().attr("href").unwrap_or("");

    let segments: Vec<&str> = href.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return Err(AppError::InvalidPath(href.to_string()));
    }
    let (owner, repo) = (segments[0], segments[1]);
    if owner.is_empty() || repo.is_empty() {
        return Err(AppError::InvalidOwnerOrRepo);
    }

    let description = item
        .select(&DESCRIPTION)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .unwrap_or_default();

    let language = item
        .select(&LANGUAGE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let language_color = item
        .select(&LANGUAGE_COLOR)
        .next()
        .and_then(|el| el.value().attr("style"))
        .and_then(parse_background_color)
        .unwrap_or_default();

    let mut metrics = item.select(&METRIC);
    let stars = parse_metric(metrics.next());
    let forks = parse_metric(metrics.next());

    Ok(PinnedItem {
        owner: owner.to_string(),
        repo: repo.to_string(),
        link: format!("{GITHUB_URL}/{owner}/{repo}"),
        description,
        image: format!("{OPENGRAPH_URL}/{owner}/{repo}"),
        language,
        language_color,
        stars,
        forks,
    })
}

/// Best-effort homepage discovery for one repository.
///
/// Fetches the repository page and takes the first `http`-prefixed anchor
/// in the sidebar metadata region. Every failure mode (network, non-2xx,
/// selector miss) degrades to an empty string; this must never abort
/// extraction of the record itself.
pub(crate) async fn discover_website<F: Fetcher>(fetcher: &F, link: &str) -> String {
    match fetcher.fetch(link).await {
        Ok(body) => find_homepage(&body).unwrap_or_default(),
        Err(err) => {
            tracing::warn!(%link, error = %err, "homepage discovery fetch failed");
            String::new()
        }
    }
}

fn find_homepage(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchor = document.select(&HOMEPAGE).next()?;
    anchor.value().attr("href").map(str::to_string)
}

/// Strip embedded newlines and surrounding whitespace from node text.
fn clean_text(text: &str) -> String {
    text.replace('\n', "").trim().to_string()
}

/// Metric text parses as a plain integer or defaults to 0.
fn parse_metric(el: Option<ElementRef<'_>>) -> u32 {
    el.map(|el| clean_text(&el.text().collect::<String>()))
        .and_then(|text| text.parse().ok())
        .unwrap_or(0)
}

/// Parse `<value>` out of an inline `background-color: <value>;` style.
fn parse_background_color(style: &str) -> Option<String> {
    let rest = style.split_once("background-color:")?.1;
    let value = rest.split(';').next()?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

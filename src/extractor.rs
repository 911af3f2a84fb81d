use anyhow::{Context, Result, bail};
use reqwest::{Client, Url};
use scraper::{Html, Selector};

use crate::data_models::ProjectLink;
use crate::error::AppError;

pub const SEARCH_ENDPOINT: &str = "/it-IT/Ricerca/ViaLibera";
/// Anchors whose href contains this point at a project detail page.
pub const PROJECT_INFO_MARKER: &str = "/it-IT/Oggetti/Info/";

const SEARCH_FAILED: &str = "Failed to fetch projects from the server";

/// Selection rule for result anchors.
pub fn is_project_info_href(href: &str) -> bool {
    href.contains(PROJECT_INFO_MARKER)
}

/// Pulls every project link out of a search result page, in document order.
///
/// Relative hrefs are resolved against `base`. Anchors without an href are
/// ignored; duplicates are kept.
pub fn extract_project_links(html: &str, base: &Url) -> Result<Vec<ProjectLink>> {
    let document = Html::parse_document(html);
    let anchor_selector =
        Selector::parse("a[href]").map_err(|e| anyhow::anyhow!("invalid selector: {e}"))?;

    let mut links = Vec::new();
    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !is_project_info_href(href) {
            continue;
        }
        let resolved = base
            .join(href)
            .with_context(|| format!("could not resolve project link {href:?}"))?;
        let title = element.text().collect::<String>().trim().to_string();
        links.push(ProjectLink::new(resolved.to_string(), title));
    }

    Ok(links)
}

/// Keyword search against the registry.
pub struct LinkExtractor {
    client: Client,
    base: Url,
}

impl LinkExtractor {
    pub fn new(client: Client, base_url: &str) -> Result<LinkExtractor> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base URL {base_url}"))?;
        Ok(LinkExtractor { client, base })
    }

    /// Search URL for `keyword`, with the "or" match mode (`t=o`) always on.
    pub fn search_url(&self, keyword: &str) -> String {
        let origin = self.base.as_str().trim_end_matches('/');
        format!(
            "{origin}{SEARCH_ENDPOINT}?Testo={}&t=o",
            urlencoding::encode(keyword)
        )
    }

    /// Runs one search and returns the project links from the first result
    /// page. Any failure yields no links at all.
    pub async fn search(&self, keyword: &str) -> Result<Vec<ProjectLink>, AppError> {
        if keyword.trim().is_empty() {
            return Err(AppError::InvalidInput("Keyword is required".to_string()));
        }

        let url = self.search_url(keyword);
        log::info!("searching projects: {url}");

        let html = self
            .fetch_page(&url)
            .await
            .map_err(|e| AppError::upstream(SEARCH_FAILED, e))?;
        let links = extract_project_links(&html, &self.base)
            .map_err(|e| AppError::upstream(SEARCH_FAILED, e))?;

        log::info!("found {} projects for {keyword:?}", links.len());
        Ok(links)
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let res = self.client.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            bail!("search page returned {status}");
        }
        let body = res.text().await?;
        Ok(body)
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

use ghn_core::{Entry, EntryAuthor, Error, FeedFetcher, FeedSource, Result};

/// Fetches Atom documents over HTTP and extracts their entries.
///
/// Extraction is deliberately lenient: the GitHub feeds are well-formed,
/// and anything that is not simply yields fewer entries instead of an
/// error. Entries without an id are unusable for dedup and are skipped.
pub struct AtomFetcher {
    client: reqwest::Client,
}

impl AtomFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for AtomFetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<Vec<Entry>> {
        Url::parse(&source.url)
            .map_err(|e| Error::Feed(format!("invalid feed URL {}: {}", source.url, e)))?;

        let response = self.client.get(&source.url).send().await?;
        let body = response.text().await?;
        Ok(parse_entries(&body))
    }
}

/// Pulls the `entry` elements out of an Atom document.
pub fn parse_entries(document: &str) -> Vec<Entry> {
    let document = Html::parse_document(document);
    let entry_selector = Selector::parse("entry").unwrap();
    let id_selector = Selector::parse("id").unwrap();
    let title_selector = Selector::parse("title").unwrap();
    let link_selector = Selector::parse("link").unwrap();
    let updated_selector = Selector::parse("updated").unwrap();
    let author_selector = Selector::parse("author > name").unwrap();

    let mut entries = Vec::new();
    for element in document.select(&entry_selector) {
        let id = match select_text(&element, &id_selector) {
            Some(id) => id,
            None => continue,
        };

        let authors: Vec<EntryAuthor> = element
            .select(&author_selector)
            .map(|el| EntryAuthor {
                name: el.text().collect::<String>().trim().to_string(),
            })
            .filter(|a| !a.name.is_empty())
            .collect();

        let author = authors.first().map(|a| a.name.clone()).unwrap_or_default();

        let link = element
            .select(&link_selector)
            .find_map(|el| el.value().attr("href"))
            .unwrap_or_default()
            .to_string();

        let updated = select_text(&element, &updated_selector)
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        entries.push(Entry {
            id,
            author,
            title: select_text(&element, &title_selector).unwrap_or_default(),
            link,
            updated,
            authors,
        });
    }

    entries
}

fn select_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

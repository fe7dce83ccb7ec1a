//! Puzzle sources and fetchers.
//!
//! A [`SourceRegistry`] maps a short nickname (e.g. `es`) to a [`Source`]
//! describing which [`Provider`] serves it and where. Fetchers download the
//! raw CCXML for a date; [`fetch_crossword`] turns that into a titled
//! [`Crossword`].
//!
//! Registries are loaded from TOML:
//!
//! ```toml
//! [sources.es]
//! description = "Evening Standard"
//! provider = "arkadium"
//! fragment = "EveningStandard/es"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;

use crate::ccxml;
use crate::error::{Error, Result};
use crate::model::Crossword;

/// Service that hosts puzzle feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Arkadium,
}

/// A named puzzle feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    /// Human-readable name, used in puzzle titles.
    pub description: String,
    pub provider: Provider,
    /// Provider-specific path prefix of the feed.
    pub fragment: String,
}

/// Sources keyed by nickname.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRegistry {
    #[serde(default)]
    sources: BTreeMap<String, Source>,
}

impl SourceRegistry {
    /// Parse a registry from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("invalid source registry: {e}")))
    }

    /// Load a registry from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read source registry {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    pub fn get(&self, nick: &str) -> Option<&Source> {
        self.sources.get(nick)
    }

    /// Look up a source, failing with a configuration error if unknown.
    pub fn require(&self, nick: &str) -> Result<&Source> {
        self.get(nick)
            .ok_or_else(|| Error::Config(format!("source {nick} is not recognised")))
    }

    /// Nicknames and sources in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Source)> {
        self.sources.iter().map(|(nick, source)| (nick.as_str(), source))
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Downloads raw puzzle documents.
pub trait Fetcher {
    /// Fetch the document published by `source` on `date`.
    ///
    /// Returns [`Error::SourceUnavailable`] when there is no puzzle for that
    /// date.
    fn fetch(&self, date: NaiveDate, nick: &str, source: &Source) -> Result<Vec<u8>>;
}

/// Fetch, parse and title the puzzle for one date.
///
/// The title reads e.g. "Evening Standard for Friday 25 December 2020".
pub fn fetch_crossword<F: Fetcher + ?Sized>(
    fetcher: &F,
    date: NaiveDate,
    nick: &str,
    source: &Source,
) -> Result<Crossword> {
    let bytes = fetcher.fetch(date, nick, source)?;
    debug!("fetched {} bytes for {nick} on {date}", bytes.len());
    let crossword =
        ccxml::parse(&bytes).map_err(|e| e.in_document(format!("{nick} puzzle for {date}")))?;
    Ok(crossword.with_title(dated_title(&source.description, date)))
}

/// Puzzle title for a source and date.
pub fn dated_title(description: &str, date: NaiveDate) -> String {
    format!("{description} for {}", date.format("%A %-d %B %Y"))
}

/// Feed URL for an Arkadium-hosted puzzle.
pub fn arkadium_url(fragment: &str, date: NaiveDate) -> String {
    format!(
        "https://ams.cdn.arkadiumhosted.com/assets/gamesfeed/{fragment}{}.xml",
        date.format("%y%m%d")
    )
}

/// Fetcher for a provider.
#[cfg(feature = "fetch")]
pub fn fetcher_for(provider: Provider) -> Result<Box<dyn Fetcher>> {
    match provider {
        Provider::Arkadium => Ok(Box::new(ArkadiumFetcher::new()?)),
    }
}

/// Downloads puzzles from the Arkadium games feed CDN.
#[cfg(feature = "fetch")]
pub struct ArkadiumFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "fetch")]
impl ArkadiumFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "fetch")]
impl Fetcher for ArkadiumFetcher {
    fn fetch(&self, date: NaiveDate, nick: &str, source: &Source) -> Result<Vec<u8>> {
        let url = arkadium_url(&source.fragment, date);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::Fetch(format!("{url}: {e}")))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            log::info!("{url} returned {status}");
            return Err(Error::SourceUnavailable {
                source_name: nick.to_string(),
                date: date.to_string(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| Error::Fetch(format!("{url}: {e}")))?;
        Ok(body.to_vec())
    }
}

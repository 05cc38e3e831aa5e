//! Query parameters and URL construction for the hotel API

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Filters for listing hotels
///
/// Empty `query` and absent filters are left out of the URL; every theme
/// becomes its own `themes` pair; `limit` is always sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HotelQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl HotelQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.themes.push(theme.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs, in a stable order
    pub fn to_query_pairs(&self, default_limit: u32) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.query.is_empty() {
            pairs.push(("q", self.query.clone()));
        }
        if let Some(country) = self.country.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("country", country.to_string()));
        }
        if let Some(region) = self.region.as_deref().filter(|r| !r.is_empty()) {
            pairs.push(("region", region.to_string()));
        }
        for theme in &self.themes {
            pairs.push(("themes", theme.clone()));
        }
        pairs.push(("limit", self.limit.unwrap_or(default_limit).to_string()));
        pairs
    }
}

/// Body of `POST /quote`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub hotel_id: String,
    /// `YYYY-MM-DD`
    pub check_in: String,
    /// `YYYY-MM-DD`
    pub check_out: String,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
}

/// `base` joined with a fixed path such as `/hotels`
///
/// The path is appended to whatever path the base already carries, so a
/// base of `http://host/api` yields `http://host/api/hotels`.
pub fn endpoint(base: &str, path: &str) -> ClientResult<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", joined, e)))
}

/// `base` + `path` + one percent-encoded trailing segment
pub fn endpoint_with_segment(base: &str, path: &str, segment: &str) -> ClientResult<Url> {
    let mut url = endpoint(base, path)?;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(format!("{} cannot take path segments", base)))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// `base` + `path` with the query's pairs appended
pub fn endpoint_with_query(
    base: &str,
    path: &str,
    query: &HotelQuery,
    default_limit: u32,
) -> ClientResult<Url> {
    let mut url = endpoint(base, path)?;
    url.query_pairs_mut()
        .extend_pairs(query.to_query_pairs(default_limit));
    Ok(url)
}

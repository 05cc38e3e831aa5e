//! Hotel REST API access
//!
//! [`ResortApi`] is the seam between the map and the external hotel
//! service. [`HttpResortApi`] is the `reqwest` implementation; tests and
//! embedders can supply their own.

use async_trait::async_trait;
use map_core::{Hotel, ViewportRect};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::query::{endpoint, endpoint_with_query, endpoint_with_segment, HotelQuery, QuoteRequest};

/// Response of `GET /hotels`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelList {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
}

/// Response of `GET /map/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSearch {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub bounds: Option<ViewportRect>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
}

/// Operations the hotel API offers
#[async_trait]
pub trait ResortApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> ClientResult<Value>;

    /// `GET /hotels`
    async fn list_hotels(&self, query: &HotelQuery) -> ClientResult<HotelList>;

    /// `GET /hotels/{id}`, returned as the API sends it
    async fn get_hotel(&self, hotel_id: &str) -> ClientResult<Value>;

    /// `GET /map/search`
    async fn map_search(&self, query: &HotelQuery) -> ClientResult<MapSearch>;

    /// `POST /quote`, returned as the API sends it
    async fn quote(&self, request: &QuoteRequest) -> ClientResult<Value>;
}

/// `reqwest`-backed API client
#[derive(Debug, Clone)]
pub struct HttpResortApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpResortApi {
    /// Build a client from configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        // Fail early on a base URL that cannot form endpoints
        endpoint(&config.base_url, "/health")?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: reqwest::Url) -> ClientResult<T> {
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, url: reqwest::Url, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    /// Non-2xx statuses become [`ClientError::Status`] with the body text
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "API request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ResortApi for HttpResortApi {
    async fn health(&self) -> ClientResult<Value> {
        let url = endpoint(&self.config.base_url, "/health")?;
        self.get_json(url).await
    }

    async fn list_hotels(&self, query: &HotelQuery) -> ClientResult<HotelList> {
        let url = endpoint_with_query(&self.config.base_url, "/hotels", query, self.config.default_limit)?;
        self.get_json(url).await
    }

    async fn get_hotel(&self, hotel_id: &str) -> ClientResult<Value> {
        let url = endpoint_with_segment(&self.config.base_url, "/hotels", hotel_id)?;
        self.get_json(url).await
    }

    async fn map_search(&self, query: &HotelQuery) -> ClientResult<MapSearch> {
        let url = endpoint_with_query(&self.config.base_url, "/map/search", query, self.config.default_limit)?;
        self.get_json(url).await
    }

    async fn quote(&self, request: &QuoteRequest) -> ClientResult<Value> {
        let url = endpoint(&self.config.base_url, "/quote")?;
        self.post_json(url, request).await
    }
}

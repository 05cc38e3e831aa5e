//! Hotel list providers
//!
//! A view does not care where its hotels come from: a list baked into the
//! binary or a fetch from the API. Both sit behind [`HotelSource`].

use std::sync::Arc;

use async_trait::async_trait;
use map_core::Hotel;

use crate::api::ResortApi;
use crate::error::ClientResult;
use crate::query::HotelQuery;

/// Something that can produce the hotel list for a query
#[async_trait]
pub trait HotelSource: Send + Sync {
    /// Source name, for logs
    fn name(&self) -> &str;

    /// Produce the full list in one go
    async fn fetch(&self, query: &HotelQuery) -> ClientResult<Vec<Hotel>>;
}

/// In-memory list; ignores query filters apart from `limit`
pub struct StaticSource {
    hotels: Vec<Hotel>,
}

impl StaticSource {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    /// The bundled Kolkata demo list
    pub fn demo() -> Self {
        Self::new(map_core::data::demo_hotels())
    }
}

#[async_trait]
impl HotelSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, query: &HotelQuery) -> ClientResult<Vec<Hotel>> {
        let limit = query.limit.map(|l| l as usize).unwrap_or(self.hotels.len());
        Ok(self.hotels.iter().take(limit).cloned().collect())
    }
}

/// List fetched through the hotel API
pub struct ApiSource {
    api: Arc<dyn ResortApi>,
}

impl ApiSource {
    pub fn new(api: Arc<dyn ResortApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HotelSource for ApiSource {
    fn name(&self) -> &str {
        "api"
    }

    async fn fetch(&self, query: &HotelQuery) -> ClientResult<Vec<Hotel>> {
        let list = self.api.list_hotels(query).await?;
        Ok(list.hotels)
    }
}

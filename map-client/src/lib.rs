//! Resort Map Client - async side of the hotel map
//!
//! The client crate connects the synchronous view state in `map_core` to
//! the outside world:
//! - Talks to the hotel REST API through [`ResortApi`]
//! - Loads hotel lists into a view from any [`HotelSource`]
//! - Debounces viewport changes coming from the map widget
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     MAP CLIENT                               │
//! │                                                              │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐         │
//! │  │   Hotel     │  │   Hotel     │  │  Viewport   │         │
//! │  │   Source    │  │   Loader    │  │  Debouncer  │         │
//! │  └─────────────┘  └─────────────┘  └─────────────┘         │
//! │         │                │                │                 │
//! │         └────────────────┼────────────────┘                 │
//! │                          │                                  │
//! │                    ┌─────▼─────┐                           │
//! │                    │  Shared   │                           │
//! │                    │   View    │                           │
//! │                    └───────────┘                           │
//! │                          │                                  │
//! │                    ┌─────▼─────┐                           │
//! │                    │ ResortApi │ ── HTTP ──▶ hotel API     │
//! │                    └───────────┘                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use map_client::{ClientConfig, HttpResortApi, MapSession, HotelQuery};
//!
//! let api = HttpResortApi::new(ClientConfig::from_env()?)?;
//! let session = MapSession::new(std::sync::Arc::new(api));
//!
//! // Load results and fit the map to them
//! let search = session.search(&HotelQuery::text("beach")).await?;
//!
//! // Pick one from the list
//! session.view().lock().await.select_hotel(&search.hotels[0]);
//! ```

pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod loader;
pub mod query;
pub mod source;

pub use api::{HotelList, HttpResortApi, MapSearch, ResortApi};
pub use config::{ClientConfig, DebounceConfig};
pub use debounce::ViewportDebouncer;
pub use error::{ClientError, ClientResult};
pub use loader::{shared, HotelLoader, LoadHandle, SharedView};
pub use query::{HotelQuery, QuoteRequest};
pub use source::{ApiSource, HotelSource, StaticSource};

use std::sync::Arc;

use loader::CancelGuard;
use map_core::{bounds_of, LoadOutcome, MapViewState};

/// An API connection paired with the view it feeds
#[derive(Clone)]
pub struct MapSession {
    api: Arc<dyn ResortApi>,
    view: SharedView,
}

impl MapSession {
    /// Start with an empty view
    pub fn new(api: Arc<dyn ResortApi>) -> Self {
        Self::with_view(api, shared(MapViewState::new()))
    }

    pub fn with_view(api: Arc<dyn ResortApi>, view: SharedView) -> Self {
        Self { api, view }
    }

    pub fn api(&self) -> &Arc<dyn ResortApi> {
        &self.api
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    /// A loader reading through this session's API
    pub fn loader(&self) -> HotelLoader {
        HotelLoader::new(Arc::new(ApiSource::new(Arc::clone(&self.api))))
    }

    /// Map search: load the results into the view and fit the viewport
    ///
    /// The viewport is set to the bounds the API reports, or to the
    /// bounds of the returned coordinates when it reports none. An empty
    /// result replaces the list but leaves the viewport alone.
    pub async fn search(&self, query: &HotelQuery) -> ClientResult<MapSearch> {
        let ticket = self.view.lock().await.list_mut().begin_load();
        let guard = CancelGuard::arm(&self.view, ticket);

        let search = match self.api.map_search(query).await {
            Ok(search) => search,
            Err(e) => {
                tracing::warn!(error = %e, "map search failed");
                self.view.lock().await.list_mut().fail(ticket, e.to_string());
                guard.disarm();
                return Err(e);
            }
        };

        // The API reports zero bounds for an empty result
        let fit = if search.hotels.is_empty() {
            None
        } else {
            search
                .bounds
                .or_else(|| bounds_of(search.hotels.iter().map(|h| h.coordinates)))
        };

        let mut view = self.view.lock().await;
        let outcome = view.list_mut().complete(ticket, search.hotels.clone());
        if outcome == LoadOutcome::Applied {
            if let Some(rect) = fit {
                view.update_viewport(Some(rect));
            }
            tracing::info!(count = search.hotels.len(), "map search applied");
        }
        drop(view);
        guard.disarm();

        Ok(search)
    }
}

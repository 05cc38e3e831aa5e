//! Hotel list state: current list, loading flag, last error
//!
//! This is the uniform face every provider sits behind. A static list is
//! installed with [`HotelListState::replace`]; a network fetch goes through
//! [`HotelListState::begin_load`], then [`HotelListState::complete`] or
//! [`HotelListState::fail`]. Results are applied in one step, never
//! streamed in.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::hotel::{Hotel, HotelId};

/// Token handed out when a load starts
///
/// Only the most recent ticket may complete; results carrying an older
/// ticket belong to a superseded load and are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Outcome of applying a load result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Superseded,
}

/// Loading/error status, serializable for UIs and tool responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListStatus {
    pub count: usize,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

/// The held hotel list
#[derive(Debug, Default)]
pub struct HotelListState {
    hotels: Vec<Hotel>,
    /// Bumped on every replacement; keys the visible-set memo
    version: u64,
    loading: bool,
    error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    latest_ticket: u64,
}

impl HotelListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a static list
    pub fn with_hotels(hotels: Vec<Hotel>) -> Self {
        let mut state = Self::new();
        state.replace(hotels);
        state
    }

    /// Install a new list in one step
    ///
    /// Any load still in flight is superseded and its result discarded.
    pub fn replace(&mut self, hotels: Vec<Hotel>) {
        self.latest_ticket += 1;
        self.install(hotels);
    }

    fn install(&mut self, hotels: Vec<Hotel>) {
        self.hotels = hotels;
        self.version += 1;
        self.loading = false;
        self.error = None;
        self.fetched_at = Some(Utc::now());
    }

    /// Mark a fetch as in flight
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.loading = true;
        LoadTicket(self.latest_ticket)
    }

    /// Apply a fetched list, unless a newer load has started since
    pub fn complete(&mut self, ticket: LoadTicket, hotels: Vec<Hotel>) -> LoadOutcome {
        if ticket.0 != self.latest_ticket {
            return LoadOutcome::Superseded;
        }
        self.install(hotels);
        LoadOutcome::Applied
    }

    /// Record a failed fetch; the previous list stays in place
    pub fn fail(&mut self, ticket: LoadTicket, message: impl Into<String>) -> LoadOutcome {
        if ticket.0 != self.latest_ticket {
            return LoadOutcome::Superseded;
        }
        self.loading = false;
        self.error = Some(message.into());
        LoadOutcome::Applied
    }

    /// Abandon an in-flight load without touching the list
    pub fn cancel(&mut self, ticket: LoadTicket) {
        if ticket.0 == self.latest_ticket {
            self.loading = false;
        }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    /// Look a hotel up by identifier
    pub fn find(&self, id: &HotelId) -> Option<&Hotel> {
        self.hotels.iter().find(|h| &h.id == id)
    }

    pub fn status(&self) -> ListStatus {
        ListStatus {
            count: self.hotels.len(),
            loading: self.loading,
            error: self.error.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

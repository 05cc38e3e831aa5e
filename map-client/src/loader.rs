//! One-shot hotel list loading
//!
//! A load fetches the whole list from a [`HotelSource`] and installs it in
//! the view under the lock, so readers never see a half-applied list. A
//! failure is recorded on the list state and the old list stays. Dropping
//! the [`LoadHandle`] of a background load aborts it.

use std::sync::Arc;

use map_core::{LoadOutcome, LoadTicket, MapViewState};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::{ClientError, ClientResult};
use crate::query::HotelQuery;
use crate::source::HotelSource;

/// A view shared between the UI side and background tasks
pub type SharedView = Arc<Mutex<MapViewState>>;

/// Wrap a view for sharing
pub fn shared(view: MapViewState) -> SharedView {
    Arc::new(Mutex::new(view))
}

/// Loads hotel lists from a source into views
#[derive(Clone)]
pub struct HotelLoader {
    source: Arc<dyn HotelSource>,
}

impl HotelLoader {
    pub fn new(source: Arc<dyn HotelSource>) -> Self {
        Self { source }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch and apply, waiting for the result
    ///
    /// Dropping the returned future mid-fetch clears the loading flag.
    pub async fn load(&self, query: &HotelQuery, view: &SharedView) -> ClientResult<LoadOutcome> {
        let ticket = view.lock().await.list_mut().begin_load();
        let guard = CancelGuard::arm(view, ticket);
        let result = self.run(query, view, ticket).await;
        guard.disarm();
        result
    }

    /// Fetch and apply in the background
    pub fn spawn(&self, query: HotelQuery, view: SharedView) -> LoadHandle {
        let loader = self.clone();
        let task = tokio::spawn(async move { loader.load(&query, &view).await });
        LoadHandle { task: Some(task) }
    }

    async fn run(
        &self,
        query: &HotelQuery,
        view: &Mutex<MapViewState>,
        ticket: LoadTicket,
    ) -> ClientResult<LoadOutcome> {
        tracing::info!(source = self.source.name(), ?query, "loading hotels");

        match self.source.fetch(query).await {
            Ok(hotels) => {
                let count = hotels.len();
                let outcome = view.lock().await.list_mut().complete(ticket, hotels);
                match outcome {
                    LoadOutcome::Applied => tracing::info!(count, "hotel list applied"),
                    LoadOutcome::Superseded => tracing::debug!(count, "discarding superseded hotel list"),
                }
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "hotel list fetch failed");
                view.lock().await.list_mut().fail(ticket, e.to_string());
                Err(e)
            }
        }
    }
}

/// Clears the loading flag if a load is dropped mid-flight
pub(crate) struct CancelGuard {
    view: SharedView,
    ticket: LoadTicket,
    armed: bool,
}

impl CancelGuard {
    pub(crate) fn arm(view: &SharedView, ticket: LoadTicket) -> Self {
        Self {
            view: Arc::clone(view),
            ticket,
            armed: true,
        }
    }

    /// The load ran to completion and settled the list itself
    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::debug!("hotel load abandoned");
        let ticket = self.ticket;
        match self.view.try_lock() {
            Ok(mut view) => view.list_mut().cancel(ticket),
            Err(_) => {
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    let view = Arc::clone(&self.view);
                    handle.spawn(async move {
                        view.lock().await.list_mut().cancel(ticket);
                    });
                }
            }
        }
    }
}

/// Handle to a background load; dropping it aborts the load
pub struct LoadHandle {
    task: Option<JoinHandle<ClientResult<LoadOutcome>>>,
}

impl LoadHandle {
    /// Wait for the load to finish
    pub async fn join(mut self) -> ClientResult<LoadOutcome> {
        let task = match self.task.take() {
            Some(task) => task,
            None => return Err(ClientError::Cancelled),
        };
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ClientError::Cancelled),
            Err(e) => Err(ClientError::Task(e.to_string())),
        }
    }

    /// Abandon the load
    pub fn abort(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

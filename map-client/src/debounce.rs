//! Trailing-edge debounce for viewport changes
//!
//! Map pans and zooms fire a burst of bound updates. Only the last one in a
//! quiet period is applied to the view; earlier ones are overwritten.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use map_core::ViewportRect;
use tokio::task::JoinHandle;

use crate::config::DebounceConfig;
use crate::loader::SharedView;

type PendingSlot = Arc<StdMutex<Option<Option<ViewportRect>>>>;

/// Coalesces viewport updates before they reach a shared view
pub struct ViewportDebouncer {
    view: SharedView,
    delay: Duration,
    pending: PendingSlot,
    timer: Option<JoinHandle<()>>,
}

impl ViewportDebouncer {
    pub fn new(view: SharedView, config: &DebounceConfig) -> Self {
        Self::with_delay(view, config.delay())
    }

    pub fn with_delay(view: SharedView, delay: Duration) -> Self {
        Self {
            view,
            delay,
            pending: Arc::new(StdMutex::new(None)),
            timer: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record new bounds and restart the quiet-period timer
    pub fn push(&mut self, rect: Option<ViewportRect>) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        *lock_slot(&self.pending) = Some(rect);

        let view = Arc::clone(&self.view);
        let pending = Arc::clone(&self.pending);
        let deadline = tokio::time::Instant::now() + self.delay;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // The slot is emptied only once the view is held, so an abort
            // while waiting for the lock leaves the rect for `flush`
            let mut view = view.lock().await;
            let rect = lock_slot(&pending).take();
            if let Some(rect) = rect {
                tracing::debug!(?rect, "applying debounced viewport");
                view.update_viewport(rect);
            }
        }));
    }

    /// Whether an update is waiting for its timer
    pub fn has_pending(&self) -> bool {
        lock_slot(&self.pending).is_some()
    }

    /// Apply any waiting update now
    pub async fn flush(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let mut view = self.view.lock().await;
        let rect = lock_slot(&self.pending).take();
        if let Some(rect) = rect {
            view.update_viewport(rect);
        }
    }

    /// Drop any waiting update without applying it
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        lock_slot(&self.pending).take();
    }
}

impl Drop for ViewportDebouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

fn lock_slot(slot: &PendingSlot) -> std::sync::MutexGuard<'_, Option<Option<ViewportRect>>> {
    // Held only for a take or a store; a poisoned slot still holds valid data
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

//! Viewport visibility filter
//!
//! The visible subset is a pure function of the hotel list and the
//! viewport: the full list when there is no viewport, otherwise exactly
//! the hotels whose coordinates pass the inclusive containment test, in
//! their original order.

use crate::geo::{contains_point, ViewportRect};
use crate::hotel::Hotel;

/// Hotels inside the viewport, in list order
pub fn compute_visible<'a>(hotels: &'a [Hotel], rect: Option<&ViewportRect>) -> Vec<&'a Hotel> {
    hotels
        .iter()
        .filter(|hotel| contains_point(hotel.coordinates, rect))
        .collect()
}

/// Positions of the visible hotels within `hotels`
pub fn visible_indices(hotels: &[Hotel], rect: Option<&ViewportRect>) -> Vec<usize> {
    hotels
        .iter()
        .enumerate()
        .filter(|(_, hotel)| contains_point(hotel.coordinates, rect))
        .map(|(i, _)| i)
        .collect()
}

/// Memo of the last visible-set computation
///
/// Keyed by the list version and the viewport value. A key mismatch means
/// the stored indices are stale.
#[derive(Debug, Default)]
pub struct VisibleCache {
    key: Option<(u64, Option<ViewportRect>)>,
    indices: Vec<usize>,
    recomputes: u64,
}

impl VisibleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the visible indices, recomputing only if the key changed
    pub fn get_or_compute(
        &mut self,
        version: u64,
        hotels: &[Hotel],
        rect: Option<&ViewportRect>,
    ) -> &[usize] {
        let key = (version, rect.copied());
        // NaN bounds never compare equal, so such a key always recomputes
        if self.key.as_ref() != Some(&key) {
            self.indices = visible_indices(hotels, rect);
            self.key = Some(key);
            self.recomputes += 1;
            tracing::debug!(
                version,
                visible = self.indices.len(),
                total = hotels.len(),
                "recomputed visible hotels"
            );
        }
        &self.indices
    }

    /// Drop the memo
    pub fn invalidate(&mut self) {
        self.key = None;
        self.indices.clear();
    }

    /// Number of times the visible set was actually recomputed
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

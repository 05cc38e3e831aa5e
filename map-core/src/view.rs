//! Map view state
//!
//! Ties the hotel list, the latest viewport and the selection together and
//! derives everything the list, map and detail panel render from them.
//!
//! ```text
//!   provider ──► HotelListState ─┐
//!                                ├──► visible()  ──► list / carousel
//!   map "move end" ──► viewport ─┘
//!
//!   list item / marker ──► select_hotel() ──► SelectionState ──► fly_target()
//!   detail panel close ──► close_detail()
//! ```

use serde::Serialize;

use crate::error::{MapError, Result};
use crate::filter::VisibleCache;
use crate::fly::{derive_fly_target, FlyTarget};
use crate::geo::{contains_point, ViewportRect};
use crate::hotel::{Hotel, HotelId};
use crate::listing::{HotelListState, ListStatus};
use crate::selection::{SelectionSource, SelectionState};

/// Serializable picture of the whole view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub viewport: Option<ViewportRect>,
    pub visible_count: usize,
    pub visible_ids: Vec<HotelId>,
    pub selected_hotel_id: Option<HotelId>,
    pub is_detail_view: bool,
    pub fly_to: Option<FlyTarget>,
    pub list: ListStatus,
}

/// Viewport filter plus selection state for one map view
#[derive(Debug, Default)]
pub struct MapViewState {
    list: HotelListState,
    viewport: Option<ViewportRect>,
    selection: SelectionState,
    cache: VisibleCache,
}

impl MapViewState {
    /// Empty view, no viewport constraint
    pub fn new() -> Self {
        Self::default()
    }

    /// View over a static list
    pub fn with_hotels(hotels: Vec<Hotel>) -> Self {
        Self {
            list: HotelListState::with_hotels(hotels),
            ..Self::default()
        }
    }

    // ── hotel list ───────────────────────────────────────────────────────

    pub fn list(&self) -> &HotelListState {
        &self.list
    }

    /// Mutable access for providers; any replacement bumps the list version
    pub fn list_mut(&mut self) -> &mut HotelListState {
        &mut self.list
    }

    pub fn hotels(&self) -> &[Hotel] {
        self.list.hotels()
    }

    /// Replace the whole list; selection and viewport are kept
    pub fn set_hotels(&mut self, hotels: Vec<Hotel>) {
        self.list.replace(hotels);
    }

    // ── viewport ─────────────────────────────────────────────────────────

    /// Overwrite the stored viewport with the latest one
    pub fn update_viewport(&mut self, rect: Option<ViewportRect>) {
        if let Some(r) = &rect {
            if r.is_inverted() {
                tracing::warn!(?r, "inverted viewport; no hotel will be visible");
            }
        }
        tracing::debug!(?rect, "viewport updated");
        self.viewport = rect;
    }

    pub fn viewport(&self) -> Option<&ViewportRect> {
        self.viewport.as_ref()
    }

    /// Hotels inside the viewport, in list order
    pub fn visible(&mut self) -> Vec<&Hotel> {
        let hotels = self.list.hotels();
        let indices = self
            .cache
            .get_or_compute(self.list.version(), hotels, self.viewport.as_ref());
        indices.iter().map(|&i| &hotels[i]).collect()
    }

    pub fn visible_count(&mut self) -> usize {
        self.cache
            .get_or_compute(self.list.version(), self.list.hotels(), self.viewport.as_ref())
            .len()
    }

    /// Whether one hotel passes the current viewport
    pub fn is_visible(&self, hotel: &Hotel) -> bool {
        contains_point(hotel.coordinates, self.viewport.as_ref())
    }

    /// How many times the visible set was recomputed
    pub fn recompute_count(&self) -> u64 {
        self.cache.recompute_count()
    }

    // ── selection ────────────────────────────────────────────────────────

    /// Select a hotel and open the detail view
    pub fn select_hotel(&mut self, hotel: &Hotel) {
        tracing::debug!(hotel_id = %hotel.id, "hotel selected");
        self.selection.select(hotel);
    }

    /// List or carousel item activated
    pub fn on_list_item_activated(&mut self, hotel: &Hotel) {
        self.select_from(SelectionSource::List, hotel);
    }

    /// Map marker clicked
    pub fn on_marker_clicked(&mut self, hotel: &Hotel) {
        self.select_from(SelectionSource::Marker, hotel);
    }

    /// Every entry point ends in the same state transition
    pub fn select_from(&mut self, source: SelectionSource, hotel: &Hotel) {
        tracing::trace!(?source, "selection entry point");
        self.select_hotel(hotel);
    }

    /// Select by identifier from the current list
    pub fn select_hotel_by_id(&mut self, source: SelectionSource, id: &HotelId) -> Result<()> {
        let hotel = self
            .list
            .find(id)
            .cloned()
            .ok_or_else(|| MapError::HotelNotFound {
                hotel_id: id.to_string(),
            })?;
        self.select_from(source, &hotel);
        Ok(())
    }

    /// Close the detail view; the selection stays
    pub fn close_detail(&mut self) {
        self.selection.close_detail();
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn is_detail_view(&self) -> bool {
        self.selection.is_detail_view()
    }

    pub fn is_selected(&self, hotel: &Hotel) -> bool {
        self.selection.is_selected(hotel)
    }

    /// The selected hotel as found in the current list
    pub fn selected_hotel(&self) -> Option<&Hotel> {
        self.selection.selected_id().and_then(|id| self.list.find(id))
    }

    /// Camera target for the current selection
    pub fn fly_target(&self) -> Option<FlyTarget> {
        derive_fly_target(self.selection.selected())
    }

    pub fn snapshot(&mut self) -> ViewSnapshot {
        let visible_ids = self.visible().into_iter().map(|h| h.id.clone()).collect::<Vec<_>>();
        ViewSnapshot {
            viewport: self.viewport,
            visible_count: visible_ids.len(),
            visible_ids,
            selected_hotel_id: self.selection.selected_id().cloned(),
            is_detail_view: self.selection.is_detail_view(),
            fly_to: self.fly_target(),
            list: self.list.status(),
        }
    }
}

//! Selection and detail-view state
//!
//! Two independent pieces of state: which hotel is selected, and whether
//! the detail view is open. Selecting opens the detail view; closing it
//! leaves the selection in place. Nothing clears the selection
//! automatically.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::hotel::{Hotel, HotelId};

/// Non-owning reference to the selected hotel
///
/// The coordinates are captured at selection time so the fly-to target
/// stays derivable even if the hotel list is later replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedHotel {
    pub id: HotelId,
    pub coordinates: Coordinates,
}

impl From<&Hotel> for SelectedHotel {
    fn from(hotel: &Hotel) -> Self {
        Self {
            id: hotel.id.clone(),
            coordinates: hotel.coordinates,
        }
    }
}

/// Where a selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionSource {
    /// List or carousel item
    #[default]
    List,
    /// Map marker
    Marker,
}

/// Selected hotel plus the detail-view flag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: Option<SelectedHotel>,
    is_detail_view: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a hotel and open the detail view
    pub fn select(&mut self, hotel: &Hotel) {
        self.selected = Some(SelectedHotel::from(hotel));
        self.is_detail_view = true;
    }

    /// Close the detail view, keeping the selection
    pub fn close_detail(&mut self) {
        self.is_detail_view = false;
    }

    pub fn selected(&self) -> Option<&SelectedHotel> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<&HotelId> {
        self.selected.as_ref().map(|s| &s.id)
    }

    pub fn is_detail_view(&self) -> bool {
        self.is_detail_view
    }

    /// Whether `hotel` is the selected one
    pub fn is_selected(&self, hotel: &Hotel) -> bool {
        self.selected_id() == Some(&hotel.id)
    }
}

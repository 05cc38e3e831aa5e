//! Fly-to target derivation
//!
//! Hotels store coordinates as `(lng, lat)`. Map widgets take their
//! camera centre as `(lat, lng)`. The swap happens here and nowhere else.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::selection::SelectedHotel;

/// Zoom level used when centring on a selected hotel
pub const FLY_TO_ZOOM: f64 = 14.0;

/// Animation length of the recentring
pub const FLY_TO_DURATION: Duration = Duration::from_secs(2);

/// Camera command for the map widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyTarget {
    pub lat: f64,
    pub lng: f64,
    pub zoom: f64,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

impl FlyTarget {
    /// Centre as `(lat, lng)`
    pub fn center(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Target for centring the map on the selection, if there is one
pub fn derive_fly_target(selected: Option<&SelectedHotel>) -> Option<FlyTarget> {
    selected.map(|s| FlyTarget {
        lat: s.coordinates.lat,
        lng: s.coordinates.lng,
        zoom: FLY_TO_ZOOM,
        duration_ms: FLY_TO_DURATION.as_millis() as u64,
    })
}

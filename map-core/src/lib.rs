//! # Resort Map Core
//!
//! The view model behind a hotel map: which hotels are inside the current
//! viewport, which one is selected, whether its detail view is open, and
//! where the camera should fly to.
//!
//! - **Visibility filter**: inclusive point-in-rectangle test over
//!   `(lng, lat)` coordinates, order preserving, memoized on
//!   `(list version, viewport)`
//! - **Selection**: one selected hotel plus an independent detail-view flag
//! - **Fly-to**: `(lat, lng, zoom)` camera target derived from the selection
//! - **List state**: current list, loading flag and last error, whatever
//!   the provider
//!
//! Everything here is synchronous and does no I/O. Fetching, debouncing and
//! tool plumbing live in `resort-map-client` and `resort-map-mcp`.
//!
//! ## Example
//!
//! ```rust
//! use map_core::{Coordinates, Hotel, MapViewState, ViewportRect};
//!
//! let hotels = vec![
//!     Hotel::new(1, Coordinates::new(88.36, 22.57)),
//!     Hotel::new(2, Coordinates::new(0.0, 0.0)),
//! ];
//! let mut view = MapViewState::with_hotels(hotels);
//!
//! // No viewport yet: everything is visible
//! assert_eq!(view.visible_count(), 2);
//!
//! view.update_viewport(Some(ViewportRect::new(88.0, 89.0, 22.0, 23.0)));
//! let first = view.visible()[0].clone();
//! assert_eq!(view.visible_count(), 1);
//!
//! view.on_marker_clicked(&first);
//! let target = view.fly_target().unwrap();
//! assert_eq!(target.center(), (22.57, 88.36));
//! ```

pub mod data;
pub mod error;
pub mod filter;
pub mod fly;
pub mod geo;
pub mod hotel;
pub mod listing;
pub mod selection;
pub mod view;

pub use error::{ErrorCategory, MapError, Result};
pub use filter::{compute_visible, VisibleCache};
pub use fly::{derive_fly_target, FlyTarget, FLY_TO_DURATION, FLY_TO_ZOOM};
pub use geo::{bounds_of, contains_point, Coordinates, ViewportRect};
pub use hotel::{Hotel, HotelId};
pub use listing::{HotelListState, ListStatus, LoadOutcome, LoadTicket};
pub use selection::{SelectedHotel, SelectionSource, SelectionState};
pub use view::{MapViewState, ViewSnapshot};

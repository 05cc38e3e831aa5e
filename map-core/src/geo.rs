//! Coordinates and viewport rectangles
//!
//! Coordinates are stored in `(longitude, latitude)` order, matching the
//! `[lng, lat]` arrays the hotel API returns. The viewport is an
//! axis-aligned box in the same axes: X is longitude, Y is latitude.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// A `(longitude, latitude)` pair in degrees
///
/// Serialized as a two-element JSON array `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lng, c.lat]
    }
}

/// The longitude/latitude box currently shown by the map widget
///
/// `min_x <= max_x` and `min_y <= max_y` are assumed but not enforced.
/// An inverted X span (an antimeridian-crossing view) is accepted as
/// given and simply contains no points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportRect {
    /// Western longitude bound
    pub min_x: f64,
    /// Eastern longitude bound
    pub max_x: f64,
    /// Southern latitude bound
    pub min_y: f64,
    /// Northern latitude bound
    pub max_y: f64,
}

impl ViewportRect {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    /// Build from the edge accessors a map widget exposes
    pub fn from_edges(west: f64, east: f64, south: f64, north: f64) -> Self {
        Self::new(west, east, south, north)
    }

    /// Whether either span is reversed
    pub fn is_inverted(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Strict variant for callers that want inverted boxes rejected
    pub fn validated(self) -> Result<Self> {
        if self.min_x > self.max_x {
            return Err(MapError::InvalidViewport {
                reason: format!("minX {} is greater than maxX {}", self.min_x, self.max_x),
            });
        }
        if self.min_y > self.max_y {
            return Err(MapError::InvalidViewport {
                reason: format!("minY {} is greater than maxY {}", self.min_y, self.max_y),
            });
        }
        Ok(self)
    }

    /// Inclusive containment on all four bounds
    pub fn contains(&self, point: Coordinates) -> bool {
        point.lng >= self.min_x
            && point.lng <= self.max_x
            && point.lat >= self.min_y
            && point.lat <= self.max_y
    }
}

/// Point-in-viewport test; an absent rectangle contains everything
pub fn contains_point(point: Coordinates, rect: Option<&ViewportRect>) -> bool {
    match rect {
        None => true,
        Some(rect) => rect.contains(point),
    }
}

/// Tight bounding rectangle around a set of points
///
/// Returns `None` for an empty set.
pub fn bounds_of<I>(points: I) -> Option<ViewportRect>
where
    I: IntoIterator<Item = Coordinates>,
{
    points.into_iter().fold(None, |acc, p| {
        Some(match acc {
            None => ViewportRect::new(p.lng, p.lng, p.lat, p.lat),
            Some(r) => ViewportRect::new(
                r.min_x.min(p.lng),
                r.max_x.max(p.lng),
                r.min_y.min(p.lat),
                r.max_y.max(p.lat),
            ),
        })
    })
}

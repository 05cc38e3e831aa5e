//! Visibility filter tests

use map_core::{compute_visible, contains_point, Coordinates, Hotel, HotelId, ViewportRect};

fn kolkata_hotels() -> Vec<Hotel> {
    vec![
        Hotel::new(1, Coordinates::new(88.36, 22.57)),
        Hotel::new(2, Coordinates::new(0.0, 0.0)),
    ]
}

fn grid_hotels() -> Vec<Hotel> {
    let mut hotels = Vec::new();
    let mut id = 0;
    for lng in [-170.0, -45.5, 0.0, 6.58, 88.0, 88.5, 89.0, 179.9] {
        for lat in [-80.0, 0.0, 22.0, 22.57, 23.0, 45.3] {
            hotels.push(Hotel::new(id, Coordinates::new(lng, lat)));
            id += 1;
        }
    }
    hotels
}

fn ids(hotels: &[&Hotel]) -> Vec<HotelId> {
    hotels.iter().map(|h| h.id.clone()).collect()
}

#[test]
fn test_absent_rect_is_identity() {
    let hotels = grid_hotels();
    let visible = compute_visible(&hotels, None);

    assert_eq!(visible.len(), hotels.len());
    for (v, h) in visible.iter().zip(hotels.iter()) {
        assert_eq!(*v, h);
    }
}

#[test]
fn test_containment_matches_four_inclusive_comparisons() {
    let rects = [
        ViewportRect::new(88.0, 89.0, 22.0, 23.0),
        ViewportRect::new(-50.0, 10.0, -90.0, 0.0),
        ViewportRect::new(0.0, 0.0, 0.0, 0.0),
        ViewportRect::new(-180.0, 180.0, -90.0, 90.0),
    ];

    for rect in &rects {
        for hotel in grid_hotels() {
            let p = hotel.coordinates;
            let expected = rect.min_x <= p.lng
                && p.lng <= rect.max_x
                && rect.min_y <= p.lat
                && p.lat <= rect.max_y;
            assert_eq!(contains_point(p, Some(rect)), expected, "{:?} in {:?}", p, rect);
        }
    }
}

#[test]
fn test_edges_are_visible() {
    let rect = ViewportRect::new(88.0, 89.0, 22.0, 23.0);
    for p in [
        Coordinates::new(88.0, 22.0),
        Coordinates::new(89.0, 23.0),
        Coordinates::new(88.0, 23.0),
        Coordinates::new(89.0, 22.0),
    ] {
        assert!(contains_point(p, Some(&rect)));
    }
}

#[test]
fn test_filter_preserves_relative_order() {
    let hotels = grid_hotels();
    let rect = ViewportRect::new(0.0, 89.0, 0.0, 23.0);
    let visible = compute_visible(&hotels, Some(&rect));

    assert!(!visible.is_empty());
    assert!(visible.len() < hotels.len());

    // Subsequence check: walk the original list once
    let mut cursor = hotels.iter();
    for v in &visible {
        assert!(cursor.any(|h| h.id == v.id), "hotel {} out of order", v.id);
    }

    // Membership is exact both ways
    for h in &hotels {
        let inside = rect.contains(h.coordinates);
        assert_eq!(visible.iter().any(|v| v.id == h.id), inside);
    }
}

#[test]
fn test_kolkata_rect() {
    let hotels = kolkata_hotels();
    let rect = ViewportRect::new(88.0, 89.0, 22.0, 23.0);

    let visible = compute_visible(&hotels, Some(&rect));
    assert_eq!(ids(&visible), vec![HotelId::from(1)]);
}

#[test]
fn test_empty_list() {
    let hotels: Vec<Hotel> = Vec::new();
    assert!(compute_visible(&hotels, Some(&ViewportRect::new(88.0, 89.0, 22.0, 23.0))).is_empty());
    assert!(compute_visible(&hotels, None).is_empty());
}

#[test]
fn test_inverted_rect_gives_empty_set() {
    let hotels = grid_hotels();
    let rect = ViewportRect::new(179.0, -179.0, -90.0, 90.0);
    assert!(compute_visible(&hotels, Some(&rect)).is_empty());
}

#[test]
fn test_out_of_range_coordinates_are_not_validated() {
    let hotels = vec![Hotel::new("far", Coordinates::new(500.0, -300.0))];
    assert_eq!(compute_visible(&hotels, None).len(), 1);

    let huge = ViewportRect::new(-1000.0, 1000.0, -1000.0, 1000.0);
    assert_eq!(compute_visible(&hotels, Some(&huge)).len(), 1);
}

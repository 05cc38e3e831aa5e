//! Bundled demo dataset
//!
//! A small static list centred on Kolkata, used when the view runs without
//! a network source.

use serde_json::json;

use crate::hotel::Hotel;

/// Demo hotels in Kolkata
pub fn demo_hotels() -> Vec<Hotel> {
    let raw = json!([
        {
            "id": 1,
            "name": "Novotel Kolkata - Hotel & Residences",
            "price": 8700,
            "rating": 4.8,
            "coordinates": [88.3639, 22.5726],
            "image": "https://images.unsplash.com/photo-1631049307264-da0ec9d70304?w=400&h=300&fit=crop",
            "address": "Action Area 1C, New Town Rajarhat, CF Block Action Area 1, KOLKATA, India"
        },
        {
            "id": 2,
            "name": "Ibis Kolkata Rajarhat",
            "price": 4600,
            "rating": 4.6,
            "coordinates": [88.3450, 22.5650],
            "image": "https://images.unsplash.com/photo-1552321554-5fefe8c9ef14?w=400&h=300&fit=crop",
            "address": "Action Area 1, New Town, KOLKATA, India"
        },
        {
            "id": 3,
            "name": "Taj Bengal",
            "price": 12000,
            "rating": 4.9,
            "coordinates": [88.3720, 22.5400],
            "image": "https://images.unsplash.com/photo-1578500494198-246f612d03b3?w=400&h=300&fit=crop",
            "address": "Alipore, KOLKATA, India"
        },
        {
            "id": 4,
            "name": "The Westin Calcutta",
            "price": 7800,
            "rating": 4.7,
            "coordinates": [88.3550, 22.5800],
            "image": "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=400&h=300&fit=crop",
            "address": "Tangra, KOLKATA, India"
        }
    ]);

    match serde_json::from_value(raw) {
        Ok(hotels) => hotels,
        Err(e) => {
            tracing::error!(error = %e, "bundled demo hotels failed to decode");
            Vec::new()
        }
    }
}

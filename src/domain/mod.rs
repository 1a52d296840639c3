//! Domain layer: bookings, reviews and sales metrics
pub mod aggregates;
pub mod events;
pub mod metrics;
pub mod value_objects;

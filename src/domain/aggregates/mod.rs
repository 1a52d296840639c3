//! Aggregates module
pub mod service_order;
pub mod review;

pub use service_order::{ServiceOrder, OrderStatus, InvalidTransition};
pub use review::Review;

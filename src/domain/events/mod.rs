//! Domain events
use crate::domain::aggregates::{OrderStatus, Review, ServiceOrder};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainEvent {
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    Booked { order_id: Uuid, order_code: String, customer_id: String },
    StatusChanged { order_id: Uuid, from: OrderStatus, to: OrderStatus },
    PaymentUpdated { order_id: Uuid, paid: bool },
    Reviewed { order_id: Uuid, review_id: Uuid, rating: u8 },
}

impl OrderEvent {
    pub fn booked(order: &ServiceOrder) -> Self {
        Self::Booked { order_id: order.id(), order_code: order.order_code().to_string(), customer_id: order.customer_id().to_string() }
    }

    pub fn status_changed(before: &ServiceOrder, after: &ServiceOrder) -> Self {
        Self::StatusChanged { order_id: after.id(), from: before.status(), to: after.status() }
    }

    pub fn payment_updated(order: &ServiceOrder) -> Self {
        Self::PaymentUpdated { order_id: order.id(), paid: order.is_paid() }
    }

    pub fn reviewed(review: &Review) -> Self {
        Self::Reviewed { order_id: review.order_id, review_id: review.id, rating: review.rating.value() }
    }

    /// Last segment of the subject the event is published under.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Booked { .. } => "booked",
            Self::StatusChanged { .. } => "status_changed",
            Self::PaymentUpdated { .. } => "payment_updated",
            Self::Reviewed { .. } => "reviewed",
        }
    }
}

impl DomainEvent {
    pub fn subject(&self) -> String {
        match self {
            Self::Order(e) => format!("services.orders.{}", e.kind()),
        }
    }
}

impl From<OrderEvent> for DomainEvent {
    fn from(e: OrderEvent) -> Self { Self::Order(e) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Money, OrderCode};
    use chrono::Utc;

    #[test]
    fn test_status_changed_event() {
        let before = ServiceOrder::book(OrderCode::generate(), "SVC", "CUST", "PET", Money::zero("VND"), Utc::now());
        let after = before.transition(OrderStatus::Confirmed).unwrap();
        let event = DomainEvent::from(OrderEvent::status_changed(&before, &after));
        assert_eq!(event.subject(), "services.orders.status_changed");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "status_changed");
        assert_eq!(json["from"], "PENDING");
        assert_eq!(json["to"], "CONFIRMED");
    }
}

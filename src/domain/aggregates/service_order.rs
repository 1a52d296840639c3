//! Service Order Aggregate
//!
//! A booking for a pet service. Status moves forward one step at a time
//! (`PENDING -> CONFIRMED -> IN_PROGRESS -> COMPLETED`) and may be cancelled
//! from any non-terminal state. Payment is tracked independently of status.
//!
//! Every operation returns a new order value and leaves its receiver as it was;
//! persisting the result is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;
use crate::domain::value_objects::{Money, OrderCode};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    id: Uuid,
    order_code: OrderCode,
    status: OrderStatus,
    paid: bool,
    total: Money,
    created_at: DateTime<Utc>,
    service_id: String,
    customer_id: String,
    pet_id: String,
    has_reviewed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus { #[default] Pending, Confirmed, InProgress, Completed, Cancelled }

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [Self::Pending, Self::Confirmed, Self::InProgress, Self::Completed, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool { matches!(self, Self::Completed | Self::Cancelled) }

    /// The single forward step out of this status, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }

    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if self.is_terminal() { return false; }
        to == Self::Cancelled || self.next() == Some(to)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A status change outside the legal transition set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move order from {from} to {to}")]
pub struct InvalidTransition { pub from: OrderStatus, pub to: OrderStatus }

impl ServiceOrder {
    /// Creates a new unpaid booking in `PENDING`.
    pub fn book(
        order_code: OrderCode,
        service_id: impl Into<String>,
        customer_id: impl Into<String>,
        pet_id: impl Into<String>,
        total: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(), order_code, status: OrderStatus::Pending, paid: false, total, created_at,
            service_id: service_id.into(), customer_id: customer_id.into(), pet_id: pet_id.into(), has_reviewed: false,
        }
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn order_code(&self) -> &OrderCode { &self.order_code }
    pub fn status(&self) -> OrderStatus { self.status }
    pub fn is_paid(&self) -> bool { self.paid }
    pub fn total(&self) -> &Money { &self.total }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn service_id(&self) -> &str { &self.service_id }
    pub fn customer_id(&self) -> &str { &self.customer_id }
    pub fn pet_id(&self) -> &str { &self.pet_id }
    pub fn has_reviewed(&self) -> bool { self.has_reviewed }

    pub fn transition(&self, to: OrderStatus) -> Result<Self, InvalidTransition> {
        if !self.status.can_transition_to(to) {
            return Err(InvalidTransition { from: self.status, to });
        }
        Ok(Self { status: to, ..self.clone() })
    }

    /// Payment is orthogonal to status; a cancelled order may still be paid.
    pub fn set_paid(&self, paid: bool) -> Self { Self { paid, ..self.clone() } }

    pub fn can_review(&self) -> bool { self.status == OrderStatus::Completed && !self.has_reviewed }

    /// Records that the customer reviewed this order. Callers gate this on [`Self::can_review`].
    pub fn mark_reviewed(&self) -> Self { Self { has_reviewed: true, ..self.clone() } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn order_in(status: OrderStatus) -> ServiceOrder {
        let order = ServiceOrder::book(OrderCode::new("SRV-TEST0001").unwrap(), "SVC1", "CUST1", "PET1", Money::new(Decimal::new(250_000, 0), "VND"), Utc::now());
        ServiceOrder { status, ..order }
    }

    const LEGAL: [(OrderStatus, OrderStatus); 6] = [
        (OrderStatus::Pending, OrderStatus::Confirmed),
        (OrderStatus::Confirmed, OrderStatus::InProgress),
        (OrderStatus::InProgress, OrderStatus::Completed),
        (OrderStatus::Pending, OrderStatus::Cancelled),
        (OrderStatus::Confirmed, OrderStatus::Cancelled),
        (OrderStatus::InProgress, OrderStatus::Cancelled),
    ];

    #[test]
    fn test_booking_starts_pending() {
        let order = order_in(OrderStatus::Pending);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(!order.is_paid());
        assert!(!order.has_reviewed());
    }

    #[test]
    fn test_transition_matrix() {
        let mut accepted = 0;
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let result = order_in(from).transition(to);
                if LEGAL.contains(&(from, to)) {
                    assert_eq!(result.unwrap().status(), to, "{from} -> {to}");
                    accepted += 1;
                } else {
                    assert_eq!(result, Err(InvalidTransition { from, to }), "{from} -> {to}");
                }
            }
        }
        assert_eq!(accepted, LEGAL.len());
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for from in [OrderStatus::Completed, OrderStatus::Cancelled] {
            assert!(from.is_terminal());
            assert!(OrderStatus::ALL.iter().all(|to| !from.can_transition_to(*to)));
        }
    }

    #[test]
    fn test_transition_leaves_input_untouched() {
        let order = order_in(OrderStatus::Confirmed).set_paid(true);
        let snapshot = order.clone();
        let moved = order.transition(OrderStatus::InProgress).unwrap();
        assert_eq!(order, snapshot);
        assert_eq!(ServiceOrder { status: OrderStatus::Confirmed, ..moved }, snapshot);
    }

    #[test]
    fn test_full_workflow() {
        let order = order_in(OrderStatus::Pending)
            .transition(OrderStatus::Confirmed).unwrap()
            .transition(OrderStatus::InProgress).unwrap()
            .transition(OrderStatus::Completed).unwrap();
        assert!(order.can_review());
        let reviewed = order.mark_reviewed();
        assert!(!reviewed.can_review());
    }

    #[test]
    fn test_can_review() {
        let completed = order_in(OrderStatus::Completed);
        assert!(completed.can_review());
        assert!(!completed.mark_reviewed().can_review());
        let pending = order_in(OrderStatus::Pending);
        assert!(!pending.can_review());
        assert!(!pending.mark_reviewed().can_review());
    }

    #[test]
    fn test_set_paid_is_idempotent_and_status_independent() {
        for status in OrderStatus::ALL {
            let order = order_in(status);
            let once = order.set_paid(true);
            let twice = once.set_paid(true);
            assert_eq!(once, twice);
            assert_eq!(twice.status(), status);
            assert!(!twice.set_paid(false).is_paid());
        }
    }

    #[test]
    fn test_cancelled_order_can_stay_paid() {
        let order = order_in(OrderStatus::Pending).set_paid(true).transition(OrderStatus::Cancelled).unwrap();
        assert!(order.is_paid());
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_status_json() {
        assert_eq!(serde_json::from_str::<OrderStatus>("\"IN_PROGRESS\"").unwrap(), OrderStatus::InProgress);
        assert!(serde_json::from_str::<OrderStatus>("\"SHIPPED\"").is_err());
        assert_eq!(serde_json::to_string(&OrderStatus::InProgress).unwrap(), "\"IN_PROGRESS\"");
        let json = serde_json::to_value(order_in(OrderStatus::Pending)).unwrap();
        assert_eq!(json["orderCode"], "SRV-TEST0001");
        assert_eq!(json["hasReviewed"], false);
    }
}

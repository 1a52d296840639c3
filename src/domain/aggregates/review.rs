//! Review Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::aggregates::ServiceOrder;
use crate::domain::value_objects::Rating;

/// A customer's review of a completed service booking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub order_id: Uuid,
    pub service_id: String,
    pub user_id: String,
    pub rating: Rating,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn for_order(order: &ServiceOrder, user_id: impl Into<String>, rating: Rating, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(), order_id: order.id(), service_id: order.service_id().to_string(),
            user_id: user_id.into(), rating, content: content.into().trim().to_string(), created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Money, OrderCode};

    #[test]
    fn test_review_keyed_by_service() {
        let order = ServiceOrder::book(OrderCode::generate(), "GROOMING-1", "CUST1", "PET1", Money::zero("VND"), Utc::now());
        let review = Review::for_order(&order, "USER1", Rating::new(4).unwrap(), "  Very gentle with my cat  ");
        assert_eq!(review.order_id, order.id());
        assert_eq!(review.service_id, "GROOMING-1");
        assert_eq!(review.content, "Very gentle with my cat");
    }
}

//! In-memory order and review store
//!
//! Plays the order data source, the order persistence sink and the review
//! sink for the HTTP layer. Updates run under a single write lock so that a
//! read-modify-write of one order cannot interleave with another.

use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use crate::domain::aggregates::{OrderStatus, Review, ServiceOrder};
use crate::{MarketplaceError, Result};

#[derive(Debug, Default)]
pub struct OrderStore {
    orders: RwLock<HashMap<Uuid, ServiceOrder>>,
    reviews: RwLock<Vec<Review>>,
}

impl OrderStore {
    pub fn new() -> Self { Self::default() }

    pub async fn insert(&self, order: ServiceOrder) -> ServiceOrder {
        self.orders.write().await.insert(order.id(), order.clone());
        order
    }

    pub async fn get(&self, id: Uuid) -> Result<ServiceOrder> {
        self.orders.read().await.get(&id).cloned().ok_or(MarketplaceError::OrderNotFound)
    }

    /// Orders newest first, optionally restricted to one status.
    pub async fn list(&self, status: Option<OrderStatus>) -> Vec<ServiceOrder> {
        let mut orders: Vec<ServiceOrder> = self.orders.read().await.values()
            .filter(|o| status.map_or(true, |s| o.status() == s))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()).then_with(|| b.id().cmp(&a.id())));
        orders
    }

    /// Applies `f` to the stored order and persists the result. Returns the order before and after.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Result<(ServiceOrder, ServiceOrder)>
    where
        F: FnOnce(&ServiceOrder) -> Result<ServiceOrder>,
    {
        let mut orders = self.orders.write().await;
        let current = orders.get(&id).ok_or(MarketplaceError::OrderNotFound)?;
        let updated = f(current)?;
        let before = orders.insert(id, updated.clone()).ok_or(MarketplaceError::OrderNotFound)?;
        Ok((before, updated))
    }

    /// Stores `review` and flags its order as reviewed, provided the order is still reviewable.
    pub async fn submit_review(&self, review: Review) -> Result<Review> {
        let mut reviews = self.reviews.write().await;
        self.update(review.order_id, |order| {
            if !order.can_review() { return Err(MarketplaceError::ReviewNotAllowed); }
            Ok(order.mark_reviewed())
        }).await?;
        reviews.push(review.clone());
        Ok(review)
    }

    pub async fn reviews_for_service(&self, service_id: &str) -> Vec<Review> {
        self.reviews.read().await.iter().filter(|r| r.service_id == service_id).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Money, OrderCode, Rating};
    use chrono::{Duration, Utc};

    fn booking(minutes_ago: i64) -> ServiceOrder {
        ServiceOrder::book(OrderCode::generate(), "SVC", "CUST", "PET", Money::zero("VND"), Utc::now() - Duration::minutes(minutes_ago))
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filter() {
        let store = OrderStore::new();
        let old = store.insert(booking(30)).await;
        let new = store.insert(booking(1)).await;
        store.update(old.id(), |o| Ok(o.transition(OrderStatus::Confirmed)?)).await.unwrap();

        let all = store.list(None).await;
        assert_eq!(all.iter().map(|o| o.id()).collect::<Vec<_>>(), vec![new.id(), old.id()]);
        let confirmed = store.list(Some(OrderStatus::Confirmed)).await;
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id(), old.id());
    }

    #[tokio::test]
    async fn test_rejected_update_is_not_persisted() {
        let store = OrderStore::new();
        let order = store.insert(booking(0)).await;
        let err = store.update(order.id(), |o| Ok(o.transition(OrderStatus::Completed)?)).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::InvalidTransition(_)));
        assert_eq!(store.get(order.id()).await.unwrap().status(), OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_missing_order() {
        let store = OrderStore::new();
        assert!(matches!(store.get(Uuid::now_v7()).await, Err(MarketplaceError::OrderNotFound)));
    }

    #[tokio::test]
    async fn test_review_only_once_after_completion() {
        let store = OrderStore::new();
        let order = store.insert(booking(0)).await;
        let review = Review::for_order(&order, "USER", Rating::new(5).unwrap(), "Great");
        assert!(matches!(store.submit_review(review.clone()).await, Err(MarketplaceError::ReviewNotAllowed)));

        for step in [OrderStatus::Confirmed, OrderStatus::InProgress, OrderStatus::Completed] {
            store.update(order.id(), |o| Ok(o.transition(step)?)).await.unwrap();
        }
        store.submit_review(review.clone()).await.unwrap();
        assert!(store.get(order.id()).await.unwrap().has_reviewed());
        assert!(matches!(store.submit_review(review).await, Err(MarketplaceError::ReviewNotAllowed)));
        assert_eq!(store.reviews_for_service("SVC").await.len(), 1);
    }
}

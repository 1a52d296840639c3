//! HTTP surface over the booking lifecycle and the sales dashboard

use axum::{extract::{Path, Query, State}, http::StatusCode, routing::{get, post, put}, Json, Router};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::{Validate, ValidationError};
use crate::domain::aggregates::{OrderStatus, Review, ServiceOrder};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::metrics::{self, DashboardSummary, MonthlyStat};
use crate::domain::value_objects::{is_currency_code, Money, Month, OrderCode, Rating};
use crate::store::OrderStore;
use crate::{MarketplaceError, Result};

/// Publishes domain events to NATS when a client is configured; always logs them.
#[derive(Clone, Default)]
pub struct EventPublisher { nats: Option<async_nats::Client> }

impl EventPublisher {
    pub fn new(nats: Option<async_nats::Client>) -> Self { Self { nats } }

    pub async fn publish(&self, event: impl Into<DomainEvent>) {
        let event = event.into();
        let subject = event.subject();
        info!(%subject, ?event, "domain event");
        let Some(client) = &self.nats else { return };
        match serde_json::to_vec(&event) {
            Ok(payload) => {
                if let Err(e) = client.publish(subject, payload.into()).await {
                    warn!(error = %e, "failed to publish domain event");
                }
            }
            Err(e) => warn!(error = %e, "failed to encode domain event"),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<OrderStore>,
    pub events: EventPublisher,
    pub currency: String,
}

impl AppState {
    pub fn new(store: Arc<OrderStore>, events: EventPublisher, currency: impl Into<String>) -> Self {
        Self { store, events, currency: currency.into() }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-petservices"})) }))
        .route("/api/v1/orders", get(list_orders).post(book_order))
        .route("/api/v1/orders/:id", get(get_order))
        .route("/api/v1/orders/:id/status", post(update_status))
        .route("/api/v1/orders/:id/payment", put(update_payment))
        .route("/api/v1/orders/:id/review-eligibility", get(review_eligibility))
        .route("/api/v1/orders/:id/reviews", post(submit_review))
        .route("/api/v1/services/:service_id/reviews", get(service_reviews))
        .route("/api/v1/stats/monthly", get(monthly_stats))
        .route("/api/v1/dashboard", get(dashboard))
        .with_state(state)
}

#[derive(Debug, Deserialize)] pub struct ListParams { pub page: Option<u32>, pub per_page: Option<u32>, pub status: Option<OrderStatus> }
#[derive(Debug, Serialize)] pub struct PaginatedResponse<T> { pub data: Vec<T>, pub total: usize, pub page: u32 }

async fn list_orders(State(s): State<AppState>, Query(p): Query<ListParams>) -> Json<PaginatedResponse<ServiceOrder>> {
    let page = p.page.unwrap_or(1).max(1);
    let per_page = p.per_page.unwrap_or(20).clamp(1, 100);
    let orders = s.store.list(p.status).await;
    let total = orders.len();
    let offset = (page as usize - 1).saturating_mul(per_page as usize);
    let data = orders.into_iter().skip(offset).take(per_page as usize).collect();
    Json(PaginatedResponse { data, total, page })
}

async fn get_order(State(s): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ServiceOrder>> {
    s.store.get(id).await.map(Json)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookOrderRequest {
    #[validate(length(min = 1, max = 64))]
    pub service_id: String,
    #[validate(length(min = 1, max = 64))]
    pub customer_id: String,
    #[validate(length(min = 1, max = 64))]
    pub pet_id: String,
    pub total: Decimal,
    #[validate(custom = "validate_currency")]
    pub currency: Option<String>,
}

fn validate_currency(code: &str) -> std::result::Result<(), ValidationError> {
    if !is_currency_code(code) { return Err(ValidationError::new("currency")); }
    Ok(())
}

async fn book_order(State(s): State<AppState>, Json(r): Json<BookOrderRequest>) -> Result<(StatusCode, Json<ServiceOrder>)> {
    r.validate()?;
    let currency = r.currency.as_deref().unwrap_or(&s.currency);
    let total = Money::non_negative(r.total, currency)?;
    let order = ServiceOrder::book(OrderCode::generate(), r.service_id, r.customer_id, r.pet_id, total, Utc::now());
    let order = s.store.insert(order).await;
    info!(order_id = %order.id(), order_code = %order.order_code(), "service booked");
    s.events.publish(OrderEvent::booked(&order)).await;
    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize)] pub struct UpdateStatusRequest { pub status: OrderStatus }

async fn update_status(State(s): State<AppState>, Path(id): Path<Uuid>, Json(r): Json<UpdateStatusRequest>) -> Result<Json<ServiceOrder>> {
    let (before, after) = s.store.update(id, |o| Ok(o.transition(r.status)?)).await.map_err(|e| {
        if let MarketplaceError::InvalidTransition(t) = &e {
            warn!(order_id = %id, from = %t.from, to = %t.to, "rejected status transition");
        }
        e
    })?;
    info!(order_id = %id, from = %before.status(), to = %after.status(), "order status changed");
    s.events.publish(OrderEvent::status_changed(&before, &after)).await;
    Ok(Json(after))
}

#[derive(Debug, Deserialize)] pub struct UpdatePaymentRequest { pub paid: bool }

async fn update_payment(State(s): State<AppState>, Path(id): Path<Uuid>, Json(r): Json<UpdatePaymentRequest>) -> Result<Json<ServiceOrder>> {
    let (_, after) = s.store.update(id, |o| Ok(o.set_paid(r.paid))).await?;
    info!(order_id = %id, paid = after.is_paid(), "order payment updated");
    s.events.publish(OrderEvent::payment_updated(&after)).await;
    Ok(Json(after))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEligibility { pub can_review: bool }

async fn review_eligibility(State(s): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ReviewEligibility>> {
    let order = s.store.get(id).await?;
    Ok(Json(ReviewEligibility { can_review: order.can_review() }))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,
    pub rating: u8,
    #[validate(length(max = 2000))]
    pub content: String,
}

async fn submit_review(State(s): State<AppState>, Path(id): Path<Uuid>, Json(r): Json<ReviewRequest>) -> Result<(StatusCode, Json<Review>)> {
    r.validate()?;
    let rating = Rating::new(r.rating)?;
    let order = s.store.get(id).await?;
    let review = s.store.submit_review(Review::for_order(&order, r.user_id, rating, r.content)).await?;
    info!(order_id = %id, review_id = %review.id, rating = rating.value(), "review submitted");
    s.events.publish(OrderEvent::reviewed(&review)).await;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn service_reviews(State(s): State<AppState>, Path(service_id): Path<String>) -> Json<Vec<Review>> {
    Json(s.store.reviews_for_service(&service_id).await)
}

#[derive(Debug, Deserialize)] pub struct StatsParams { pub year: Option<i32> }

async fn monthly_stats(State(s): State<AppState>, Query(p): Query<StatsParams>) -> Json<Vec<MonthlyStat>> {
    let year = p.year.unwrap_or_else(|| Utc::now().year());
    let orders = s.store.list(None).await;
    Json(metrics::monthly_stats(&orders, year))
}

#[derive(Debug, Deserialize)] pub struct DashboardParams { pub month: Option<u32>, pub year: Option<i32> }

async fn dashboard(State(s): State<AppState>, Query(p): Query<DashboardParams>) -> Result<Json<DashboardSummary>> {
    let now = Utc::now();
    let month = Month::new(p.month.unwrap_or_else(|| now.month()))?;
    let year = p.year.unwrap_or_else(|| now.year());
    let orders = s.store.list(None).await;
    let stats = metrics::monthly_stats(&orders, year);
    let summary = metrics::summarize(&stats, month);
    debug!(%month, year, months = stats.len(), revenue_change = summary.revenue_change, growth_rate = summary.growth_rate, "dashboard computed");
    Ok(Json(summary))
}

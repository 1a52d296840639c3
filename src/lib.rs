//! OpenSASE Pet Services
//!
//! Self-hosted marketplace backend for pet-care bookings.
//!
//! ## Features
//! - Service booking lifecycle (pending, confirmed, in progress, completed, cancelled)
//! - Payment tracking independent of booking status
//! - Reviews gated on completed, unreviewed bookings
//! - Monthly sales dashboard with month-over-month and quarter-over-quarter trends

pub mod api;
pub mod config;
pub mod domain;
pub mod store;

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use thiserror::Error;
use crate::domain::aggregates::InvalidTransition;
use crate::domain::value_objects::{MoneyError, MonthError, RatingError};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum MarketplaceError {
    #[error("Order not found")]
    OrderNotFound,

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("Order is not eligible for review")]
    ReviewNotAllowed,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    InvalidMonth(#[from] MonthError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    #[error(transparent)]
    InvalidRating(#[from] RatingError),
}

impl From<validator::ValidationErrors> for MarketplaceError {
    fn from(e: validator::ValidationErrors) -> Self { Self::Validation(e.to_string()) }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::InvalidTransition(_) | Self::ReviewNotAllowed => StatusCode::CONFLICT,
            Self::Validation(_) | Self::InvalidMonth(_) | Self::InvalidAmount(_) | Self::InvalidRating(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, MarketplaceError>;

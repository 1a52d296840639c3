//! Value Objects for the pet-services marketplace

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Human-facing booking reference, e.g. `SRV-1A2B3C4D`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderCode(String);

impl OrderCode {
    const PREFIX: &'static str = "SRV-";

    pub fn new(value: impl Into<String>) -> Result<Self, OrderCodeError> {
        let value = value.into().trim().to_uppercase();
        if value.is_empty() { return Err(OrderCodeError::Empty); }
        if value.len() > 32 { return Err(OrderCodeError::TooLong); }
        Ok(Self(value))
    }

    pub fn generate() -> Self {
        let raw = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", Self::PREFIX, raw[..8].to_uppercase()))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OrderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl TryFrom<String> for OrderCode {
    type Error = OrderCodeError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<OrderCode> for String {
    fn from(code: OrderCode) -> Self { code.0 }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderCodeError {
    #[error("order code empty")]
    Empty,
    #[error("order code too long")]
    TooLong,
}

/// Three ASCII letters, e.g. `VND`.
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_uppercase() } }

    /// Order totals are never negative.
    pub fn non_negative(amount: Decimal, currency: &str) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() { return Err(MoneyError::Negative); }
        Ok(Self::new(amount, currency))
    }

    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }
}

impl Default for Money { fn default() -> Self { Self::zero("VND") } }

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("currency mismatch")]
    CurrencyMismatch,
    #[error("amount must not be negative")]
    Negative,
}

/// Calendar month, 1 (January) through 12 (December)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Month(u32);

impl Month {
    pub fn new(value: u32) -> Result<Self, MonthError> {
        if !(1..=12).contains(&value) { return Err(MonthError(value)); }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 { self.0 }

    /// The month `steps` months before this one, wrapping across year boundaries.
    pub fn back(self, steps: u32) -> Self {
        let zero_based = (self.0 - 1 + 12 - steps % 12) % 12;
        Self(zero_based + 1)
    }

    pub fn previous(self) -> Self { self.back(1) }
}

impl TryFrom<u32> for Month {
    type Error = MonthError;
    fn try_from(value: u32) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self { month.0 }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("month {0} is outside 1..=12")]
pub struct MonthError(pub u32);

/// Review star rating, 1 through 5
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if !(1..=5).contains(&value) { return Err(RatingError(value)); }
        Ok(Self(value))
    }
    pub fn value(self) -> u8 { self.0 }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;
    fn try_from(value: u8) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self { rating.0 }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rating {0} is outside 1..=5")]
pub struct RatingError(pub u8);

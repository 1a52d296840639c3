//! Sales dashboard metrics
//!
//! Turns per-month `(orders, revenue)` tuples into totals, month-over-month
//! deltas and a trailing-quarter growth rate. Everything here is pure: the
//! reference month is passed in rather than read from the clock.

pub mod messages;

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::domain::aggregates::{OrderStatus, ServiceOrder};
use crate::domain::value_objects::Month;
pub use messages::{ChangeTrend, GrowthTrend, MetricMessage};

/// Sales for one calendar month. `month` is matched by value; entries outside 1..=12 never match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    pub month: u32,
    pub total_orders: u64,
    pub total_revenue: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub growth_rate: f64,
    pub revenue_change: f64,
    pub orders_change: f64,
    pub growth_change: f64,
    pub revenue_message: String,
    pub revenue_sub_message: String,
    pub orders_message: String,
    pub orders_sub_message: String,
    pub growth_message: String,
    pub growth_sub_message: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Totals { orders: u64, revenue: f64 }

/// First entry for `month` wins; a missing month counts as zero.
fn lookup(stats: &[MonthlyStat], month: Month) -> Totals {
    stats.iter()
        .find(|s| s.month == month.value())
        .map(|s| Totals { orders: s.total_orders, revenue: s.total_revenue })
        .unwrap_or_default()
}

/// Sums every entry whose month is `reference.back(i)` for some `i` in `steps`.
fn window(stats: &[MonthlyStat], reference: Month, steps: std::ops::Range<u32>) -> Totals {
    let months: Vec<u32> = steps.map(|i| reference.back(i).value()).collect();
    stats.iter()
        .filter(|s| months.contains(&s.month))
        .fold(Totals::default(), |acc, s| Totals { orders: acc.orders + s.total_orders, revenue: acc.revenue + s.total_revenue })
}

fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Percentage change from `previous` to `current`, rounded to one decimal.
/// A zero baseline reads as a full 100% increase when anything was sold, else 0.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        round1((current - previous) / previous * 100.0)
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

pub fn summarize(stats: &[MonthlyStat], reference: Month) -> DashboardSummary {
    let current = lookup(stats, reference);
    let previous = lookup(stats, reference.previous());

    let total_revenue: f64 = stats.iter().map(|s| s.total_revenue).sum();
    let total_orders: u64 = stats.iter().map(|s| s.total_orders).sum();

    let last_3 = window(stats, reference, 0..3);
    let previous_3 = window(stats, reference, 3..6);

    let revenue_change = percent_change(current.revenue, previous.revenue);
    let orders_change = percent_change(current.orders as f64, previous.orders as f64);
    let growth_rate = percent_change(last_3.revenue, previous_3.revenue);

    let (revenue_trend, orders_trend, growth_trend) = if stats.is_empty() {
        (ChangeTrend::NoData, ChangeTrend::NoData, GrowthTrend::NoData)
    } else {
        (ChangeTrend::classify(revenue_change), ChangeTrend::classify(orders_change), GrowthTrend::classify(growth_rate))
    };

    let revenue = messages::revenue_message(revenue_trend, revenue_change);
    let orders = messages::orders_message(orders_trend, orders_change);
    let growth = messages::growth_message(growth_trend, growth_rate);

    DashboardSummary {
        total_revenue,
        total_orders,
        growth_rate,
        revenue_change,
        orders_change,
        growth_change: growth_rate,
        revenue_message: revenue.message,
        revenue_sub_message: revenue.sub_message,
        orders_message: orders.message,
        orders_sub_message: orders.sub_message,
        growth_message: growth.message,
        growth_sub_message: growth.sub_message,
    }
}

/// Buckets `orders` created in `year` by calendar month, skipping cancelled ones.
/// Months without orders are omitted; the result is ordered by month.
pub fn monthly_stats(orders: &[ServiceOrder], year: i32) -> Vec<MonthlyStat> {
    let mut by_month: BTreeMap<u32, (u64, Decimal)> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.status() != OrderStatus::Cancelled && o.created_at().year() == year) {
        let (count, revenue) = by_month.entry(order.created_at().month()).or_insert((0, Decimal::ZERO));
        *count += 1;
        *revenue += order.total().amount();
    }
    by_month.into_iter()
        .map(|(month, (total_orders, revenue))| MonthlyStat { month, total_orders, total_revenue: revenue.to_f64().unwrap_or(0.0) })
        .collect()
}

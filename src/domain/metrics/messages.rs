//! Trend labels and the dashboard copy attached to them

use serde::Serialize;

/// Month-over-month direction of revenue or order count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTrend { Growth, Decline, NoChange, NoData }

impl ChangeTrend {
    pub fn classify(change: f64) -> Self {
        if change > 0.0 { Self::Growth } else if change < 0.0 { Self::Decline } else { Self::NoChange }
    }
}

/// Trailing-quarter growth band. `Strong` is strictly above 10%.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthTrend { Strong, Stable, Slowing, NoData }

impl GrowthTrend {
    pub const STRONG_THRESHOLD: f64 = 10.0;

    pub fn classify(growth_rate: f64) -> Self {
        if growth_rate > Self::STRONG_THRESHOLD { Self::Strong } else if growth_rate < 0.0 { Self::Slowing } else { Self::Stable }
    }
}

/// Headline plus supporting line shown on a dashboard card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricMessage { pub message: String, pub sub_message: String }

impl MetricMessage {
    fn new(message: impl Into<String>, sub_message: impl Into<String>) -> Self {
        Self { message: message.into(), sub_message: sub_message.into() }
    }
}

pub fn revenue_message(trend: ChangeTrend, change: f64) -> MetricMessage {
    match trend {
        ChangeTrend::Growth => MetricMessage::new("Trending up this month", format!("Revenue is {:.1}% higher than last month", change)),
        ChangeTrend::Decline => MetricMessage::new("Down this month", format!("Revenue is {:.1}% lower than last month", change.abs())),
        ChangeTrend::NoChange => MetricMessage::new("No change this month", "Revenue matches last month"),
        ChangeTrend::NoData => MetricMessage::new("No revenue data yet", "Revenue appears once bookings are recorded"),
    }
}

pub fn orders_message(trend: ChangeTrend, change: f64) -> MetricMessage {
    match trend {
        ChangeTrend::Growth => MetricMessage::new(format!("Up {:.1}% this period", change), "More bookings than last month"),
        ChangeTrend::Decline => MetricMessage::new(format!("Down {:.1}% this period", change.abs()), "Fewer bookings than last month"),
        ChangeTrend::NoChange => MetricMessage::new("No change this period", "Same number of bookings as last month"),
        ChangeTrend::NoData => MetricMessage::new("No order data yet", "Orders appear once customers book a service"),
    }
}

pub fn growth_message(trend: GrowthTrend, growth_rate: f64) -> MetricMessage {
    match trend {
        GrowthTrend::Strong => MetricMessage::new("Strong growth", format!("Last 3 months revenue up {:.1}% on the 3 before", growth_rate)),
        GrowthTrend::Slowing => MetricMessage::new("Growth is slowing", format!("Last 3 months revenue down {:.1}% on the 3 before", growth_rate.abs())),
        GrowthTrend::Stable => MetricMessage::new("Stable performance", "Revenue is steady across the last 6 months"),
        GrowthTrend::NoData => MetricMessage::new("No growth data yet", "Growth needs at least one month of sales"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_band_boundaries() {
        assert_eq!(GrowthTrend::classify(10.0), GrowthTrend::Stable);
        assert_eq!(GrowthTrend::classify(10.1), GrowthTrend::Strong);
        assert_eq!(GrowthTrend::classify(-0.1), GrowthTrend::Slowing);
        assert_eq!(GrowthTrend::classify(0.0), GrowthTrend::Stable);
    }

    #[test]
    fn test_change_direction() {
        assert_eq!(ChangeTrend::classify(0.1), ChangeTrend::Growth);
        assert_eq!(ChangeTrend::classify(-0.1), ChangeTrend::Decline);
        assert_eq!(ChangeTrend::classify(0.0), ChangeTrend::NoChange);
    }

    #[test]
    fn test_orders_decline_embeds_magnitude() {
        let msg = orders_message(ChangeTrend::Decline, -33.3);
        assert_eq!(msg.message, "Down 33.3% this period");
    }

    #[test]
    fn test_growth_messages() {
        assert_eq!(growth_message(GrowthTrend::classify(10.0), 10.0).message, "Stable performance");
        assert_eq!(growth_message(GrowthTrend::classify(10.1), 10.1).message, "Strong growth");
        assert_eq!(growth_message(GrowthTrend::classify(-0.1), -0.1).message, "Growth is slowing");
    }
}

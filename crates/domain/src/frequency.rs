// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service frequency norms and the monthly quota resolver.
//!
//! A frequency describes how often a service is supposed to be provided
//! ("daily", "2 per week", "1 per year"). From it the monthly cap of the
//! service is derived:
//!
//! - `day` → no cap (months differ in length, daily services are uncapped)
//! - `week` → times × 4 (approximately four weeks per month)
//! - `month` → times
//! - `year` → ceil(times / 12), rounded up to keep a margin
//!
//! The week and year conversions are deliberate approximations, not
//! calendar-exact values.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The period a frequency norm is counted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PeriodType {
    /// Per day.
    Day,
    /// Per week.
    Week,
    /// Per month.
    #[default]
    Month,
    /// Per year.
    Year,
}

impl FromStr for PeriodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(DomainError::InvalidPeriodType(s.to_string())),
        }
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PeriodType {
    /// Converts this period type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// A configurable frequency norm for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFrequency {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the frequency has not been persisted yet.
    frequency_id: Option<i64>,
    /// Full display name (e.g., "daily", "once a month").
    name: String,
    /// Short display name for table headers.
    short_name: String,
    /// The period the norm is counted over.
    period_type: PeriodType,
    /// Times per period. `None` removes the limit entirely.
    times_per_period: Option<u32>,
    /// Marks "up to N times" norms; informational only.
    is_approximate: bool,
}

impl ServiceFrequency {
    /// Creates a new `ServiceFrequency` without a persisted ID.
    #[must_use]
    pub const fn new(
        name: String,
        short_name: String,
        period_type: PeriodType,
        times_per_period: Option<u32>,
        is_approximate: bool,
    ) -> Self {
        Self {
            frequency_id: None,
            name,
            short_name,
            period_type,
            times_per_period,
            is_approximate,
        }
    }

    /// Creates a `ServiceFrequency` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        frequency_id: i64,
        name: String,
        short_name: String,
        period_type: PeriodType,
        times_per_period: Option<u32>,
        is_approximate: bool,
    ) -> Self {
        Self {
            frequency_id: Some(frequency_id),
            name,
            short_name,
            period_type,
            times_per_period,
            is_approximate,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn frequency_id(&self) -> Option<i64> {
        self.frequency_id
    }

    /// Returns the full display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the short display name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Returns the period type.
    #[must_use]
    pub const fn period_type(&self) -> PeriodType {
        self.period_type
    }

    /// Returns the times-per-period value, if limited.
    #[must_use]
    pub const fn times_per_period(&self) -> Option<u32> {
        self.times_per_period
    }

    /// Returns whether the norm is approximate ("up to N times").
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        self.is_approximate
    }

    /// Computes the monthly quota implied by this frequency.
    ///
    /// Returns `None` for unlimited: either no `times_per_period` is set, or
    /// the period type is `day` (daily services are uncapped regardless of
    /// the per-day value, which informs display only).
    #[must_use]
    pub const fn monthly_quota(&self) -> Option<u32> {
        let Some(times) = self.times_per_period else {
            return None;
        };
        match self.period_type {
            PeriodType::Day => None,
            PeriodType::Week => Some(times.saturating_mul(4)),
            PeriodType::Month => Some(times),
            PeriodType::Year => Some(times.div_ceil(12)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn frequency(period_type: PeriodType, times: Option<u32>) -> ServiceFrequency {
        ServiceFrequency::new(
            String::from("test"),
            String::from("t"),
            period_type,
            times,
            false,
        )
    }

    #[test]
    fn test_daily_frequency_is_always_unlimited() {
        assert_eq!(frequency(PeriodType::Day, Some(4)).monthly_quota(), None);
        assert_eq!(frequency(PeriodType::Day, Some(1)).monthly_quota(), None);
        assert_eq!(frequency(PeriodType::Day, None).monthly_quota(), None);
    }

    #[test]
    fn test_weekly_frequency_multiplies_by_four() {
        assert_eq!(frequency(PeriodType::Week, Some(2)).monthly_quota(), Some(8));
        assert_eq!(frequency(PeriodType::Week, Some(1)).monthly_quota(), Some(4));
    }

    #[test]
    fn test_monthly_frequency_passes_through() {
        assert_eq!(
            frequency(PeriodType::Month, Some(3)).monthly_quota(),
            Some(3)
        );
    }

    #[test]
    fn test_yearly_frequency_rounds_up() {
        assert_eq!(frequency(PeriodType::Year, Some(1)).monthly_quota(), Some(1));
        assert_eq!(frequency(PeriodType::Year, Some(12)).monthly_quota(), Some(1));
        assert_eq!(frequency(PeriodType::Year, Some(13)).monthly_quota(), Some(2));
    }

    #[test]
    fn test_missing_times_is_unlimited() {
        assert_eq!(frequency(PeriodType::Month, None).monthly_quota(), None);
        assert_eq!(frequency(PeriodType::Year, None).monthly_quota(), None);
    }

    #[test]
    fn test_period_type_round_trip() {
        for s in ["day", "week", "month", "year"] {
            let parsed: PeriodType = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!("decade".parse::<PeriodType>().is_err());
    }
}

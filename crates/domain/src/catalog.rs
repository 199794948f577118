// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The social-service catalog: categories and services.
//!
//! Services carry dotted hierarchical codes ("9", "9.4"). Codes sort
//! numerically segment by segment, so "9.2" precedes "9.10" even though the
//! plain string ordering disagrees.

use crate::error::DomainError;
use crate::frequency::ServiceFrequency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A category grouping services in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategory {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the category has not been persisted yet.
    pub category_id: Option<i64>,
    /// The category name.
    pub name: String,
    /// Explicit ordering weight for display.
    pub sort_order: u32,
}

impl ServiceCategory {
    /// Creates a new `ServiceCategory` without a persisted ID.
    #[must_use]
    pub const fn new(name: String, sort_order: u32) -> Self {
        Self {
            category_id: None,
            name,
            sort_order,
        }
    }

    /// Creates a `ServiceCategory` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(category_id: i64, name: String, sort_order: u32) -> Self {
        Self {
            category_id: Some(category_id),
            name,
            sort_order,
        }
    }
}

/// A social service from the catalog.
///
/// The price is a snapshot source: service-log rows copy it at write time and
/// never read it back. The monthly cap is overwritten from the attached
/// frequency on every save; a manually entered cap survives only when no
/// frequency is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the service has not been persisted yet.
    pub service_id: Option<i64>,
    /// The unique dotted hierarchical code (e.g., "9.4").
    pub code: String,
    /// The service name.
    pub name: String,
    /// The category this service belongs to.
    pub category_id: i64,
    /// Parent service for sub-services (one level deep in practice).
    pub parent_id: Option<i64>,
    /// Current price in currency units with two fraction digits.
    pub price: Decimal,
    /// The attached frequency norm, if any.
    pub frequency: Option<ServiceFrequency>,
    /// Monthly cap on logged quantity. Derived from the frequency when one
    /// is attached.
    pub max_quantity_per_month: Option<u32>,
    /// Explicit ordering weight for display.
    pub sort_order: u32,
    /// Whether the service is offered at all.
    pub is_active: bool,
}

impl Service {
    /// Creates a new `Service` without a persisted ID.
    ///
    /// The monthly cap is resolved immediately: an attached frequency always
    /// wins over the supplied manual value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidServiceCode` if the code is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: String,
        name: String,
        category_id: i64,
        parent_id: Option<i64>,
        price: Decimal,
        frequency: Option<ServiceFrequency>,
        max_quantity_per_month: Option<u32>,
        sort_order: u32,
    ) -> Result<Self, DomainError> {
        if code.trim().is_empty() {
            return Err(DomainError::InvalidServiceCode(code));
        }
        let max_quantity_per_month =
            resolve_monthly_cap(frequency.as_ref(), max_quantity_per_month);
        Ok(Self {
            service_id: None,
            code,
            name,
            category_id,
            parent_id,
            price,
            frequency,
            max_quantity_per_month,
            sort_order,
            is_active: true,
        })
    }

    /// Returns whether this service is a sub-service.
    #[must_use]
    pub const fn is_sub_service(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Resolves the effective monthly cap of a service.
///
/// Whenever a frequency is attached its computed quota wins, including the
/// unlimited case; the manual value is honored only without a frequency.
#[must_use]
pub fn resolve_monthly_cap(
    frequency: Option<&ServiceFrequency>,
    manual: Option<u32>,
) -> Option<u32> {
    frequency.map_or(manual, ServiceFrequency::monthly_quota)
}

/// Builds the numeric sort key of a dotted service code.
///
/// Each dot-separated segment contributes the number formed by its digits;
/// segments without digits contribute zero.
#[must_use]
pub fn code_sort_key(code: &str) -> Vec<u32> {
    code.split('.')
        .map(|part| {
            part.chars()
                .filter(char::is_ascii_digit)
                .fold(0_u32, |acc, c| {
                    acc.saturating_mul(10)
                        .saturating_add(u32::from(c) - u32::from('0'))
                })
        })
        .collect()
}

/// Compares two dotted service codes numerically, segment by segment.
#[must_use]
pub fn compare_service_codes(a: &str, b: &str) -> Ordering {
    code_sort_key(a).cmp(&code_sort_key(b))
}

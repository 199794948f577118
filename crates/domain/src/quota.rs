// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The monthly quota rule.
//!
//! Quota is enforced per (resident, service, month). The caller computes
//! `current_total` as the sum over the month excluding the target day, so
//! re-entering the same day's value is never double-counted.

use crate::error::DomainError;

/// Validates a proposed quantity against a service's monthly cap.
///
/// # Arguments
///
/// * `max_quantity` - The monthly cap, or `None` for unlimited
/// * `current_total` - Quantity already logged this month, excluding the
///   target day
/// * `proposed` - The quantity about to be written for the target day
///
/// # Errors
///
/// Returns `DomainError::QuotaExceeded` with the limit and current total if
/// the write would push the month over the cap.
pub const fn check_quota(
    max_quantity: Option<u32>,
    current_total: u64,
    proposed: u32,
) -> Result<(), DomainError> {
    let Some(limit) = max_quantity else {
        return Ok(());
    };
    if current_total + proposed as u64 > limit as u64 {
        return Err(DomainError::QuotaExceeded {
            limit,
            current_total,
        });
    }
    Ok(())
}

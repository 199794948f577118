// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Autofill planning.
//!
//! Autofill projects the department's weekly service schedule (or a
//! daily-frequency default) across the days of a target month for every
//! service in the resident's entitlement set.
//!
//! ## Invariants
//!
//! - Only active residents (residential/mercy departments) are filled.
//! - A locked month rejects the run before any effect is produced.
//! - Per-service running totals are seeded once from the existing rows and
//!   updated only by the plan's own proposals; a proposal is dropped once
//!   the running total has reached the service cap. Days are visited in
//!   ascending order, so earlier days win under quota pressure.
//! - Existing cells are updated in place; manual entries on days the
//!   projection does not touch are left alone.
//! - The resulting effects form one atomic transaction downstream.

use crate::error::CoreError;
use crate::state::{LogEffect, MonthContext, ServiceTerms, TabelOutcome, TabelTransition};
use carelog_audit::Actor;
use carelog_domain::{DomainError, PeriodType, ResidentStatus};
use std::collections::BTreeMap;

/// The frequency facts autofill needs about one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyTerms {
    /// The period the norm is counted over.
    pub period_type: PeriodType,
    /// Times per period, if limited.
    pub times_per_period: Option<u32>,
}

/// One service of the resident's entitlement set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitledService {
    /// Price and cap terms of the service.
    pub terms: ServiceTerms,
    /// The attached frequency norm, if any.
    pub frequency: Option<FrequencyTerms>,
}

/// Everything autofill needs, loaded up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofillContext {
    /// The loaded month snapshot (lock state and existing cells).
    pub month: MonthContext,
    /// The resident's derived status.
    pub status: ResidentStatus,
    /// The entitlement set from the resident's active contracts.
    pub services: Vec<EntitledService>,
    /// Weekly schedules of the resident's department:
    /// `service_id → (weekday index → quantity)`.
    pub schedules: BTreeMap<i64, BTreeMap<u8, u32>>,
}

/// Plans an autofill run over a month.
///
/// For each entitled service, in order:
///
/// 1. A weekly schedule for the service projects its per-weekday quantities
///    onto every matching day of the month.
/// 2. Otherwise a daily frequency projects `times_per_period` (default 1)
///    onto every day.
/// 3. Otherwise the service is skipped: there is no projection rule.
///
/// # Errors
///
/// Returns an error if:
/// - The month is locked (`TabelLocked`)
/// - The resident is not active (`AutofillSkipped`)
pub fn plan_autofill(ctx: &AutofillContext, actor: &Actor) -> Result<TabelTransition, CoreError> {
    ctx.month.ensure_unlocked()?;

    if ctx.status != ResidentStatus::Active {
        return Err(CoreError::DomainViolation(DomainError::AutofillSkipped {
            status: ctx.status,
        }));
    }

    let days_in_month = ctx.month.month.days_in_month();

    // Running totals per service, seeded once from the existing rows.
    let mut running_totals: BTreeMap<i64, i64> = BTreeMap::new();
    for service in &ctx.services {
        let service_id = service.terms.service_id;
        running_totals.insert(service_id, total_as_i64(&ctx.month, service_id));
    }

    let mut effects: Vec<LogEffect> = Vec::new();

    for service in &ctx.services {
        let service_id = service.terms.service_id;

        if let Some(week) = ctx.schedules.get(&service_id) {
            // Projection by the department's weekly schedule.
            for day in 1..=days_in_month {
                let weekday = ctx.month.month.weekday_index(day)?;
                let Some(&quantity) = week.get(&weekday) else {
                    continue;
                };
                propose(
                    &ctx.month,
                    &service.terms,
                    day,
                    quantity,
                    actor,
                    &mut running_totals,
                    &mut effects,
                );
            }
        } else if let Some(frequency) = &service.frequency {
            // No schedule: daily services fall back to an every-day default.
            if frequency.period_type != PeriodType::Day {
                continue;
            }
            let times_per_day = frequency.times_per_period.unwrap_or(1);
            for day in 1..=days_in_month {
                propose(
                    &ctx.month,
                    &service.terms,
                    day,
                    times_per_day,
                    actor,
                    &mut running_totals,
                    &mut effects,
                );
            }
        }
    }

    let filled_count = effects.len();

    Ok(TabelTransition {
        effects,
        outcome: TabelOutcome::Autofill { filled_count },
    })
}

/// Accepts one (service, day, quantity) proposal unless the running total
/// has already reached the service cap.
///
/// The check is prospective against the running total only — it is not
/// recomputed from storage between proposals, so ascending day order decides
/// which days win when the cap is hit mid-month.
fn propose(
    month: &MonthContext,
    terms: &ServiceTerms,
    day: u8,
    quantity: u32,
    actor: &Actor,
    running_totals: &mut BTreeMap<i64, i64>,
    effects: &mut Vec<LogEffect>,
) {
    let running = running_totals.entry(terms.service_id).or_insert(0);

    if let Some(max_quantity) = terms.max_quantity_per_month {
        if *running >= i64::from(max_quantity) {
            return;
        }
    }

    let existing = month
        .cells
        .get(&(terms.service_id, day))
        .copied()
        .unwrap_or(0);

    effects.push(LogEffect::UpsertCell {
        service_id: terms.service_id,
        day,
        quantity,
        price: terms.price,
        provider: actor.id.clone(),
    });

    // An update replaces the old value, a create adds a new one.
    *running += i64::from(quantity) - i64::from(existing);
}

#[allow(clippy::cast_possible_wrap)]
fn total_as_i64(month: &MonthContext, service_id: i64) -> i64 {
    month.month_total(service_id) as i64
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::TabelCommand;
use crate::error::CoreError;
use crate::state::{LogEffect, MonthContext, ServiceTerms, TabelContext, TabelOutcome, TabelTransition};
use carelog_audit::Actor;
use carelog_domain::{check_quota, validate_quantity};

/// Applies a tabel command to a loaded month context, producing a transition.
///
/// The lock gate runs first for every mutating command except `ToggleLock`;
/// a locked month rejects the command before any effect is produced.
///
/// # Arguments
///
/// * `ctx` - The loaded month context (and service terms for cell/row commands)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
///
/// # Returns
///
/// * `Ok(TabelTransition)` containing the storage effects and the outcome
/// * `Err(CoreError)` if the command violates a rule
///
/// # Errors
///
/// Returns an error if:
/// - The month is locked (`TabelLocked`)
/// - The day does not exist in the month (`InvalidDay`)
/// - The quantity is implausible (`InvalidQuantity`)
/// - A cell write would exceed the monthly quota (`QuotaExceeded`)
pub fn apply(
    ctx: &TabelContext,
    command: TabelCommand,
    actor: &Actor,
) -> Result<TabelTransition, CoreError> {
    match command {
        TabelCommand::SetCell { day, quantity } => {
            ctx.month.ensure_unlocked()?;
            let terms = service_terms(ctx)?;
            apply_set_cell(&ctx.month, terms, day, quantity, actor)
        }
        TabelCommand::SetRow { days, quantity } => {
            ctx.month.ensure_unlocked()?;
            let terms = service_terms(ctx)?;
            apply_set_row(&ctx.month, terms, &days, quantity, actor)
        }
        TabelCommand::ClearMonth => {
            ctx.month.ensure_unlocked()?;
            Ok(TabelTransition {
                effects: vec![LogEffect::DeleteMonth],
                outcome: TabelOutcome::Cleared {
                    expected_deleted: ctx.month.cells.len(),
                },
            })
        }
        TabelCommand::ClearDay { day } => {
            ctx.month.ensure_unlocked()?;
            ctx.month.month.date(day)?;
            Ok(TabelTransition {
                effects: vec![LogEffect::DeleteDay { day }],
                outcome: TabelOutcome::Cleared {
                    expected_deleted: ctx.month.day_row_count(day),
                },
            })
        }
        TabelCommand::ToggleLock => Ok(apply_toggle_lock(&ctx.month, actor)),
    }
}

/// Extracts the service terms required by cell and row commands.
fn service_terms(ctx: &TabelContext) -> Result<&ServiceTerms, CoreError> {
    ctx.service.as_ref().ok_or_else(|| {
        CoreError::Internal(String::from(
            "service terms are required for cell and row commands",
        ))
    })
}

/// Validates and plans a single-cell mutation.
///
/// The quota base is the month total excluding the target day, so replacing
/// a day's value never double-counts it. A zero quantity deletes the cell.
fn apply_set_cell(
    month: &MonthContext,
    terms: &ServiceTerms,
    day: u8,
    quantity: u32,
    actor: &Actor,
) -> Result<TabelTransition, CoreError> {
    month.month.date(day)?;
    validate_quantity(quantity)?;

    let current_total = month.month_total_excluding(terms.service_id, day);
    check_quota(terms.max_quantity_per_month, current_total, quantity)?;

    let effect = if quantity > 0 {
        LogEffect::UpsertCell {
            service_id: terms.service_id,
            day,
            quantity,
            price: terms.price,
            provider: actor.id.clone(),
        }
    } else {
        LogEffect::DeleteCell {
            service_id: terms.service_id,
            day,
        }
    };

    let total = current_total + u64::from(quantity);

    Ok(TabelTransition {
        effects: vec![effect],
        outcome: TabelOutcome::Cell {
            quantity,
            total,
            max_quantity: terms.max_quantity_per_month,
        },
    })
}

/// Plans a row mutation: the same quantity applied to a list of days.
///
/// Deliberately no quota check — the row path mirrors the cell path's
/// write/delete semantics per day but is exempt from the monthly cap, and
/// each produced effect is an independent commit unit downstream.
fn apply_set_row(
    month: &MonthContext,
    terms: &ServiceTerms,
    days: &[u8],
    quantity: u32,
    actor: &Actor,
) -> Result<TabelTransition, CoreError> {
    validate_quantity(quantity)?;

    let mut effects = Vec::with_capacity(days.len());
    let mut total = month.month_total(terms.service_id);

    for &day in days {
        month.month.date(day)?;
        let existing = u64::from(*month.cells.get(&(terms.service_id, day)).unwrap_or(&0));
        if quantity > 0 {
            effects.push(LogEffect::UpsertCell {
                service_id: terms.service_id,
                day,
                quantity,
                price: terms.price,
                provider: actor.id.clone(),
            });
            total = total - existing + u64::from(quantity);
        } else {
            effects.push(LogEffect::DeleteCell {
                service_id: terms.service_id,
                day,
            });
            total -= existing;
        }
    }

    Ok(TabelTransition {
        effects,
        outcome: TabelOutcome::Row {
            total,
            days_saved: days.len(),
        },
    })
}

/// Plans a lock toggle.
///
/// No lock record means unlocked, and the first toggle always locks. Every
/// toggle re-records the acting operator, including unlocks.
fn apply_toggle_lock(month: &MonthContext, actor: &Actor) -> TabelTransition {
    let locked = match month.lock {
        None => true,
        Some(current) => !current,
    };
    TabelTransition {
        effects: vec![LogEffect::SetLock {
            locked,
            locked_by: actor.id.clone(),
        }],
        outcome: TabelOutcome::LockToggled { is_locked: locked },
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tabel mutation operations.
//!
//! These functions execute the storage effects produced by the core engine.
//! Transaction boundaries are owned by the `Persistence` adapter: the cell,
//! clear, lock, and autofill paths run all of their effects inside one
//! transaction, while the row path commits one effect at a time.

use crate::data_models::{NewServiceLog, NewTabelLock};
use crate::dates::{day_to_string, month_bounds, now_iso};
use crate::diesel_schema::{service_logs, tabel_locks};
use crate::error::PersistenceError;
use carelog_core::LogEffect;
use carelog_domain::TabelMonth;
use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

/// The authoritative counts of a transition execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabelApplyReport {
    /// Rows created or updated.
    pub rows_written: usize,
    /// Rows deleted.
    pub rows_deleted: usize,
}

/// Executes one storage effect.
///
/// # Errors
///
/// Returns an error if the underlying statement fails.
pub fn execute_effect(
    conn: &mut SqliteConnection,
    resident_id: i64,
    month: &TabelMonth,
    effect: &LogEffect,
    report: &mut TabelApplyReport,
) -> Result<(), PersistenceError> {
    match effect {
        LogEffect::UpsertCell {
            service_id,
            day,
            quantity,
            price,
            provider,
        } => {
            upsert_service_log(
                conn,
                resident_id,
                *service_id,
                &day_to_string(month, *day),
                i64::from(*quantity),
                *price,
                provider,
            )?;
            report.rows_written += 1;
        }
        LogEffect::DeleteCell { service_id, day } => {
            report.rows_deleted +=
                delete_cell(conn, resident_id, *service_id, &day_to_string(month, *day))?;
        }
        LogEffect::DeleteMonth => {
            report.rows_deleted += delete_month(conn, resident_id, month)?;
        }
        LogEffect::DeleteDay { day } => {
            report.rows_deleted += delete_day(conn, resident_id, &day_to_string(month, *day))?;
        }
        LogEffect::SetLock { locked, locked_by } => {
            upsert_lock(conn, resident_id, month, *locked, locked_by)?;
        }
    }
    Ok(())
}

/// Creates or replaces the unique `(resident, service, date)` log row.
///
/// The price snapshot and provider replace the stored values on conflict;
/// `created_at` survives, `updated_at` is refreshed.
pub fn upsert_service_log(
    conn: &mut SqliteConnection,
    resident_id: i64,
    service_id: i64,
    date: &str,
    quantity: i64,
    price: Decimal,
    provider: &str,
) -> Result<(), PersistenceError> {
    let now = now_iso();
    let record = NewServiceLog {
        resident_id,
        service_id,
        provider: provider.to_string(),
        date: date.to_string(),
        quantity,
        price_at_service: price.to_string(),
        created_at: now.clone(),
        updated_at: now.clone(),
    };

    diesel::insert_into(service_logs::table)
        .values(&record)
        .on_conflict((
            service_logs::resident_id,
            service_logs::service_id,
            service_logs::date,
        ))
        .do_update()
        .set((
            service_logs::quantity.eq(quantity),
            service_logs::provider.eq(provider.to_string()),
            service_logs::price_at_service.eq(price.to_string()),
            service_logs::updated_at.eq(now),
        ))
        .execute(conn)?;

    debug!(resident_id, service_id, date, quantity, "Upserted log cell");
    Ok(())
}

/// Deletes the `(resident, service, date)` row if present. Idempotent.
pub fn delete_cell(
    conn: &mut SqliteConnection,
    resident_id: i64,
    service_id: i64,
    date: &str,
) -> Result<usize, PersistenceError> {
    let deleted = diesel::delete(
        service_logs::table.filter(
            service_logs::resident_id
                .eq(resident_id)
                .and(service_logs::service_id.eq(service_id))
                .and(service_logs::date.eq(date)),
        ),
    )
    .execute(conn)?;
    Ok(deleted)
}

/// Deletes every log row of the resident within the month.
pub fn delete_month(
    conn: &mut SqliteConnection,
    resident_id: i64,
    month: &TabelMonth,
) -> Result<usize, PersistenceError> {
    let (first, last) = month_bounds(month);
    let deleted = diesel::delete(
        service_logs::table.filter(
            service_logs::resident_id
                .eq(resident_id)
                .and(service_logs::date.ge(first))
                .and(service_logs::date.le(last)),
        ),
    )
    .execute(conn)?;
    debug!(resident_id, deleted, "Cleared month");
    Ok(deleted)
}

/// Deletes every log row of the resident on one date, across all services.
pub fn delete_day(
    conn: &mut SqliteConnection,
    resident_id: i64,
    date: &str,
) -> Result<usize, PersistenceError> {
    let deleted = diesel::delete(
        service_logs::table.filter(
            service_logs::resident_id
                .eq(resident_id)
                .and(service_logs::date.eq(date)),
        ),
    )
    .execute(conn)?;
    debug!(resident_id, date, deleted, "Cleared day");
    Ok(deleted)
}

/// Creates or updates the lock row for `(resident, year, month)`.
///
/// Every toggle re-records the acting operator, including unlocks.
pub fn upsert_lock(
    conn: &mut SqliteConnection,
    resident_id: i64,
    month: &TabelMonth,
    locked: bool,
    locked_by: &str,
) -> Result<(), PersistenceError> {
    let now = now_iso();
    let record = NewTabelLock {
        resident_id,
        year: month.year(),
        month: i32::from(month.month()),
        is_locked: i32::from(locked),
        locked_by: locked_by.to_string(),
        locked_at: now.clone(),
        updated_at: now.clone(),
    };

    diesel::insert_into(tabel_locks::table)
        .values(&record)
        .on_conflict((
            tabel_locks::resident_id,
            tabel_locks::year,
            tabel_locks::month,
        ))
        .do_update()
        .set((
            tabel_locks::is_locked.eq(i32::from(locked)),
            tabel_locks::locked_by.eq(locked_by.to_string()),
            tabel_locks::updated_at.eq(now),
        ))
        .execute(conn)?;

    debug!(resident_id, locked, "Toggled tabel lock");
    Ok(())
}

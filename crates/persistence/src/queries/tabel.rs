// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tabel read queries: lock state, month cells, and aggregations.

use crate::dates::{day_of_date_string, month_bounds};
use crate::diesel_schema::{service_logs, tabel_locks};
use crate::error::PersistenceError;
use carelog_domain::TabelMonth;
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeMap;

/// Returns the raw lock row for `(resident, year, month)`.
///
/// `None` means no lock record exists, which counts as unlocked.
pub fn lock_state(
    conn: &mut SqliteConnection,
    resident_id: i64,
    month: &TabelMonth,
) -> Result<Option<bool>, PersistenceError> {
    let locked = tabel_locks::table
        .filter(
            tabel_locks::resident_id
                .eq(resident_id)
                .and(tabel_locks::year.eq(month.year()))
                .and(tabel_locks::month.eq(i32::from(month.month()))),
        )
        .select(tabel_locks::is_locked)
        .first::<i32>(conn)
        .optional()?;
    Ok(locked.map(|l| l != 0))
}

/// Loads every log row of the month as `(service_id, day) → quantity`.
pub fn month_cells(
    conn: &mut SqliteConnection,
    resident_id: i64,
    month: &TabelMonth,
) -> Result<BTreeMap<(i64, u8), u32>, PersistenceError> {
    let (first, last) = month_bounds(month);
    let rows: Vec<(i64, String, i64)> = service_logs::table
        .filter(
            service_logs::resident_id
                .eq(resident_id)
                .and(service_logs::date.ge(first))
                .and(service_logs::date.le(last)),
        )
        .select((
            service_logs::service_id,
            service_logs::date,
            service_logs::quantity,
        ))
        .load(conn)?;

    let mut cells = BTreeMap::new();
    for (service_id, date, quantity) in rows {
        let day = day_of_date_string(&date)?;
        let quantity =
            u32::try_from(quantity).map_err(|_| PersistenceError::CorruptRecord {
                table: String::from("service_logs"),
                detail: format!("negative quantity {quantity}"),
            })?;
        cells.insert((service_id, day), quantity);
    }
    Ok(cells)
}

/// Returns the stored quantity for one `(resident, service, date)` cell.
pub fn cell_quantity(
    conn: &mut SqliteConnection,
    resident_id: i64,
    service_id: i64,
    date: &str,
) -> Result<Option<i64>, PersistenceError> {
    let quantity = service_logs::table
        .filter(
            service_logs::resident_id
                .eq(resident_id)
                .and(service_logs::service_id.eq(service_id))
                .and(service_logs::date.eq(date)),
        )
        .select(service_logs::quantity)
        .first::<i64>(conn)
        .optional()?;
    Ok(quantity)
}

/// Sums the month's quantities grouped by `(service, day)`.
///
/// The unique `(resident, service, date)` constraint makes every group a
/// single row, so the fold is a pure re-keying.
pub fn aggregate_by_day(
    conn: &mut SqliteConnection,
    resident_id: i64,
    month: &TabelMonth,
) -> Result<BTreeMap<(i64, u8), u64>, PersistenceError> {
    let cells = month_cells(conn, resident_id, month)?;
    Ok(cells
        .into_iter()
        .map(|(key, quantity)| (key, u64::from(quantity)))
        .collect())
}

/// Sums the month's quantities grouped by service.
pub fn aggregate_by_service(
    conn: &mut SqliteConnection,
    resident_id: i64,
    month: &TabelMonth,
) -> Result<BTreeMap<i64, u64>, PersistenceError> {
    let cells = month_cells(conn, resident_id, month)?;
    let mut totals: BTreeMap<i64, u64> = BTreeMap::new();
    for ((service_id, _), quantity) in cells {
        *totals.entry(service_id).or_insert(0) += u64::from(quantity);
    }
    Ok(totals)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog read queries: services, frequencies, entitlements, schedules,
//! and departments.

use crate::data_models::{DepartmentRow, ServiceFrequencyRow, ServiceRow};
use crate::diesel_schema::{
    contract_services, contracts, departments, service_categories, service_frequencies,
    service_schedules, services,
};
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Department types whose residents participate in tabel pickers.
const RESIDENTIAL_CARE_TYPES: [&str; 2] = ["residential", "mercy"];

/// Loads one service row.
pub fn service_row(
    conn: &mut SqliteConnection,
    service_id: i64,
) -> Result<Option<ServiceRow>, PersistenceError> {
    let row = services::table
        .filter(services::service_id.eq(service_id))
        .first::<ServiceRow>(conn)
        .optional()?;
    Ok(row)
}

/// Loads one frequency row.
pub fn frequency_row(
    conn: &mut SqliteConnection,
    frequency_id: i64,
) -> Result<Option<ServiceFrequencyRow>, PersistenceError> {
    let row = service_frequencies::table
        .filter(service_frequencies::frequency_id.eq(frequency_id))
        .first::<ServiceFrequencyRow>(conn)
        .optional()?;
    Ok(row)
}

/// Returns the distinct service IDs of the resident's active contracts.
pub fn entitled_service_ids(
    conn: &mut SqliteConnection,
    resident_id: i64,
) -> Result<BTreeSet<i64>, PersistenceError> {
    let ids: Vec<i64> = contract_services::table
        .inner_join(contracts::table)
        .filter(
            contracts::resident_id
                .eq(resident_id)
                .and(contracts::is_active.eq(1)),
        )
        .select(contract_services::service_id)
        .load(conn)?;
    Ok(ids.into_iter().collect())
}

/// Loads the service rows of the resident's entitlement set, in catalog
/// order.
pub fn entitled_service_rows(
    conn: &mut SqliteConnection,
    resident_id: i64,
) -> Result<Vec<ServiceRow>, PersistenceError> {
    let ids = entitled_service_ids(conn, resident_id)?;
    let rows = services::table
        .filter(services::service_id.eq_any(ids))
        .order((services::code.asc(), services::sort_order.asc()))
        .load::<ServiceRow>(conn)?;
    Ok(rows)
}

/// Loads the weekly schedules of a department as
/// `service_id → (weekday → quantity)`.
pub fn department_schedules(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<BTreeMap<i64, BTreeMap<u8, u32>>, PersistenceError> {
    let rows: Vec<(i64, i32, i64)> = service_schedules::table
        .filter(service_schedules::department_id.eq(department_id))
        .select((
            service_schedules::service_id,
            service_schedules::day_of_week,
            service_schedules::quantity,
        ))
        .load(conn)?;

    let mut schedules: BTreeMap<i64, BTreeMap<u8, u32>> = BTreeMap::new();
    for (service_id, day_of_week, quantity) in rows {
        let weekday =
            u8::try_from(day_of_week).map_err(|_| PersistenceError::CorruptRecord {
                table: String::from("service_schedules"),
                detail: format!("weekday {day_of_week} out of range"),
            })?;
        let quantity = u32::try_from(quantity).map_err(|_| PersistenceError::CorruptRecord {
            table: String::from("service_schedules"),
            detail: format!("negative quantity {quantity}"),
        })?;
        schedules
            .entry(service_id)
            .or_default()
            .insert(weekday, quantity);
    }
    Ok(schedules)
}

/// Lists all categories ordered for display.
pub fn category_rows(
    conn: &mut SqliteConnection,
) -> Result<Vec<(i64, String, i32)>, PersistenceError> {
    let rows = service_categories::table
        .order((
            service_categories::sort_order.asc(),
            service_categories::name.asc(),
        ))
        .select((
            service_categories::category_id,
            service_categories::name,
            service_categories::sort_order,
        ))
        .load(conn)?;
    Ok(rows)
}

/// Lists all active services. Numeric code ordering is applied by the
/// caller, since dotted codes do not sort lexicographically.
pub fn active_service_rows(
    conn: &mut SqliteConnection,
) -> Result<Vec<ServiceRow>, PersistenceError> {
    let rows = services::table
        .filter(services::is_active.eq(1))
        .load::<ServiceRow>(conn)?;
    Ok(rows)
}

/// Loads one department row.
pub fn department_row(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Option<DepartmentRow>, PersistenceError> {
    let row = departments::table
        .filter(departments::department_id.eq(department_id))
        .first::<DepartmentRow>(conn)
        .optional()?;
    Ok(row)
}

/// Lists departments, optionally restricted to residential care.
pub fn department_rows(
    conn: &mut SqliteConnection,
    residential_care_only: bool,
) -> Result<Vec<DepartmentRow>, PersistenceError> {
    let rows = if residential_care_only {
        departments::table
            .filter(departments::department_type.eq_any(RESIDENTIAL_CARE_TYPES))
            .order(departments::name.asc())
            .load::<DepartmentRow>(conn)?
    } else {
        departments::table
            .order(departments::name.asc())
            .load::<DepartmentRow>(conn)?
    };
    Ok(rows)
}

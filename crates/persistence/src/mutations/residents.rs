// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resident mutation operations, including the placement-change commit and
//! the append-only history inserts.

use crate::data_models::{
    NewMonthlyResidentData, NewPlacementHistory, NewResident, NewStatusHistory,
};
use crate::dates::{date_to_string, now_iso};
use crate::diesel_schema::{monthly_resident_data, placement_history, residents, status_history};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use carelog_audit::{PlacementChangeRecord, StatusChangeRecord};
use carelog_domain::ResidentStatus;
use diesel::SqliteConnection;
use diesel::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

/// Inserts a resident and returns their ID.
pub fn insert_resident(
    conn: &mut SqliteConnection,
    record: &NewResident,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(residents::table)
        .values(record)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Updates the placement fields of a resident.
///
/// Admission and discharge dates are only touched when supplied.
pub fn update_resident_placement(
    conn: &mut SqliteConnection,
    resident_id: i64,
    department_id: Option<i64>,
    room: &str,
    admission_date: Option<time::Date>,
    discharge_date: Option<time::Date>,
) -> Result<(), PersistenceError> {
    diesel::update(residents::table.filter(residents::resident_id.eq(resident_id)))
        .set((
            residents::department_id.eq(department_id),
            residents::room.eq(room.to_string()),
        ))
        .execute(conn)?;

    if let Some(date) = admission_date {
        diesel::update(residents::table.filter(residents::resident_id.eq(resident_id)))
            .set(residents::admission_date.eq(Some(date_to_string(date))))
            .execute(conn)?;
    }
    if let Some(date) = discharge_date {
        diesel::update(residents::table.filter(residents::resident_id.eq(resident_id)))
            .set(residents::discharge_date.eq(Some(date_to_string(date))))
            .execute(conn)?;
    }
    Ok(())
}

fn status_string(status: Option<ResidentStatus>) -> Option<String> {
    status.map(|s| s.as_str().to_string())
}

/// Appends a status history record. Records are write-once.
pub fn insert_status_history(
    conn: &mut SqliteConnection,
    record: &StatusChangeRecord,
) -> Result<(), PersistenceError> {
    let row = NewStatusHistory {
        resident_id: record.resident_id,
        old_department_id: record.old_department_id,
        new_department_id: record.new_department_id,
        old_status: status_string(record.old_status),
        new_status: status_string(record.new_status),
        changed_by: record.changed_by.id.clone(),
        reason: record.reason.clone(),
        created_at: now_iso(),
    };
    diesel::insert_into(status_history::table)
        .values(&row)
        .execute(conn)?;
    debug!(
        resident_id = record.resident_id,
        "Appended status history record"
    );
    Ok(())
}

/// Appends a placement history record. Records are write-once.
pub fn insert_placement_history(
    conn: &mut SqliteConnection,
    record: &PlacementChangeRecord,
) -> Result<(), PersistenceError> {
    let row = NewPlacementHistory {
        resident_id: record.resident_id,
        old_department_id: record.old_department_id,
        new_department_id: record.new_department_id,
        old_room: record.old_room.clone(),
        new_room: record.new_room.clone(),
        old_status: status_string(record.old_status),
        new_status: status_string(record.new_status),
        reason: record.reason.clone(),
        date: date_to_string(record.effective_date),
        changed_by: record.changed_by.id.clone(),
        created_at: now_iso(),
    };
    diesel::insert_into(placement_history::table)
        .values(&row)
        .execute(conn)?;
    debug!(
        resident_id = record.resident_id,
        "Appended placement history record"
    );
    Ok(())
}

/// Creates or updates the monthly income/pension figures of a resident.
pub fn upsert_monthly_data(
    conn: &mut SqliteConnection,
    resident_id: i64,
    year: i32,
    month: i32,
    income: Option<Decimal>,
    pension_payment: Option<Decimal>,
) -> Result<(), PersistenceError> {
    let record = NewMonthlyResidentData {
        resident_id,
        year,
        month,
        income: income.map(|d| d.to_string()),
        pension_payment: pension_payment.map(|d| d.to_string()),
    };

    diesel::insert_into(monthly_resident_data::table)
        .values(&record)
        .on_conflict((
            monthly_resident_data::resident_id,
            monthly_resident_data::year,
            monthly_resident_data::month,
        ))
        .do_update()
        .set((
            monthly_resident_data::income.eq(record.income.clone()),
            monthly_resident_data::pension_payment.eq(record.pension_payment.clone()),
        ))
        .execute(conn)?;
    Ok(())
}

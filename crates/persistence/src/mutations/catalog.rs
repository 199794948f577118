// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog mutation operations: departments, categories, frequencies,
//! services, and weekly schedules.

use crate::data_models::{
    NewDepartment, NewService, NewServiceCategory, NewServiceFrequency, NewServiceSchedule,
};
use crate::diesel_schema::{
    departments, service_categories, service_frequencies, service_schedules, services,
};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::SqliteConnection;
use diesel::prelude::*;

/// Inserts a department and returns its ID.
pub fn insert_department(
    conn: &mut SqliteConnection,
    record: &NewDepartment,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(departments::table)
        .values(record)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts a service category and returns its ID.
pub fn insert_service_category(
    conn: &mut SqliteConnection,
    record: &NewServiceCategory,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(service_categories::table)
        .values(record)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts a service frequency and returns its ID.
pub fn insert_service_frequency(
    conn: &mut SqliteConnection,
    record: &NewServiceFrequency,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(service_frequencies::table)
        .values(record)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts a service and returns its ID.
///
/// The caller resolves the monthly cap before building the record; an
/// attached frequency always wins over a manually supplied value.
pub fn insert_service(
    conn: &mut SqliteConnection,
    record: &NewService,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(services::table)
        .values(record)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Creates or updates one weekly schedule entry for
/// `(service, department, weekday)`.
pub fn upsert_service_schedule(
    conn: &mut SqliteConnection,
    record: &NewServiceSchedule,
) -> Result<(), PersistenceError> {
    diesel::insert_into(service_schedules::table)
        .values(record)
        .on_conflict((
            service_schedules::service_id,
            service_schedules::department_id,
            service_schedules::day_of_week,
        ))
        .do_update()
        .set(service_schedules::quantity.eq(record.quantity))
        .execute(conn)?;
    Ok(())
}

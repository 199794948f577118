// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resident read queries.

use crate::data_models::ResidentRow;
use crate::diesel_schema::{departments, monthly_resident_data, residents};
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;

/// Loads one resident row.
pub fn resident_row(
    conn: &mut SqliteConnection,
    resident_id: i64,
) -> Result<Option<ResidentRow>, PersistenceError> {
    let row = residents::table
        .filter(residents::resident_id.eq(resident_id))
        .first::<ResidentRow>(conn)
        .optional()?;
    Ok(row)
}

/// Lists the residents of one residential-care department, ordered by name.
///
/// Residents of special departments (hospital, vacation, deceased) are not
/// listed; the department filter makes that implicit because the caller
/// passes a residential-care department.
pub fn residents_of_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Vec<ResidentRow>, PersistenceError> {
    let rows = residents::table
        .inner_join(departments::table)
        .filter(residents::department_id.eq(department_id))
        .order((
            residents::last_name.asc(),
            residents::first_name.asc(),
            residents::patronymic.asc(),
        ))
        .select((
            residents::resident_id,
            residents::last_name,
            residents::first_name,
            residents::patronymic,
            residents::birth_date,
            residents::department_id,
            residents::room,
            residents::admission_date,
            residents::discharge_date,
            residents::income,
            residents::pension_payment,
        ))
        .load::<ResidentRow>(conn)?;
    Ok(rows)
}

/// Loads the monthly income/pension figures of a resident, if recorded.
pub fn monthly_data(
    conn: &mut SqliteConnection,
    resident_id: i64,
    year: i32,
    month: i32,
) -> Result<Option<(Option<String>, Option<String>)>, PersistenceError> {
    let row = monthly_resident_data::table
        .filter(
            monthly_resident_data::resident_id
                .eq(resident_id)
                .and(monthly_resident_data::year.eq(year))
                .and(monthly_resident_data::month.eq(month)),
        )
        .select((
            monthly_resident_data::income,
            monthly_resident_data::pension_payment,
        ))
        .first::<(Option<String>, Option<String>)>(conn)
        .optional()?;
    Ok(row)
}

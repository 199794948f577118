// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract mutation operations.
//!
//! Entitlement editing replaces the service set of the resident's active
//! contract: services removed from the selection are unlinked, newly
//! selected ones are linked, existing links are left alone.

use crate::data_models::{NewContract, NewContractService};
use crate::dates::date_to_string;
use crate::diesel_schema::{contract_services, contracts};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Inserts a contract and returns its ID.
pub fn insert_contract(
    conn: &mut SqliteConnection,
    record: &NewContract,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(contracts::table)
        .values(record)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Returns the ID of the resident's most recent active contract, if any.
pub fn active_contract_id(
    conn: &mut SqliteConnection,
    resident_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let id = contracts::table
        .filter(
            contracts::resident_id
                .eq(resident_id)
                .and(contracts::is_active.eq(1)),
        )
        .order(contracts::date_start.desc())
        .select(contracts::contract_id)
        .first::<i64>(conn)
        .optional()?;
    Ok(id)
}

/// Replaces the service set of a contract.
///
/// Unselected links are deleted, missing ones inserted; the
/// `(contract, service)` pair stays unique throughout.
pub fn replace_contract_services(
    conn: &mut SqliteConnection,
    contract_id: i64,
    service_ids: &[i64],
) -> Result<(), PersistenceError> {
    let selected: BTreeSet<i64> = service_ids.iter().copied().collect();

    diesel::delete(
        contract_services::table.filter(
            contract_services::contract_id
                .eq(contract_id)
                .and(contract_services::service_id.ne_all(selected.iter().copied())),
        ),
    )
    .execute(conn)?;

    let existing: BTreeSet<i64> = contract_services::table
        .filter(contract_services::contract_id.eq(contract_id))
        .select(contract_services::service_id)
        .load::<i64>(conn)?
        .into_iter()
        .collect();

    for service_id in selected.difference(&existing) {
        let record = NewContractService {
            contract_id,
            service_id: *service_id,
        };
        diesel::insert_into(contract_services::table)
            .values(&record)
            .execute(conn)?;
    }

    debug!(contract_id, count = selected.len(), "Replaced contract services");
    Ok(())
}

/// Updates the number and date range of a contract.
pub fn update_contract_fields(
    conn: &mut SqliteConnection,
    contract_id: i64,
    number: Option<&str>,
    date_start: Option<time::Date>,
    date_end: Option<time::Date>,
) -> Result<(), PersistenceError> {
    if let Some(number) = number {
        diesel::update(contracts::table.filter(contracts::contract_id.eq(contract_id)))
            .set(contracts::number.eq(number.to_string()))
            .execute(conn)?;
    }
    if let Some(date) = date_start {
        diesel::update(contracts::table.filter(contracts::contract_id.eq(contract_id)))
            .set(contracts::date_start.eq(date_to_string(date)))
            .execute(conn)?;
    }
    diesel::update(contracts::table.filter(contracts::contract_id.eq(contract_id)))
        .set(contracts::date_end.eq(date_end.map(date_to_string)))
        .execute(conn)?;
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read queries over the append-only history trails.

use crate::data_models::{PlacementHistoryRow, StatusHistoryRow};
use crate::diesel_schema::{placement_history, status_history};
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;

/// Loads the most recent status history records of a resident.
pub fn recent_status_history(
    conn: &mut SqliteConnection,
    resident_id: i64,
    limit: i64,
) -> Result<Vec<StatusHistoryRow>, PersistenceError> {
    let rows = status_history::table
        .filter(status_history::resident_id.eq(resident_id))
        .order(status_history::status_history_id.desc())
        .limit(limit)
        .load::<StatusHistoryRow>(conn)?;
    Ok(rows)
}

/// Loads the most recent placement history records of a resident.
pub fn recent_placement_history(
    conn: &mut SqliteConnection,
    resident_id: i64,
    limit: i64,
) -> Result<Vec<PlacementHistoryRow>, PersistenceError> {
    let rows = placement_history::table
        .filter(placement_history::resident_id.eq(resident_id))
        .order(placement_history::placement_history_id.desc())
        .limit(limit)
        .load::<PlacementHistoryRow>(conn)?;
    Ok(rows)
}

/// Counts the status history records of a resident.
pub fn count_status_history(
    conn: &mut SqliteConnection,
    resident_id: i64,
) -> Result<i64, PersistenceError> {
    let count = status_history::table
        .filter(status_history::resident_id.eq(resident_id))
        .count()
        .get_result::<i64>(conn)?;
    Ok(count)
}

/// Counts the placement history records of a resident.
pub fn count_placement_history(
    conn: &mut SqliteConnection,
    resident_id: i64,
) -> Result<i64, PersistenceError> {
    let count = placement_history::table
        .filter(placement_history::resident_id.eq(resident_id))
        .count()
        .get_result::<i64>(conn)?;
    Ok(count)
}

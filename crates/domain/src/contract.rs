// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

/// An individual service plan (contract) binding a resident to services.
///
/// A resident may hold several contracts over time; the current entitlement
/// set is the union of services linked from the active ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the contract has not been persisted yet.
    pub contract_id: Option<i64>,
    /// The resident this contract belongs to.
    pub resident_id: i64,
    /// The contract number.
    pub number: String,
    /// The date the contract takes effect.
    pub date_start: Date,
    /// The date the contract ends, if bounded.
    pub date_end: Option<Date>,
    /// Whether the contract currently entitles the resident to its services.
    pub is_active: bool,
}

impl Contract {
    /// Creates a new active `Contract` without a persisted ID.
    #[must_use]
    pub const fn new(resident_id: i64, number: String, date_start: Date) -> Self {
        Self {
            contract_id: None,
            resident_id,
            number,
            date_start,
            date_end: None,
            is_active: true,
        }
    }
}

/// Generates the default number for a contract created on first edit.
#[must_use]
pub fn generated_contract_number(resident_id: i64, year: i32) -> String {
    format!("IPPSU-{resident_id}-{year}")
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use carelog_domain::{DomainError, TabelMonth};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// What the engine needs to know about one service to validate a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTerms {
    /// The canonical service identifier.
    pub service_id: i64,
    /// The current price, snapshotted into every written log row.
    pub price: Decimal,
    /// The monthly cap, or `None` for unlimited.
    pub max_quantity_per_month: Option<u32>,
}

/// A loaded snapshot of one resident's tabel month.
///
/// `cells` holds every existing log row of the month keyed by
/// `(service_id, day)`. `lock` is the raw lock row: `None` means no lock
/// record exists, which counts as unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthContext {
    /// The resident the month belongs to.
    pub resident_id: i64,
    /// The month the snapshot covers.
    pub month: TabelMonth,
    /// The lock row, if one exists.
    pub lock: Option<bool>,
    /// Existing quantities keyed by `(service_id, day)`.
    pub cells: BTreeMap<(i64, u8), u32>,
}

impl MonthContext {
    /// Creates an empty context for a month with no rows and no lock record.
    #[must_use]
    pub const fn new(resident_id: i64, month: TabelMonth) -> Self {
        Self {
            resident_id,
            month,
            lock: None,
            cells: BTreeMap::new(),
        }
    }

    /// Returns whether the month is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock.unwrap_or(false)
    }

    /// Fails with `TabelLocked` if the month is locked.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TabelLocked` when the lock is engaged.
    pub fn ensure_unlocked(&self) -> Result<(), DomainError> {
        if self.is_locked() {
            return Err(DomainError::TabelLocked {
                year: self.month.year(),
                month: self.month.month(),
            });
        }
        Ok(())
    }

    /// Sums the month's quantity for one service.
    #[must_use]
    pub fn month_total(&self, service_id: i64) -> u64 {
        self.cells
            .iter()
            .filter(|((sid, _), _)| *sid == service_id)
            .map(|(_, quantity)| u64::from(*quantity))
            .sum()
    }

    /// Sums the month's quantity for one service, excluding one day.
    ///
    /// This is the quota base: re-entering the same day's value must not be
    /// double-counted.
    #[must_use]
    pub fn month_total_excluding(&self, service_id: i64, day: u8) -> u64 {
        self.cells
            .iter()
            .filter(|((sid, d), _)| *sid == service_id && *d != day)
            .map(|(_, quantity)| u64::from(*quantity))
            .sum()
    }

    /// Counts the existing rows on one day, across all services.
    #[must_use]
    pub fn day_row_count(&self, day: u8) -> usize {
        self.cells.keys().filter(|(_, d)| *d == day).count()
    }
}

/// The tabel context a command is applied against.
///
/// `service` carries the terms of the targeted service and is required for
/// cell and row commands only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabelContext {
    /// The loaded month snapshot.
    pub month: MonthContext,
    /// Terms of the targeted service, for cell/row commands.
    pub service: Option<ServiceTerms>,
}

/// A single storage effect produced by a transition.
///
/// Effects are the only output of the engine that touches storage; the
/// persistence layer executes them under the transaction scope of the
/// originating command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEffect {
    /// Create or replace the unique `(resident, service, date)` row.
    UpsertCell {
        /// The service written.
        service_id: i64,
        /// The day of the month (1-based).
        day: u8,
        /// The quantity to store.
        quantity: u32,
        /// Price snapshot taken from the service at plan time.
        price: Decimal,
        /// The actor recorded as provider.
        provider: String,
    },
    /// Delete the `(resident, service, date)` row if present.
    DeleteCell {
        /// The service deleted.
        service_id: i64,
        /// The day of the month (1-based).
        day: u8,
    },
    /// Delete every row of the resident within the month.
    DeleteMonth,
    /// Delete every row of the resident on one day.
    DeleteDay {
        /// The day of the month (1-based).
        day: u8,
    },
    /// Create or update the lock row.
    SetLock {
        /// The new lock state.
        locked: bool,
        /// The actor recorded on the lock row.
        locked_by: String,
    },
}

/// The caller-facing outcome of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabelOutcome {
    /// Outcome of a single-cell mutation.
    Cell {
        /// The quantity now stored (zero if the cell was deleted).
        quantity: u32,
        /// The month total for the service after the mutation.
        total: u64,
        /// The monthly cap, if any.
        max_quantity: Option<u32>,
    },
    /// Outcome of a row mutation.
    Row {
        /// The month total for the service after all days are applied.
        total: u64,
        /// The number of days written or deleted.
        days_saved: usize,
    },
    /// Outcome of a month or day clear. The count is what the snapshot
    /// predicts; the persistence layer reports the authoritative number.
    Cleared {
        /// Rows expected to be deleted.
        expected_deleted: usize,
    },
    /// Outcome of a lock toggle.
    LockToggled {
        /// The lock state after the toggle.
        is_locked: bool,
    },
    /// Outcome of an autofill run.
    Autofill {
        /// Rows created or updated.
        filled_count: usize,
    },
}

/// The result of a successfully validated transition.
///
/// Transitions are data: nothing has touched storage yet when one is
/// returned. The persistence layer executes the effects atomically (or, for
/// the row path, one day at a time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabelTransition {
    /// The storage effects to execute.
    pub effects: Vec<LogEffect>,
    /// The outcome to report to the caller.
    pub outcome: TabelOutcome,
}

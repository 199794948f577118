// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A tabel command represents caller intent as data only.
///
/// Commands are the only way to request tabel mutations. Autofill is not a
/// command: it needs the full entitlement/schedule context and has its own
/// entry point (`plan_autofill`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabelCommand {
    /// Set or delete one cell of the tabel.
    ///
    /// A quantity of zero deletes the cell; there is no explicit zero row.
    SetCell {
        /// The day of the month (1-based).
        day: u8,
        /// The quantity to record; zero deletes.
        quantity: u32,
    },
    /// Set or delete a list of cells of one service row.
    ///
    /// Each day is an independent commit unit: the persistence layer applies
    /// the resulting effects one transaction per day, and a failure of one
    /// day does not roll back the others. Unlike `SetCell`, the row path
    /// performs no quota check.
    SetRow {
        /// The days of the month to write (1-based).
        days: Vec<u8>,
        /// The quantity to record on every day; zero deletes.
        quantity: u32,
    },
    /// Delete every log row of the resident within the month.
    ClearMonth,
    /// Delete every log row of the resident on one day, across all services.
    ClearDay {
        /// The day of the month (1-based).
        day: u8,
    },
    /// Toggle the month lock. The first toggle always locks.
    ToggleLock,
}

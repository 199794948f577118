// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::department::ResidentStatus;
use crate::error::DomainError;

#[test]
fn test_quota_exceeded_display_carries_context() {
    let err = DomainError::QuotaExceeded {
        limit: 8,
        current_total: 7,
    };
    let msg = err.to_string();
    assert!(msg.contains('8'));
    assert!(msg.contains('7'));
}

#[test]
fn test_tabel_locked_display() {
    let err = DomainError::TabelLocked {
        year: 2026,
        month: 6,
    };
    assert_eq!(err.to_string(), "Tabel for 06.2026 is locked against edits");
}

#[test]
fn test_autofill_skipped_display_names_status() {
    let err = DomainError::AutofillSkipped {
        status: ResidentStatus::Vacation,
    };
    assert!(err.to_string().contains("vacation"));
}

#[test]
fn test_invalid_day_display() {
    let err = DomainError::InvalidDay {
        year: 2026,
        month: 2,
        day: 30,
    };
    assert_eq!(err.to_string(), "Day 30 does not exist in 02.2026");
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{
    autofill_month, clear_day, clear_month, month_logs, save_log_cell, save_log_row, toggle_lock,
};
use crate::request_response::{
    AutofillRequest, BatchLogMutationRequest, ClearDayRequest, ClearMonthRequest,
    ToggleLockRequest,
};
use crate::tests::helpers::{admin, cell_request, seeded_fixture};

fn lock_request(resident_id: i64) -> ToggleLockRequest {
    ToggleLockRequest {
        resident_id,
        year: 2026,
        month: 6,
    }
}

#[test]
fn test_first_toggle_locks() {
    let mut fx = seeded_fixture();

    let response = toggle_lock(&mut fx.persistence, &admin(), &lock_request(fx.resident_id))
        .unwrap();
    assert!(response.is_locked);

    let grid = month_logs(&mut fx.persistence, &admin(), fx.resident_id, 2026, 6).unwrap();
    assert!(grid.is_locked);
}

#[test]
fn test_locked_month_rejects_all_mutations_and_stays_unmodified() {
    let mut fx = seeded_fixture();

    save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.meals_id, 1, 2),
    )
    .unwrap();
    toggle_lock(&mut fx.persistence, &admin(), &lock_request(fx.resident_id)).unwrap();

    let expected_locked = ApiError::TabelLocked {
        year: 2026,
        month: 6,
    };

    let err = save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.meals_id, 2, 1),
    )
    .unwrap_err();
    assert_eq!(err, expected_locked);

    let err = save_log_row(
        &mut fx.persistence,
        &admin(),
        &BatchLogMutationRequest {
            resident_id: fx.resident_id,
            service_id: fx.meals_id,
            year: 2026,
            month: 6,
            days: vec![2, 3],
            quantity: 1,
        },
    )
    .unwrap_err();
    assert_eq!(err, expected_locked);

    let err = clear_month(
        &mut fx.persistence,
        &admin(),
        &ClearMonthRequest {
            resident_id: fx.resident_id,
            year: 2026,
            month: 6,
        },
    )
    .unwrap_err();
    assert_eq!(err, expected_locked);

    let err = clear_day(
        &mut fx.persistence,
        &admin(),
        &ClearDayRequest {
            resident_id: fx.resident_id,
            year: 2026,
            month: 6,
            day: 1,
        },
    )
    .unwrap_err();
    assert_eq!(err, expected_locked);

    let err = autofill_month(
        &mut fx.persistence,
        &admin(),
        &AutofillRequest {
            resident_id: fx.resident_id,
            year: 2026,
            month: 6,
        },
    )
    .unwrap_err();
    assert_eq!(err, expected_locked);

    // The one pre-lock entry is untouched.
    let grid = month_logs(&mut fx.persistence, &admin(), fx.resident_id, 2026, 6).unwrap();
    assert_eq!(grid.logs.len(), 1);
    assert_eq!(grid.logs.get(&format!("{}-1", fx.meals_id)), Some(&2));
}

#[test]
fn test_unlocking_restores_normal_operation() {
    let mut fx = seeded_fixture();

    toggle_lock(&mut fx.persistence, &admin(), &lock_request(fx.resident_id)).unwrap();
    let response = toggle_lock(&mut fx.persistence, &admin(), &lock_request(fx.resident_id))
        .unwrap();
    assert!(!response.is_locked);

    let response = save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.meals_id, 1, 1),
    )
    .unwrap();
    assert_eq!(response.quantity, 1);
}

#[test]
fn test_lock_is_scoped_per_month() {
    let mut fx = seeded_fixture();

    toggle_lock(&mut fx.persistence, &admin(), &lock_request(fx.resident_id)).unwrap();

    // July stays editable while June is locked.
    let mut request = cell_request(fx.resident_id, fx.meals_id, 1, 1);
    request.month = 7;
    assert!(save_log_cell(&mut fx.persistence, &admin(), &request).is_ok());
}

#[test]
fn test_lock_is_scoped_per_resident() {
    let mut fx = seeded_fixture();

    toggle_lock(&mut fx.persistence, &admin(), &lock_request(fx.resident_id)).unwrap();

    // The other resident's June is unaffected.
    let grid = month_logs(&mut fx.persistence, &admin(), fx.vacationer_id, 2026, 6).unwrap();
    assert!(!grid.is_locked);
}

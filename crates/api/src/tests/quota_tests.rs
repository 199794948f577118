// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{save_log_cell, save_log_row};
use crate::request_response::BatchLogMutationRequest;
use crate::tests::helpers::{admin, cell_request, seeded_fixture};

#[test]
fn test_quota_rejects_overflowing_cell() {
    let mut fx = seeded_fixture();

    save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.walking_id, 1, 4),
    )
    .unwrap();
    save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.walking_id, 2, 4),
    )
    .unwrap();

    let err = save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.walking_id, 3, 1),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ApiError::QuotaExceeded {
            limit: 8,
            current_total: 8
        }
    );
}

#[test]
fn test_resubmitting_a_day_is_not_double_counted() {
    let mut fx = seeded_fixture();

    save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.walking_id, 1, 8),
    )
    .unwrap();

    // Replacing the same day's value at the cap succeeds.
    let response = save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.walking_id, 1, 8),
    )
    .unwrap();
    assert_eq!(response.total, 8);

    // Lowering it works too and frees quota.
    let response = save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.walking_id, 1, 6),
    )
    .unwrap();
    assert_eq!(response.total, 6);

    let response = save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.walking_id, 2, 2),
    )
    .unwrap();
    assert_eq!(response.total, 8);
}

#[test]
fn test_accepted_cell_mutations_never_exceed_cap() {
    let mut fx = seeded_fixture();

    let mut accepted: u64 = 0;
    for (day, quantity) in [(1_u8, 3_u32), (2, 3), (3, 3), (4, 2), (5, 1)] {
        if let Ok(response) = save_log_cell(
            &mut fx.persistence,
            &admin(),
            &cell_request(fx.resident_id, fx.walking_id, day, quantity),
        ) {
            accepted = response.total;
        }
    }
    assert!(accepted <= 8);
}

#[test]
fn test_batch_row_bypasses_quota_by_design() {
    let mut fx = seeded_fixture();

    // Five days of 2 against a cap of 8: the row path writes all of them.
    let response = save_log_row(
        &mut fx.persistence,
        &admin(),
        &BatchLogMutationRequest {
            resident_id: fx.resident_id,
            service_id: fx.walking_id,
            year: 2026,
            month: 6,
            days: vec![1, 2, 3, 4, 5],
            quantity: 2,
        },
    )
    .unwrap();
    assert_eq!(response.total, 10);

    // Once the month is over the cap, even a zero write is rejected on the
    // cell path.
    let err = save_log_cell(
        &mut fx.persistence,
        &admin(),
        &cell_request(fx.resident_id, fx.walking_id, 6, 0),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ApiError::QuotaExceeded {
            limit: 8,
            current_total: 10
        }
    );
}

#[test]
fn test_unlimited_service_accepts_large_totals() {
    let mut fx = seeded_fixture();

    for day in 1..=30 {
        save_log_cell(
            &mut fx.persistence,
            &admin(),
            &cell_request(fx.resident_id, fx.meals_id, day, 3),
        )
        .unwrap();
    }
}

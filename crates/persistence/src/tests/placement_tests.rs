// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::seeded_fixture;
use carelog_audit::Actor;
use carelog_core::{PlacementChange, PlacementState, apply_placement_change};
use carelog_domain::{DepartmentType, ResidentStatus};
use time::macros::date;

fn actor() -> Actor {
    Actor::new(String::from("op-1"), String::from("admin_or_hr"))
}

#[test]
fn test_department_change_commits_update_and_both_histories() {
    let mut fx = seeded_fixture();

    let hospital_id = fx
        .persistence
        .create_department("Hospital", "HOSP", DepartmentType::Hospital, 0)
        .unwrap();

    let resident = fx.persistence.get_resident(fx.resident_id).unwrap();
    let before = PlacementState {
        department: resident.department.clone(),
        room: resident.room.clone(),
    };
    let hospital = fx
        .persistence
        .list_departments(false)
        .unwrap()
        .into_iter()
        .find(|d| d.department_id() == Some(hospital_id))
        .unwrap();

    let transition = apply_placement_change(
        fx.resident_id,
        &before,
        &PlacementChange {
            new_department: Some(hospital),
            new_room: resident.room.clone(),
            reason: String::from("hospitalized"),
            effective_date: date!(2026 - 06 - 15),
        },
        &actor(),
    );

    fx.persistence
        .apply_placement_transition(fx.resident_id, &transition, None, Some(date!(2026 - 06 - 15)))
        .unwrap();

    let updated = fx.persistence.get_resident(fx.resident_id).unwrap();
    assert_eq!(updated.status(), ResidentStatus::Hospital);
    assert_eq!(updated.discharge_date, Some(date!(2026 - 06 - 15)));

    let (status_count, placement_count) = fx.persistence.history_counts(fx.resident_id).unwrap();
    assert_eq!(status_count, 1);
    assert_eq!(placement_count, 1);

    let status = &fx
        .persistence
        .recent_status_history(fx.resident_id, 10)
        .unwrap()[0];
    assert_eq!(status.old_department_id, Some(fx.department_id));
    assert_eq!(status.new_department_id, Some(hospital_id));
    assert_eq!(status.old_status.as_deref(), Some("active"));
    assert_eq!(status.new_status.as_deref(), Some("hospital"));
    assert_eq!(status.changed_by, "op-1");
}

#[test]
fn test_room_only_change_commits_placement_history_only() {
    let mut fx = seeded_fixture();

    let resident = fx.persistence.get_resident(fx.resident_id).unwrap();
    let before = PlacementState {
        department: resident.department.clone(),
        room: resident.room.clone(),
    };

    let transition = apply_placement_change(
        fx.resident_id,
        &before,
        &PlacementChange {
            new_department: resident.department.clone(),
            new_room: String::from("14"),
            reason: String::new(),
            effective_date: date!(2026 - 06 - 15),
        },
        &actor(),
    );

    fx.persistence
        .apply_placement_transition(fx.resident_id, &transition, None, None)
        .unwrap();

    let updated = fx.persistence.get_resident(fx.resident_id).unwrap();
    assert_eq!(updated.room, "14");
    assert_eq!(updated.status(), ResidentStatus::Active);

    let (status_count, placement_count) = fx.persistence.history_counts(fx.resident_id).unwrap();
    assert_eq!(status_count, 0);
    assert_eq!(placement_count, 1);

    let placement = &fx
        .persistence
        .recent_placement_history(fx.resident_id, 10)
        .unwrap()[0];
    assert_eq!(placement.old_room.as_deref(), Some("12"));
    assert_eq!(placement.new_room.as_deref(), Some("14"));
    assert_eq!(placement.date, "2026-06-15");
}

#[test]
fn test_no_change_commits_no_history() {
    let mut fx = seeded_fixture();

    let resident = fx.persistence.get_resident(fx.resident_id).unwrap();
    let before = PlacementState {
        department: resident.department.clone(),
        room: resident.room.clone(),
    };

    let transition = apply_placement_change(
        fx.resident_id,
        &before,
        &PlacementChange {
            new_department: resident.department.clone(),
            new_room: resident.room.clone(),
            reason: String::new(),
            effective_date: date!(2026 - 06 - 15),
        },
        &actor(),
    );

    fx.persistence
        .apply_placement_transition(fx.resident_id, &transition, None, None)
        .unwrap();

    assert_eq!(fx.persistence.history_counts(fx.resident_id).unwrap(), (0, 0));
}

#[test]
fn test_monthly_data_upsert_roundtrip() {
    use rust_decimal::Decimal;

    let mut fx = seeded_fixture();

    fx.persistence
        .upsert_monthly_data(
            fx.resident_id,
            2026,
            6,
            Some(Decimal::new(15_432_10, 2)),
            None,
        )
        .unwrap();
    fx.persistence
        .upsert_monthly_data(
            fx.resident_id,
            2026,
            6,
            Some(Decimal::new(15_432_10, 2)),
            Some(Decimal::new(11_000_00, 2)),
        )
        .unwrap();

    let data = fx
        .persistence
        .monthly_data(fx.resident_id, 2026, 6)
        .unwrap()
        .unwrap();
    assert_eq!(data.0.as_deref(), Some("15432.10"));
    assert_eq!(data.1.as_deref(), Some("11000.00"));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{change_placement, get_resident_detail, list_residents};
use crate::request_response::PlacementChangeRequest;
use crate::tests::helpers::{admin, seeded_fixture, specialist};
use carelog_domain::DepartmentType;

fn placement_request(resident_id: i64, department_id: Option<i64>, room: &str) -> PlacementChangeRequest {
    PlacementChangeRequest {
        resident_id,
        department_id,
        room: String::from(room),
        reason: String::from("test move"),
        effective_date: Some(String::from("2026-06-15")),
        admission_date: None,
        discharge_date: None,
    }
}

#[test]
fn test_department_change_appends_both_trails() {
    let mut fx = seeded_fixture();

    let hospital_id = fx
        .persistence
        .create_department("Hospital", "HOSP", DepartmentType::Hospital, 0)
        .unwrap();

    let response = change_placement(
        &mut fx.persistence,
        &admin(),
        &placement_request(fx.resident_id, Some(hospital_id), "12"),
    )
    .unwrap();
    assert_eq!(response.status, "hospital");
    assert_eq!(response.department, "Hospital");

    let detail = get_resident_detail(&mut fx.persistence, &admin(), fx.resident_id, 10).unwrap();
    assert_eq!(detail.status, "hospital");
    assert_eq!(detail.status_history.len(), 1);
    assert_eq!(detail.placement_history.len(), 1);

    let status = &detail.status_history[0];
    assert_eq!(status.old_department_id, Some(fx.department_id));
    assert_eq!(status.new_department_id, Some(hospital_id));
    assert_eq!(status.old_status.as_deref(), Some("active"));
    assert_eq!(status.new_status.as_deref(), Some("hospital"));

    let placement = &detail.placement_history[0];
    assert_eq!(placement.date, "2026-06-15");
}

#[test]
fn test_room_only_change_appends_placement_trail_only() {
    let mut fx = seeded_fixture();

    let response = change_placement(
        &mut fx.persistence,
        &admin(),
        &placement_request(fx.resident_id, Some(fx.department_id), "14"),
    )
    .unwrap();
    assert_eq!(response.room, "14");
    assert_eq!(response.status, "active");

    let detail = get_resident_detail(&mut fx.persistence, &admin(), fx.resident_id, 10).unwrap();
    assert!(detail.status_history.is_empty());
    assert_eq!(detail.placement_history.len(), 1);

    let placement = &detail.placement_history[0];
    assert_eq!(placement.old_room.as_deref(), Some("12"));
    assert_eq!(placement.new_room.as_deref(), Some("14"));
}

#[test]
fn test_unchanged_placement_appends_nothing() {
    let mut fx = seeded_fixture();

    change_placement(
        &mut fx.persistence,
        &admin(),
        &placement_request(fx.resident_id, Some(fx.department_id), "12"),
    )
    .unwrap();

    let detail = get_resident_detail(&mut fx.persistence, &admin(), fx.resident_id, 10).unwrap();
    assert!(detail.status_history.is_empty());
    assert!(detail.placement_history.is_empty());
}

#[test]
fn test_each_department_change_appends_one_pair() {
    let mut fx = seeded_fixture();

    let hospital_id = fx
        .persistence
        .create_department("Hospital", "HOSP", DepartmentType::Hospital, 0)
        .unwrap();

    change_placement(
        &mut fx.persistence,
        &admin(),
        &placement_request(fx.resident_id, Some(hospital_id), "12"),
    )
    .unwrap();
    change_placement(
        &mut fx.persistence,
        &admin(),
        &placement_request(fx.resident_id, Some(fx.department_id), "12"),
    )
    .unwrap();

    let detail = get_resident_detail(&mut fx.persistence, &admin(), fx.resident_id, 10).unwrap();
    assert_eq!(detail.status_history.len(), 2);
    assert_eq!(detail.placement_history.len(), 2);
    assert_eq!(detail.status, "active");
}

#[test]
fn test_invalid_effective_date_is_rejected_before_write() {
    let mut fx = seeded_fixture();

    let mut request = placement_request(fx.resident_id, Some(fx.department_id), "14");
    request.effective_date = Some(String::from("15.06.2026"));

    let err = change_placement(&mut fx.persistence, &admin(), &request).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { field, .. } if field == "effective_date"));

    let detail = get_resident_detail(&mut fx.persistence, &admin(), fx.resident_id, 10).unwrap();
    assert_eq!(detail.room, "12");
    assert!(detail.placement_history.is_empty());
}

#[test]
fn test_placement_change_requires_department_access() {
    let mut fx = seeded_fixture();
    let outsider = specialist(fx.vacation_department_id);

    let err = change_placement(
        &mut fx.persistence,
        &outsider,
        &placement_request(fx.resident_id, Some(fx.department_id), "14"),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::AccessDenied { .. }));
}

#[test]
fn test_unknown_department_is_not_found() {
    let mut fx = seeded_fixture();

    let err = change_placement(
        &mut fx.persistence,
        &admin(),
        &placement_request(fx.resident_id, Some(9_999), "14"),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[test]
fn test_list_residents_by_department() {
    let mut fx = seeded_fixture();

    let residents = list_residents(&mut fx.persistence, &admin(), fx.department_id).unwrap();
    assert_eq!(residents.len(), 1);
    assert_eq!(residents[0].full_name, "Ivanov Ivan Ivanovich");
    assert_eq!(residents[0].status, "active");

    let err = list_residents(
        &mut fx.persistence,
        &specialist(fx.vacation_department_id),
        fx.department_id,
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::AccessDenied { .. }));
}

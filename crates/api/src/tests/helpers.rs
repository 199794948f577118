// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::auth::CallerIdentity;
use crate::request_response::LogMutationRequest;
use carelog_domain::{Department, DepartmentType, PeriodType, Resident};
use carelog_persistence::Persistence;
use rust_decimal::Decimal;
use time::macros::date;

/// A seeded store: one residential department with a resident entitled to a
/// quota-capped weekly service and an uncapped daily one, plus a vacation
/// department housing a second resident.
pub struct ApiFixture {
    pub persistence: Persistence,
    pub department_id: i64,
    pub vacation_department_id: i64,
    pub category_id: i64,
    /// "9.4", weekly frequency 2/week, monthly cap 8. Entitled.
    pub walking_id: i64,
    /// "1.1", daily frequency, uncapped. Entitled.
    pub meals_id: i64,
    /// "2.2", manual cap 2, no frequency. Not entitled.
    pub haircut_id: i64,
    pub resident_id: i64,
    /// Lives in the vacation department.
    pub vacationer_id: i64,
}

pub fn admin() -> CallerIdentity {
    CallerIdentity::new(String::from("admin-1"), true, None)
}

pub fn specialist(department_id: i64) -> CallerIdentity {
    CallerIdentity::new(String::from("spec-1"), false, Some(department_id))
}

pub fn cell_request(
    resident_id: i64,
    service_id: i64,
    day: u8,
    quantity: u32,
) -> LogMutationRequest {
    LogMutationRequest {
        resident_id,
        service_id,
        year: 2026,
        month: 6,
        day,
        quantity,
    }
}

pub fn seeded_fixture() -> ApiFixture {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let department_id = persistence
        .create_department("Department 1", "D1", DepartmentType::Residential, 30)
        .unwrap();
    let vacation_department_id = persistence
        .create_department("Vacation", "VAC", DepartmentType::Vacation, 0)
        .unwrap();
    let category_id = persistence.create_service_category("Care", 0).unwrap();

    let weekly_id = persistence
        .create_service_frequency("2 per week", "2/wk", PeriodType::Week, Some(2), false)
        .unwrap();
    let daily_id = persistence
        .create_service_frequency("daily", "1/d", PeriodType::Day, Some(1), false)
        .unwrap();

    let walking_id = persistence
        .create_service(
            "9.4",
            "Walking assistance",
            category_id,
            None,
            Decimal::new(12_50, 2),
            Some(weekly_id),
            None,
            0,
        )
        .unwrap();
    let meals_id = persistence
        .create_service(
            "1.1",
            "Meals",
            category_id,
            None,
            Decimal::new(30_00, 2),
            Some(daily_id),
            None,
            0,
        )
        .unwrap();
    let haircut_id = persistence
        .create_service(
            "2.2",
            "Haircut",
            category_id,
            None,
            Decimal::new(5_00, 2),
            None,
            Some(2),
            0,
        )
        .unwrap();

    let department = Department::with_id(
        department_id,
        String::from("Department 1"),
        String::from("D1"),
        DepartmentType::Residential,
        30,
    );
    let resident_id = persistence
        .create_resident(&Resident::new(
            String::from("Ivanov"),
            String::from("Ivan"),
            String::from("Ivanovich"),
            date!(1950 - 03 - 12),
            Some(department),
            String::from("12"),
        ))
        .unwrap();

    let vacation_department = Department::with_id(
        vacation_department_id,
        String::from("Vacation"),
        String::from("VAC"),
        DepartmentType::Vacation,
        0,
    );
    let vacationer_id = persistence
        .create_resident(&Resident::new(
            String::from("Petrov"),
            String::from("Pyotr"),
            String::new(),
            date!(1948 - 11 - 02),
            Some(vacation_department),
            String::new(),
        ))
        .unwrap();

    persistence
        .replace_contract_services(
            resident_id,
            &[walking_id, meals_id],
            None,
            None,
            None,
            date!(2026 - 01 - 15),
        )
        .unwrap();
    persistence
        .replace_contract_services(
            vacationer_id,
            &[meals_id],
            None,
            None,
            None,
            date!(2026 - 01 - 15),
        )
        .unwrap();

    ApiFixture {
        persistence,
        department_id,
        vacation_department_id,
        category_id,
        walking_id,
        meals_id,
        haircut_id,
        resident_id,
        vacationer_id,
    }
}

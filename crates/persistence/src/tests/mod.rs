// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod catalog_tests;
mod placement_tests;

use crate::Persistence;
use carelog_domain::{Department, DepartmentType, PeriodType, Resident, TabelMonth};
use rust_decimal::Decimal;
use time::macros::date;

/// A seeded in-memory store: one residential department, one resident with
/// an active contract, and two services (a quota-capped weekly one and an
/// uncapped daily one).
pub struct Fixture {
    pub persistence: Persistence,
    pub department_id: i64,
    pub resident_id: i64,
    pub category_id: i64,
    /// "9.4", weekly frequency 2/week, monthly cap 8.
    pub walking_id: i64,
    /// "1.1", daily frequency, uncapped.
    pub meals_id: i64,
}

pub fn june_2026() -> TabelMonth {
    TabelMonth::new(2026, 6).unwrap()
}

pub fn seeded_fixture() -> Fixture {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let department_id = persistence
        .create_department("Department 1", "D1", DepartmentType::Residential, 30)
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

    let department = Department::with_id(
        department_id,
        String::from("Department 1"),
        String::from("D1"),
        DepartmentType::Residential,
        30,
    );
    let resident = Resident::new(
        String::from("Ivanov"),
        String::from("Ivan"),
        String::from("Ivanovich"),
        date!(1950 - 03 - 12),
        Some(department),
        String::from("12"),
    );
    let resident_id = persistence.create_resident(&resident).unwrap();

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

    Fixture {
        persistence,
        department_id,
        resident_id,
        category_id,
        walking_id,
        meals_id,
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::seeded_fixture;
use carelog_domain::PeriodType;
use rust_decimal::Decimal;
use time::macros::date;

#[test]
fn test_service_cap_is_resolved_from_frequency_on_save() {
    let mut fx = seeded_fixture();

    let weekly_id = fx
        .persistence
        .create_service_frequency("3 per week", "3/wk", PeriodType::Week, Some(3), false)
        .unwrap();

    // The manual cap of 99 is overwritten by the frequency's 12.
    let service_id = fx
        .persistence
        .create_service(
            "2.1",
            "Physical therapy",
            fx.category_id,
            None,
            Decimal::new(20_00, 2),
            Some(weekly_id),
            Some(99),
            0,
        )
        .unwrap();

    let terms = fx.persistence.service_terms(service_id).unwrap();
    assert_eq!(terms.max_quantity_per_month, Some(12));
}

#[test]
fn test_manual_cap_survives_without_frequency() {
    let mut fx = seeded_fixture();

    let service_id = fx
        .persistence
        .create_service(
            "2.2",
            "Haircut",
            fx.category_id,
            None,
            Decimal::new(5_00, 2),
            None,
            Some(2),
            0,
        )
        .unwrap();

    let terms = fx.persistence.service_terms(service_id).unwrap();
    assert_eq!(terms.max_quantity_per_month, Some(2));
}

#[test]
fn test_daily_frequency_yields_unlimited_cap() {
    let fx = &mut seeded_fixture();
    let terms = fx.persistence.service_terms(fx.meals_id).unwrap();
    assert_eq!(terms.max_quantity_per_month, None);
}

#[test]
fn test_duplicate_service_code_is_rejected() {
    let mut fx = seeded_fixture();

    let result = fx.persistence.create_service(
        "9.4",
        "Duplicate code",
        fx.category_id,
        None,
        Decimal::ZERO,
        None,
        None,
        0,
    );
    assert!(result.is_err());
}

#[test]
fn test_contract_replacement_is_idempotent() {
    let mut fx = seeded_fixture();

    let first = fx
        .persistence
        .replace_contract_services(
            fx.resident_id,
            &[fx.walking_id],
            None,
            None,
            None,
            date!(2026 - 06 - 01),
        )
        .unwrap();
    let second = fx
        .persistence
        .replace_contract_services(
            fx.resident_id,
            &[fx.walking_id],
            None,
            None,
            None,
            date!(2026 - 06 - 02),
        )
        .unwrap();

    // Same active contract reused, no duplicated pairs.
    assert_eq!(first, second);
    let entitled = fx.persistence.entitled_service_ids(fx.resident_id).unwrap();
    assert_eq!(entitled.len(), 1);
    assert!(entitled.contains(&fx.walking_id));
}

#[test]
fn test_contract_replacement_unlinks_deselected_services() {
    let mut fx = seeded_fixture();

    fx.persistence
        .replace_contract_services(
            fx.resident_id,
            &[fx.meals_id],
            None,
            None,
            None,
            date!(2026 - 06 - 01),
        )
        .unwrap();

    let entitled = fx.persistence.entitled_service_ids(fx.resident_id).unwrap();
    assert!(entitled.contains(&fx.meals_id));
    assert!(!entitled.contains(&fx.walking_id));
}

#[test]
fn test_entitlements_union_across_active_contracts() {
    use crate::data_models::NewContract;
    use crate::mutations::contracts;

    let mut fx = seeded_fixture();

    // A second active contract linking one extra service.
    let haircut_id = fx
        .persistence
        .create_service(
            "2.2",
            "Haircut",
            fx.category_id,
            None,
            Decimal::new(5_00, 2),
            None,
            Some(2),
            0,
        )
        .unwrap();
    let record = NewContract {
        resident_id: fx.resident_id,
        number: String::from("IPPSU-extra"),
        date_start: String::from("2026-06-01"),
        date_end: None,
        is_active: 1,
    };
    let extra_contract = contracts::insert_contract(&mut fx.persistence.conn, &record).unwrap();
    contracts::replace_contract_services(&mut fx.persistence.conn, extra_contract, &[haircut_id])
        .unwrap();

    let entitled = fx.persistence.entitled_service_ids(fx.resident_id).unwrap();
    assert!(entitled.contains(&fx.walking_id));
    assert!(entitled.contains(&fx.meals_id));
    assert!(entitled.contains(&haircut_id));
}

#[test]
fn test_entitled_services_carry_frequency_terms() {
    let mut fx = seeded_fixture();

    let services = fx.persistence.entitled_services(fx.resident_id).unwrap();
    assert_eq!(services.len(), 2);

    let meals = services
        .iter()
        .find(|s| s.terms.service_id == fx.meals_id)
        .unwrap();
    let frequency = meals.frequency.unwrap();
    assert_eq!(frequency.period_type, PeriodType::Day);
    assert_eq!(frequency.times_per_period, Some(1));

    let walking = services
        .iter()
        .find(|s| s.terms.service_id == fx.walking_id)
        .unwrap();
    assert_eq!(walking.terms.max_quantity_per_month, Some(8));
}

#[test]
fn test_department_schedules_map_shape() {
    let mut fx = seeded_fixture();

    fx.persistence
        .set_service_schedule(fx.walking_id, fx.department_id, 0, 2)
        .unwrap();
    fx.persistence
        .set_service_schedule(fx.walking_id, fx.department_id, 3, 1)
        .unwrap();
    // Re-upserting a weekday replaces its quantity.
    fx.persistence
        .set_service_schedule(fx.walking_id, fx.department_id, 0, 4)
        .unwrap();

    let schedules = fx.persistence.department_schedules(fx.department_id).unwrap();
    let week = schedules.get(&fx.walking_id).unwrap();
    assert_eq!(week.get(&0), Some(&4));
    assert_eq!(week.get(&3), Some(&1));
    assert_eq!(week.len(), 2);
}

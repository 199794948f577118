// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::autofill::{AutofillContext, EntitledService, FrequencyTerms, plan_autofill};
use crate::error::CoreError;
use crate::state::{LogEffect, TabelOutcome};
use crate::tests::helpers::{june_2026, month_context, service_terms, test_actor};
use carelog_domain::{DomainError, PeriodType, ResidentStatus, TabelMonth};
use std::collections::BTreeMap;

fn entitled(service_id: i64, max_quantity: Option<u32>) -> EntitledService {
    EntitledService {
        terms: service_terms(service_id, max_quantity),
        frequency: None,
    }
}

fn entitled_daily(service_id: i64, times_per_period: Option<u32>) -> EntitledService {
    EntitledService {
        terms: service_terms(service_id, None),
        frequency: Some(FrequencyTerms {
            period_type: PeriodType::Day,
            times_per_period,
        }),
    }
}

fn weekly_schedule(service_id: i64, weekday: u8, quantity: u32) -> BTreeMap<i64, BTreeMap<u8, u32>> {
    let mut week = BTreeMap::new();
    week.insert(weekday, quantity);
    let mut schedules = BTreeMap::new();
    schedules.insert(service_id, week);
    schedules
}

fn context(
    services: Vec<EntitledService>,
    schedules: BTreeMap<i64, BTreeMap<u8, u32>>,
) -> AutofillContext {
    AutofillContext {
        month: month_context(june_2026()),
        status: ResidentStatus::Active,
        services,
        schedules,
    }
}

fn upsert_days(effects: &[LogEffect]) -> Vec<u8> {
    effects
        .iter()
        .map(|effect| match effect {
            LogEffect::UpsertCell { day, .. } => *day,
            other => panic!("unexpected effect: {other:?}"),
        })
        .collect()
}

#[test]
fn test_weekly_schedule_projects_onto_matching_weekdays() {
    // June 2026 starts on a Monday; Mondays are 1, 8, 15, 22, 29.
    let ctx = context(vec![entitled(5, None)], weekly_schedule(5, 0, 2));

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    assert_eq!(upsert_days(&transition.effects), vec![1, 8, 15, 22, 29]);
    assert_eq!(
        transition.outcome,
        TabelOutcome::Autofill { filled_count: 5 }
    );
}

#[test]
fn test_quota_pressure_lets_earliest_days_win() {
    // Five Mondays at quantity 2 against a cap of 8: only the first four
    // fit, the fifth is dropped.
    let ctx = context(vec![entitled(5, Some(8))], weekly_schedule(5, 0, 2));

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    assert_eq!(upsert_days(&transition.effects), vec![1, 8, 15, 22]);
    assert_eq!(
        transition.outcome,
        TabelOutcome::Autofill { filled_count: 4 }
    );
}

#[test]
fn test_running_total_is_seeded_from_existing_rows() {
    // 6 already logged mid-month: only one Monday still fits under the cap.
    let mut ctx = context(vec![entitled(5, Some(8))], weekly_schedule(5, 0, 2));
    ctx.month.cells.insert((5, 3), 6);

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    assert_eq!(upsert_days(&transition.effects), vec![1]);
}

#[test]
fn test_update_in_place_replaces_rather_than_adds() {
    // Monday day 1 already holds 2; re-proposing 2 keeps the total at 2 and
    // leaves room for the remaining Mondays.
    let mut ctx = context(vec![entitled(5, Some(8))], weekly_schedule(5, 0, 2));
    ctx.month.cells.insert((5, 1), 2);

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    // Days 1, 8, 15, 22 fill the cap of 8; day 29 is dropped.
    assert_eq!(upsert_days(&transition.effects), vec![1, 8, 15, 22]);
}

#[test]
fn test_daily_frequency_fills_every_day() {
    let ctx = context(vec![entitled_daily(6, Some(3))], BTreeMap::new());

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    assert_eq!(transition.effects.len(), 30);
    match &transition.effects[0] {
        LogEffect::UpsertCell { quantity, .. } => assert_eq!(*quantity, 3),
        other => panic!("unexpected effect: {other:?}"),
    }
}

#[test]
fn test_daily_frequency_defaults_to_one_per_day() {
    let ctx = context(vec![entitled_daily(6, None)], BTreeMap::new());

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    assert_eq!(transition.effects.len(), 30);
    match &transition.effects[0] {
        LogEffect::UpsertCell { quantity, .. } => assert_eq!(*quantity, 1),
        other => panic!("unexpected effect: {other:?}"),
    }
}

#[test]
fn test_service_without_projection_rule_is_skipped() {
    let mut weekly_only = entitled(7, None);
    weekly_only.frequency = Some(FrequencyTerms {
        period_type: PeriodType::Week,
        times_per_period: Some(2),
    });

    let ctx = context(vec![entitled(5, None), weekly_only], BTreeMap::new());

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    assert!(transition.effects.is_empty());
    assert_eq!(
        transition.outcome,
        TabelOutcome::Autofill { filled_count: 0 }
    );
}

#[test]
fn test_inactive_resident_is_skipped() {
    let mut ctx = context(vec![entitled(5, None)], weekly_schedule(5, 0, 2));
    ctx.status = ResidentStatus::Vacation;

    let err = plan_autofill(&ctx, &test_actor()).unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::AutofillSkipped {
            status: ResidentStatus::Vacation
        })
    );
}

#[test]
fn test_locked_month_rejects_autofill() {
    let mut ctx = context(vec![entitled(5, None)], weekly_schedule(5, 0, 2));
    ctx.month.lock = Some(true);

    let err = plan_autofill(&ctx, &test_actor()).unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::TabelLocked {
            year: 2026,
            month: 6
        })
    );
}

#[test]
fn test_schedule_wins_over_daily_frequency() {
    // A service with both a schedule and a daily frequency follows the
    // schedule only.
    let mut service = entitled(5, None);
    service.frequency = Some(FrequencyTerms {
        period_type: PeriodType::Day,
        times_per_period: Some(1),
    });
    let ctx = context(vec![service], weekly_schedule(5, 0, 2));

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    assert_eq!(upsert_days(&transition.effects), vec![1, 8, 15, 22, 29]);
}

#[test]
fn test_february_projection_respects_month_length() {
    let month = TabelMonth::new(2026, 2).unwrap();
    let ctx = AutofillContext {
        month: crate::state::MonthContext::new(7, month),
        status: ResidentStatus::Active,
        services: vec![entitled_daily(6, None)],
        schedules: BTreeMap::new(),
    };

    let transition = plan_autofill(&ctx, &test_actor()).unwrap();

    assert_eq!(transition.effects.len(), 28);
}

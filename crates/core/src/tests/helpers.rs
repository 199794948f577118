// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::state::{MonthContext, ServiceTerms, TabelContext};
use carelog_audit::Actor;
use carelog_domain::TabelMonth;
use rust_decimal::Decimal;

pub fn test_actor() -> Actor {
    Actor::new(String::from("op-1"), String::from("specialist"))
}

pub fn june_2026() -> TabelMonth {
    TabelMonth::new(2026, 6).unwrap()
}

pub fn month_context(month: TabelMonth) -> MonthContext {
    MonthContext::new(7, month)
}

pub fn service_terms(service_id: i64, max_quantity: Option<u32>) -> ServiceTerms {
    ServiceTerms {
        service_id,
        price: Decimal::new(12_50, 2),
        max_quantity_per_month: max_quantity,
    }
}

pub fn cell_context(month: MonthContext, terms: ServiceTerms) -> TabelContext {
    TabelContext {
        month,
        service: Some(terms),
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod catalog;
mod contract;
mod department;
mod error;
mod frequency;
mod quota;
mod resident;
mod schedule;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use calendar::TabelMonth;
pub use catalog::{
    Service, ServiceCategory, code_sort_key, compare_service_codes, resolve_monthly_cap,
};
pub use contract::{Contract, generated_contract_number};
pub use department::{Department, DepartmentType, ResidentStatus};
pub use error::DomainError;
pub use frequency::{PeriodType, ServiceFrequency};
pub use quota::check_quota;
pub use resident::Resident;
pub use schedule::{ServiceSchedule, weekday_index};
pub use validation::{DATE_FORMAT, parse_iso_date, parse_money, validate_quantity};

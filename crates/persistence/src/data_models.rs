// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use crate::diesel_schema::{
    contract_services, contracts, departments, monthly_resident_data, placement_history,
    residents, service_categories, service_frequencies, service_logs, service_schedules, services,
    status_history, tabel_locks,
};

/// Queryable row of the `departments` table.
#[derive(Debug, Clone, Queryable)]
pub struct DepartmentRow {
    pub department_id: i64,
    pub name: String,
    pub code: String,
    pub department_type: String,
    pub capacity: i32,
}

/// Insertable record for the `departments` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = departments)]
pub struct NewDepartment {
    pub name: String,
    pub code: String,
    pub department_type: String,
    pub capacity: i32,
}

/// Queryable row of the `residents` table.
#[derive(Debug, Clone, Queryable)]
pub struct ResidentRow {
    pub resident_id: i64,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: String,
    pub birth_date: String,
    pub department_id: Option<i64>,
    pub room: String,
    pub admission_date: Option<String>,
    pub discharge_date: Option<String>,
    pub income: Option<String>,
    pub pension_payment: Option<String>,
}

/// Insertable record for the `residents` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = residents)]
pub struct NewResident {
    pub last_name: String,
    pub first_name: String,
    pub patronymic: String,
    pub birth_date: String,
    pub department_id: Option<i64>,
    pub room: String,
    pub admission_date: Option<String>,
    pub discharge_date: Option<String>,
    pub income: Option<String>,
    pub pension_payment: Option<String>,
}

/// Insertable record for the `service_categories` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_categories)]
pub struct NewServiceCategory {
    pub name: String,
    pub sort_order: i32,
}

/// Queryable row of the `service_frequencies` table.
#[derive(Debug, Clone, Queryable)]
pub struct ServiceFrequencyRow {
    pub frequency_id: i64,
    pub name: String,
    pub short_name: String,
    pub period_type: String,
    pub times_per_period: Option<i32>,
    pub is_approximate: i32,
}

/// Insertable record for the `service_frequencies` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_frequencies)]
pub struct NewServiceFrequency {
    pub name: String,
    pub short_name: String,
    pub period_type: String,
    pub times_per_period: Option<i32>,
    pub is_approximate: i32,
}

/// Queryable row of the `services` table.
#[derive(Debug, Clone, Queryable)]
pub struct ServiceRow {
    pub service_id: i64,
    pub code: String,
    pub name: String,
    pub category_id: i64,
    pub parent_id: Option<i64>,
    pub price: String,
    pub frequency_id: Option<i64>,
    pub max_quantity_per_month: Option<i32>,
    pub sort_order: i32,
    pub is_active: i32,
}

/// Insertable record for the `services` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = services)]
pub struct NewService {
    pub code: String,
    pub name: String,
    pub category_id: i64,
    pub parent_id: Option<i64>,
    pub price: String,
    pub frequency_id: Option<i64>,
    pub max_quantity_per_month: Option<i32>,
    pub sort_order: i32,
    pub is_active: i32,
}

/// Insertable record for the `contracts` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contracts)]
pub struct NewContract {
    pub resident_id: i64,
    pub number: String,
    pub date_start: String,
    pub date_end: Option<String>,
    pub is_active: i32,
}

/// Insertable record for the `contract_services` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contract_services)]
pub struct NewContractService {
    pub contract_id: i64,
    pub service_id: i64,
}

/// Insertable record for the `service_logs` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_logs)]
pub struct NewServiceLog {
    pub resident_id: i64,
    pub service_id: i64,
    pub provider: String,
    pub date: String,
    pub quantity: i64,
    pub price_at_service: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Insertable record for the `tabel_locks` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tabel_locks)]
pub struct NewTabelLock {
    pub resident_id: i64,
    pub year: i32,
    pub month: i32,
    pub is_locked: i32,
    pub locked_by: String,
    pub locked_at: String,
    pub updated_at: String,
}

/// Queryable row of the `status_history` table.
#[derive(Debug, Clone, Queryable)]
pub struct StatusHistoryRow {
    pub status_history_id: i64,
    pub resident_id: i64,
    pub old_department_id: Option<i64>,
    pub new_department_id: Option<i64>,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub changed_by: String,
    pub reason: String,
    pub created_at: String,
}

/// Insertable record for the `status_history` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = status_history)]
pub struct NewStatusHistory {
    pub resident_id: i64,
    pub old_department_id: Option<i64>,
    pub new_department_id: Option<i64>,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub changed_by: String,
    pub reason: String,
    pub created_at: String,
}

/// Queryable row of the `placement_history` table.
#[derive(Debug, Clone, Queryable)]
pub struct PlacementHistoryRow {
    pub placement_history_id: i64,
    pub resident_id: i64,
    pub old_department_id: Option<i64>,
    pub new_department_id: Option<i64>,
    pub old_room: Option<String>,
    pub new_room: Option<String>,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub reason: String,
    pub date: String,
    pub changed_by: String,
    pub created_at: String,
}

/// Insertable record for the `placement_history` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = placement_history)]
pub struct NewPlacementHistory {
    pub resident_id: i64,
    pub old_department_id: Option<i64>,
    pub new_department_id: Option<i64>,
    pub old_room: Option<String>,
    pub new_room: Option<String>,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub reason: String,
    pub date: String,
    pub changed_by: String,
    pub created_at: String,
}

/// Insertable record for the `service_schedules` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_schedules)]
pub struct NewServiceSchedule {
    pub service_id: i64,
    pub department_id: i64,
    pub day_of_week: i32,
    pub quantity: i64,
}

/// Insertable record for the `monthly_resident_data` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = monthly_resident_data)]
pub struct NewMonthlyResidentData {
    pub resident_id: i64,
    pub year: i32,
    pub month: i32,
    pub income: Option<String>,
    pub pension_payment: Option<String>,
}

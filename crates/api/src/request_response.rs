// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the operation surface.
//!
//! These types are distinct from domain types and represent the API
//! contract. Dates travel as ISO 8601 strings; monetary amounts as decimal
//! strings.

use std::collections::BTreeMap;

/// API response for a single-cell read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLogCellResponse {
    /// The stored quantity, zero if the cell is absent.
    pub quantity: u32,
}

/// API request for a single-cell mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMutationRequest {
    /// The resident the tabel belongs to.
    pub resident_id: i64,
    /// The service logged.
    pub service_id: i64,
    /// The year of the target month.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
    /// The day of the month (1-based).
    pub day: u8,
    /// The quantity to record; zero deletes the cell.
    pub quantity: u32,
}

/// API response for a single-cell mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMutationResponse {
    /// The quantity now stored (zero if the cell was deleted).
    pub quantity: u32,
    /// The month total for the service after the mutation.
    pub total: u64,
    /// The monthly cap, if any.
    pub max_quantity: Option<u32>,
}

/// API request for a batch row mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLogMutationRequest {
    /// The resident the tabel belongs to.
    pub resident_id: i64,
    /// The service logged.
    pub service_id: i64,
    /// The year of the target month.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
    /// The days of the month to write.
    pub days: Vec<u8>,
    /// The quantity to record on every day; zero deletes.
    pub quantity: u32,
}

/// API response for a batch row mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLogMutationResponse {
    /// The month total for the service after all days are applied.
    pub total: u64,
    /// The number of days written or deleted.
    pub days_saved: usize,
}

/// API request to clear a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearMonthRequest {
    /// The resident the tabel belongs to.
    pub resident_id: i64,
    /// The year of the target month.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
}

/// API request to clear one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearDayRequest {
    /// The resident the tabel belongs to.
    pub resident_id: i64,
    /// The year of the target month.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
    /// The day of the month (1-based).
    pub day: u8,
}

/// API response for clear operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearResponse {
    /// The number of log rows deleted.
    pub deleted_count: usize,
}

/// API request to autofill a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofillRequest {
    /// The resident the tabel belongs to.
    pub resident_id: i64,
    /// The year of the target month.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
}

/// API response for an autofill run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofillResponse {
    /// Rows created or updated.
    pub filled_count: usize,
}

/// API response for the month grid read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLogsResponse {
    /// Quantities keyed `"{service_id}-{day}"`, as the tabel screen
    /// consumes them.
    pub logs: BTreeMap<String, u64>,
    /// The number of days in the month.
    pub days_in_month: u8,
    /// Days falling on Saturday or Sunday.
    pub weekend_days: Vec<u8>,
    /// Fixed public holidays falling in the month.
    pub holiday_days: Vec<u8>,
    /// Whether the month is locked.
    pub is_locked: bool,
}

/// API request to toggle a month lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLockRequest {
    /// The resident the tabel belongs to.
    pub resident_id: i64,
    /// The year of the target month.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
}

/// API response for a lock toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLockResponse {
    /// The lock state after the toggle.
    pub is_locked: bool,
}

/// API request to change a resident's placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementChangeRequest {
    /// The resident being moved.
    pub resident_id: i64,
    /// The target department, or `None` to remove placement.
    pub department_id: Option<i64>,
    /// The target room (may be empty).
    pub room: String,
    /// Free-text reason or comment.
    pub reason: String,
    /// The effective date (ISO 8601); today when omitted.
    pub effective_date: Option<String>,
    /// Admission date to record (ISO 8601), if supplied.
    pub admission_date: Option<String>,
    /// Discharge date to record (ISO 8601), if supplied.
    pub discharge_date: Option<String>,
}

/// API response for a placement change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementChangeResponse {
    /// The resident's ID.
    pub resident_id: i64,
    /// The new department name, empty when unplaced.
    pub department: String,
    /// The new room.
    pub room: String,
    /// The new derived status.
    pub status: String,
}

/// Summary of a resident for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentInfo {
    /// The resident's ID.
    pub resident_id: i64,
    /// The resident's full name.
    pub full_name: String,
    /// The room within the department.
    pub room: String,
    /// The derived status.
    pub status: String,
}

/// One status history entry of a resident detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistoryInfo {
    /// The department before the change, if any.
    pub old_department_id: Option<i64>,
    /// The department after the change, if any.
    pub new_department_id: Option<i64>,
    /// The status before the change.
    pub old_status: Option<String>,
    /// The status after the change.
    pub new_status: Option<String>,
    /// The actor who made the change.
    pub changed_by: String,
    /// Free-text reason.
    pub reason: String,
    /// When the record was created.
    pub created_at: String,
}

/// One placement history entry of a resident detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementHistoryInfo {
    /// The department before the change, if any.
    pub old_department_id: Option<i64>,
    /// The department after the change, if any.
    pub new_department_id: Option<i64>,
    /// The room before the change.
    pub old_room: Option<String>,
    /// The room after the change.
    pub new_room: Option<String>,
    /// The effective date of the move.
    pub date: String,
    /// Free-text reason.
    pub reason: String,
    /// The actor who made the change.
    pub changed_by: String,
}

/// API response for a resident detail read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentDetailResponse {
    /// The resident's ID.
    pub resident_id: i64,
    /// The resident's full name.
    pub full_name: String,
    /// The resident's birth date (ISO 8601).
    pub birth_date: String,
    /// The current department name, empty when unplaced.
    pub department: String,
    /// The current room.
    pub room: String,
    /// The derived status.
    pub status: String,
    /// Admission date (ISO 8601), if recorded.
    pub admission_date: Option<String>,
    /// Discharge date (ISO 8601), if recorded.
    pub discharge_date: Option<String>,
    /// Recent status history, newest first.
    pub status_history: Vec<StatusHistoryInfo>,
    /// Recent placement history, newest first.
    pub placement_history: Vec<PlacementHistoryInfo>,
}

/// API request to record monthly income/pension figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyDataRequest {
    /// The resident the figures belong to.
    pub resident_id: i64,
    /// The year of the target month.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
    /// Average per-capita income as a decimal string.
    pub income: Option<String>,
    /// Pension fund transfer as a decimal string.
    pub pension_payment: Option<String>,
}

/// API response for a monthly data upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyDataResponse {
    /// The resident the figures belong to.
    pub resident_id: i64,
    /// The year of the target month.
    pub year: i32,
    /// The month number (1-12).
    pub month: u8,
}

/// API request to replace a resident's entitlement set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractUpdateRequest {
    /// The resident whose contract is edited.
    pub resident_id: i64,
    /// The selected service IDs.
    pub service_ids: Vec<i64>,
    /// The contract number, if updated.
    pub number: Option<String>,
    /// The start date (ISO 8601), if updated.
    pub date_start: Option<String>,
    /// The end date (ISO 8601); clears the bound when omitted.
    pub date_end: Option<String>,
}

/// API response for a contract update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractUpdateResponse {
    /// The contract that was created or updated.
    pub contract_id: i64,
    /// The number of services now linked.
    pub service_count: usize,
}

/// One service of the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// The service's ID.
    pub service_id: i64,
    /// The dotted hierarchical code.
    pub code: String,
    /// The service name.
    pub name: String,
    /// The current price as a decimal string.
    pub price: String,
    /// The monthly cap, if any.
    pub max_quantity_per_month: Option<u32>,
}

/// One category of the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    /// The category's ID.
    pub category_id: i64,
    /// The category name.
    pub name: String,
    /// The category's services in numeric code order.
    pub services: Vec<ServiceInfo>,
}

/// API response for the service catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalogResponse {
    /// Categories holding at least one listed service.
    pub categories: Vec<CategoryInfo>,
}

/// One department of the department listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentInfo {
    /// The department's ID.
    pub department_id: i64,
    /// The display name.
    pub name: String,
    /// The unique code.
    pub code: String,
    /// The department type.
    pub department_type: String,
}

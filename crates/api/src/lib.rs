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
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod input;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{CallerIdentity, authorize_department_access, authorize_resident_access};
pub use error::{ApiError, translate_core_error, translate_domain_error,
    translate_persistence_error};
pub use handlers::{
    autofill_month, change_placement, clear_day, clear_month, get_log_cell, get_resident_detail,
    list_departments, list_residents, list_services, month_logs, replace_contract_services,
    save_log_cell, save_log_row, toggle_lock, update_monthly_data,
};
pub use request_response::{
    AutofillRequest, AutofillResponse, BatchLogMutationRequest, BatchLogMutationResponse,
    CategoryInfo, ClearDayRequest, ClearMonthRequest, ClearResponse, ContractUpdateRequest,
    ContractUpdateResponse, DepartmentInfo, GetLogCellResponse, LogMutationRequest,
    LogMutationResponse, MonthLogsResponse, MonthlyDataRequest, MonthlyDataResponse,
    PlacementChangeRequest, PlacementChangeResponse, PlacementHistoryInfo, ResidentDetailResponse,
    ResidentInfo, ServiceCatalogResponse, ServiceInfo, StatusHistoryInfo, ToggleLockRequest,
    ToggleLockResponse,
};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for tabel, placement, resident, and catalog
//! operations.
//!
//! Every resident-scoped handler loads the resident first, runs the
//! centralized authorization check, validates its input, asks the core
//! engine for a transition, and only then lets the persistence layer commit
//! it under the documented transaction scope.

use std::collections::{BTreeMap, BTreeSet};

use carelog_core::{
    AutofillContext, TabelCommand, TabelContext, TabelOutcome, apply, apply_placement_change,
    plan_autofill,
};
use carelog_core::{PlacementChange, PlacementState};
use carelog_domain::{
    Resident, TabelMonth, compare_service_codes, parse_iso_date, parse_money,
};
use carelog_persistence::Persistence;
use tracing::info;

use crate::auth::{CallerIdentity, authorize_department_access, authorize_resident_access};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::input::{validate_day_list, validate_history_limit};
use crate::request_response::{
    AutofillRequest, AutofillResponse, BatchLogMutationRequest, BatchLogMutationResponse,
    CategoryInfo, ClearDayRequest, ClearMonthRequest, ClearResponse, ContractUpdateRequest,
    ContractUpdateResponse, DepartmentInfo, GetLogCellResponse, LogMutationRequest,
    LogMutationResponse, MonthLogsResponse, MonthlyDataRequest, MonthlyDataResponse,
    PlacementChangeRequest, PlacementChangeResponse, PlacementHistoryInfo, ResidentDetailResponse,
    ResidentInfo, ServiceCatalogResponse, ServiceInfo, StatusHistoryInfo, ToggleLockRequest,
    ToggleLockResponse,
};

/// Loads a resident and verifies the caller may operate on them.
fn load_authorized_resident(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    resident_id: i64,
) -> Result<Resident, ApiError> {
    let resident = persistence
        .get_resident(resident_id)
        .map_err(translate_persistence_error)?;
    authorize_resident_access(caller, &resident)?;
    Ok(resident)
}

fn tabel_month(year: i32, month: u8) -> Result<TabelMonth, ApiError> {
    TabelMonth::new(year, month).map_err(translate_domain_error)
}

fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<time::Date>, ApiError> {
    value
        .map(|v| {
            parse_iso_date(v).map_err(|_| ApiError::InvalidInput {
                field: field.to_string(),
                message: format!("'{v}' is not a valid ISO 8601 date"),
            })
        })
        .transpose()
}

// ============================================================================
// Tabel operations
// ============================================================================

/// Reads one tabel cell.
///
/// # Errors
///
/// Returns an error if the caller lacks access, the resident is unknown, or
/// the date is malformed.
pub fn get_log_cell(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    resident_id: i64,
    service_id: i64,
    date: &str,
) -> Result<GetLogCellResponse, ApiError> {
    load_authorized_resident(persistence, caller, resident_id)?;
    let date = parse_iso_date(date).map_err(translate_domain_error)?;
    let quantity = persistence
        .get_cell(resident_id, service_id, date)
        .map_err(translate_persistence_error)?;
    Ok(GetLogCellResponse { quantity })
}

/// Applies a single-cell mutation: lock gate, quota check, one-transaction
/// commit.
///
/// # Errors
///
/// Returns an error if the caller lacks access, the month is locked, the
/// quota would be exceeded, or the input is malformed. Nothing is written
/// in any of those cases.
pub fn save_log_cell(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &LogMutationRequest,
) -> Result<LogMutationResponse, ApiError> {
    load_authorized_resident(persistence, caller, request.resident_id)?;
    let month = tabel_month(request.year, request.month)?;

    let terms = persistence
        .service_terms(request.service_id)
        .map_err(translate_persistence_error)?;
    let context = persistence
        .load_month_context(request.resident_id, month)
        .map_err(translate_persistence_error)?;

    let transition = apply(
        &TabelContext {
            month: context,
            service: Some(terms),
        },
        TabelCommand::SetCell {
            day: request.day,
            quantity: request.quantity,
        },
        &caller.to_audit_actor(),
    )
    .map_err(translate_core_error)?;

    persistence
        .apply_tabel_transition(request.resident_id, month, &transition)
        .map_err(translate_persistence_error)?;

    match transition.outcome {
        TabelOutcome::Cell {
            quantity,
            total,
            max_quantity,
        } => Ok(LogMutationResponse {
            quantity,
            total,
            max_quantity,
        }),
        _ => Err(ApiError::Internal {
            message: String::from("Unexpected outcome for a cell mutation"),
        }),
    }
}

/// Applies a batch row mutation: the same quantity across a day list, one
/// commit per day, no quota check.
///
/// # Errors
///
/// Returns an error if the caller lacks access, the month is locked, or the
/// input is malformed. A day failing mid-batch leaves earlier days applied.
pub fn save_log_row(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &BatchLogMutationRequest,
) -> Result<BatchLogMutationResponse, ApiError> {
    load_authorized_resident(persistence, caller, request.resident_id)?;
    validate_day_list(&request.days)?;
    let month = tabel_month(request.year, request.month)?;

    let terms = persistence
        .service_terms(request.service_id)
        .map_err(translate_persistence_error)?;
    let context = persistence
        .load_month_context(request.resident_id, month)
        .map_err(translate_persistence_error)?;

    let transition = apply(
        &TabelContext {
            month: context,
            service: Some(terms),
        },
        TabelCommand::SetRow {
            days: request.days.clone(),
            quantity: request.quantity,
        },
        &caller.to_audit_actor(),
    )
    .map_err(translate_core_error)?;

    persistence
        .apply_row_transition(request.resident_id, month, &transition)
        .map_err(translate_persistence_error)?;

    match transition.outcome {
        TabelOutcome::Row { total, days_saved } => {
            Ok(BatchLogMutationResponse { total, days_saved })
        }
        _ => Err(ApiError::Internal {
            message: String::from("Unexpected outcome for a row mutation"),
        }),
    }
}

/// Clears every log row of a resident's month.
///
/// # Errors
///
/// Returns an error if the caller lacks access or the month is locked.
pub fn clear_month(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &ClearMonthRequest,
) -> Result<ClearResponse, ApiError> {
    load_authorized_resident(persistence, caller, request.resident_id)?;
    let month = tabel_month(request.year, request.month)?;

    let context = persistence
        .load_month_context(request.resident_id, month)
        .map_err(translate_persistence_error)?;

    let transition = apply(
        &TabelContext {
            month: context,
            service: None,
        },
        TabelCommand::ClearMonth,
        &caller.to_audit_actor(),
    )
    .map_err(translate_core_error)?;

    let report = persistence
        .apply_tabel_transition(request.resident_id, month, &transition)
        .map_err(translate_persistence_error)?;

    Ok(ClearResponse {
        deleted_count: report.rows_deleted,
    })
}

/// Clears every log row of a resident's day, across all services.
///
/// # Errors
///
/// Returns an error if the caller lacks access, the month is locked, or the
/// day does not exist.
pub fn clear_day(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &ClearDayRequest,
) -> Result<ClearResponse, ApiError> {
    load_authorized_resident(persistence, caller, request.resident_id)?;
    let month = tabel_month(request.year, request.month)?;

    let context = persistence
        .load_month_context(request.resident_id, month)
        .map_err(translate_persistence_error)?;

    let transition = apply(
        &TabelContext {
            month: context,
            service: None,
        },
        TabelCommand::ClearDay { day: request.day },
        &caller.to_audit_actor(),
    )
    .map_err(translate_core_error)?;

    let report = persistence
        .apply_tabel_transition(request.resident_id, month, &transition)
        .map_err(translate_persistence_error)?;

    Ok(ClearResponse {
        deleted_count: report.rows_deleted,
    })
}

/// Runs autofill over a resident's month, committing the whole projection
/// in one transaction.
///
/// # Errors
///
/// Returns an error if the caller lacks access, the month is locked, or the
/// resident is not active (`AutofillSkipped` — zero writes by design).
pub fn autofill_month(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &AutofillRequest,
) -> Result<AutofillResponse, ApiError> {
    let resident = load_authorized_resident(persistence, caller, request.resident_id)?;
    let month = tabel_month(request.year, request.month)?;

    let context = persistence
        .load_month_context(request.resident_id, month)
        .map_err(translate_persistence_error)?;
    let services = persistence
        .entitled_services(request.resident_id)
        .map_err(translate_persistence_error)?;
    let schedules = match resident.department_id() {
        Some(department_id) => persistence
            .department_schedules(department_id)
            .map_err(translate_persistence_error)?,
        None => BTreeMap::new(),
    };

    let transition = plan_autofill(
        &AutofillContext {
            month: context,
            status: resident.status(),
            services,
            schedules,
        },
        &caller.to_audit_actor(),
    )
    .map_err(translate_core_error)?;

    persistence
        .apply_tabel_transition(request.resident_id, month, &transition)
        .map_err(translate_persistence_error)?;

    match transition.outcome {
        TabelOutcome::Autofill { filled_count } => {
            info!(
                resident_id = request.resident_id,
                filled_count, "Autofill completed"
            );
            Ok(AutofillResponse { filled_count })
        }
        _ => Err(ApiError::Internal {
            message: String::from("Unexpected outcome for an autofill run"),
        }),
    }
}

/// Reads the month grid: quantities per `(service, day)` plus the calendar
/// metadata the tabel screen renders.
///
/// # Errors
///
/// Returns an error if the caller lacks access or the month is malformed.
pub fn month_logs(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    resident_id: i64,
    year: i32,
    month: u8,
) -> Result<MonthLogsResponse, ApiError> {
    load_authorized_resident(persistence, caller, resident_id)?;
    let month = tabel_month(year, month)?;

    let context = persistence
        .load_month_context(resident_id, month)
        .map_err(translate_persistence_error)?;

    let logs = context
        .cells
        .iter()
        .map(|((service_id, day), quantity)| {
            (format!("{service_id}-{day}"), u64::from(*quantity))
        })
        .collect();

    Ok(MonthLogsResponse {
        logs,
        days_in_month: month.days_in_month(),
        weekend_days: month.weekend_days(),
        holiday_days: month.holiday_days(),
        is_locked: context.is_locked(),
    })
}

/// Toggles the month lock. The first toggle always locks.
///
/// # Errors
///
/// Returns an error if the caller lacks access.
pub fn toggle_lock(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &ToggleLockRequest,
) -> Result<ToggleLockResponse, ApiError> {
    load_authorized_resident(persistence, caller, request.resident_id)?;
    let month = tabel_month(request.year, request.month)?;

    let context = persistence
        .load_month_context(request.resident_id, month)
        .map_err(translate_persistence_error)?;

    let transition = apply(
        &TabelContext {
            month: context,
            service: None,
        },
        TabelCommand::ToggleLock,
        &caller.to_audit_actor(),
    )
    .map_err(translate_core_error)?;

    persistence
        .apply_tabel_transition(request.resident_id, month, &transition)
        .map_err(translate_persistence_error)?;

    match transition.outcome {
        TabelOutcome::LockToggled { is_locked } => Ok(ToggleLockResponse { is_locked }),
        _ => Err(ApiError::Internal {
            message: String::from("Unexpected outcome for a lock toggle"),
        }),
    }
}

// ============================================================================
// Placement and residents
// ============================================================================

/// Applies a placement change: department/room update plus the history
/// appends the change triggers, in one transaction.
///
/// # Errors
///
/// Returns an error if the caller lacks access, a referenced department is
/// unknown, or a date field is malformed.
pub fn change_placement(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &PlacementChangeRequest,
) -> Result<PlacementChangeResponse, ApiError> {
    let resident = load_authorized_resident(persistence, caller, request.resident_id)?;

    let new_department = request
        .department_id
        .map(|id| {
            persistence
                .get_department(id)
                .map_err(translate_persistence_error)
        })
        .transpose()?;

    let effective_date = parse_optional_date("effective_date", request.effective_date.as_deref())?
        .unwrap_or_else(|| time::OffsetDateTime::now_utc().date());
    let admission_date = parse_optional_date("admission_date", request.admission_date.as_deref())?;
    let discharge_date = parse_optional_date("discharge_date", request.discharge_date.as_deref())?;

    let before = PlacementState {
        department: resident.department.clone(),
        room: resident.room.clone(),
    };
    let department_name = new_department
        .as_ref()
        .map(|d| d.name().to_string())
        .unwrap_or_default();

    let transition = apply_placement_change(
        request.resident_id,
        &before,
        &PlacementChange {
            new_department,
            new_room: request.room.clone(),
            reason: request.reason.clone(),
            effective_date,
        },
        &caller.to_audit_actor(),
    );

    persistence
        .apply_placement_transition(
            request.resident_id,
            &transition,
            admission_date,
            discharge_date,
        )
        .map_err(translate_persistence_error)?;

    info!(resident_id = request.resident_id, "Placement change applied");

    Ok(PlacementChangeResponse {
        resident_id: request.resident_id,
        department: department_name,
        room: transition.new_room,
        status: transition
            .new_status
            .map_or_else(|| String::from("active"), |s| s.as_str().to_string()),
    })
}

/// Lists the residents of one residential-care department.
///
/// # Errors
///
/// Returns an error if the caller lacks access to the department.
pub fn list_residents(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    department_id: i64,
) -> Result<Vec<ResidentInfo>, ApiError> {
    authorize_department_access(caller, department_id)?;
    let residents = persistence
        .list_residents_by_department(department_id)
        .map_err(translate_persistence_error)?;
    Ok(residents
        .into_iter()
        .filter_map(|resident| {
            resident.resident_id.map(|resident_id| ResidentInfo {
                resident_id,
                full_name: resident.full_name(),
                room: resident.room.clone(),
                status: resident.status().as_str().to_string(),
            })
        })
        .collect())
}

/// Reads a resident's detail: placement, derived status, recent histories.
///
/// # Errors
///
/// Returns an error if the caller lacks access or the limit is out of range.
pub fn get_resident_detail(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    resident_id: i64,
    history_limit: i64,
) -> Result<ResidentDetailResponse, ApiError> {
    validate_history_limit(history_limit)?;
    let resident = load_authorized_resident(persistence, caller, resident_id)?;

    let status_history = persistence
        .recent_status_history(resident_id, history_limit)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|row| StatusHistoryInfo {
            old_department_id: row.old_department_id,
            new_department_id: row.new_department_id,
            old_status: row.old_status,
            new_status: row.new_status,
            changed_by: row.changed_by,
            reason: row.reason,
            created_at: row.created_at,
        })
        .collect();
    let placement_history = persistence
        .recent_placement_history(resident_id, history_limit)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|row| PlacementHistoryInfo {
            old_department_id: row.old_department_id,
            new_department_id: row.new_department_id,
            old_room: row.old_room,
            new_room: row.new_room,
            date: row.date,
            reason: row.reason,
            changed_by: row.changed_by,
        })
        .collect();

    Ok(ResidentDetailResponse {
        resident_id,
        full_name: resident.full_name(),
        birth_date: resident.birth_date.to_string(),
        department: resident
            .department
            .as_ref()
            .map(|d| d.name().to_string())
            .unwrap_or_default(),
        room: resident.room.clone(),
        status: resident.status().as_str().to_string(),
        admission_date: resident.admission_date.map(|d| d.to_string()),
        discharge_date: resident.discharge_date.map(|d| d.to_string()),
        status_history,
        placement_history,
    })
}

/// Records monthly income/pension figures for a resident.
///
/// Both amounts are parsed before any write; a malformed decimal rejects
/// the whole request.
///
/// # Errors
///
/// Returns an error if the caller lacks access or an amount is malformed.
pub fn update_monthly_data(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &MonthlyDataRequest,
) -> Result<MonthlyDataResponse, ApiError> {
    load_authorized_resident(persistence, caller, request.resident_id)?;
    let month = tabel_month(request.year, request.month)?;

    let income = request
        .income
        .as_deref()
        .map(|v| parse_money("income", v).map_err(translate_domain_error))
        .transpose()?;
    let pension_payment = request
        .pension_payment
        .as_deref()
        .map(|v| parse_money("pension_payment", v).map_err(translate_domain_error))
        .transpose()?;

    persistence
        .upsert_monthly_data(
            request.resident_id,
            month.year(),
            month.month(),
            income,
            pension_payment,
        )
        .map_err(translate_persistence_error)?;

    Ok(MonthlyDataResponse {
        resident_id: request.resident_id,
        year: month.year(),
        month: month.month(),
    })
}

// ============================================================================
// Contracts and catalog
// ============================================================================

/// Replaces the entitlement set of the resident's active contract,
/// creating the contract on first edit.
///
/// # Errors
///
/// Returns an error if the caller lacks access or a date is malformed.
pub fn replace_contract_services(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    request: &ContractUpdateRequest,
) -> Result<ContractUpdateResponse, ApiError> {
    load_authorized_resident(persistence, caller, request.resident_id)?;

    let date_start = parse_optional_date("date_start", request.date_start.as_deref())?;
    let date_end = parse_optional_date("date_end", request.date_end.as_deref())?;
    let today = time::OffsetDateTime::now_utc().date();

    let contract_id = persistence
        .replace_contract_services(
            request.resident_id,
            &request.service_ids,
            request.number.as_deref(),
            date_start,
            date_end,
            today,
        )
        .map_err(translate_persistence_error)?;

    let service_count = request
        .service_ids
        .iter()
        .collect::<BTreeSet<_>>()
        .len();

    Ok(ContractUpdateResponse {
        contract_id,
        service_count,
    })
}

/// Lists the service catalog grouped by category in numeric code order,
/// optionally restricted to one resident's entitlements.
///
/// # Errors
///
/// Returns an error if the caller lacks access to the resident whose
/// entitlements filter the listing.
pub fn list_services(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
    entitled_for_resident: Option<i64>,
) -> Result<ServiceCatalogResponse, ApiError> {
    let entitled = entitled_for_resident
        .map(|resident_id| {
            load_authorized_resident(persistence, caller, resident_id)?;
            persistence
                .entitled_service_ids(resident_id)
                .map_err(translate_persistence_error)
        })
        .transpose()?;

    let categories = persistence
        .list_categories()
        .map_err(translate_persistence_error)?;
    let services = persistence
        .list_active_services()
        .map_err(translate_persistence_error)?;

    let mut grouped = Vec::new();
    for (category_id, name, _) in categories {
        let mut listed: Vec<ServiceInfo> = services
            .iter()
            .filter(|row| row.category_id == category_id)
            .filter(|row| {
                entitled
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&row.service_id))
            })
            .map(|row| ServiceInfo {
                service_id: row.service_id,
                code: row.code.clone(),
                name: row.name.clone(),
                price: row.price.clone(),
                max_quantity_per_month: row
                    .max_quantity_per_month
                    .and_then(|m| u32::try_from(m).ok()),
            })
            .collect();
        listed.sort_by(|a, b| compare_service_codes(&a.code, &b.code));
        if !listed.is_empty() {
            grouped.push(CategoryInfo {
                category_id,
                name,
                services: listed,
            });
        }
    }

    Ok(ServiceCatalogResponse { categories: grouped })
}

/// Lists residential-care departments visible to the caller.
///
/// Admin/HR callers see every residential-care department; other callers
/// see only their own.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub fn list_departments(
    persistence: &mut Persistence,
    caller: &CallerIdentity,
) -> Result<Vec<DepartmentInfo>, ApiError> {
    let departments = persistence
        .list_departments(true)
        .map_err(translate_persistence_error)?;
    Ok(departments
        .into_iter()
        .filter(|department| {
            caller.is_admin_or_hr || caller.department_id == department.department_id()
        })
        .filter_map(|department| {
            department.department_id().map(|department_id| DepartmentInfo {
                department_id,
                name: department.name().to_string(),
                code: department.code().to_string(),
                department_type: department.department_type().as_str().to_string(),
            })
        })
        .collect())
}

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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use carelog_api::{
    ApiError, AutofillRequest, BatchLogMutationRequest, CallerIdentity, ClearDayRequest,
    ClearMonthRequest, ContractUpdateRequest, LogMutationRequest, MonthlyDataRequest,
    PlacementChangeRequest, ToggleLockRequest, autofill_month, change_placement, clear_day,
    clear_month, get_log_cell, get_resident_detail, list_departments, list_residents,
    list_services, month_logs, replace_contract_services, save_log_cell, save_log_row,
    toggle_lock, update_monthly_data,
};
use carelog_persistence::Persistence;

/// Carelog Server - HTTP server for the care-facility administration system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer behind a mutex: one writer at a time, which is
    /// also what serializes read-modify-write sequences per operation.
    persistence: Arc<Mutex<Persistence>>,
}

/// Caller identity fields supplied by the external identity facility.
///
/// The server performs no authentication of its own; POST bodies carry these
/// fields as a nested `caller` object, GET routes inline them in the query
/// string.
#[derive(Debug, Clone, Deserialize)]
struct CallerFields {
    /// The caller's unique identifier.
    caller_id: String,
    /// Whether the caller holds the administrator or HR role.
    is_admin_or_hr: bool,
    /// The department the caller is assigned to, if any.
    department_id: Option<i64>,
}

impl CallerFields {
    fn identity(&self) -> CallerIdentity {
        CallerIdentity::new(
            self.caller_id.clone(),
            self.is_admin_or_hr,
            self.department_id,
        )
    }
}

/// Maps an API error onto an HTTP response.
///
/// `AutofillSkipped` is a zero-write success by design and keeps status 200
/// with a descriptive message, mirroring the operation contract.
fn error_response(err: ApiError) -> Response {
    match err {
        ApiError::AccessDenied { .. } => {
            (StatusCode::FORBIDDEN, Json(json!({ "error": err.to_string() }))).into_response()
        }
        ApiError::TabelLocked { .. } => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": err.to_string(), "locked": true })),
        )
            .into_response(),
        ApiError::QuotaExceeded {
            limit,
            current_total,
        } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": err.to_string(),
                "max_quantity": limit,
                "current_total": current_total.to_string(),
            })),
        )
            .into_response(),
        ApiError::NotFound { .. } => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": err.to_string() }))).into_response()
        }
        ApiError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": err.to_string() }))).into_response()
        }
        ApiError::AutofillSkipped { .. } => (
            StatusCode::OK,
            Json(json!({ "error": err.to_string(), "filled_count": 0 })),
        )
            .into_response(),
        ApiError::Internal { .. } => {
            error!(error = %err, "Internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Tabel routes
// ============================================================================

/// Query-string variant of the caller fields.
///
/// GET routes carry the caller fields inline in the query string; nested
/// objects do not survive URL encoding.
#[derive(Debug, Clone, Deserialize)]
struct QueryCaller {
    caller_id: String,
    is_admin_or_hr: bool,
    department_id: Option<i64>,
}

impl QueryCaller {
    fn identity(&self) -> CallerIdentity {
        CallerIdentity::new(
            self.caller_id.clone(),
            self.is_admin_or_hr,
            self.department_id,
        )
    }
}

#[derive(Debug, Deserialize)]
struct GetCellParams {
    resident_id: i64,
    service_id: i64,
    /// ISO 8601 calendar date.
    date: String,
}

async fn handle_get_cell(
    AxumState(state): AxumState<AppState>,
    Query(caller): Query<QueryCaller>,
    Query(params): Query<GetCellParams>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match get_log_cell(
        &mut persistence,
        &caller.identity(),
        params.resident_id,
        params.service_id,
        &params.date,
    ) {
        Ok(response) => Json(json!({ "quantity": response.quantity.to_string() })).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct SaveCellBody {
    caller: CallerFields,
    resident_id: i64,
    service_id: i64,
    year: i32,
    month: u8,
    day: u8,
    quantity: u32,
}

async fn handle_save_cell(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<SaveCellBody>,
) -> Response {
    let request = LogMutationRequest {
        resident_id: body.resident_id,
        service_id: body.service_id,
        year: body.year,
        month: body.month,
        day: body.day,
        quantity: body.quantity,
    };
    let mut persistence = state.persistence.lock().await;
    match save_log_cell(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "quantity": response.quantity,
            "total": response.total.to_string(),
            "max_quantity": response.max_quantity,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct SaveRowBody {
    caller: CallerFields,
    resident_id: i64,
    service_id: i64,
    year: i32,
    month: u8,
    days: Vec<u8>,
    quantity: u32,
}

async fn handle_save_row(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<SaveRowBody>,
) -> Response {
    let request = BatchLogMutationRequest {
        resident_id: body.resident_id,
        service_id: body.service_id,
        year: body.year,
        month: body.month,
        days: body.days.clone(),
        quantity: body.quantity,
    };
    let mut persistence = state.persistence.lock().await;
    match save_log_row(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "total": response.total.to_string(),
            "days_saved": response.days_saved,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct MonthScopeBody {
    caller: CallerFields,
    resident_id: i64,
    year: i32,
    month: u8,
}

async fn handle_clear_month(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<MonthScopeBody>,
) -> Response {
    let request = ClearMonthRequest {
        resident_id: body.resident_id,
        year: body.year,
        month: body.month,
    };
    let mut persistence = state.persistence.lock().await;
    match clear_month(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "deleted_count": response.deleted_count,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct ClearDayBody {
    caller: CallerFields,
    resident_id: i64,
    year: i32,
    month: u8,
    day: u8,
}

async fn handle_clear_day(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<ClearDayBody>,
) -> Response {
    let request = ClearDayRequest {
        resident_id: body.resident_id,
        year: body.year,
        month: body.month,
        day: body.day,
    };
    let mut persistence = state.persistence.lock().await;
    match clear_day(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "deleted_count": response.deleted_count,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

async fn handle_autofill(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<MonthScopeBody>,
) -> Response {
    let request = AutofillRequest {
        resident_id: body.resident_id,
        year: body.year,
        month: body.month,
    };
    let mut persistence = state.persistence.lock().await;
    match autofill_month(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "filled_count": response.filled_count,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct MonthScopeParams {
    resident_id: i64,
    year: i32,
    month: u8,
}

async fn handle_month_logs(
    AxumState(state): AxumState<AppState>,
    Query(caller): Query<QueryCaller>,
    Query(params): Query<MonthScopeParams>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match month_logs(
        &mut persistence,
        &caller.identity(),
        params.resident_id,
        params.year,
        params.month,
    ) {
        Ok(response) => Json(json!({
            "success": true,
            "logs": response.logs,
            "days_in_month": response.days_in_month,
            "weekend_days": response.weekend_days,
            "holiday_days": response.holiday_days,
            "is_locked": response.is_locked,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

async fn handle_toggle_lock(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<MonthScopeBody>,
) -> Response {
    let request = ToggleLockRequest {
        resident_id: body.resident_id,
        year: body.year,
        month: body.month,
    };
    let mut persistence = state.persistence.lock().await;
    match toggle_lock(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "is_locked": response.is_locked,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

// ============================================================================
// Resident routes
// ============================================================================

#[derive(Debug, Deserialize)]
struct PlacementBody {
    caller: CallerFields,
    department_id: Option<i64>,
    #[serde(default)]
    room: String,
    #[serde(default)]
    reason: String,
    effective_date: Option<String>,
    admission_date: Option<String>,
    discharge_date: Option<String>,
}

async fn handle_change_placement(
    AxumState(state): AxumState<AppState>,
    Path(resident_id): Path<i64>,
    Json(body): Json<PlacementBody>,
) -> Response {
    let request = PlacementChangeRequest {
        resident_id,
        department_id: body.department_id,
        room: body.room.clone(),
        reason: body.reason.clone(),
        effective_date: body.effective_date.clone(),
        admission_date: body.admission_date.clone(),
        discharge_date: body.discharge_date.clone(),
    };
    let mut persistence = state.persistence.lock().await;
    match change_placement(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "recipient": {
                "id": response.resident_id,
                "department": response.department,
                "room": response.room,
                "status": response.status,
            },
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct ListResidentsParams {
    /// The target department; distinct from the caller's `department_id`.
    department: i64,
}

async fn handle_list_residents(
    AxumState(state): AxumState<AppState>,
    Query(caller): Query<QueryCaller>,
    Query(params): Query<ListResidentsParams>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match list_residents(&mut persistence, &caller.identity(), params.department) {
        Ok(residents) => {
            let body: Vec<_> = residents
                .into_iter()
                .map(|r| {
                    json!({
                        "id": r.resident_id,
                        "full_name": r.full_name,
                        "room": r.room,
                        "status": r.status,
                    })
                })
                .collect();
            Json(json!({ "recipients": body })).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn handle_resident_detail(
    AxumState(state): AxumState<AppState>,
    Path(resident_id): Path<i64>,
    Query(caller): Query<QueryCaller>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match get_resident_detail(&mut persistence, &caller.identity(), resident_id, 10) {
        Ok(detail) => Json(json!({
            "id": detail.resident_id,
            "full_name": detail.full_name,
            "birth_date": detail.birth_date,
            "department": detail.department,
            "room": detail.room,
            "status": detail.status,
            "admission_date": detail.admission_date,
            "discharge_date": detail.discharge_date,
            "status_history": detail
                .status_history
                .iter()
                .map(|h| {
                    json!({
                        "old_department_id": h.old_department_id,
                        "new_department_id": h.new_department_id,
                        "old_status": h.old_status,
                        "new_status": h.new_status,
                        "changed_by": h.changed_by,
                        "reason": h.reason,
                        "created_at": h.created_at,
                    })
                })
                .collect::<Vec<_>>(),
            "placement_history": detail
                .placement_history
                .iter()
                .map(|h| {
                    json!({
                        "old_department_id": h.old_department_id,
                        "new_department_id": h.new_department_id,
                        "old_room": h.old_room,
                        "new_room": h.new_room,
                        "date": h.date,
                        "reason": h.reason,
                        "changed_by": h.changed_by,
                    })
                })
                .collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct MonthlyDataBody {
    caller: CallerFields,
    year: i32,
    month: u8,
    income: Option<String>,
    pension_payment: Option<String>,
}

async fn handle_monthly_data(
    AxumState(state): AxumState<AppState>,
    Path(resident_id): Path<i64>,
    Json(body): Json<MonthlyDataBody>,
) -> Response {
    let request = MonthlyDataRequest {
        resident_id,
        year: body.year,
        month: body.month,
        income: body.income.clone(),
        pension_payment: body.pension_payment.clone(),
    };
    let mut persistence = state.persistence.lock().await;
    match update_monthly_data(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "resident_id": response.resident_id,
            "year": response.year,
            "month": response.month,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct ContractBody {
    caller: CallerFields,
    service_ids: Vec<i64>,
    number: Option<String>,
    date_start: Option<String>,
    date_end: Option<String>,
}

async fn handle_update_contract(
    AxumState(state): AxumState<AppState>,
    Path(resident_id): Path<i64>,
    Json(body): Json<ContractBody>,
) -> Response {
    let request = ContractUpdateRequest {
        resident_id,
        service_ids: body.service_ids.clone(),
        number: body.number.clone(),
        date_start: body.date_start.clone(),
        date_end: body.date_end.clone(),
    };
    let mut persistence = state.persistence.lock().await;
    match replace_contract_services(&mut persistence, &body.caller.identity(), &request) {
        Ok(response) => Json(json!({
            "success": true,
            "contract_id": response.contract_id,
            "service_count": response.service_count,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

// ============================================================================
// Catalog routes
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListServicesParams {
    /// Restrict the listing to this resident's entitlements.
    resident_id: Option<i64>,
}

async fn handle_list_services(
    AxumState(state): AxumState<AppState>,
    Query(caller): Query<QueryCaller>,
    Query(params): Query<ListServicesParams>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match list_services(&mut persistence, &caller.identity(), params.resident_id) {
        Ok(catalog) => {
            let categories: Vec<_> = catalog
                .categories
                .iter()
                .map(|category| {
                    json!({
                        "id": category.category_id,
                        "name": category.name,
                        "services": category
                            .services
                            .iter()
                            .map(|service| {
                                json!({
                                    "id": service.service_id,
                                    "code": service.code,
                                    "name": service.name,
                                    "price": service.price,
                                    "max_quantity_per_month": service.max_quantity_per_month,
                                })
                            })
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
            Json(json!({ "categories": categories })).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn handle_list_departments(
    AxumState(state): AxumState<AppState>,
    Query(caller): Query<QueryCaller>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    match list_departments(&mut persistence, &caller.identity()) {
        Ok(departments) => {
            let body: Vec<_> = departments
                .iter()
                .map(|d| {
                    json!({
                        "id": d.department_id,
                        "name": d.name,
                        "code": d.code,
                        "department_type": d.department_type,
                    })
                })
                .collect();
            Json(json!({ "departments": body })).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/tabel/cell", get(handle_get_cell))
        .route("/tabel/cell", post(handle_save_cell))
        .route("/tabel/row", post(handle_save_row))
        .route("/tabel/clear_month", post(handle_clear_month))
        .route("/tabel/clear_day", post(handle_clear_day))
        .route("/tabel/autofill", post(handle_autofill))
        .route("/tabel/month", get(handle_month_logs))
        .route("/tabel/lock", post(handle_toggle_lock))
        .route("/residents", get(handle_list_residents))
        .route("/residents/{resident_id}", get(handle_resident_detail))
        .route(
            "/residents/{resident_id}/placement",
            post(handle_change_placement),
        )
        .route(
            "/residents/{resident_id}/monthly_data",
            post(handle_monthly_data),
        )
        .route(
            "/residents/{resident_id}/contract",
            post(handle_update_contract),
        )
        .route("/services", get(handle_list_services))
        .route("/departments", get(handle_list_departments))
        .with_state(app_state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let persistence = match &args.database {
        Some(path) => Persistence::new_with_file(path),
        None => Persistence::new_in_memory(),
    };
    let persistence = match persistence {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Failed to initialize persistence");
            std::process::exit(1);
        }
    };

    let app_state = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };
    let app: Router = build_router(app_state);

    let addr = format!("0.0.0.0:{}", args.port);
    info!(addr, "Starting Carelog server");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use carelog_domain::{Department, DepartmentType, PeriodType, Resident};
    use rust_decimal::Decimal;
    use serde_json::Value;
    use time::macros::date;
    use tower::ServiceExt;

    struct Seeded {
        state: AppState,
        resident_id: i64,
        walking_id: i64,
    }

    fn seeded_state() -> Seeded {
        let mut persistence = Persistence::new_in_memory().unwrap();

        let department_id = persistence
            .create_department("Department 1", "D1", DepartmentType::Residential, 30)
            .unwrap();
        let category_id = persistence.create_service_category("Care", 0).unwrap();
        let weekly_id = persistence
            .create_service_frequency("2 per week", "2/wk", PeriodType::Week, Some(2), false)
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
        persistence
            .replace_contract_services(
                resident_id,
                &[walking_id],
                None,
                None,
                None,
                date!(2026 - 01 - 15),
            )
            .unwrap();

        Seeded {
            state: AppState {
                persistence: Arc::new(Mutex::new(persistence)),
            },
            resident_id,
            walking_id,
        }
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn cell_body(seeded: &Seeded, day: u8, quantity: u32) -> Value {
        json!({
            "caller": {
                "caller_id": "admin-1",
                "is_admin_or_hr": true,
                "department_id": null,
            },
            "resident_id": seeded.resident_id,
            "service_id": seeded.walking_id,
            "year": 2026,
            "month": 6,
            "day": day,
            "quantity": quantity,
        })
    }

    #[tokio::test]
    async fn test_save_cell_roundtrip() {
        let seeded = seeded_state();
        let app = build_router(seeded.state.clone());

        let response = app
            .clone()
            .oneshot(post_json("/tabel/cell", cell_body(&seeded, 3, 2)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["quantity"], 2);
        assert_eq!(body["total"], "2");
        assert_eq!(body["max_quantity"], 8);

        let uri = format!(
            "/tabel/cell?caller_id=admin-1&is_admin_or_hr=true&resident_id={}&service_id={}&date=2026-06-03",
            seeded.resident_id, seeded.walking_id
        );
        let response = app
            .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["quantity"], "2");
    }

    #[tokio::test]
    async fn test_quota_violation_maps_to_bad_request() {
        let seeded = seeded_state();
        let app = build_router(seeded.state.clone());

        for (day, quantity) in [(1, 4), (2, 4)] {
            let response = app
                .clone()
                .oneshot(post_json("/tabel/cell", cell_body(&seeded, day, quantity)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(post_json("/tabel/cell", cell_body(&seeded, 3, 1)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["max_quantity"], 8);
        assert_eq!(body["current_total"], "8");
    }

    #[tokio::test]
    async fn test_locked_month_maps_to_forbidden() {
        let seeded = seeded_state();
        let app = build_router(seeded.state.clone());

        let lock_body = json!({
            "caller": {
                "caller_id": "admin-1",
                "is_admin_or_hr": true,
                "department_id": null,
            },
            "resident_id": seeded.resident_id,
            "year": 2026,
            "month": 6,
        });
        let response = app
            .clone()
            .oneshot(post_json("/tabel/lock", lock_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["is_locked"], true);

        let response = app
            .oneshot(post_json("/tabel/cell", cell_body(&seeded, 3, 1)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = response_json(response).await;
        assert_eq!(body["locked"], true);
    }

    #[tokio::test]
    async fn test_foreign_caller_maps_to_forbidden() {
        let seeded = seeded_state();
        let app = build_router(seeded.state.clone());

        let mut body = cell_body(&seeded, 3, 1);
        body["caller"]["is_admin_or_hr"] = json!(false);
        body["caller"]["department_id"] = json!(999);

        let response = app.oneshot(post_json("/tabel/cell", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_month_grid_includes_metadata() {
        let seeded = seeded_state();
        let app = build_router(seeded.state.clone());

        let uri = format!(
            "/tabel/month?caller_id=admin-1&is_admin_or_hr=true&resident_id={}&year=2026&month=6",
            seeded.resident_id
        );
        let response = app
            .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["days_in_month"], 30);
        assert_eq!(body["is_locked"], false);
        assert_eq!(body["holiday_days"], json!([12]));
    }

    #[tokio::test]
    async fn test_unknown_resident_maps_to_not_found() {
        let seeded = seeded_state();
        let app = build_router(seeded.state.clone());

        let mut body = cell_body(&seeded, 3, 1);
        body["resident_id"] = json!(9_999);

        let response = app.oneshot(post_json("/tabel/cell", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

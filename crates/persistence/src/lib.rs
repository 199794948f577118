// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Carelog care-facility system.
//!
//! This crate provides `SQLite` persistence, via Diesel, for the service
//! catalog, residents and their placement, contracts, the day-granular
//! service log ("tabel") with its month locks, and the append-only
//! status/placement history trails.
//!
//! ## Transaction discipline
//!
//! The core engine produces transitions (lists of storage effects); this
//! crate executes them under the documented scopes:
//!
//! - single-cell mutations, clears, lock toggles, and autofill run all of
//!   their effects inside **one** transaction
//! - the batch row path commits **one effect at a time**, so a failing day
//!   does not roll back the others
//! - a placement change commits the resident update and both history
//!   appends together; failing to write a history record fails the whole
//!   mutation
//!
//! The adapter owns a single connection, so a read-modify-write sequence
//! (context load, rule check, effect execution) for one caller is never
//! interleaved with another writer of the same scope.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use carelog_core::{
    EntitledService, FrequencyTerms, MonthContext, PlacementTransition, ServiceTerms,
    TabelTransition,
};
use carelog_domain::{
    Contract, Department, DepartmentType, PeriodType, Resident, Service, ServiceCategory,
    ServiceFrequency, ServiceSchedule, TabelMonth, generated_contract_number, parse_iso_date,
};

mod data_models;
mod dates;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    DepartmentRow, PlacementHistoryRow, ResidentRow, ServiceFrequencyRow, ServiceRow,
    StatusHistoryRow,
};
pub use dates::date_to_string;
pub use error::PersistenceError;
pub use mutations::tabel::TabelApplyReport;

use data_models::{
    NewContract, NewDepartment, NewResident, NewService, NewServiceCategory, NewServiceFrequency,
    NewServiceSchedule,
};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the care-facility store.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Catalog setup
    // ========================================================================

    /// Creates a department and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g., duplicate code).
    pub fn create_department(
        &mut self,
        name: &str,
        code: &str,
        department_type: DepartmentType,
        capacity: u32,
    ) -> Result<i64, PersistenceError> {
        let record = NewDepartment {
            name: name.to_string(),
            code: code.to_string(),
            department_type: department_type.as_str().to_string(),
            capacity: i32::try_from(capacity).unwrap_or(i32::MAX),
        };
        mutations::catalog::insert_department(&mut self.conn, &record)
    }

    /// Creates a service category and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_service_category(
        &mut self,
        name: &str,
        sort_order: u32,
    ) -> Result<i64, PersistenceError> {
        let category = ServiceCategory::new(name.to_string(), sort_order);
        let record = NewServiceCategory {
            name: category.name,
            sort_order: i32::try_from(category.sort_order).unwrap_or(i32::MAX),
        };
        mutations::catalog::insert_service_category(&mut self.conn, &record)
    }

    /// Creates a service frequency and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_service_frequency(
        &mut self,
        name: &str,
        short_name: &str,
        period_type: PeriodType,
        times_per_period: Option<u32>,
        is_approximate: bool,
    ) -> Result<i64, PersistenceError> {
        let record = NewServiceFrequency {
            name: name.to_string(),
            short_name: short_name.to_string(),
            period_type: period_type.as_str().to_string(),
            times_per_period: times_per_period.map(|t| i32::try_from(t).unwrap_or(i32::MAX)),
            is_approximate: i32::from(is_approximate),
        };
        mutations::catalog::insert_service_frequency(&mut self.conn, &record)
    }

    /// Creates a service and returns its ID.
    ///
    /// The monthly cap is resolved on save: an attached frequency always
    /// overwrites the manual value, including with "unlimited".
    ///
    /// # Errors
    ///
    /// Returns an error if the referenced frequency does not exist or the
    /// insert fails (e.g., duplicate code).
    #[allow(clippy::too_many_arguments)]
    pub fn create_service(
        &mut self,
        code: &str,
        name: &str,
        category_id: i64,
        parent_id: Option<i64>,
        price: Decimal,
        frequency_id: Option<i64>,
        max_quantity_per_month: Option<u32>,
        sort_order: u32,
    ) -> Result<i64, PersistenceError> {
        let frequency = frequency_id
            .map(|id| {
                queries::catalog::frequency_row(&mut self.conn, id)?.ok_or_else(|| {
                    PersistenceError::NotFound(format!("Service frequency {id} does not exist"))
                })
            })
            .transpose()?
            .map(row_to_frequency)
            .transpose()?;

        // The domain constructor resolves the monthly cap: an attached
        // frequency always wins over the manual value.
        let service = Service::new(
            code.to_string(),
            name.to_string(),
            category_id,
            parent_id,
            price,
            frequency,
            max_quantity_per_month,
            sort_order,
        )
        .map_err(|e| PersistenceError::Other(e.to_string()))?;

        let record = NewService {
            code: service.code,
            name: service.name,
            category_id: service.category_id,
            parent_id: service.parent_id,
            price: service.price.to_string(),
            frequency_id,
            max_quantity_per_month: service
                .max_quantity_per_month
                .map(|c| i32::try_from(c).unwrap_or(i32::MAX)),
            sort_order: i32::try_from(service.sort_order).unwrap_or(i32::MAX),
            is_active: i32::from(service.is_active),
        };
        mutations::catalog::insert_service(&mut self.conn, &record)
    }

    /// Creates or updates a weekly schedule entry for
    /// `(service, department, weekday)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_service_schedule(
        &mut self,
        service_id: i64,
        department_id: i64,
        day_of_week: u8,
        quantity: u32,
    ) -> Result<(), PersistenceError> {
        let entry = ServiceSchedule::new(service_id, department_id, day_of_week, quantity)
            .map_err(|e| PersistenceError::Other(e.to_string()))?;
        let record = NewServiceSchedule {
            service_id: entry.service_id,
            department_id: entry.department_id,
            day_of_week: i32::from(entry.day_of_week),
            quantity: i64::from(entry.quantity),
        };
        mutations::catalog::upsert_service_schedule(&mut self.conn, &record)
    }

    /// Loads one department.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the department does not exist.
    pub fn get_department(
        &mut self,
        department_id: i64,
    ) -> Result<Department, PersistenceError> {
        let row = queries::catalog::department_row(&mut self.conn, department_id)?.ok_or_else(
            || PersistenceError::NotFound(format!("Department {department_id} does not exist")),
        )?;
        row_to_department(row)
    }

    /// Lists departments, optionally restricted to residential care.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn list_departments(
        &mut self,
        residential_care_only: bool,
    ) -> Result<Vec<Department>, PersistenceError> {
        queries::catalog::department_rows(&mut self.conn, residential_care_only)?
            .into_iter()
            .map(row_to_department)
            .collect()
    }

    /// Lists all categories as `(category_id, name, sort_order)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_categories(&mut self) -> Result<Vec<(i64, String, i32)>, PersistenceError> {
        queries::catalog::category_rows(&mut self.conn)
    }

    /// Lists all active service rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_services(&mut self) -> Result<Vec<ServiceRow>, PersistenceError> {
        queries::catalog::active_service_rows(&mut self.conn)
    }

    // ========================================================================
    // Residents
    // ========================================================================

    /// Creates a resident and returns their ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_resident(
        &mut self,
        resident: &Resident,
    ) -> Result<i64, PersistenceError> {
        let record = NewResident {
            last_name: resident.last_name.clone(),
            first_name: resident.first_name.clone(),
            patronymic: resident.patronymic.clone(),
            birth_date: date_to_string(resident.birth_date),
            department_id: resident.department_id(),
            room: resident.room.clone(),
            admission_date: resident.admission_date.map(date_to_string),
            discharge_date: resident.discharge_date.map(date_to_string),
            income: resident.income.map(|d| d.to_string()),
            pension_payment: resident.pension_payment.map(|d| d.to_string()),
        };
        mutations::residents::insert_resident(&mut self.conn, &record)
    }

    /// Loads a resident with their current department.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the resident does not exist, or a corruption
    /// error if a stored value cannot be converted.
    pub fn get_resident(&mut self, resident_id: i64) -> Result<Resident, PersistenceError> {
        let row = queries::residents::resident_row(&mut self.conn, resident_id)?.ok_or_else(
            || PersistenceError::NotFound(format!("Resident {resident_id} does not exist")),
        )?;
        let department = row
            .department_id
            .map(|id| {
                queries::catalog::department_row(&mut self.conn, id)?.ok_or_else(|| {
                    PersistenceError::CorruptRecord {
                        table: String::from("residents"),
                        detail: format!("dangling department reference {id}"),
                    }
                })
            })
            .transpose()?
            .map(row_to_department)
            .transpose()?;
        row_to_resident(row, department)
    }

    /// Lists the residents of one residential-care department.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn list_residents_by_department(
        &mut self,
        department_id: i64,
    ) -> Result<Vec<Resident>, PersistenceError> {
        let department = queries::catalog::department_row(&mut self.conn, department_id)?
            .map(row_to_department)
            .transpose()?;
        queries::residents::residents_of_department(&mut self.conn, department_id)?
            .into_iter()
            .map(|row| row_to_resident(row, department.clone()))
            .collect()
    }

    /// Commits a placement transition: the resident update plus both history
    /// appends, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is applied in that case.
    pub fn apply_placement_transition(
        &mut self,
        resident_id: i64,
        transition: &PlacementTransition,
        admission_date: Option<time::Date>,
        discharge_date: Option<time::Date>,
    ) -> Result<(), PersistenceError> {
        self.conn
            .transaction::<_, PersistenceError, _>(|conn| {
                mutations::residents::update_resident_placement(
                    conn,
                    resident_id,
                    transition.new_department_id,
                    &transition.new_room,
                    admission_date,
                    discharge_date,
                )?;
                if let Some(record) = &transition.status_record {
                    mutations::residents::insert_status_history(conn, record)?;
                }
                if let Some(record) = &transition.placement_record {
                    mutations::residents::insert_placement_history(conn, record)?;
                }
                Ok(())
            })?;
        info!(resident_id, "Applied placement transition");
        Ok(())
    }

    /// Loads the most recent status history records of a resident.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent_status_history(
        &mut self,
        resident_id: i64,
        limit: i64,
    ) -> Result<Vec<StatusHistoryRow>, PersistenceError> {
        queries::history::recent_status_history(&mut self.conn, resident_id, limit)
    }

    /// Loads the most recent placement history records of a resident.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent_placement_history(
        &mut self,
        resident_id: i64,
        limit: i64,
    ) -> Result<Vec<PlacementHistoryRow>, PersistenceError> {
        queries::history::recent_placement_history(&mut self.conn, resident_id, limit)
    }

    /// Counts a resident's history records as `(status, placement)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn history_counts(&mut self, resident_id: i64) -> Result<(i64, i64), PersistenceError> {
        let status = queries::history::count_status_history(&mut self.conn, resident_id)?;
        let placement = queries::history::count_placement_history(&mut self.conn, resident_id)?;
        Ok((status, placement))
    }

    /// Creates or updates the monthly income/pension figures of a resident.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn upsert_monthly_data(
        &mut self,
        resident_id: i64,
        year: i32,
        month: u8,
        income: Option<Decimal>,
        pension_payment: Option<Decimal>,
    ) -> Result<(), PersistenceError> {
        mutations::residents::upsert_monthly_data(
            &mut self.conn,
            resident_id,
            year,
            i32::from(month),
            income,
            pension_payment,
        )
    }

    /// Loads the monthly income/pension figures of a resident, if recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn monthly_data(
        &mut self,
        resident_id: i64,
        year: i32,
        month: u8,
    ) -> Result<Option<(Option<String>, Option<String>)>, PersistenceError> {
        queries::residents::monthly_data(&mut self.conn, resident_id, year, i32::from(month))
    }

    // ========================================================================
    // Contracts
    // ========================================================================

    /// Replaces the entitlement set of the resident's active contract.
    ///
    /// Creates the contract on first edit with a generated number. Runs in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is applied then.
    pub fn replace_contract_services(
        &mut self,
        resident_id: i64,
        service_ids: &[i64],
        number: Option<&str>,
        date_start: Option<time::Date>,
        date_end: Option<time::Date>,
        today: time::Date,
    ) -> Result<i64, PersistenceError> {
        self.conn.transaction::<_, PersistenceError, _>(|conn| {
            let contract_id =
                match mutations::contracts::active_contract_id(conn, resident_id)? {
                    Some(id) => id,
                    None => {
                        let contract = Contract::new(
                            resident_id,
                            generated_contract_number(resident_id, today.year()),
                            today,
                        );
                        let record = NewContract {
                            resident_id: contract.resident_id,
                            number: contract.number,
                            date_start: date_to_string(contract.date_start),
                            date_end: contract.date_end.map(date_to_string),
                            is_active: i32::from(contract.is_active),
                        };
                        mutations::contracts::insert_contract(conn, &record)?
                    }
                };

            mutations::contracts::replace_contract_services(conn, contract_id, service_ids)?;
            mutations::contracts::update_contract_fields(
                conn,
                contract_id,
                number,
                date_start,
                date_end,
            )?;
            Ok(contract_id)
        })
    }

    /// Returns the distinct service IDs of the resident's active contracts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entitled_service_ids(
        &mut self,
        resident_id: i64,
    ) -> Result<BTreeSet<i64>, PersistenceError> {
        queries::catalog::entitled_service_ids(&mut self.conn, resident_id)
    }

    /// Loads the resident's entitlement set as engine inputs, in catalog
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row is corrupt.
    pub fn entitled_services(
        &mut self,
        resident_id: i64,
    ) -> Result<Vec<EntitledService>, PersistenceError> {
        let rows = queries::catalog::entitled_service_rows(&mut self.conn, resident_id)?;
        let mut services = Vec::with_capacity(rows.len());
        for row in rows {
            let frequency = row
                .frequency_id
                .map(|id| {
                    queries::catalog::frequency_row(&mut self.conn, id)?.ok_or_else(|| {
                        PersistenceError::CorruptRecord {
                            table: String::from("services"),
                            detail: format!("dangling frequency reference {id}"),
                        }
                    })
                })
                .transpose()?
                .map(|freq| {
                    Ok::<FrequencyTerms, PersistenceError>(FrequencyTerms {
                        period_type: parse_period_type(&freq.period_type)?,
                        times_per_period: freq.times_per_period.and_then(|t| u32::try_from(t).ok()),
                    })
                })
                .transpose()?;
            services.push(EntitledService {
                terms: row_to_service_terms(&row)?,
                frequency,
            });
        }
        Ok(services)
    }

    // ========================================================================
    // Tabel
    // ========================================================================

    /// Loads the engine terms of one service.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the service does not exist.
    pub fn service_terms(&mut self, service_id: i64) -> Result<ServiceTerms, PersistenceError> {
        let row = queries::catalog::service_row(&mut self.conn, service_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Service {service_id} does not exist"))
        })?;
        row_to_service_terms(&row)
    }

    /// Loads the weekly schedules of a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub fn department_schedules(
        &mut self,
        department_id: i64,
    ) -> Result<BTreeMap<i64, BTreeMap<u8, u32>>, PersistenceError> {
        queries::catalog::department_schedules(&mut self.conn, department_id)
    }

    /// Loads the month snapshot the engine validates against: the lock row
    /// and every existing cell.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row is corrupt.
    pub fn load_month_context(
        &mut self,
        resident_id: i64,
        month: TabelMonth,
    ) -> Result<MonthContext, PersistenceError> {
        let lock = queries::tabel::lock_state(&mut self.conn, resident_id, &month)?;
        let cells = queries::tabel::month_cells(&mut self.conn, resident_id, &month)?;
        Ok(MonthContext {
            resident_id,
            month,
            lock,
            cells,
        })
    }

    /// Executes a transition's effects inside one transaction.
    ///
    /// Used by the cell, clear, lock, and autofill paths. If any effect
    /// fails, none of them is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if an effect fails; the transaction rolls back.
    pub fn apply_tabel_transition(
        &mut self,
        resident_id: i64,
        month: TabelMonth,
        transition: &TabelTransition,
    ) -> Result<TabelApplyReport, PersistenceError> {
        let report = self.conn.transaction::<_, PersistenceError, _>(|conn| {
            let mut report = TabelApplyReport::default();
            for effect in &transition.effects {
                mutations::tabel::execute_effect(conn, resident_id, &month, effect, &mut report)?;
            }
            Ok(report)
        })?;
        info!(
            resident_id,
            rows_written = report.rows_written,
            rows_deleted = report.rows_deleted,
            "Applied tabel transition"
        );
        Ok(report)
    }

    /// Executes a row transition's effects one transaction per effect.
    ///
    /// The batch day-list API deliberately has per-item commit semantics: a
    /// failing day leaves the already-committed days in place.
    ///
    /// # Errors
    ///
    /// Returns the first failure; earlier effects stay committed.
    pub fn apply_row_transition(
        &mut self,
        resident_id: i64,
        month: TabelMonth,
        transition: &TabelTransition,
    ) -> Result<TabelApplyReport, PersistenceError> {
        let mut report = TabelApplyReport::default();
        for effect in &transition.effects {
            self.conn.transaction::<_, PersistenceError, _>(|conn| {
                mutations::tabel::execute_effect(conn, resident_id, &month, effect, &mut report)
            })?;
        }
        info!(
            resident_id,
            rows_written = report.rows_written,
            rows_deleted = report.rows_deleted,
            "Applied row transition"
        );
        Ok(report)
    }

    /// Returns the stored quantity of one cell, zero if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored value is corrupt.
    pub fn get_cell(
        &mut self,
        resident_id: i64,
        service_id: i64,
        date: time::Date,
    ) -> Result<u32, PersistenceError> {
        let quantity = queries::tabel::cell_quantity(
            &mut self.conn,
            resident_id,
            service_id,
            &date_to_string(date),
        )?;
        quantity.map_or(Ok(0), |q| {
            u32::try_from(q).map_err(|_| PersistenceError::CorruptRecord {
                table: String::from("service_logs"),
                detail: format!("negative quantity {q}"),
            })
        })
    }

    /// Sums the month's quantities grouped by `(service, day)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn aggregate_by_day(
        &mut self,
        resident_id: i64,
        month: TabelMonth,
    ) -> Result<BTreeMap<(i64, u8), u64>, PersistenceError> {
        queries::tabel::aggregate_by_day(&mut self.conn, resident_id, &month)
    }

    /// Sums the month's quantities grouped by service.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn aggregate_by_service(
        &mut self,
        resident_id: i64,
        month: TabelMonth,
    ) -> Result<BTreeMap<i64, u64>, PersistenceError> {
        queries::tabel::aggregate_by_service(&mut self.conn, resident_id, &month)
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn parse_price(table: &str, value: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| PersistenceError::CorruptRecord {
        table: table.to_string(),
        detail: format!("unparseable decimal '{value}': {e}"),
    })
}

fn parse_period_type(value: &str) -> Result<PeriodType, PersistenceError> {
    value
        .parse::<PeriodType>()
        .map_err(|e| PersistenceError::CorruptRecord {
            table: String::from("service_frequencies"),
            detail: e.to_string(),
        })
}

fn row_to_department(row: DepartmentRow) -> Result<Department, PersistenceError> {
    let department_type = row.department_type.parse::<DepartmentType>().map_err(|e| {
        PersistenceError::CorruptRecord {
            table: String::from("departments"),
            detail: e.to_string(),
        }
    })?;
    Ok(Department::with_id(
        row.department_id,
        row.name,
        row.code,
        department_type,
        u32::try_from(row.capacity).unwrap_or(0),
    ))
}

fn row_to_frequency(row: ServiceFrequencyRow) -> Result<ServiceFrequency, PersistenceError> {
    let period_type = parse_period_type(&row.period_type)?;
    Ok(ServiceFrequency::with_id(
        row.frequency_id,
        row.name,
        row.short_name,
        period_type,
        row.times_per_period.and_then(|t| u32::try_from(t).ok()),
        row.is_approximate != 0,
    ))
}

fn row_to_service_terms(row: &ServiceRow) -> Result<ServiceTerms, PersistenceError> {
    Ok(ServiceTerms {
        service_id: row.service_id,
        price: parse_price("services", &row.price)?,
        max_quantity_per_month: row
            .max_quantity_per_month
            .and_then(|m| u32::try_from(m).ok()),
    })
}

fn row_to_resident(
    row: ResidentRow,
    department: Option<Department>,
) -> Result<Resident, PersistenceError> {
    let corrupt = |detail: String| PersistenceError::CorruptRecord {
        table: String::from("residents"),
        detail,
    };
    let parse_date = |value: &str| {
        parse_iso_date(value).map_err(|e| corrupt(format!("unparseable date: {e}")))
    };

    let birth_date = parse_date(&row.birth_date)?;
    let admission_date = row.admission_date.as_deref().map(parse_date).transpose()?;
    let discharge_date = row.discharge_date.as_deref().map(parse_date).transpose()?;
    let income = row
        .income
        .as_deref()
        .map(|v| parse_price("residents", v))
        .transpose()?;
    let pension_payment = row
        .pension_payment
        .as_deref()
        .map(|v| parse_price("residents", v))
        .transpose()?;

    Ok(Resident {
        resident_id: Some(row.resident_id),
        last_name: row.last_name,
        first_name: row.first_name,
        patronymic: row.patronymic,
        birth_date,
        department,
        room: row.room,
        admission_date,
        discharge_date,
        income,
        pension_payment,
    })
}

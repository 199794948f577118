// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// ISO 8601 calendar date format used for all stored dates.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The largest quantity a single tabel cell may hold.
const MAX_CELL_QUANTITY: u32 = 99_999;

/// Validates a tabel cell quantity.
///
/// Zero is a valid quantity: it expresses deletion of the cell.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuantity` if the value is implausibly large.
pub fn validate_quantity(quantity: u32) -> Result<(), DomainError> {
    if quantity > MAX_CELL_QUANTITY {
        return Err(DomainError::InvalidQuantity(format!(
            "{quantity} exceeds the maximum of {MAX_CELL_QUANTITY}"
        )));
    }
    Ok(())
}

/// Parses a monetary amount with up to two fraction digits.
///
/// # Arguments
///
/// * `field` - The field name, used in the error
/// * `value` - The raw decimal string (dot separator)
///
/// # Errors
///
/// Returns `DomainError::InvalidMoney` if the value is not a valid decimal.
pub fn parse_money(field: &str, value: &str) -> Result<Decimal, DomainError> {
    Decimal::from_str(value.trim()).map_err(|_| DomainError::InvalidMoney {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is malformed.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

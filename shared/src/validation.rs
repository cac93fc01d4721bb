//! Validation utilities for the Warehouse Inventory Management gateway
//!
//! Checks that run before any network call so bad input never reaches the
//! inventory backend.

use chrono::NaiveDate;

// ============================================================================
// Checkout Input Validations
// ============================================================================

/// Validate a scanned or typed unit code
///
/// Empty and whitespace-only codes are rejected locally; everything else
/// is the backend's call.
pub fn validate_scan_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("QR code must not be empty");
    }
    Ok(())
}

/// Trim a scanned code for lookup, dropping blank input
pub fn normalize_scan_code(code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a stock-out date in `YYYY-MM-DD` form
pub fn parse_date_out(value: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| "Date must be in YYYY-MM-DD format")
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };
    if local.is_empty() || domain.len() < 3 || !domain.contains('.') {
        return Err("Invalid email format");
    }
    Ok(())
}

/// Validate password is present
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    Ok(())
}

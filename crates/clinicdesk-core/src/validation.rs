//! # Validation Module
//!
//! Form-input validation rules for ClinicDesk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  ├── Basic format hints (input types, min/max attributes)              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust, before any request is built)              │
//! │  ├── Field-level rules with typed errors                               │
//! │  └── Same rules regardless of which screen submits                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Authoritative constraints (uniqueness, referential integrity)     │
//! │                                                                         │
//! │  Defense in depth: each layer catches what the previous one cannot     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note the split on percentage discounts: this validator rejects values
//! above 100, while the totals arithmetic in [`crate::bill`] deliberately
//! never clamps. Validation guards what users submit; the math stays honest
//! about whatever it is given.

use crate::error::ValidationError;
use crate::money::{Money, Percent};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum patient age accepted by the registration form.
pub const MAX_PATIENT_AGE: u32 = 150;

/// Upper bound for percentage discounts at the form level.
pub const MAX_DISCOUNT_PERCENT_BPS: u32 = 10_000; // 100%

// =============================================================================
// String Validators
// =============================================================================

/// Validates a patient name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_patient_name(name: &str) -> ValidationResult<()> {
    require_non_empty("name", name)?;

    if name.trim().len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - Exactly 10 digits, nothing else
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be 10 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address, when one is provided.
///
/// ## Rules
/// - `local@domain.tld` shape: non-empty local part, a single `@`, a dot in
///   the domain, no whitespace anywhere
///
/// The empty string is NOT accepted here; optional emails should be `None`
/// rather than `Some("")`.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a postal address.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    require_non_empty("address", address)
}

/// Validates a service name.
pub fn validate_service_name(name: &str) -> ValidationResult<()> {
    require_non_empty("name", name)
}

fn require_non_empty(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a patient age.
///
/// ## Rules
/// - Must be between 0 and 150
pub fn validate_age(age: u32) -> ValidationResult<()> {
    if age > MAX_PATIENT_AGE {
        return Err(ValidationError::OutOfRange {
            field: "age".to_string(),
            min: 0,
            max: MAX_PATIENT_AGE as i64,
        });
    }

    Ok(())
}

/// Validates a service price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (complimentary services)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an item quantity.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage discount rate at the form level.
///
/// ## Rules
/// - Must not exceed 100% (10000 bps)
///
/// The totals arithmetic never clamps; this is the only place the 100% cap
/// is enforced, and only for what users type into the discount field.
pub fn validate_discount_percent(rate: Percent) -> ValidationResult<()> {
    if rate.bps() > MAX_DISCOUNT_PERCENT_BPS {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a flat discount amount at the form level.
///
/// ## Rules
/// - Must be non-negative
/// - NOT bounded by the subtotal (current product behavior)
pub fn validate_discount_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: "discount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

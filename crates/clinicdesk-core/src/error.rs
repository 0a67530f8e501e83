//! # Error Types
//!
//! Domain-specific error types for clinicdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  clinicdesk-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations (submission gate)     │
//! │  └── ValidationError  - Input validation failures (forms)              │
//! │                                                                         │
//! │  clinicdesk-api errors (separate crate)                                │
//! │  └── ApiError         - Network, auth, and session failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → (UI)   ApiError → (UI)            │
//! │                                                                         │
//! │  A CoreError is raised BEFORE any request is issued: the submission    │
//! │  gate never lets an invalid bill reach the network layer.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, field name, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are blocking but
/// always user-correctable, and should be translated to form-level messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bill submission attempted without a selected patient.
    #[error("No patient selected")]
    NoPatientSelected,

    /// Bill submission attempted with an empty item list.
    #[error("Bill must contain at least one service")]
    EmptyBill,

    /// Bill submission attempted while an item has no service selected.
    ///
    /// ## When This Occurs
    /// An item added with "Add Service" still shows the "Select service"
    /// placeholder (service id 0). The item contributes its line total to the
    /// subtotal on screen, but the bill cannot be sent until it is resolved.
    #[error("Item {item_id} has no service selected")]
    IncompleteItem { item_id: u64 },

    /// Service cannot be found in the catalog.
    #[error("Service not found: {0}")]
    ServiceNotFound(u64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Used for early validation before anything reaches the network layer.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed phone number or email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

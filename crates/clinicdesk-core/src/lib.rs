//! # clinicdesk-core: Pure Business Logic for ClinicDesk
//!
//! This crate is the **heart** of ClinicDesk. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ClinicDesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web UI)                            │   │
//! │  │    Patient forms ──► Billing screen ──► Reports                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ generated TS bindings                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ clinicdesk-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   bill    │  │ validation│  │   │
//! │  │   │  Patient  │  │   Money   │  │ BillDraft │  │   rules   │  │   │
//! │  │   │  Service  │  │  Percent  │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CREDENTIALS • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               clinicdesk-api (REST client)                      │   │
//! │  │         bearer auth, token refresh, typed endpoints             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Patient, Service, BillStatus, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`bill`] - The bill draft: line items, discounts, totals, submission gate
//! - [`error`] - Domain error types
//! - [`validation`] - Form-input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input = same output
//! 2. **No I/O**: network, credential storage, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use clinicdesk_core::bill::{BillDraft, Discount, ItemEdit};
//! use clinicdesk_core::money::{Money, Percent};
//!
//! let mut draft = BillDraft::new();
//! let row = draft.add_item();
//! draft.edit_item(row, ItemEdit::SetUnitPrice(Money::from_paise(50000)), &[]);
//! draft.edit_item(row, ItemEdit::SetQuantity(2), &[]);
//!
//! let totals = draft.totals(&Discount::Percentage(Percent::from_percentage(10.0)));
//! assert_eq!(totals.subtotal, Money::from_paise(100000));
//! assert_eq!(totals.grand_total, Money::from_paise(90000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use clinicdesk_core::Money` instead of
// `use clinicdesk_core::money::Money`

pub use bill::{BillDraft, BillTotals, Discount, DiscountKind, ItemEdit, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percent};
pub use types::*;

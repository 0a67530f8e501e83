//! # Domain Types
//!
//! Core domain types used throughout ClinicDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Patient      │   │    Service      │   │   BillStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  Paid           │       │
//! │  │  name, age      │   │  name           │   │  Pending        │       │
//! │  │  gender, phone  │   │  price (Money)  │   │  Cancelled      │       │
//! │  │  last_visit     │   │  category       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  Bills themselves are server-owned records; their wire representation  │
//! │  lives in clinicdesk-api. The in-progress bill draft lives in          │
//! │  [`crate::bill`].                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Gender
// =============================================================================

/// Patient gender as recorded in the clinic register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
}

// =============================================================================
// Service Category
// =============================================================================

/// The department a clinical service belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServiceCategory {
    Consultation,
    Laboratory,
    Radiology,
    Cardiology,
    Therapy,
    Vaccination,
    Dental,
}

// =============================================================================
// Bill Status
// =============================================================================

/// The payment status of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BillStatus {
    /// Bill has been settled in full.
    Paid,
    /// Bill has been issued but not yet paid.
    Pending,
    /// Bill was voided after issue.
    Cancelled,
}

impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Pending
    }
}

// =============================================================================
// Patient
// =============================================================================

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    /// Unique identifier assigned by the backend.
    pub id: u64,

    /// Full name.
    pub name: String,

    /// Age in years.
    pub age: u32,

    /// Gender.
    pub gender: Gender,

    /// Contact phone number (10 digits).
    pub phone: String,

    /// Optional contact email.
    pub email: Option<String>,

    /// Postal address.
    pub address: String,

    /// Free-text medical history summary.
    pub medical_history: Option<String>,

    /// Date of the most recent visit.
    #[ts(as = "String")]
    pub last_visit: NaiveDate,

    /// When the patient record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the patient record was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Checks whether the patient matches a search term.
    ///
    /// Matches case-insensitively on name, or as a substring of the phone
    /// number. Mirrors the patient picker on the bill creation screen.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term.to_lowercase()) || self.phone.contains(term)
    }
}

// =============================================================================
// Service
// =============================================================================

/// A billable clinical service from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Service {
    /// Unique identifier assigned by the backend.
    pub id: u64,

    /// Display name shown in the service picker and on the bill.
    pub name: String,

    /// Description shown on the service management screen.
    pub description: String,

    /// Unit price. The backend serves decimal rupees; stored as paise.
    #[serde(with = "crate::money::as_rupees")]
    #[ts(as = "f64")]
    pub price: Money,

    /// Department the service belongs to.
    pub category: ServiceCategory,

    /// Whether the service can currently be billed (soft delete).
    pub is_active: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

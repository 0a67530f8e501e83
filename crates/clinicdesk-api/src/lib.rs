//! # clinicdesk-api: Authenticated REST Client for ClinicDesk
//!
//! This crate owns every byte that crosses the network: credential handling,
//! the guarded refresh-and-retry protocol, and the typed endpoint surface of
//! the clinic backend.
//!
//! ## Module Organization
//!
//! - [`client`] - `ApiClient`: bearer auth, 401 refresh, typed endpoints
//! - [`session`] - `TokenStore`: the injectable access/refresh token pair
//! - [`config`] - Base URL resolution (explicit value, env var, default)
//! - [`error`] - The error taxonomy every request failure maps into
//! - [`types`] - Wire DTOs (requests, responses, report shapes)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clinicdesk_api::{ApiClient, ApiConfig, FileTokenStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(FileTokenStore::open_default()?);
//! let client = ApiClient::new(&ApiConfig::from_env_or(None), session)?;
//!
//! // Restores the previous session if the stored tokens are still accepted.
//! let user = match client.restore_session().await {
//!     Some(user) => user,
//!     None => client.login("frontdesk", "secret").await?,
//! };
//! println!("signed in as {}", user.username);
//!
//! let patients = client.patients().await?;
//! println!("{} patients registered", patients.len());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{
    AuthUser, Bill, BillItem, CreateBillItem, CreateBillRequest, DailyReport, DailyStat,
    Dashboard, LoginRequest, LoginResponse, MedicalRecord, MedicalReport, NewMedicalRecord,
    NewPatient, NewService, PatientDetails, RefreshRequest, RefreshResponse, ReportSummary, Role,
};

//! # Authenticated API Client
//!
//! The single place every ClinicDesk request goes through.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Authenticated Request Flow                           │
//! │                                                                         │
//! │  ┌────────────────┐      ┌─────────────────┐      ┌─────────────────┐  │
//! │  │  ApiClient     │      │  Clinic Backend │      │  TokenStore     │  │
//! │  └───────┬────────┘      └────────┬────────┘      └────────┬────────┘  │
//! │          │  1. read access token  │                        │           │
//! │          │◄───────────────────────┼────────────────────────│           │
//! │          │  2. request + Bearer   │                        │           │
//! │          │───────────────────────►│                        │           │
//! │          │                        │                        │           │
//! │          │  [2xx] ── done         │                        │           │
//! │          │                        │                        │           │
//! │          │  [401, first time, refresh token present]       │           │
//! │          │  3. POST /auth/token/refresh/ {refresh}         │           │
//! │          │───────────────────────►│                        │           │
//! │          │  4a. new access ───────┼── replace access ─────►│           │
//! │          │  5. re-issue original request, exactly once     │           │
//! │          │───────────────────────►│                        │           │
//! │          │     (a second 401 here ends the session)        │           │
//! │          │                        │                        │           │
//! │          │  4b. refresh rejected ─┼── clear both ─────────►│           │
//! │          │     surface SessionExpired                      │           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Notes
//! Requests that fail with 401 at the same time each run their own guarded
//! refresh; the last token write wins. Refresh is idempotent server-side and
//! every refresh returns an equally valid token, so no cross-request
//! coordination is needed. Retry state is a per-call attempt counter, never
//! shared between calls.
//!
//! No request timeout is configured at this layer; transport defaults apply.
//! Transport-level failures (no response at all) are surfaced immediately and
//! never retried here.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use clinicdesk_core::types::{BillStatus, Patient, Service};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult, GENERIC_FAILURE_MESSAGE};
use crate::session::TokenStore;
use crate::types::{
    AuthUser, Bill, CreateBillRequest, DailyReport, Dashboard, LoginRequest, LoginResponse,
    MedicalRecord, NewMedicalRecord, NewPatient, NewService, PatientDetails, RefreshRequest,
    RefreshResponse,
};

// =============================================================================
// Response Handling
// =============================================================================

/// Decodes a successful response, or maps a failing one to [`ApiError::Http`].
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    } else {
        Err(failure_from(status, response).await)
    }
}

/// Builds the typed failure for a non-2xx response.
///
/// Uses the server-supplied `message` (our backend) or `detail` (DRF default)
/// when one is present, a generic message otherwise.
async fn failure_from(status: StatusCode, response: Response) -> ApiError {
    let payload: Option<serde_json::Value> = response.json().await.ok();
    let message = payload
        .as_ref()
        .and_then(|body| body.get("message").or_else(|| body.get("detail")))
        .and_then(|m| m.as_str())
        .unwrap_or(GENERIC_FAILURE_MESSAGE)
        .to_string();

    tracing::error!(%status, %message, "API request failed");
    ApiError::Http {
        status,
        message,
        payload,
    }
}

// =============================================================================
// API Client
// =============================================================================

/// Authenticated REST client for the clinic backend.
///
/// Owns no credential state itself: the [`TokenStore`] is injected by the
/// composition root, so tests swap in an in-memory session and applications
/// pick the persistence they want.
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    session: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &ApiConfig, session: Arc<dyn TokenStore>) -> ApiResult<Self> {
        Ok(ApiClient {
            http: HttpClient::new(),
            base_url: config.parsed_base_url()?,
            session,
        })
    }

    /// Joins an endpoint path onto the base URL.
    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    // =========================================================================
    // Core Dispatch (bearer attach + guarded single refresh-and-retry)
    // =========================================================================

    /// Sends one request, transparently recovering from a single expired
    /// access token.
    ///
    /// ## Refresh Protocol
    /// A 401 triggers a refresh-and-retry when BOTH hold:
    /// - a refresh token is stored, and
    /// - this call has not retried yet (`attempt == 0`)
    ///
    /// The retried request runs with `attempt == 1`, so a second 401 ends the
    /// session instead of looping. A 401 without a stored refresh token is
    /// returned as an ordinary failing response.
    async fn dispatch<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        let url = self.endpoint(path)?;
        let mut attempt: u32 = 0;

        loop {
            let mut request = self.http.request(method.clone(), url.clone());
            if let Some(token) = self.session.access_token() {
                request = request.bearer_auth(token);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            debug!(%method, %url, attempt, "Dispatching request");
            let response = request.send().await.map_err(ApiError::transport)?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            if attempt > 0 {
                // The refreshed token was rejected too; nothing left to try.
                warn!(%url, "Retried request still unauthorized, ending session");
                self.session.clear();
                return Err(ApiError::SessionExpired);
            }

            let Some(refresh) = self.session.refresh_token() else {
                return Ok(response);
            };

            self.refresh_access_token(&refresh).await?;
            attempt += 1;
        }
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Any failure here is fatal to the session: both tokens are cleared and
    /// the caller gets [`ApiError::SessionExpired`]. The refresh call itself
    /// carries no bearer header and never retries.
    async fn refresh_access_token(&self, refresh: &str) -> ApiResult<()> {
        let url = self.endpoint("auth/token/refresh/")?;
        debug!("Access token rejected, attempting refresh");

        let session_expired = |reason: &str| {
            warn!(%reason, "Token refresh failed, ending session");
            self.session.clear();
            ApiError::SessionExpired
        };

        let response = self
            .http
            .post(url)
            .json(&RefreshRequest {
                refresh: refresh.to_string(),
            })
            .send()
            .await
            .map_err(|e| session_expired(&e.to_string()))?;

        if !response.status().is_success() {
            return Err(session_expired(response.status().as_str()));
        }

        let fresh: RefreshResponse = response
            .json()
            .await
            .map_err(|e| session_expired(&e.to_string()))?;

        self.session.replace_access(&fresh.access);
        debug!("Access token refreshed");
        Ok(())
    }

    /// Dispatches and decodes in one step.
    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let response = self.dispatch(method, path, body).await?;
        handle_response(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE with no interesting response body.
    async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.dispatch::<()>(Method::DELETE, path, None).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(failure_from(status, response).await)
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Signs in and returns the user's identity.
    ///
    /// On success the access/refresh pair is stored in one write - a failed
    /// login leaves any previous session's tokens untouched. A 400 or 401
    /// becomes the precise bad-credentials error; other failures keep their
    /// own kind.
    ///
    /// Login bypasses [`Self::dispatch`]: the refresh protocol must not run
    /// for the login call itself, or a stale refresh token would turn a
    /// wrong-password 401 into a refresh dance.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<AuthUser> {
        let url = self.endpoint("auth/login/")?;
        info!(%username, "Attempting login");

        let response = self
            .http
            .post(url)
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            info!(%username, "Login rejected: bad credentials");
            return Err(ApiError::bad_credentials());
        }

        let tokens: LoginResponse = handle_response(response).await?;
        self.session.store_pair(&tokens.access, &tokens.refresh);

        let user = self.current_user().await?;
        info!(user = %user.username, role = ?user.role, "Login successful");
        Ok(user)
    }

    /// Fetches the signed-in user's identity.
    pub async fn current_user(&self) -> ApiResult<AuthUser> {
        self.get("auth/user/").await
    }

    /// Restores a previous session from stored tokens.
    ///
    /// Returns `None` (and clears the stored pair) when no token is stored or
    /// the stored session is no longer accepted. Mirrors the auth check the
    /// frontend runs on first load.
    pub async fn restore_session(&self) -> Option<AuthUser> {
        self.session.access_token()?;

        match self.current_user().await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Stored session rejected, clearing");
                self.session.clear();
                None
            }
        }
    }

    /// Signs out locally: clears both stored tokens, no network call.
    pub fn logout(&self) {
        self.session.clear();
        info!("Logged out");
    }

    // =========================================================================
    // Patients
    // =========================================================================

    /// Lists all patients.
    pub async fn patients(&self) -> ApiResult<Vec<Patient>> {
        self.get("patients/").await
    }

    /// Fetches one patient.
    pub async fn patient(&self, id: u64) -> ApiResult<Patient> {
        self.get(&format!("patients/{id}/")).await
    }

    /// Fetches the full profile: records, billing history, reports.
    pub async fn patient_details(&self, id: u64) -> ApiResult<PatientDetails> {
        self.get(&format!("patients/{id}/details/")).await
    }

    /// Registers a new patient.
    pub async fn create_patient(&self, patient: &NewPatient) -> ApiResult<Patient> {
        self.post("patients/", patient).await
    }

    /// Replaces a patient's registration details.
    pub async fn update_patient(&self, id: u64, patient: &NewPatient) -> ApiResult<Patient> {
        self.put(&format!("patients/{id}/"), patient).await
    }

    /// Deletes a patient.
    pub async fn delete_patient(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("patients/{id}/")).await
    }

    /// Lists a patient's past bills.
    pub async fn patient_billing_history(&self, id: u64) -> ApiResult<Vec<Bill>> {
        self.get(&format!("patients/{id}/billing-history/")).await
    }

    /// Appends a medical record to a patient's history.
    pub async fn add_medical_record(
        &self,
        patient_id: u64,
        record: &NewMedicalRecord,
    ) -> ApiResult<MedicalRecord> {
        self.post(&format!("patients/{patient_id}/add_medical_record/"), record)
            .await
    }

    /// Removes a medical record; returns the refreshed profile.
    pub async fn delete_medical_record(
        &self,
        patient_id: u64,
        record_id: u64,
    ) -> ApiResult<PatientDetails> {
        self.request::<PatientDetails, ()>(
            Method::DELETE,
            &format!("patients/{patient_id}/delete-medical-record/{record_id}/"),
            None,
        )
        .await
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Lists the service catalog.
    pub async fn services(&self) -> ApiResult<Vec<Service>> {
        self.get("services/").await
    }

    /// Fetches one catalog service.
    pub async fn service(&self, id: u64) -> ApiResult<Service> {
        self.get(&format!("services/{id}/")).await
    }

    /// Adds a service to the catalog.
    pub async fn create_service(&self, service: &NewService) -> ApiResult<Service> {
        self.post("services/", service).await
    }

    /// Replaces a catalog service.
    pub async fn update_service(&self, id: u64, service: &NewService) -> ApiResult<Service> {
        self.put(&format!("services/{id}/"), service).await
    }

    /// Removes a service from the catalog.
    pub async fn delete_service(&self, id: u64) -> ApiResult<()> {
        self.delete(&format!("services/{id}/")).await
    }

    // =========================================================================
    // Bills
    // =========================================================================

    /// Lists all bills.
    pub async fn bills(&self) -> ApiResult<Vec<Bill>> {
        self.get("bills/list/").await
    }

    /// Fetches one bill.
    pub async fn bill(&self, id: u64) -> ApiResult<Bill> {
        self.get(&format!("bills/{id}/")).await
    }

    /// Submits a new bill.
    ///
    /// The payload comes from [`CreateBillRequest::from_draft`], which runs
    /// the submission gate - an invalid draft never produces a payload, so it
    /// can never reach this method.
    pub async fn create_bill(&self, bill: &CreateBillRequest) -> ApiResult<Bill> {
        self.post("bills/", bill).await
    }

    /// Updates a bill's payment status.
    pub async fn update_bill_status(&self, id: u64, status: BillStatus) -> ApiResult<Bill> {
        self.request(
            Method::PATCH,
            &format!("bills/{id}/"),
            Some(&serde_json::json!({ "status": status })),
        )
        .await
    }

    /// Fetches the billing report for one day.
    pub async fn daily_report(&self, date: NaiveDate) -> ApiResult<DailyReport> {
        self.get(&format!(
            "bills/daily-report/?date={}",
            date.format("%Y-%m-%d")
        ))
        .await
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Fetches the landing-page dashboard.
    pub async fn dashboard(&self) -> ApiResult<Dashboard> {
        self.get("dashboard/").await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use httptest::{
        matchers::{all_of, contains, eq, json_decoded, request, url_decoded},
        responders::{json_encoded, status_code},
        Expectation, Server,
    };
    use serde_json::json;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("clinicdesk_api=debug")
            .try_init();
    }

    fn test_client(server: &Server) -> (ApiClient, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let config = ApiConfig::new(server.url_str(""));
        let client = ApiClient::new(&config, store.clone()).unwrap();
        (client, store)
    }

    fn patient_json(id: u64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "age": 34,
            "gender": "Female",
            "phone": "9876543210",
            "email": null,
            "address": "12 Lake Road",
            "medical_history": null,
            "last_visit": "2025-06-01",
            "created_at": "2025-06-01T09:00:00Z",
            "updated_at": "2025-06-01T09:00:00Z"
        })
    }

    fn bill_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "bill_number": format!("B-{id:04}"),
            "date": "2025-07-03",
            "patient": 7,
            "patient_name": "Asha Verma",
            "discount_type": "percentage",
            "discount_value": 10.0,
            "discount_amount": 130.0,
            "grand_total": 1170.0,
            "status": "Pending",
            "items": [],
            "notes": null,
            "created_by": 2
        })
    }

    fn user_json() -> serde_json::Value {
        json!({
            "id": 2,
            "username": "frontdesk",
            "email": "desk@clinic.example",
            "first_name": "Front",
            "last_name": "Desk",
            "role": "receptionist"
        })
    }

    #[tokio::test]
    async fn test_login_stores_both_tokens_and_fetches_identity() {
        let server = Server::run();
        let (client, store) = test_client(&server);

        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/auth/login/"),
                request::body(json_decoded(eq(json!({
                    "username": "frontdesk",
                    "password": "secret"
                })))),
            ])
            .times(1)
            .respond_with(json_encoded(json!({
                "access": "access-1",
                "refresh": "refresh-1"
            }))),
        );
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/auth/user/"),
                request::headers(contains(("authorization", "Bearer access-1"))),
            ])
            .times(1)
            .respond_with(json_encoded(user_json())),
        );

        let user = client.login("frontdesk", "secret").await.unwrap();

        assert_eq!(user.username, "frontdesk");
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_login_rejection_is_precise_and_atomic() {
        let server = Server::run();
        let (client, store) = test_client(&server);

        // A previous session's tokens must survive a failed login untouched.
        store.store_pair("old-access", "old-refresh");

        server.expect(
            Expectation::matching(request::method_path("POST", "/auth/login/"))
                .times(1)
                .respond_with(status_code(401).body(
                    json!({"detail": "No active account found"}).to_string(),
                )),
        );

        let err = client.login("frontdesk", "wrong").await.unwrap_err();

        assert!(matches!(err, ApiError::AuthFailed(_)));
        assert!(err.to_string().contains("didn't match"));
        assert_eq!(store.access_token().as_deref(), Some("old-access"));
        assert_eq!(store.refresh_token().as_deref(), Some("old-refresh"));
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("access-1", "refresh-1");

        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/patients/"),
                request::headers(contains(("authorization", "Bearer access-1"))),
            ])
            .times(1)
            .respond_with(json_encoded(json!([patient_json(7, "Asha Verma")]))),
        );

        let patients = client.patients().await.unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0].name, "Asha Verma");
    }

    #[tokio::test]
    async fn test_401_triggers_refresh_then_single_retry() {
        init_tracing();
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("stale", "refresh-1");

        // First attempt with the stale token is rejected...
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/patients/"),
                request::headers(contains(("authorization", "Bearer stale"))),
            ])
            .times(1)
            .respond_with(status_code(401)),
        );
        // ...the refresh token is exchanged exactly once...
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/auth/token/refresh/"),
                request::body(json_decoded(eq(json!({"refresh": "refresh-1"})))),
            ])
            .times(1)
            .respond_with(json_encoded(json!({"access": "fresh"}))),
        );
        // ...and the original request is re-issued with the fresh token.
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/patients/"),
                request::headers(contains(("authorization", "Bearer fresh"))),
            ])
            .times(1)
            .respond_with(json_encoded(json!([patient_json(7, "Asha Verma")]))),
        );

        let patients = client.patients().await.unwrap();

        assert_eq!(patients.len(), 1);
        assert_eq!(store.access_token().as_deref(), Some("fresh"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_session() {
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("stale", "refresh-1");

        server.expect(
            Expectation::matching(request::method_path("GET", "/patients/"))
                .times(1)
                .respond_with(status_code(401)),
        );
        server.expect(
            Expectation::matching(request::method_path("POST", "/auth/token/refresh/"))
                .times(1)
                .respond_with(
                    status_code(401).body(json!({"detail": "Token is blacklisted"}).to_string()),
                ),
        );

        let err = client.patients().await.unwrap_err();

        assert!(matches!(err, ApiError::SessionExpired));
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[tokio::test]
    async fn test_second_401_never_triggers_second_refresh() {
        init_tracing();
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("stale", "refresh-1");

        // Both the original and the retried request are rejected; the refresh
        // expectation's times(1) proves no second refresh is attempted.
        server.expect(
            Expectation::matching(request::method_path("GET", "/patients/"))
                .times(2)
                .respond_with(status_code(401)),
        );
        server.expect(
            Expectation::matching(request::method_path("POST", "/auth/token/refresh/"))
                .times(1)
                .respond_with(json_encoded(json!({"access": "fresh"}))),
        );

        let err = client.patients().await.unwrap_err();

        assert!(matches!(err, ApiError::SessionExpired));
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_is_plain_http_failure() {
        let server = Server::run();
        let (client, store) = test_client(&server);
        // Access token only: nothing to refresh with. Any request against the
        // refresh endpoint would be unexpected and fail the test.
        store.replace_access("stale");

        server.expect(
            Expectation::matching(request::method_path("GET", "/patients/"))
                .times(1)
                .respond_with(status_code(401)),
        );

        let err = client.patients().await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced() {
        let server = Server::run();
        let (client, _store) = test_client(&server);

        server.expect(
            Expectation::matching(request::method_path("GET", "/patients/99/"))
                .times(1)
                .respond_with(
                    status_code(404).body(json!({"message": "Patient not found"}).to_string()),
                ),
        );

        let err = client.patient(99).await.unwrap_err();
        match err {
            ApiError::Http { status, message, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Patient not found");
            }
            other => panic!("Expected ApiError::Http, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_body_falls_back_to_generic_message() {
        let server = Server::run();
        let (client, _store) = test_client(&server);

        server.expect(
            Expectation::matching(request::method_path("GET", "/services/"))
                .times(1)
                .respond_with(status_code(500)),
        );

        let err = client.services().await.unwrap_err();
        match err {
            ApiError::Http { message, .. } => assert_eq!(message, GENERIC_FAILURE_MESSAGE),
            other => panic!("Expected ApiError::Http, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_when_no_response() {
        // Nothing listens on the discard port; the connection is refused
        // before any HTTP exchange happens.
        let store = Arc::new(MemoryTokenStore::new());
        let config = ApiConfig::new("http://127.0.0.1:9");
        let client = ApiClient::new(&config, store).unwrap();

        let err = client.patients().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_create_bill_sends_camel_case_payload() {
        use clinicdesk_core::bill::{BillDraft, Discount, ItemEdit};
        use clinicdesk_core::money::{Money, Percent};
        use clinicdesk_core::types::{Gender, ServiceCategory};

        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("access-1", "refresh-1");

        let catalog = vec![Service {
            id: 3,
            name: "X-Ray".to_string(),
            description: String::new(),
            price: Money::from_paise(50000),
            category: ServiceCategory::Radiology,
            is_active: true,
        }];
        let patient = Patient {
            id: 7,
            name: "Asha Verma".to_string(),
            age: 34,
            gender: Gender::Female,
            phone: "9876543210".to_string(),
            email: None,
            address: "12 Lake Road".to_string(),
            medical_history: None,
            last_visit: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let mut draft = BillDraft::new();
        let row = draft.add_item();
        draft.edit_item(row, ItemEdit::SelectService(3), &catalog);
        draft.edit_item(row, ItemEdit::SetQuantity(2), &catalog);
        let discount = Discount::Percentage(Percent::from_percentage(10.0));

        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/bills/"),
                request::body(json_decoded(eq(json!({
                    "patientId": 7,
                    "items": [{"serviceId": 3, "quantity": 2}],
                    "discountType": "percentage",
                    "discountValue": 10.0,
                    "notes": ""
                })))),
            ])
            .times(1)
            .respond_with(json_encoded(bill_json(12))),
        );

        let request = CreateBillRequest::from_draft(&patient, &draft, &discount, "").unwrap();
        let bill = client.create_bill(&request).await.unwrap();

        assert_eq!(bill.id, 12);
        assert_eq!(bill.grand_total, Money::from_paise(117000));
    }

    #[tokio::test]
    async fn test_update_bill_status_patches_status_field() {
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("access-1", "refresh-1");

        server.expect(
            Expectation::matching(all_of![
                request::method_path("PATCH", "/bills/12/"),
                request::body(json_decoded(eq(json!({"status": "Paid"})))),
            ])
            .times(1)
            .respond_with(json_encoded(bill_json(12))),
        );

        client.update_bill_status(12, BillStatus::Paid).await.unwrap();
    }

    #[tokio::test]
    async fn test_daily_report_query_date_format() {
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("access-1", "refresh-1");

        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/bills/daily-report/"),
                request::query(url_decoded(contains(("date", "2025-07-03")))),
            ])
            .times(1)
            .respond_with(json_encoded(json!({
                "date": "2025-07-03",
                "bills": [bill_json(12)],
                "summary": {
                    "total_amount": 1170.0,
                    "bill_count": 1,
                    "average_amount": 1170.0,
                    "highest_amount": 1170.0
                }
            }))),
        );

        let report = client
            .daily_report(NaiveDate::from_ymd_opt(2025, 7, 3).unwrap())
            .await
            .unwrap();

        assert_eq!(report.summary.bill_count, 1);
        assert_eq!(
            report.summary.total_amount,
            clinicdesk_core::money::Money::from_paise(117000)
        );
    }

    #[tokio::test]
    async fn test_restore_session_with_valid_token() {
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("access-1", "refresh-1");

        server.expect(
            Expectation::matching(request::method_path("GET", "/auth/user/"))
                .times(1)
                .respond_with(json_encoded(user_json())),
        );

        let user = client.restore_session().await;
        assert_eq!(user.unwrap().username, "frontdesk");
    }

    #[tokio::test]
    async fn test_restore_session_without_token_stays_offline() {
        // No expectations: any request would fail the test.
        let server = Server::run();
        let (client, _store) = test_client(&server);

        assert!(client.restore_session().await.is_none());
    }

    #[tokio::test]
    async fn test_restore_session_with_rejected_token_clears_it() {
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.replace_access("stale");

        server.expect(
            Expectation::matching(request::method_path("GET", "/auth/user/"))
                .times(1)
                .respond_with(status_code(401)),
        );

        assert!(client.restore_session().await.is_none());
        assert_eq!(store.access_token(), None);
    }

    #[tokio::test]
    async fn test_logout_is_local_only() {
        // No expectations: logout must not touch the network.
        let server = Server::run();
        let (client, store) = test_client(&server);
        store.store_pair("access-1", "refresh-1");

        client.logout();

        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_the_network() {
        use clinicdesk_core::bill::{BillDraft, Discount};
        use clinicdesk_core::error::CoreError;

        // No expectations: building a payload from an empty draft fails in
        // core, so nothing can be sent.
        let server = Server::run();
        let (_client, _store) = test_client(&server);

        let patient = serde_json::from_value::<Patient>(patient_json(7, "Asha Verma")).unwrap();
        let draft = BillDraft::new();
        let result = CreateBillRequest::from_draft(&patient, &draft, &Discount::none(), "");

        assert!(matches!(result, Err(CoreError::EmptyBill)));
    }
}

//! # Wire Types
//!
//! Request and response shapes for the clinic backend's REST API.
//!
//! ## Naming Conventions on the Wire
//! The backend is not consistent, and these types follow it faithfully
//! rather than papering over it:
//!
//! - entity responses (patients, services, bills) use `snake_case` fields
//! - the bill creation payload and the aggregate views (dashboard, patient
//!   details) use `camelCase`
//! - monetary fields are decimal rupees on the wire and integer paise
//!   ([`Money`]) everywhere else, converted via `money::as_rupees`
//!
//! Domain types shared with the bill engine (Patient, Service, BillStatus)
//! live in `clinicdesk-core`; this module only adds the shapes that exist
//! purely for transport.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use clinicdesk_core::bill::{BillDraft, Discount, DiscountKind};
use clinicdesk_core::error::CoreResult;
use clinicdesk_core::money::Money;
use clinicdesk_core::types::{BillStatus, Gender, Patient, ServiceCategory};

// =============================================================================
// Auth
// =============================================================================

/// Login credentials, posted to `/auth/login/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
}

/// Refresh payload, posted to `/auth/token/refresh/`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Fresh access token returned by a successful refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Application role attached to the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Receptionist,
}

/// The signed-in user's identity, from `/auth/user/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
}

impl AuthUser {
    /// Returns true if this user has administrative access.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Patients
// =============================================================================

/// Payload for creating or fully updating a patient.
///
/// The backend owns `id`, `last_visit`, and the record timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
}

/// One entry in a patient's medical history log.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicalRecord {
    pub id: u64,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
    pub doctor: String,
}

/// Payload for appending a medical record; the backend stamps id and date.
#[derive(Debug, Clone, Serialize)]
pub struct NewMedicalRecord {
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
    pub doctor: String,
}

/// Metadata for an uploaded report document.
///
/// Upload and download of the file itself are handled elsewhere; this client
/// only lists what exists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalReport {
    pub id: u64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub file_url: String,
    pub file_type: String,
    pub uploaded_by: String,
}

/// The full patient profile view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetails {
    pub patient: Patient,
    pub medical_records: Vec<MedicalRecord>,
    pub billing_history: Vec<Bill>,
    pub medical_reports: Vec<MedicalReport>,
}

// =============================================================================
// Services
// =============================================================================

/// Payload for creating or fully updating a catalog service.
#[derive(Debug, Clone, Serialize)]
pub struct NewService {
    pub name: String,
    pub description: String,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub price: Money,
    pub category: ServiceCategory,
    pub is_active: bool,
}

// =============================================================================
// Bills
// =============================================================================

/// One line of a server-side bill record.
#[derive(Debug, Clone, Deserialize)]
pub struct BillItem {
    pub id: u64,
    /// Service id.
    pub service: u64,
    pub service_name: String,
    pub quantity: i64,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub price: Money,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub total: Money,
}

/// A bill as the backend records it.
///
/// `discount_amount` and `grand_total` are server-computed; the draft totals
/// shown during creation come from the bill engine and must agree.
#[derive(Debug, Clone, Deserialize)]
pub struct Bill {
    pub id: u64,
    pub bill_number: String,
    pub date: NaiveDate,
    /// Patient id.
    pub patient: u64,
    pub patient_name: String,
    pub discount_type: DiscountKind,
    pub discount_value: f64,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub discount_amount: Money,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub grand_total: Money,
    pub status: BillStatus,
    pub items: Vec<BillItem>,
    pub notes: Option<String>,
    /// User id of the creator.
    pub created_by: u64,
}

/// One line of the bill creation payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillItem {
    pub service_id: u64,
    pub quantity: i64,
}

/// Payload for `POST /bills/`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub patient_id: u64,
    pub items: Vec<CreateBillItem>,
    pub discount_type: DiscountKind,
    pub discount_value: f64,
    pub notes: String,
}

impl CreateBillRequest {
    /// Builds the payload from a validated bill draft.
    ///
    /// Runs the submission gate first: a draft without a patient, without
    /// items, or with an unselected service never produces a payload, so it
    /// can never reach the network.
    pub fn from_draft(
        patient: &Patient,
        draft: &BillDraft,
        discount: &Discount,
        notes: &str,
    ) -> CoreResult<Self> {
        draft.validate_for_submission(Some(patient))?;

        Ok(CreateBillRequest {
            patient_id: patient.id,
            items: draft
                .items()
                .iter()
                .map(|item| CreateBillItem {
                    service_id: item.service_id,
                    quantity: item.quantity,
                })
                .collect(),
            discount_type: discount.kind(),
            discount_value: discount.wire_value(),
            notes: notes.to_string(),
        })
    }
}

// =============================================================================
// Reports & Dashboard
// =============================================================================

/// Aggregates for one day of billing.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSummary {
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub total_amount: Money,
    pub bill_count: u64,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub average_amount: Money,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub highest_amount: Money,
}

/// The daily report view from `/bills/daily-report/`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub bills: Vec<Bill>,
    pub summary: ReportSummary,
}

/// One point of the dashboard's recent-activity series.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub patients: u64,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub revenue: Money,
}

/// The landing-page dashboard view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_patients: u64,
    pub total_bills: u64,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub total_revenue: Money,
    pub today_patients: u64,
    pub today_bills: u64,
    #[serde(with = "clinicdesk_core::money::as_rupees")]
    pub today_revenue: Money,
    pub recent_bills: Vec<Bill>,
    pub recent_patients: Vec<Patient>,
    pub daily_stats: Vec<DailyStat>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clinicdesk_core::bill::ItemEdit;
    use clinicdesk_core::error::CoreError;
    use clinicdesk_core::money::Percent;
    use clinicdesk_core::types::Service;
    use serde_json::json;

    fn test_patient() -> Patient {
        Patient {
            id: 7,
            name: "Asha Verma".to_string(),
            age: 34,
            gender: Gender::Female,
            phone: "9876543210".to_string(),
            email: None,
            address: "12 Lake Road".to_string(),
            medical_history: None,
            last_visit: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_catalog() -> Vec<Service> {
        vec![Service {
            id: 3,
            name: "X-Ray".to_string(),
            description: String::new(),
            price: Money::from_paise(80000),
            category: ServiceCategory::Radiology,
            is_active: true,
        }]
    }

    #[test]
    fn test_create_bill_payload_shape() {
        let catalog = test_catalog();
        let mut draft = BillDraft::new();
        let row = draft.add_item();
        draft.edit_item(row, ItemEdit::SelectService(3), &catalog);
        draft.edit_item(row, ItemEdit::SetQuantity(2), &catalog);

        let discount = Discount::Percentage(Percent::from_percentage(10.0));
        let request =
            CreateBillRequest::from_draft(&test_patient(), &draft, &discount, "").unwrap();

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "patientId": 7,
                "items": [{"serviceId": 3, "quantity": 2}],
                "discountType": "percentage",
                "discountValue": 10.0,
                "notes": ""
            })
        );
    }

    #[test]
    fn test_from_draft_enforces_submission_gate() {
        let draft = BillDraft::new();
        let result =
            CreateBillRequest::from_draft(&test_patient(), &draft, &Discount::none(), "");
        assert!(matches!(result, Err(CoreError::EmptyBill)));
    }

    #[test]
    fn test_bill_wire_round_trip() {
        let bill: Bill = serde_json::from_value(json!({
            "id": 12,
            "bill_number": "B-0012",
            "date": "2025-07-03",
            "patient": 7,
            "patient_name": "Asha Verma",
            "discount_type": "amount",
            "discount_value": 700.0,
            "discount_amount": 700.0,
            "grand_total": -200.0,
            "status": "Pending",
            "items": [{
                "id": 1,
                "service": 3,
                "service_name": "X-Ray",
                "quantity": 1,
                "price": 500.0,
                "total": 500.0
            }],
            "notes": null,
            "created_by": 2
        }))
        .unwrap();

        assert_eq!(bill.discount_type, DiscountKind::Amount);
        assert_eq!(bill.grand_total, Money::from_paise(-20000));
        assert_eq!(bill.items[0].total, Money::from_paise(50000));
        assert_eq!(bill.status, BillStatus::Pending);
    }

    #[test]
    fn test_auth_user_role() {
        let user: AuthUser = serde_json::from_value(json!({
            "id": 2,
            "username": "frontdesk",
            "email": "desk@clinic.example",
            "first_name": "Front",
            "last_name": "Desk",
            "role": "receptionist"
        }))
        .unwrap();

        assert_eq!(user.role, Role::Receptionist);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_dashboard_wire_shape() {
        let dashboard: Dashboard = serde_json::from_value(json!({
            "totalPatients": 120,
            "totalBills": 340,
            "totalRevenue": 125000.5,
            "todayPatients": 4,
            "todayBills": 6,
            "todayRevenue": 4300.0,
            "recentBills": [],
            "recentPatients": [],
            "dailyStats": [
                {"date": "2025-07-01", "patients": 9, "revenue": 8200.0}
            ]
        }))
        .unwrap();

        assert_eq!(dashboard.total_revenue, Money::from_paise(12_500_050));
        assert_eq!(dashboard.daily_stats[0].patients, 9);
    }
}

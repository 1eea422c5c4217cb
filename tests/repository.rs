use std::time::Duration;

use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;

use pushkind_clinic::domain::appointment::{AppointmentStatus, TriageDecision};
use pushkind_clinic::domain::clinic::{ClinicDecision, ClinicStatus};
use pushkind_clinic::domain::payment::PaymentMethod;
use pushkind_clinic::domain::types::{AppointmentId, ClinicId, FreeText, Money};
use pushkind_clinic::models::auth::AuthenticatedUser;
use pushkind_clinic::repository::errors::RepositoryError;
use pushkind_clinic::repository::{
    AccountGateway, ApiRepository, AppointmentReader, AppointmentScope, AppointmentWriter,
    ClinicListQuery, ClinicReader, ClinicWriter, PaymentReader,
};

fn user(token: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "9".to_string(),
        email: "admin@platform.test".to_string(),
        name: "Platform Admin".to_string(),
        clinic_id: None,
        roles: vec!["platform_admin".to_string()],
        exp: usize::MAX,
        token: token.to_string(),
    }
}

fn repository(server: &MockServer) -> ApiRepository {
    ApiRepository::new(&server.base_url(), Duration::from_secs(5)).unwrap()
}

fn clinic_json(id: i32, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Riverside Clinic",
        "email": "front@riverside.test",
        "phone": "",
        "status": status,
        "created_at": "2026-03-02T09:15:00Z"
    })
}

#[tokio::test]
async fn lists_clinics_with_filters_and_bearer_token() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/admin/clinics")
                .query_param("status", "pending")
                .query_param("search", "river")
                .query_param("page", "2")
                .query_param("per_page", "20")
                .header("authorization", "Bearer admin-token");
            then.status(200)
                .json_body(json!({"total": 21, "items": [clinic_json(4, "pending")]}));
        })
        .await;
    let repo = repository(&server);
    let admin = user("admin-token");

    let query = ClinicListQuery::new()
        .status(ClinicStatus::Pending)
        .search("river")
        .paginate(2, 20);
    let (total, clinics) = repo.session(&admin).list_clinics(query).await.unwrap();

    list.assert_async().await;
    assert_eq!(total, 21);
    assert_eq!(clinics[0].id, ClinicId::new(4).unwrap());
    assert_eq!(clinics[0].status, ClinicStatus::Pending);
    assert_eq!(clinics[0].phone, None);
    assert!(clinics[0].created_at.is_some());
}

#[tokio::test]
async fn rejecting_clinic_sends_reason() {
    let server = MockServer::start_async().await;
    let reject = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/admin/clinics/4/reject")
                .json_body(json!({"reason": "License expired"}));
            then.status(200).json_body(clinic_json(4, "rejected"));
        })
        .await;
    let repo = repository(&server);
    let admin = user("admin-token");

    let decision = ClinicDecision::Reject(FreeText::new("License expired").unwrap());
    let clinic = repo
        .session(&admin)
        .decide_clinic(ClinicId::new(4).unwrap(), &decision)
        .await
        .unwrap();

    reject.assert_async().await;
    assert_eq!(clinic.status, ClinicStatus::Rejected);
}

#[tokio::test]
async fn validation_failure_keeps_field_messages() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/secretary/appointments/12/reschedule");
            then.status(422).json_body(json!({
                "message": "The given data was invalid.",
                "errors": {"scheduled_at": ["The slot is already taken."]}
            }));
        })
        .await;
    let repo = repository(&server);
    let desk = user("desk-token");

    let decision = TriageDecision::Reschedule {
        scheduled_at: NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap(),
    };
    let err = repo
        .session(&desk)
        .triage_appointment(AppointmentId::new(12).unwrap(), &decision)
        .await
        .unwrap_err();

    match err {
        RepositoryError::Validation { fields, .. } => {
            assert_eq!(fields["scheduled_at"], vec!["The slot is already taken."]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn clinic_day_listing_passes_date_and_parses_statuses() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/secretary/dashboard/appointments")
                .query_param("date", "2026-03-05");
            then.status(200).json_body(json!([
                {"id": 1, "patient_name": "Ann Lee", "scheduled_at": "2026-03-05T09:00:00",
                 "status": "approved"},
                {"id": 2, "patient_name": "Bo Chen", "scheduled_at": "2026-03-05T09:30:00",
                 "status": "waiting_room"}
            ]));
        })
        .await;
    let repo = repository(&server);
    let desk = user("desk-token");

    let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
    let appointments = repo
        .session(&desk)
        .list_appointments(AppointmentScope::ClinicDay(date))
        .await
        .unwrap();

    listing.assert_async().await;
    assert_eq!(appointments[0].status, AppointmentStatus::Approved);
    assert_eq!(
        appointments[1].status,
        AppointmentStatus::Other("waiting_room".to_string())
    );
}

#[tokio::test]
async fn daily_payments_are_converted_to_cents() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/clinic/payments/daily-report")
                .query_param("date", "2026-03-05");
            then.status(200).json_body(json!({
                "date": "2026-03-05",
                "payments": [
                    {"id": 3, "appointment_id": 1, "amount": 45.5, "method": "card",
                     "paid_at": "2026-03-05T11:00:00"}
                ]
            }));
        })
        .await;
    let repo = repository(&server);
    let manager = user("manager-token");

    let report = repo
        .session(&manager)
        .daily_payments(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap())
        .await
        .unwrap();

    assert_eq!(report.payments.len(), 1);
    assert_eq!(report.payments[0].amount, Money::from_cents(4550));
    assert_eq!(report.payments[0].method, PaymentMethod::Card);
}

#[tokio::test]
async fn anonymous_login_returns_token_without_authorization() {
    let server = MockServer::start_async().await;
    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/login")
                .json_body(json!({"email": "doc@clinic.test", "password": "hunter22"}));
            then.status(200).json_body(json!({"access_token": "jwt-value"}));
        })
        .await;
    let repo = repository(&server);

    let token = repo
        .anonymous()
        .login("doc@clinic.test", "hunter22")
        .await
        .unwrap();

    login.assert_async().await;
    assert_eq!(token, "jwt-value");
}

#[tokio::test]
async fn server_errors_and_unreachable_backend_are_distinguished() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/patient/appointments/8/cancel");
            then.status(503).body("maintenance");
        })
        .await;
    let repo = repository(&server);
    let patient = user("patient-token");

    let err = repo
        .session(&patient)
        .cancel_appointment(AppointmentId::new(8).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Server { status: 503, .. }));

    let offline = ApiRepository::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
    let err = offline
        .session(&patient)
        .cancel_appointment(AppointmentId::new(8).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError(_)));
}

use std::time::Duration;

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{App, http::StatusCode, http::header, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use httpmock::prelude::*;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use pushkind_clinic::models::auth::AuthenticatedUser;
use pushkind_clinic::models::config::ServerConfig;
use pushkind_clinic::repository::ApiRepository;
use pushkind_clinic::routes::alert_level_to_str;
use pushkind_clinic::routes::api::api_v1_patients;
use pushkind_clinic::services::lookup::LookupGate;
use tera::Tera;

const SECRET: &str = "integration-secret";

fn config(api_base_url: &str) -> ServerConfig {
    ServerConfig {
        domain: "clinic.test".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        api_base_url: api_base_url.to_string(),
        api_timeout_secs: 5,
        templates_dir: "templates/**/*".to_string(),
        secret: SECRET.to_string(),
        auth_service_url: "http://auth.test".to_string(),
        lookup_debounce_ms: 0,
    }
}

fn token(roles: &[&str], clinic_id: Option<i32>) -> String {
    let claims = AuthenticatedUser {
        sub: "17".to_string(),
        email: "desk@clinic.test".to_string(),
        name: "Front Desk".to_string(),
        clinic_id,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        token: String::new(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

macro_rules! api_app {
    ($base_url:expr) => {
        test::init_service(
            App::new()
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new(config($base_url)))
                .app_data(web::Data::new(
                    ApiRepository::new($base_url, Duration::from_secs(5)).unwrap(),
                ))
                .app_data(web::Data::new(LookupGate::new(Duration::ZERO)))
                .service(web::scope("/api").service(api_v1_patients)),
        )
    };
}

/// The whole application, with cookie sessions and flash messages, against `$base_url`.
macro_rules! site_app {
    ($base_url:expr) => {{
        let key = Key::generate();
        let flash = FlashMessagesFramework::builder(CookieMessageStore::builder(key.clone()).build())
            .build();
        test::init_service(
            App::new()
                .wrap(flash)
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .configure(pushkind_clinic::configure)
                .app_data(web::Data::new(Tera::new("templates/**/*").unwrap()))
                .app_data(web::Data::new(config($base_url)))
                .app_data(web::Data::new(
                    ApiRepository::new($base_url, Duration::from_secs(5)).unwrap(),
                ))
                .app_data(web::Data::new(LookupGate::new(Duration::ZERO))),
        )
    }};
}

fn registration_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("clinic_name", "Riverside Clinic"),
        ("manager_name", "Dana Reyes"),
        ("email", "front@riverside.test"),
        ("phone", "+14155552671"),
        ("address", "12 River Rd"),
        ("license_number", "LIC-2026"),
        ("password", "correct-horse"),
        ("password_confirmation", "correct-horse"),
    ]
}

#[core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn patient_lookup_forwards_bearer_token() {
    let backend = MockServer::start_async().await;
    let jwt = token(&["secretary"], Some(3));
    let search = backend
        .mock_async(|when, then| {
            when.method(GET)
                .path("/secretary/patients/search")
                .query_param("q", "ann")
                .header("authorization", format!("Bearer {jwt}"));
            then.status(200).json_body(json!([
                {"id": 5, "name": "Ann Lee", "phone": "+15550100"}
            ]));
        })
        .await;
    let app = api_app!(&backend.base_url()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/patients?q=ann")
        .insert_header((header::AUTHORIZATION, format!("Bearer {jwt}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    search.assert_async().await;
    assert_eq!(body[0]["name"], "Ann Lee");
    assert_eq!(body[0]["id"], 5);
}

#[actix_web::test]
async fn short_patient_lookup_answers_empty_list() {
    let backend = MockServer::start_async().await;
    let search = backend
        .mock_async(|when, then| {
            when.path("/secretary/patients/search");
            then.status(200).json_body(json!([]));
        })
        .await;
    let app = api_app!(&backend.base_url()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/patients?q=a")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token(&["secretary"], Some(3))),
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!([]));
    search.assert_hits_async(0).await;
}

#[actix_web::test]
async fn patient_lookup_requires_credentials() {
    let backend = MockServer::start_async().await;
    let app = api_app!(&backend.base_url()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/patients?q=ann")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn patient_lookup_is_closed_to_patients() {
    let backend = MockServer::start_async().await;
    let app = api_app!(&backend.base_url()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/patients?q=ann")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token(&["patient"], None)),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn backend_outage_maps_to_service_unavailable() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.path("/secretary/patients/search");
            then.status(502).body("bad gateway");
        })
        .await;
    let app = api_app!(&backend.base_url()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/patients?q=ann")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token(&["doctor"], Some(3))),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn registration_is_submitted_and_redirects_to_login() {
    let backend = MockServer::start_async().await;
    let register = backend
        .mock_async(|when, then| {
            when.method(POST)
                .path("/register/clinic")
                .json_body_partial(r#"{"clinic_name": "Riverside Clinic", "license_number": "LIC-2026"}"#);
            then.status(201).json_body(json!({
                "id": 4,
                "name": "Riverside Clinic",
                "email": "front@riverside.test",
                "status": "pending"
            }));
        })
        .await;
    let app = site_app!(&backend.base_url()).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(registration_form())
        .to_request();
    let resp = test::call_service(&app, req).await;

    register.assert_async().await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

#[actix_web::test]
async fn rejected_registration_flashes_each_field_message() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(POST).path("/register/clinic");
            then.status(422).json_body(json!({
                "message": "The given data was invalid.",
                "errors": {
                    "email": ["The email has already been taken."],
                    "license_number": ["License is already registered."]
                }
            }));
        })
        .await;
    let app = site_app!(&backend.base_url()).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(registration_form())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/register");

    let cookies: Vec<Cookie<'static>> = resp
        .response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect();
    let mut follow = test::TestRequest::get().uri("/register");
    for cookie in cookies {
        follow = follow.cookie(cookie);
    }
    let body = test::call_and_read_body(&app, follow.to_request()).await;
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("email: The email has already been taken."));
    assert!(body.contains("license number: License is already registered."));
}

#[actix_web::test]
async fn backend_outage_renders_unavailable_page() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/admin/dashboard/stats");
            then.status(503).body("maintenance");
        })
        .await;
    let app = site_app!(&backend.base_url()).await;

    let req = test::TestRequest::get()
        .uri("/admin")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token(&["platform_admin"], None)),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("The clinic service is unavailable."));
}

#[actix_web::test]
async fn backend_refusal_redirects_to_not_assigned() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/admin/dashboard/stats");
            then.status(403).json_body(json!({"message": "Forbidden"}));
        })
        .await;
    let app = site_app!(&backend.base_url()).await;

    let req = test::TestRequest::get()
        .uri("/admin")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", token(&["platform_admin"], None)),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/na");
}

#[actix_web::test]
async fn pages_without_credentials_redirect_to_login() {
    let backend = MockServer::start_async().await;
    let app = site_app!(&backend.base_url()).await;

    let req = test::TestRequest::get().uri("/secretary").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
}

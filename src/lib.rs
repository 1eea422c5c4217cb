//! Multi-tenant clinic management front end over the clinic REST backend.

#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::ApiRepository;
#[cfg(feature = "server")]
use crate::services::lookup::LookupGate;

pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

pub const PLATFORM_ADMIN_ROLE: &str = "platform_admin";
pub const CLINIC_MANAGER_ROLE: &str = "clinic_manager";
pub const DOCTOR_ROLE: &str = "doctor";
pub const SECRETARY_ROLE: &str = "secretary";
pub const PATIENT_ROLE: &str = "patient";

/// Registers every handler on `cfg`.
///
/// Anonymous pages and the JSON API sit outside [`RedirectUnauthorized`], so
/// API clients receive a plain 401.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    use crate::routes::{
        admin, api, doctor, main, manager, notifications, patient, reports, secretary, settings,
    };

    cfg.service(main::login_page)
        .service(main::login)
        .service(main::logout)
        .service(main::register_page)
        .service(main::register)
        .service(web::scope("/api").service(api::api_v1_patients))
        .service(
            web::scope("")
                .wrap(RedirectUnauthorized)
                .service(main::index)
                .service(main::not_assigned)
                .service(admin::admin_dashboard)
                .service(admin::admin_clinics)
                .service(admin::approve_clinic)
                .service(admin::reject_clinic)
                .service(admin::suspend_clinic)
                .service(manager::manager_dashboard)
                .service(manager::staff_page)
                .service(manager::add_doctor)
                .service(manager::add_secretary)
                .service(manager::toggle_staff)
                .service(manager::remove_staff)
                .service(reports::reports_page)
                .service(reports::export_report)
                .service(settings::settings_page)
                .service(settings::save_settings)
                .service(settings::upload_logo)
                .service(secretary::secretary_dashboard)
                .service(secretary::requests_page)
                .service(secretary::approve_appointment)
                .service(secretary::reject_appointment)
                .service(secretary::reschedule_appointment)
                .service(secretary::record_payment)
                .service(doctor::doctor_schedule)
                .service(doctor::complete_visit)
                .service(doctor::mark_no_show)
                .service(patient::patient_appointments)
                .service(patient::booking_page)
                .service(patient::book_appointment)
                .service(patient::cancel_appointment)
                .service(notifications::notifications_page)
                .service(notifications::mark_notification_read)
                .service(notifications::mark_all_notifications_read),
        );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = ApiRepository::new(
        &server_config.api_base_url,
        Duration::from_secs(server_config.api_timeout_secs),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;

    let lookup_gate = web::Data::new(LookupGate::new(Duration::from_millis(
        server_config.lookup_debounce_ms,
    )));

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(lookup_gate.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

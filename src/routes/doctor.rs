use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::appointments::CompleteVisitForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, flash_service_error, page_error, redirect, render_template};
use crate::services::doctor as doctor_service;

#[get("/doctor")]
pub async fn doctor_schedule(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "doctor",
        &server_config.auth_service_url,
    );

    match doctor_service::load_schedule(&repo.session(&user), &user).await {
        Ok(data) => {
            context.insert("schedule", &data);
            render_template(&tera, "doctor/schedule.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[post("/doctor/appointments/{appointment_id}/complete")]
pub async fn complete_visit(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<CompleteVisitForm>,
) -> impl Responder {
    match doctor_service::complete_visit(
        &repo.session(&user),
        &user,
        appointment_id.into_inner(),
        form,
    )
    .await
    {
        Ok(appointment) => {
            FlashMessage::success(format!(
                "Visit of {} marked {}.",
                appointment.patient_name,
                appointment.status.as_str()
            ))
            .send();
            redirect("/doctor")
        }
        Err(err) => flash_service_error(err, "/doctor", "complete the visit"),
    }
}

#[post("/doctor/appointments/{appointment_id}/no-show")]
pub async fn mark_no_show(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match doctor_service::mark_no_show(&repo.session(&user), &user, appointment_id.into_inner())
        .await
    {
        Ok(appointment) => {
            FlashMessage::info(format!("{} did not show up.", appointment.patient_name)).send();
            redirect("/doctor")
        }
        Err(err) => flash_service_error(err, "/doctor", "record the no-show"),
    }
}

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use serde::Deserialize;
use tera::Tera;

use crate::forms::appointments::BookAppointmentForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, flash_service_error, page_error, redirect, render_template};
use crate::services::patient as patient_service;

#[derive(Deserialize)]
pub struct BookingQuery {
    clinic_id: i32,
}

#[get("/patient")]
pub async fn patient_appointments(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "patient",
        &server_config.auth_service_url,
    );

    match patient_service::load_appointments(
        &repo.session(&user),
        &user,
        Local::now().naive_local(),
    )
    .await
    {
        Ok(data) => {
            context.insert("upcoming", &data.upcoming);
            context.insert("past", &data.past);
            render_template(&tera, "patient/appointments.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[get("/patient/book")]
pub async fn booking_page(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    query: web::Query<BookingQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "book",
        &server_config.auth_service_url,
    );

    match patient_service::load_booking_page(&repo.session(&user), &user, query.clinic_id).await {
        Ok(data) => {
            context.insert("booking", &data);
            render_template(&tera, "patient/book.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[post("/patient/appointments")]
pub async fn book_appointment(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<BookAppointmentForm>,
) -> impl Responder {
    let back = format!("/patient/book?clinic_id={}", form.clinic_id);

    match patient_service::book_appointment(
        &repo.session(&user),
        &user,
        form,
        Local::now().naive_local(),
    )
    .await
    {
        Ok(appointment) => {
            FlashMessage::success(format!(
                "Request sent. Current status: {}.",
                appointment.status.as_str()
            ))
            .send();
            redirect("/patient")
        }
        Err(err) => flash_service_error(err, &back, "request the appointment"),
    }
}

#[post("/patient/appointments/{appointment_id}/cancel")]
pub async fn cancel_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match patient_service::cancel_appointment(
        &repo.session(&user),
        &user,
        appointment_id.into_inner(),
    )
    .await
    {
        Ok(appointment) => {
            FlashMessage::success(format!(
                "Appointment #{} is now {}.",
                appointment.id,
                appointment.status.as_str()
            ))
            .send();
            redirect("/patient")
        }
        Err(err) => flash_service_error(err, "/patient", "cancel the appointment"),
    }
}

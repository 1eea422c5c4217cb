use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::domain::appointment::Appointment;
use crate::forms::appointments::{
    RecordPaymentForm, RejectAppointmentForm, RescheduleAppointmentForm,
};
use crate::forms::reports::ReportQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, flash_service_error, page_error, redirect, render_template};
use crate::services::ServiceError;
use crate::services::secretary as secretary_service;

fn flash_new_status(appointment: &Appointment) {
    FlashMessage::success(format!(
        "Appointment #{} for {} is now {}.",
        appointment.id,
        appointment.patient_name,
        appointment.status.as_str().replace('_', " ")
    ))
    .send();
}

#[get("/secretary")]
pub async fn secretary_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    query: web::Query<ReportQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "secretary",
        &server_config.auth_service_url,
    );

    let date = match query.date_or(Local::now().date_naive()) {
        Ok(date) => date,
        Err(err) => return page_error(&tera, ServiceError::from(err), context),
    };

    match secretary_service::load_dashboard(&repo.session(&user), &user, date).await {
        Ok(data) => {
            context.insert("board", &data);
            render_template(&tera, "secretary/dashboard.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[get("/secretary/requests")]
pub async fn requests_page(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "requests",
        &server_config.auth_service_url,
    );

    match secretary_service::list_requests(&repo.session(&user), &user).await {
        Ok(data) => {
            context.insert("requests", &data.requests);
            render_template(&tera, "secretary/requests.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[post("/secretary/appointments/{appointment_id}/approve")]
pub async fn approve_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match secretary_service::approve_appointment(
        &repo.session(&user),
        &user,
        appointment_id.into_inner(),
    )
    .await
    {
        Ok(appointment) => {
            flash_new_status(&appointment);
            redirect("/secretary/requests")
        }
        Err(err) => flash_service_error(err, "/secretary/requests", "approve the appointment"),
    }
}

#[post("/secretary/appointments/{appointment_id}/reject")]
pub async fn reject_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<RejectAppointmentForm>,
) -> impl Responder {
    match secretary_service::reject_appointment(
        &repo.session(&user),
        &user,
        appointment_id.into_inner(),
        form,
    )
    .await
    {
        Ok(appointment) => {
            flash_new_status(&appointment);
            redirect("/secretary/requests")
        }
        Err(err) => flash_service_error(err, "/secretary/requests", "reject the appointment"),
    }
}

#[post("/secretary/appointments/{appointment_id}/reschedule")]
pub async fn reschedule_appointment(
    appointment_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<RescheduleAppointmentForm>,
) -> impl Responder {
    match secretary_service::reschedule_appointment(
        &repo.session(&user),
        &user,
        appointment_id.into_inner(),
        form,
        Local::now().naive_local(),
    )
    .await
    {
        Ok(appointment) => {
            flash_new_status(&appointment);
            redirect("/secretary/requests")
        }
        Err(err) => flash_service_error(err, "/secretary/requests", "reschedule the appointment"),
    }
}

#[post("/secretary/payments")]
pub async fn record_payment(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<RecordPaymentForm>,
) -> impl Responder {
    match secretary_service::record_payment(&repo.session(&user), &user, form).await {
        Ok(payment) => {
            FlashMessage::success(format!(
                "Payment of {} by {} recorded.",
                payment.amount,
                payment.method.as_str()
            ))
            .send();
            redirect("/secretary")
        }
        Err(err) => flash_service_error(err, "/secretary", "record the payment"),
    }
}

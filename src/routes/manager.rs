use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::forms::staff::{AddDoctorForm, AddSecretaryForm, ToggleStaffForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, flash_service_error, page_error, redirect, render_template};
use crate::services::ServiceError;
use crate::services::reports as reports_service;
use crate::services::staff as staff_service;

#[get("/manager")]
pub async fn manager_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "manager",
        &server_config.auth_service_url,
    );
    let today = Local::now().date_naive();

    match reports_service::load_manager_dashboard(&repo.session(&user), &user, today).await {
        Ok(data) => {
            context.insert("staff", &data.staff);
            context.insert("report", &data.today);
            render_template(&tera, "manager/dashboard.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[get("/manager/staff")]
pub async fn staff_page(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "staff",
        &server_config.auth_service_url,
    );

    match staff_service::load_staff_page(&repo.session(&user), &user).await {
        Ok(data) => {
            context.insert("staff", &data);
            render_template(&tera, "manager/staff.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

/// Body is decoded by hand because `working_days` is a repeated field.
#[post("/manager/doctors")]
pub async fn add_doctor(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    body: web::Bytes,
) -> impl Responder {
    let form = match AddDoctorForm::from_body(&body) {
        Ok(form) => form,
        Err(err) => {
            return flash_service_error(ServiceError::from(err), "/manager/staff", "add the doctor");
        }
    };

    match staff_service::add_doctor(&repo.session(&user), &user, form).await {
        Ok(doctor) => {
            FlashMessage::success(format!("Doctor {} added.", doctor.name)).send();
            redirect("/manager/staff")
        }
        Err(err) => flash_service_error(err, "/manager/staff", "add the doctor"),
    }
}

#[post("/manager/secretaries")]
pub async fn add_secretary(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<AddSecretaryForm>,
) -> impl Responder {
    match staff_service::add_secretary(&repo.session(&user), &user, form).await {
        Ok(secretary) => {
            FlashMessage::success(format!("Secretary {} added.", secretary.name)).send();
            redirect("/manager/staff")
        }
        Err(err) => flash_service_error(err, "/manager/staff", "add the secretary"),
    }
}

#[post("/manager/staff/{staff_id}/toggle")]
pub async fn toggle_staff(
    staff_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<ToggleStaffForm>,
) -> impl Responder {
    match staff_service::set_staff_active(
        &repo.session(&user),
        &user,
        staff_id.into_inner(),
        form.active,
    )
    .await
    {
        Ok(member) => {
            let state = if member.active { "activated" } else { "deactivated" };
            FlashMessage::success(format!("{} {state}.", member.name)).send();
            redirect("/manager/staff")
        }
        Err(err) => flash_service_error(err, "/manager/staff", "change the staff status"),
    }
}

#[post("/manager/staff/{staff_id}/remove")]
pub async fn remove_staff(
    staff_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match staff_service::remove_staff(&repo.session(&user), &user, staff_id.into_inner()).await {
        Ok(()) => {
            FlashMessage::success("Staff member removed.").send();
            redirect("/manager/staff")
        }
        Err(err) => flash_service_error(err, "/manager/staff", "remove the staff member"),
    }
}

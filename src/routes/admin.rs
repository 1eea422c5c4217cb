use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::admin::{ClinicFilterQuery, RejectClinicForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, flash_service_error, page_error, redirect, render_template};
use crate::services::admin as admin_service;

#[get("/admin")]
pub async fn admin_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "admin",
        &server_config.auth_service_url,
    );

    match admin_service::load_dashboard(&repo.session(&user), &user).await {
        Ok(data) => {
            context.insert("stats", &data);
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[get("/admin/clinics")]
pub async fn admin_clinics(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    query: web::Query<ClinicFilterQuery>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "clinics",
        &server_config.auth_service_url,
    );

    match admin_service::list_clinics(&repo.session(&user), &user, query.into_inner()).await {
        Ok(data) => {
            context.insert("clinics", &data.clinics);
            context.insert("total", &data.total);
            context.insert("status_filter", &data.status_filter);
            context.insert("search_query", &data.search_query);
            render_template(&tera, "admin/clinics.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[post("/admin/clinics/{clinic_id}/approve")]
pub async fn approve_clinic(
    clinic_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match admin_service::approve_clinic(&repo.session(&user), &user, clinic_id.into_inner()).await
    {
        Ok(clinic) => {
            FlashMessage::success(format!("{} is now {}.", clinic.name, clinic.status.as_str()))
                .send();
            redirect("/admin/clinics")
        }
        Err(err) => flash_service_error(err, "/admin/clinics", "approve the clinic"),
    }
}

#[post("/admin/clinics/{clinic_id}/reject")]
pub async fn reject_clinic(
    clinic_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<RejectClinicForm>,
) -> impl Responder {
    match admin_service::reject_clinic(&repo.session(&user), &user, clinic_id.into_inner(), form)
        .await
    {
        Ok(clinic) => {
            FlashMessage::success(format!("{} is now {}.", clinic.name, clinic.status.as_str()))
                .send();
            redirect("/admin/clinics")
        }
        Err(err) => flash_service_error(err, "/admin/clinics", "reject the clinic"),
    }
}

#[post("/admin/clinics/{clinic_id}/suspend")]
pub async fn suspend_clinic(
    clinic_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match admin_service::suspend_clinic(&repo.session(&user), &user, clinic_id.into_inner()).await
    {
        Ok(clinic) => {
            FlashMessage::success(format!("{} is now {}.", clinic.name, clinic.status.as_str()))
                .send();
            redirect("/admin/clinics")
        }
        Err(err) => flash_service_error(err, "/admin/clinics", "suspend the clinic"),
    }
}

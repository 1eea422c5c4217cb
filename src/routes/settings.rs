use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::settings::{ClinicSettingsForm, UploadLogoForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, flash_service_error, page_error, redirect, render_template};
use crate::services::settings as settings_service;

#[get("/manager/settings")]
pub async fn settings_page(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "settings",
        &server_config.auth_service_url,
    );

    match settings_service::load_settings(&repo.session(&user), &user).await {
        Ok(settings) => {
            context.insert("settings", &settings);
            context.insert("opening_time", &settings.opening_time.format("%H:%M").to_string());
            context.insert("closing_time", &settings.closing_time.format("%H:%M").to_string());
            render_template(&tera, "manager/settings.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[post("/manager/settings")]
pub async fn save_settings(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<ClinicSettingsForm>,
) -> impl Responder {
    match settings_service::save_settings(&repo.session(&user), &user, form).await {
        Ok(_) => {
            FlashMessage::success("Settings saved.").send();
            redirect("/manager/settings")
        }
        Err(err) => flash_service_error(err, "/manager/settings", "save the settings"),
    }
}

#[post("/manager/settings/logo")]
pub async fn upload_logo(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    MultipartForm(form): MultipartForm<UploadLogoForm>,
) -> impl Responder {
    match settings_service::upload_logo(&repo.session(&user), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Logo updated.").send();
            redirect("/manager/settings")
        }
        Err(err) => flash_service_error(err, "/manager/settings", "upload the logo"),
    }
}

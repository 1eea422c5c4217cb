use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::auth::{LoginForm, RegisterClinicForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, flash_service_error, public_context, redirect, render_template,
};
use crate::services::ServiceError;
use crate::services::auth as auth_service;

/// Sends the user to the dashboard of their highest role.
#[get("/")]
pub async fn index(user: AuthenticatedUser) -> impl Responder {
    redirect(auth_service::landing_path(&user))
}

#[get("/login")]
pub async fn login_page(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = public_context(&flash_messages, "login");
    render_template(&tera, "main/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let token = match auth_service::login(&repo.anonymous(), form).await {
        Ok(token) => token,
        Err(err) => return flash_service_error(err, "/login", "sign in"),
    };

    let user = match AuthenticatedUser::from_token(&token, &server_config.secret) {
        Ok(user) => user,
        Err(err) => {
            log::error!("Backend issued a token that does not verify: {err}");
            FlashMessage::error("Sign in failed. Please retry.").send();
            return redirect("/login");
        }
    };

    if let Err(err) = Identity::login(&req.extensions(), token) {
        log::error!("Failed to store identity for {}: {err}", user.email);
        return HttpResponse::InternalServerError().finish();
    }

    redirect(auth_service::landing_path(&user))
}

#[post("/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    redirect("/login")
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );
    render_template(&tera, "main/not_assigned.html", &context)
}

#[get("/register")]
pub async fn register_page(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = public_context(&flash_messages, "register");
    render_template(&tera, "main/register.html", &context)
}

#[post("/register")]
pub async fn register(
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<RegisterClinicForm>,
) -> impl Responder {
    match auth_service::register_clinic(&repo.anonymous(), form).await {
        Ok(clinic) => {
            FlashMessage::success(format!(
                "Registration of {} submitted. You can sign in once it is approved.",
                clinic.name
            ))
            .send();
            redirect("/login")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Registration is currently closed.").send();
            redirect("/register")
        }
        Err(err) => flash_service_error(err, "/register", "submit the registration"),
    }
}

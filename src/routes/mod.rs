//! HTTP handlers and the helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::services::ServiceError;

pub mod admin;
pub mod api;
pub mod doctor;
pub mod main;
pub mod manager;
pub mod notifications;
pub mod patient;
pub mod reports;
pub mod secretary;
pub mod settings;

/// Maps a flash level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

fn alerts(flash_messages: &IncomingFlashMessages) -> Vec<(&str, &'static str)> {
    flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect()
}

/// Context shared by every authenticated page.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &alerts(flash_messages));
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

/// Context for pages served to anonymous visitors.
pub fn public_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &alerts(flash_messages));
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Turns a failed form submission into flash messages and a redirect.
///
/// `action` completes the generic failure message, e.g. "add the doctor".
pub fn flash_service_error(err: ServiceError, back: &str, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthenticated => HttpResponse::Unauthorized().finish(),
        ServiceError::Unauthorized => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        ServiceError::Validation { message, fields } => {
            if fields.is_empty() {
                FlashMessage::error(message).send();
            }
            for (field, messages) in fields {
                for message in messages {
                    FlashMessage::error(format!("{}: {message}", field.replace('_', " "))).send();
                }
            }
            redirect(back)
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
            redirect(back)
        }
        ServiceError::NotFound => {
            FlashMessage::error("The record no longer exists.").send();
            redirect(back)
        }
        ServiceError::Unavailable(reason) => {
            log::warn!("Backend unavailable while trying to {action}: {reason}");
            FlashMessage::warning("The clinic service is unavailable. Please retry.").send();
            redirect(back)
        }
        ServiceError::Internal(reason) => {
            log::error!("Failed to {action}: {reason}");
            FlashMessage::error(format!("Failed to {action}.")).send();
            redirect(back)
        }
    }
}

/// Response for a page that could not be loaded.
pub fn page_error(tera: &Tera, err: ServiceError, mut context: Context) -> HttpResponse {
    match err {
        ServiceError::Unauthenticated => HttpResponse::Unauthorized().finish(),
        ServiceError::Unauthorized => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Unavailable(reason) => {
            log::warn!("Backend unavailable: {reason}");
            context.insert("error_message", "The clinic service is unavailable.");
            let mut response = render_template(tera, "errors/unavailable.html", &context);
            if response.status().is_success() {
                *response.status_mut() = actix_web::http::StatusCode::SERVICE_UNAVAILABLE;
            }
            response
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        err => {
            log::error!("Failed to load page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

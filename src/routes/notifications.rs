use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, flash_service_error, page_error, redirect, render_template};
use crate::services::notifications as notifications_service;

#[get("/notifications")]
pub async fn notifications_page(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(
        &flash_messages,
        &user,
        "notifications",
        &server_config.auth_service_url,
    );

    match notifications_service::list_notifications(&repo.session(&user), &user).await {
        Ok(data) => {
            context.insert("notifications", &data.notifications);
            context.insert("unread", &data.unread);
            render_template(&tera, "notifications/index.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[post("/notifications/{notification_id}/read")]
pub async fn mark_notification_read(
    notification_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match notifications_service::mark_read(
        &repo.session(&user),
        &user,
        notification_id.into_inner(),
    )
    .await
    {
        Ok(()) => redirect("/notifications"),
        Err(err) => flash_service_error(err, "/notifications", "update the notification"),
    }
}

#[post("/notifications/read-all")]
pub async fn mark_all_notifications_read(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match notifications_service::mark_all_read(&repo.session(&user), &user).await {
        Ok(()) => redirect("/notifications"),
        Err(err) => flash_service_error(err, "/notifications", "update the notifications"),
    }
}

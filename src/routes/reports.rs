use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Local;
use tera::Tera;

use crate::forms::reports::ReportQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::routes::{base_context, flash_service_error, page_error, render_template};
use crate::services::ServiceError;
use crate::services::reports as reports_service;

#[get("/manager/reports")]
pub async fn reports_page(
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
        "reports",
        &server_config.auth_service_url,
    );

    let date = match query.date_or(Local::now().date_naive()) {
        Ok(date) => date,
        Err(err) => return page_error(&tera, ServiceError::from(err), context),
    };

    match reports_service::load_daily_report(&repo.session(&user), &user, date).await {
        Ok(report) => {
            context.insert("report", &report);
            render_template(&tera, "manager/reports.html", &context)
        }
        Err(err) => page_error(&tera, err, context),
    }
}

#[get("/manager/reports/export")]
pub async fn export_report(
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    query: web::Query<ReportQuery>,
) -> impl Responder {
    let date = match query.date_or(Local::now().date_naive()) {
        Ok(date) => date,
        Err(err) => {
            return flash_service_error(ServiceError::from(err), "/manager/reports", "export");
        }
    };

    match reports_service::export_daily_report(&repo.session(&user), &user, date).await {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(format!(
                    "payments-{}.csv",
                    date.format("%Y-%m-%d")
                ))],
            })
            .body(csv),
        Err(err) => flash_service_error(err, "/manager/reports", "export the report"),
    }
}

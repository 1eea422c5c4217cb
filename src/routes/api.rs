use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::models::auth::AuthenticatedUser;
use crate::repository::ApiRepository;
use crate::services::ServiceError;
use crate::services::lookup::{LookupGate, lookup_patients};

#[derive(Deserialize)]
pub struct PatientLookupQuery {
    #[serde(default)]
    q: String,
}

/// Autocomplete source for reception forms.
///
/// Answers `204 No Content` when a newer lookup by the same user replaced this one.
#[get("/v1/patients")]
pub async fn api_v1_patients(
    params: web::Query<PatientLookupQuery>,
    user: AuthenticatedUser,
    repo: web::Data<ApiRepository>,
    gate: web::Data<LookupGate>,
) -> impl Responder {
    match lookup_patients(&repo.session(&user), &user, &gate, &params.q).await {
        Ok(Some(patients)) => HttpResponse::Ok().json(patients),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(ServiceError::Unauthenticated) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Unauthorized) => HttpResponse::Forbidden().finish(),
        Err(ServiceError::Unavailable(reason)) => {
            log::warn!("Patient lookup unavailable: {reason}");
            HttpResponse::ServiceUnavailable().finish()
        }
        Err(err) => {
            log::error!("Failed to look up patients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

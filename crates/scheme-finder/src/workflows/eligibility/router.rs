use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::catalog::SchemeQuery;
use super::domain::{Profile, SchemeId, UserId};
use super::repository::{CatalogError, ProfileStore, SchemeCatalog};
use super::service::{EligibilityService, EligibilityServiceError};

/// Body for ad-hoc matching; `now` pins the deadline clock for reproducible reports.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub profile: Profile,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub content: String,
}

/// Router builder exposing matching, profile and catalog endpoints.
pub fn eligibility_router<C, P>(service: Arc<EligibilityService<C, P>>) -> Router
where
    C: SchemeCatalog + 'static,
    P: ProfileStore + 'static,
{
    Router::new()
        .route("/api/v1/eligibility", post(match_handler::<C, P>))
        .route("/api/v1/profiles/:user_id", put(save_profile_handler::<C, P>))
        .route(
            "/api/v1/profiles/:user_id/matches",
            get(user_matches_handler::<C, P>),
        )
        .route("/api/v1/schemes", get(search_handler::<C, P>))
        .route("/api/v1/schemes/import", post(import_handler::<C, P>))
        .route("/api/v1/schemes/:scheme_id", get(scheme_handler::<C, P>))
        .with_state(service)
}

pub(crate) async fn match_handler<C, P>(
    State(service): State<Arc<EligibilityService<C, P>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    C: SchemeCatalog + 'static,
    P: ProfileStore + 'static,
{
    let now = request.now.unwrap_or_else(Utc::now);
    match service.match_profile(&request.profile, now) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn save_profile_handler<C, P>(
    State(service): State<Arc<EligibilityService<C, P>>>,
    Path(user_id): Path<String>,
    axum::Json(profile): axum::Json<Profile>,
) -> Response
where
    C: SchemeCatalog + 'static,
    P: ProfileStore + 'static,
{
    let profile_incomplete = profile.is_incomplete();
    match service.save_profile(UserId(user_id.clone()), profile) {
        Ok(()) => {
            let payload = json!({
                "user_id": user_id,
                "profile_incomplete": profile_incomplete,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn user_matches_handler<C, P>(
    State(service): State<Arc<EligibilityService<C, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    C: SchemeCatalog + 'static,
    P: ProfileStore + 'static,
{
    match service.match_user(&UserId(user_id), Utc::now()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn search_handler<C, P>(
    State(service): State<Arc<EligibilityService<C, P>>>,
    Query(query): Query<SchemeQuery>,
) -> Response
where
    C: SchemeCatalog + 'static,
    P: ProfileStore + 'static,
{
    match service.search(&query) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn scheme_handler<C, P>(
    State(service): State<Arc<EligibilityService<C, P>>>,
    Path(scheme_id): Path<String>,
) -> Response
where
    C: SchemeCatalog + 'static,
    P: ProfileStore + 'static,
{
    match service.scheme(&SchemeId(scheme_id), Utc::now()) {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn import_handler<C, P>(
    State(service): State<Arc<EligibilityService<C, P>>>,
    axum::Json(request): axum::Json<ImportRequest>,
) -> Response
where
    C: SchemeCatalog + 'static,
    P: ProfileStore + 'static,
{
    match service.import_generated(&request.content) {
        Ok(schemes) => {
            let payload = json!({
                "count": schemes.len(),
                "schemes": schemes,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: EligibilityServiceError) -> Response {
    let status = match &err {
        EligibilityServiceError::ProfileNotFound(_)
        | EligibilityServiceError::SchemeNotFound(_) => StatusCode::NOT_FOUND,
        EligibilityServiceError::Ingest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EligibilityServiceError::Catalog(CatalogError::Conflict(_)) => StatusCode::CONFLICT,
        EligibilityServiceError::Catalog(CatalogError::Unavailable(_))
        | EligibilityServiceError::Profiles(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

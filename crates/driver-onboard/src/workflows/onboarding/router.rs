use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::catalog;
use super::domain::{ApplicantId, DocumentKind, FileHandle, OnboardingStep, PartnerTier, PhotoKind};
use super::service::{ApplicationUpdate, OnboardingService, SessionError};
use super::submission::{MediaStore, ProfileStore, WalletService};

/// Router builder exposing the onboarding workflow over HTTP.
pub fn onboarding_router<P, W, M>(service: Arc<OnboardingService<P, W, M>>) -> Router
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    Router::new()
        .route("/api/v1/onboarding/tiers", get(tiers_handler))
        .route(
            "/api/v1/onboarding/:applicant/begin",
            post(begin_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant",
            get(snapshot_handler::<P, W, M>).patch(update_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant/errors",
            get(errors_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant/completion",
            get(completion_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant/documents/:kind",
            post(attach_document_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant/photos/:kind",
            post(attach_photo_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant/next",
            post(next_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant/back",
            post(back_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant/jump",
            post(jump_handler::<P, W, M>),
        )
        .route(
            "/api/v1/onboarding/:applicant/submit",
            post(submit_handler::<P, W, M>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BeginRequest {
    #[serde(default)]
    tier: Option<PartnerTier>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JumpRequest {
    step: u8,
}

/// Tier metadata together with the documents each tier must present.
pub(crate) async fn tiers_handler() -> Response {
    let tiers: Vec<_> = catalog::tier_catalog()
        .into_iter()
        .map(|profile| {
            let documents: Vec<_> = catalog::required_documents(profile.tier)
                .iter()
                .map(|kind| {
                    json!({
                        "kind": kind,
                        "label": kind.label(),
                    })
                })
                .collect();
            json!({
                "tier": profile.tier,
                "label": profile.label,
                "description": profile.description,
                "benefits": profile.benefits,
                "requires_license_number": catalog::requires_license_number(profile.tier),
                "required_documents": documents,
            })
        })
        .collect();

    (StatusCode::OK, axum::Json(json!({ "tiers": tiers }))).into_response()
}

pub(crate) async fn begin_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
    payload: Option<axum::Json<BeginRequest>>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    let tier = payload
        .and_then(|axum::Json(request)| request.tier)
        .unwrap_or(PartnerTier::FreelanceDriver);
    let snapshot = service.begin(ApplicantId(applicant), tier);
    (StatusCode::CREATED, axum::Json(snapshot)).into_response()
}

pub(crate) async fn snapshot_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.snapshot(&ApplicantId(applicant)) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn errors_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.errors(&ApplicantId(applicant)) {
        Ok(errors) => (StatusCode::OK, axum::Json(json!({ "errors": errors }))).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn completion_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.snapshot(&ApplicantId(applicant)) {
        Ok(snapshot) => {
            (StatusCode::OK, axum::Json(snapshot.completion)).into_response()
        }
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn update_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
    axum::Json(update): axum::Json<ApplicationUpdate>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.update(&ApplicantId(applicant), update) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn attach_document_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path((applicant, kind)): Path<(String, DocumentKind)>,
    axum::Json(file): axum::Json<FileHandle>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.attach_document(&ApplicantId(applicant), kind, file) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn attach_photo_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path((applicant, kind)): Path<(String, PhotoKind)>,
    axum::Json(file): axum::Json<FileHandle>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.attach_photo(&ApplicantId(applicant), kind, file) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn next_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.next(&ApplicantId(applicant)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn back_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.back(&ApplicantId(applicant)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn jump_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
    axum::Json(request): axum::Json<JumpRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    let Some(step) = OnboardingStep::from_number(request.step) else {
        let payload = json!({ "error": format!("step must be 1-4, got {}", request.step) });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    };

    match service.jump(&ApplicantId(applicant), step) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => session_error_response(err),
    }
}

pub(crate) async fn submit_handler<P, W, M>(
    State(service): State<Arc<OnboardingService<P, W, M>>>,
    Path(applicant): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    match service.submit(&ApplicantId(applicant), Utc::now()) {
        Ok(report) if report.succeeded() => {
            (StatusCode::ACCEPTED, axum::Json(report)).into_response()
        }
        // Completed collaborator writes stay in place; the report tells the
        // caller exactly which resources still need a retry.
        Ok(report) => (StatusCode::BAD_GATEWAY, axum::Json(report)).into_response(),
        Err(err) => session_error_response(err),
    }
}

fn session_error_response(err: SessionError) -> Response {
    let status = match &err {
        SessionError::NotFound => StatusCode::NOT_FOUND,
        SessionError::File(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Navigation(_) | SessionError::Refused(_) => StatusCode::CONFLICT,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}

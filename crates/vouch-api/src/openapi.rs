//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vouch — Email-Domain Access Credentials",
        version = "0.2.1",
        description = "Stateless bearer-credential issuance backed by a one-shot email ownership proof. No identity is stored; validity is decidable from the signing key, the token bytes, and the clock.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::access::request_access,
        crate::routes::access::claim_access,
        crate::routes::access::verify_access,
    ),
    components(schemas(
        crate::routes::access::RequestAccessBody,
        crate::routes::access::RequestAccessResponse,
        crate::routes::access::GrantResponse,
        crate::routes::access::VerifyAccessBody,
        crate::routes::access::VerifyAccessResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "access", description = "Claim issuance, redemption, and grant verification"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

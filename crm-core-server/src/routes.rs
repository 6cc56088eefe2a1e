//! Router assembly
//!
//! Three tiers: public routes, routes behind [`auth_middleware`], and
//! routes that additionally pass [`require_internal`]. Uploaded objects are
//! served read-only under `/storage`.

use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, require_internal};
use crate::handlers::{auth, business, campaigns, deal_stages, files, leads, users};
use crate::services::files::MAX_FILES_PER_UPLOAD;
use crate::state::AppState;

/// Room for multipart boundaries and part headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size_bytes;
    let single_upload_limit = DefaultBodyLimit::max(max_file_size.saturating_add(MULTIPART_OVERHEAD_BYTES));
    let batch_upload_limit = DefaultBodyLimit::max(
        max_file_size
            .saturating_mul(MAX_FILES_PER_UPLOAD)
            .saturating_add(MULTIPART_OVERHEAD_BYTES),
    );

    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/campaigns/{title}/click", post(campaigns::click));

    let internal = Router::new()
        .route("/users/internal", post(users::create_internal).get(users::list_internal))
        .route("/business", post(business::create).get(business::list))
        .route("/business/statistics", get(business::statistics))
        .route("/business/by-stage/{stage_id}", get(business::by_stage))
        .route("/business/by-status/{status}", get(business::by_status))
        .route("/business/by-responsible/{responsible}", get(business::by_responsible))
        .route(
            "/business/{id}",
            get(business::get).patch(business::update).delete(business::delete),
        )
        .route("/business/{id}/change-stage", patch(business::change_stage))
        .route("/business/{id}/history", get(business::history))
        .route(
            "/business/{id}/files",
            post(business::upload_file).layer(single_upload_limit),
        )
        .route("/business/{id}/files/{file_id}", delete(business::remove_file))
        .route_layer(from_fn(require_internal));

    let authenticated = Router::new()
        .route("/users/profile", get(users::profile))
        .route(
            "/users/{id}",
            patch(users::update).merge(delete(users::deactivate).route_layer(from_fn(require_internal))),
        )
        .route("/deal-stages", post(deal_stages::create).get(deal_stages::list))
        .route("/deal-stages/reorder", post(deal_stages::reorder))
        .route(
            "/deal-stages/{id}",
            get(deal_stages::get).patch(deal_stages::update).delete(deal_stages::delete),
        )
        .route("/leads", post(leads::create).get(leads::list))
        .route("/leads/statistics", get(leads::statistics))
        .route("/leads/by-business/{business_id}", get(leads::by_business))
        .route("/leads/by-status/{status}", get(leads::by_status))
        .route("/leads/by-email/{email}", get(leads::by_email))
        .route("/leads/by-cpf-cnpj/{cpf_cnpj}", get(leads::by_cpf_cnpj))
        .route("/leads/{id}", get(leads::get).patch(leads::update).delete(leads::delete))
        .route("/campaigns", post(campaigns::create).get(campaigns::list))
        .route(
            "/campaigns/{id}",
            get(campaigns::get).patch(campaigns::update).delete(campaigns::delete),
        )
        .route("/files", get(files::list))
        .route("/files/upload", post(files::upload).layer(batch_upload_limit))
        .route("/files/{id}", delete(files::delete))
        .merge(internal)
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .nest_service("/storage", ServeDir::new(&state.config.storage_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use crm_core_api::{LoginRequest, RegisterRequest};
use crm_core_postgres::PostgresRepositories;

use crate::auth::JwtKeys;
use crate::error::AppResult;
use crate::services::auth::{self, AuthPayload};

pub async fn register(
    State(repos): State<PostgresRepositories>,
    State(jwt): State<Arc<JwtKeys>>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthPayload>)> {
    let (session, repos) = repos.create_all_repositories().await?;
    let payload = auth::register(&repos, &jwt, request).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(payload)))
}

pub async fn login(
    State(repos): State<PostgresRepositories>,
    State(jwt): State<Arc<JwtKeys>>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<AuthPayload>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    Ok(Json(auth::login(&repos, &jwt, request).await?))
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core_api::{CreateInternalUserRequest, EntityResponse, ListResponse, MessageResponse, UpdateUserRequest};
use crm_core_db::models::user::{InternalUserView, UserModel};
use crm_core_postgres::PostgresRepositories;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::services::users;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserModel,
}

pub async fn profile(
    State(repos): State<PostgresRepositories>,
    AuthUser(caller): AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let user = users::profile(&repos, &caller).await?;
    Ok(Json(ProfileResponse {
        message: "User profile".to_string(),
        user,
    }))
}

pub async fn create_internal(
    State(repos): State<PostgresRepositories>,
    AuthUser(caller): AuthUser,
    Json(request): Json<CreateInternalUserRequest>,
) -> AppResult<(StatusCode, Json<EntityResponse<UserModel>>)> {
    let (session, repos) = repos.create_all_repositories().await?;
    let user = users::create_internal(&repos, &caller, request).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(EntityResponse::new(user, "Internal user created successfully"))))
}

pub async fn list_internal(
    State(repos): State<PostgresRepositories>,
) -> AppResult<Json<ListResponse<InternalUserView>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = users::list_internal(&repos).await?;
    Ok(Json(ListResponse::new(found, "Internal users retrieved successfully")))
}

pub async fn update(
    State(repos): State<PostgresRepositories>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<EntityResponse<UserModel>>> {
    let (session, repos) = repos.create_all_repositories().await?;
    let user = users::update(&repos, &caller, id, request).await?;
    session.commit().await?;
    Ok(Json(EntityResponse::new(user, "User updated successfully")))
}

pub async fn deactivate(
    State(repos): State<PostgresRepositories>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let (session, repos) = repos.create_all_repositories().await?;
    users::deactivate(&repos, &caller, id).await?;
    session.commit().await?;
    Ok(Json(MessageResponse::new("User deactivated successfully")))
}

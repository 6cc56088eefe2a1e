use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core_api::{
    ApiError, ChangeStageRequest, CreateBusinessRequest, EntityResponse, ListResponse,
    MessageResponse, UpdateBusinessRequest,
};
use crm_core_db::models::business::{BusinessFileModel, BusinessHistoryView, BusinessModel, BusinessStatistics};
use crm_core_postgres::PostgresRepositories;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::AppResult;
use crate::services::business;
use crate::state::AppState;

use super::files::read_files;

pub async fn create(
    State(repos): State<PostgresRepositories>,
    Json(request): Json<CreateBusinessRequest>,
) -> AppResult<(StatusCode, Json<EntityResponse<BusinessModel>>)> {
    let (session, repos) = repos.create_all_repositories().await?;
    let created = business::create(&repos, request).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(EntityResponse::new(created, "Business created successfully"))))
}

pub async fn list(State(repos): State<PostgresRepositories>) -> AppResult<Json<ListResponse<BusinessModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = business::list(&repos).await?;
    Ok(Json(ListResponse::new(found, "Businesses retrieved successfully")))
}

pub async fn statistics(
    State(repos): State<PostgresRepositories>,
) -> AppResult<Json<EntityResponse<BusinessStatistics>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let stats = business::statistics(&repos).await?;
    Ok(Json(EntityResponse::new(stats, "Statistics retrieved successfully")))
}

pub async fn by_stage(
    State(repos): State<PostgresRepositories>,
    Path(stage_id): Path<String>,
) -> AppResult<Json<ListResponse<BusinessModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = business::by_stage(&repos, &stage_id).await?;
    Ok(Json(ListResponse::new(
        found,
        format!("Businesses of stage {stage_id} retrieved successfully"),
    )))
}

pub async fn by_status(
    State(repos): State<PostgresRepositories>,
    Path(status): Path<String>,
) -> AppResult<Json<ListResponse<BusinessModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = business::by_status(&repos, &status).await?;
    Ok(Json(ListResponse::new(
        found,
        format!("Businesses with status {status} retrieved successfully"),
    )))
}

pub async fn by_responsible(
    State(repos): State<PostgresRepositories>,
    Path(responsible): Path<String>,
) -> AppResult<Json<ListResponse<BusinessModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = business::by_responsible(&repos, &responsible).await?;
    Ok(Json(ListResponse::new(
        found,
        format!("Businesses of {responsible} retrieved successfully"),
    )))
}

pub async fn get(
    State(repos): State<PostgresRepositories>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EntityResponse<BusinessModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = business::get(&repos, id).await?;
    Ok(Json(EntityResponse::new(found, "Business found successfully")))
}

pub async fn update(
    State(repos): State<PostgresRepositories>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBusinessRequest>,
) -> AppResult<Json<EntityResponse<BusinessModel>>> {
    let (session, repos) = repos.create_all_repositories().await?;
    let updated = business::update(&repos, &caller, id, request).await?;
    session.commit().await?;
    Ok(Json(EntityResponse::new(updated, "Business updated successfully")))
}

pub async fn change_stage(
    State(repos): State<PostgresRepositories>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ChangeStageRequest>,
) -> AppResult<Json<EntityResponse<BusinessModel>>> {
    let (session, repos) = repos.create_all_repositories().await?;
    let updated = business::change_stage(&repos, &caller, id, request).await?;
    session.commit().await?;
    Ok(Json(EntityResponse::new(updated, "Business stage updated successfully")))
}

pub async fn history(
    State(repos): State<PostgresRepositories>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ListResponse<BusinessHistoryView>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let entries = business::history(&repos, id).await?;
    Ok(Json(ListResponse::new(entries, "Business history retrieved successfully")))
}

pub async fn delete(State(repos): State<PostgresRepositories>, Path(id): Path<Uuid>) -> AppResult<Json<MessageResponse>> {
    let (session, repos) = repos.create_all_repositories().await?;
    business::delete(&repos, id).await?;
    session.commit().await?;
    Ok(Json(MessageResponse::new("Business removed successfully")))
}

/// Stores the `file` part like `/files/upload` does, then links it to the business.
pub async fn upload_file(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<EntityResponse<BusinessFileModel>>)> {
    let file = read_files(&mut multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::BadRequest("File not provided".to_string()))?;

    let (session, repos) = state.repos.create_all_repositories().await?;
    let attached = business::upload_and_attach(
        &repos,
        state.storage.as_ref(),
        &state.upload_policy,
        &caller,
        id,
        file,
    )
    .await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(EntityResponse::new(attached, "File attached successfully"))))
}

pub async fn remove_file(
    State(repos): State<PostgresRepositories>,
    Path((id, file_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<MessageResponse>> {
    let (session, repos) = repos.create_all_repositories().await?;
    business::remove_file(&repos, id, file_id).await?;
    session.commit().await?;
    Ok(Json(MessageResponse::new("File removed successfully")))
}

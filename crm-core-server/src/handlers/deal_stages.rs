use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core_api::{
    CreateDealStageRequest, EntityResponse, ListResponse, MessageResponse, ReorderStagesRequest, UpdateDealStageRequest,
};
use crm_core_db::models::deal_stage::DealStageModel;
use crm_core_postgres::PostgresRepositories;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::deal_stages;

pub async fn create(
    State(repos): State<PostgresRepositories>,
    Json(request): Json<CreateDealStageRequest>,
) -> AppResult<(StatusCode, Json<EntityResponse<DealStageModel>>)> {
    let (session, repos) = repos.create_all_repositories().await?;
    let stage = deal_stages::create(&repos, request).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(EntityResponse::new(stage, "Stage created successfully"))))
}

pub async fn list(State(repos): State<PostgresRepositories>) -> AppResult<Json<ListResponse<DealStageModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let stages = deal_stages::list(&repos).await?;
    Ok(Json(ListResponse::new(stages, "Stages retrieved successfully")))
}

pub async fn get(
    State(repos): State<PostgresRepositories>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EntityResponse<DealStageModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let stage = deal_stages::get(&repos, id).await?;
    Ok(Json(EntityResponse::new(stage, "Stage found successfully")))
}

pub async fn update(
    State(repos): State<PostgresRepositories>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDealStageRequest>,
) -> AppResult<Json<EntityResponse<DealStageModel>>> {
    let (session, repos) = repos.create_all_repositories().await?;
    let stage = deal_stages::update(&repos, id, request).await?;
    session.commit().await?;
    Ok(Json(EntityResponse::new(stage, "Stage updated successfully")))
}

pub async fn delete(State(repos): State<PostgresRepositories>, Path(id): Path<Uuid>) -> AppResult<Json<MessageResponse>> {
    let (session, repos) = repos.create_all_repositories().await?;
    deal_stages::delete(&repos, id).await?;
    session.commit().await?;
    Ok(Json(MessageResponse::new("Stage removed successfully")))
}

pub async fn reorder(
    State(repos): State<PostgresRepositories>,
    Json(request): Json<ReorderStagesRequest>,
) -> AppResult<Json<ListResponse<DealStageModel>>> {
    let (session, repos) = repos.create_all_repositories().await?;
    let stages = deal_stages::reorder(&repos, request).await?;
    session.commit().await?;
    Ok(Json(ListResponse::new(stages, "Stages reordered successfully")))
}

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core_api::{CampaignFilter, CreateCampaignRequest, EntityResponse, ListResponse, MessageResponse, UpdateCampaignRequest};
use crm_core_db::models::campaign::CampaignModel;
use crm_core_postgres::PostgresRepositories;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::campaigns;

pub async fn create(
    State(repos): State<PostgresRepositories>,
    Json(request): Json<CreateCampaignRequest>,
) -> AppResult<(StatusCode, Json<EntityResponse<CampaignModel>>)> {
    let (session, repos) = repos.create_all_repositories().await?;
    let campaign = campaigns::create(&repos, request).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(EntityResponse::new(campaign, "Campaign created successfully"))))
}

pub async fn list(
    State(repos): State<PostgresRepositories>,
    Query(filter): Query<CampaignFilter>,
) -> AppResult<Json<ListResponse<CampaignModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = campaigns::list(&repos, &filter).await?;
    Ok(Json(ListResponse::new(found, "Campaigns retrieved successfully")))
}

pub async fn get(
    State(repos): State<PostgresRepositories>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EntityResponse<CampaignModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let campaign = campaigns::get(&repos, id).await?;
    Ok(Json(EntityResponse::new(campaign, "Campaign found successfully")))
}

pub async fn update(
    State(repos): State<PostgresRepositories>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCampaignRequest>,
) -> AppResult<Json<EntityResponse<CampaignModel>>> {
    let (session, repos) = repos.create_all_repositories().await?;
    let campaign = campaigns::update(&repos, id, request).await?;
    session.commit().await?;
    Ok(Json(EntityResponse::new(campaign, "Campaign updated successfully")))
}

pub async fn delete(State(repos): State<PostgresRepositories>, Path(id): Path<Uuid>) -> AppResult<Json<MessageResponse>> {
    let (session, repos) = repos.create_all_repositories().await?;
    campaigns::delete(&repos, id).await?;
    session.commit().await?;
    Ok(Json(MessageResponse::new("Campaign removed successfully")))
}

/// Public; tracked links call it without a token.
pub async fn click(
    State(repos): State<PostgresRepositories>,
    Path(title): Path<String>,
) -> AppResult<(StatusCode, Json<EntityResponse<CampaignModel>>)> {
    let (session, repos) = repos.create_all_repositories().await?;
    let campaign = campaigns::register_click(&repos, &title).await?;
    session.commit().await?;
    Ok((StatusCode::ACCEPTED, Json(EntityResponse::new(campaign, "Click registered successfully"))))
}

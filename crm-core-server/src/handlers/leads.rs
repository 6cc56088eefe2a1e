use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core_api::{CreateLeadRequest, EntityResponse, LeadSourceQuery, ListResponse, MessageResponse, UpdateLeadRequest};
use crm_core_db::models::lead::{LeadStatistics, LeadView};
use crm_core_postgres::PostgresRepositories;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::leads;

pub async fn create(
    State(repos): State<PostgresRepositories>,
    Query(source): Query<LeadSourceQuery>,
    Json(request): Json<CreateLeadRequest>,
) -> AppResult<(StatusCode, Json<EntityResponse<LeadView>>)> {
    let (session, repos) = repos.create_all_repositories().await?;
    let lead = leads::create(&repos, request, source.utm_c.as_deref()).await?;
    session.commit().await?;
    Ok((StatusCode::CREATED, Json(EntityResponse::new(lead, "Lead created successfully"))))
}

pub async fn list(State(repos): State<PostgresRepositories>) -> AppResult<Json<ListResponse<LeadView>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = leads::list(&repos).await?;
    Ok(Json(ListResponse::new(found, "Leads retrieved successfully")))
}

pub async fn statistics(State(repos): State<PostgresRepositories>) -> AppResult<Json<EntityResponse<LeadStatistics>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let stats = leads::statistics(&repos).await?;
    Ok(Json(EntityResponse::new(stats, "Statistics retrieved successfully")))
}

pub async fn by_business(
    State(repos): State<PostgresRepositories>,
    Path(business_id): Path<Uuid>,
) -> AppResult<Json<ListResponse<LeadView>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = leads::by_business(&repos, business_id).await?;
    Ok(Json(ListResponse::new(
        found,
        format!("Leads of business {business_id} retrieved successfully"),
    )))
}

pub async fn by_status(
    State(repos): State<PostgresRepositories>,
    Path(status): Path<String>,
) -> AppResult<Json<ListResponse<LeadView>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let found = leads::by_status(&repos, &status).await?;
    Ok(Json(ListResponse::new(found, format!("Leads with status {status} retrieved successfully"))))
}

pub async fn by_email(
    State(repos): State<PostgresRepositories>,
    Path(email): Path<String>,
) -> AppResult<Json<EntityResponse<LeadView>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let lead = leads::by_email(&repos, &email).await?;
    Ok(Json(EntityResponse::new(lead, "Lead found successfully")))
}

pub async fn by_cpf_cnpj(
    State(repos): State<PostgresRepositories>,
    Path(cpf_cnpj): Path<String>,
) -> AppResult<Json<EntityResponse<LeadView>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let lead = leads::by_cpf_cnpj(&repos, &cpf_cnpj).await?;
    Ok(Json(EntityResponse::new(lead, "Lead found successfully")))
}

pub async fn get(
    State(repos): State<PostgresRepositories>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EntityResponse<LeadView>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    let lead = leads::get(&repos, id).await?;
    Ok(Json(EntityResponse::new(lead, "Lead found successfully")))
}

pub async fn update(
    State(repos): State<PostgresRepositories>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLeadRequest>,
) -> AppResult<Json<EntityResponse<LeadView>>> {
    let (session, repos) = repos.create_all_repositories().await?;
    let lead = leads::update(&repos, id, request).await?;
    session.commit().await?;
    Ok(Json(EntityResponse::new(lead, "Lead updated successfully")))
}

pub async fn delete(State(repos): State<PostgresRepositories>, Path(id): Path<Uuid>) -> AppResult<Json<MessageResponse>> {
    let (session, repos) = repos.create_all_repositories().await?;
    leads::delete(&repos, id).await?;
    session.commit().await?;
    Ok(Json(MessageResponse::new("Lead removed successfully")))
}

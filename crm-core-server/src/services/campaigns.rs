use chrono::Utc;
use crm_core_api::{ApiError, ApiResult, CampaignFilter, CreateCampaignRequest, UpdateCampaignRequest};
use crm_core_db::models::campaign::CampaignModel;
use crm_core_db::repository::create_batch::CreateBatch;
use crm_core_db::repository::delete_batch::DeleteBatch;
use crm_core_db::repository::load::Load;
use crm_core_db::repository::update_batch::UpdateBatch;
use crm_core_postgres::CrmRepositories;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::single;

pub async fn create(repos: &CrmRepositories, request: CreateCampaignRequest) -> ApiResult<CampaignModel> {
    request.validate()?;
    let repo = &repos.campaign_repos().campaign_repository;
    if repo.find_by_title(&request.title).await?.is_some() {
        return Err(ApiError::BadRequest("A campaign with this title already exists".to_string()));
    }

    let campaign = CampaignModel::from_request(Uuid::new_v4(), Utc::now(), request)?;
    let created = single(repo.create_batch(vec![campaign], None).await?, "Campaign")?;
    info!(campaign_id = %created.id, "Campaign created");
    Ok(created)
}

pub async fn list(repos: &CrmRepositories, filter: &CampaignFilter) -> ApiResult<Vec<CampaignModel>> {
    Ok(repos.campaign_repos().campaign_repository.find_all(filter).await?)
}

pub async fn get(repos: &CrmRepositories, id: Uuid) -> ApiResult<CampaignModel> {
    repos
        .campaign_repos()
        .campaign_repository
        .load(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Campaign", id))
}

pub async fn update(repos: &CrmRepositories, id: Uuid, request: UpdateCampaignRequest) -> ApiResult<CampaignModel> {
    request.validate()?;
    let mut campaign = get(repos, id).await?;
    let repo = &repos.campaign_repos().campaign_repository;

    if let Some(title) = request.title.as_deref() {
        if title != campaign.title {
            if let Some(other) = repo.find_by_title(title).await? {
                if other.id != id {
                    return Err(ApiError::BadRequest("A campaign with this title already exists".to_string()));
                }
            }
        }
    }

    campaign.apply(request, Utc::now())?;
    single(repo.update_batch(vec![campaign], None).await?, "Campaign")
}

pub async fn delete(repos: &CrmRepositories, id: Uuid) -> ApiResult<()> {
    let deleted = repos.campaign_repos().campaign_repository.delete_batch(&[id], None).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Campaign", id));
    }
    Ok(())
}

/// Counts one click on the campaign titled `title`.
pub async fn register_click(repos: &CrmRepositories, title: &str) -> ApiResult<CampaignModel> {
    let repo = &repos.campaign_repos().campaign_repository;
    let not_found = || ApiError::NotFound(format!("Campaign with title {title} not found"));

    let clicks = repo.increment_clicks(title).await?.ok_or_else(not_found)?;
    debug!(%title, clicks, "Campaign click registered");
    repo.find_by_title(title).await?.ok_or_else(not_found)
}

use chrono::Utc;
use crm_core_api::{ApiError, ApiResult, CreateDealStageRequest, ReorderStagesRequest, UpdateDealStageRequest};
use crm_core_db::models::deal_stage::DealStageModel;
use crm_core_db::repository::create_batch::CreateBatch;
use crm_core_db::repository::delete_batch::DeleteBatch;
use crm_core_db::repository::load::Load;
use crm_core_db::repository::update_batch::UpdateBatch;
use crm_core_postgres::CrmRepositories;
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

use super::single;

async fn ensure_name_free(repos: &CrmRepositories, name: &str, exclude: Option<Uuid>) -> ApiResult<()> {
    let existing = repos.deal_stage_repos().deal_stage_repository.find_by_name(name).await?;
    match existing {
        Some(stage) if Some(stage.id) != exclude => {
            Err(ApiError::Conflict(format!("A deal stage named {name} already exists")))
        }
        _ => Ok(()),
    }
}

pub async fn create(repos: &CrmRepositories, request: CreateDealStageRequest) -> ApiResult<DealStageModel> {
    request.validate()?;
    ensure_name_free(repos, &request.name, None).await?;

    let stage = DealStageModel {
        id: Uuid::new_v4(),
        name: request.name,
        position: request.position.unwrap_or(0),
        created_at: Utc::now(),
    };
    single(
        repos.deal_stage_repos().deal_stage_repository.create_batch(vec![stage], None).await?,
        "Deal stage",
    )
}

pub async fn list(repos: &CrmRepositories) -> ApiResult<Vec<DealStageModel>> {
    Ok(repos.deal_stage_repos().deal_stage_repository.find_all().await?)
}

pub async fn get(repos: &CrmRepositories, id: Uuid) -> ApiResult<DealStageModel> {
    repos
        .deal_stage_repos()
        .deal_stage_repository
        .load(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Deal stage", id))
}

pub async fn update(repos: &CrmRepositories, id: Uuid, request: UpdateDealStageRequest) -> ApiResult<DealStageModel> {
    request.validate()?;
    let mut stage = get(repos, id).await?;

    if let Some(name) = request.name {
        if name != stage.name {
            ensure_name_free(repos, &name, Some(id)).await?;
        }
        stage.name = name;
    }
    if let Some(position) = request.position {
        stage.position = position;
    }
    single(
        repos.deal_stage_repos().deal_stage_repository.update_batch(vec![stage], None).await?,
        "Deal stage",
    )
}

pub async fn delete(repos: &CrmRepositories, id: Uuid) -> ApiResult<()> {
    let deleted = repos.deal_stage_repos().deal_stage_repository.delete_batch(&[id], None).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Deal stage", id));
    }
    Ok(())
}

/// Positions become 1-based indexes of `stage_ids`.
pub async fn reorder(repos: &CrmRepositories, request: ReorderStagesRequest) -> ApiResult<Vec<DealStageModel>> {
    request.validate()?;
    let mut seen = HashSet::new();
    if let Some(duplicate) = request.stage_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(ApiError::BadRequest(format!("Stage {duplicate} appears more than once")));
    }

    let repo = &repos.deal_stage_repos().deal_stage_repository;
    let updated = repo.set_positions(&request.stage_ids).await?;
    if updated != request.stage_ids.len() {
        let known: HashSet<Uuid> = repo.find_all().await?.into_iter().map(|s| s.id).collect();
        let missing = request
            .stage_ids
            .iter()
            .find(|id| !known.contains(id))
            .copied()
            .unwrap_or_default();
        return Err(ApiError::not_found("Deal stage", missing));
    }
    Ok(repo.find_all().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core_postgres::test_helper::setup_test_context;

    fn named(prefix: &str) -> CreateDealStageRequest {
        CreateDealStageRequest {
            name: format!("{prefix}-{}", Uuid::new_v4().simple()),
            position: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let first = create(ctx.repos(), named("qualification")).await?;
        assert_eq!(first.position, 0);

        let again = CreateDealStageRequest {
            name: first.name.clone(),
            position: Some(3),
        };
        assert!(matches!(create(ctx.repos(), again).await, Err(ApiError::Conflict(_))));

        let second = create(ctx.repos(), named("proposal")).await?;
        let rename = UpdateDealStageRequest {
            name: Some(first.name.clone()),
            position: None,
        };
        assert!(matches!(update(ctx.repos(), second.id, rename).await, Err(ApiError::Conflict(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_reorder_assigns_one_based_positions() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let a = create(ctx.repos(), named("a")).await?;
        let b = create(ctx.repos(), named("b")).await?;
        let c = create(ctx.repos(), named("c")).await?;

        let stages = reorder(ctx.repos(), ReorderStagesRequest { stage_ids: vec![c.id, a.id, b.id] }).await?;
        let position = |id: Uuid| stages.iter().find(|s| s.id == id).map(|s| s.position);
        assert_eq!(position(c.id), Some(1));
        assert_eq!(position(a.id), Some(2));
        assert_eq!(position(b.id), Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn test_reorder_with_unknown_stage_is_not_found() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let a = create(ctx.repos(), named("a")).await?;
        let unknown = Uuid::new_v4();

        let result = reorder(ctx.repos(), ReorderStagesRequest { stage_ids: vec![a.id, unknown] }).await;
        assert!(matches!(result, Err(ApiError::NotFound(msg)) if msg.contains(&unknown.to_string())));

        Ok(())
    }
}

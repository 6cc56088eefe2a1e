//! Lead capture and queries
//!
//! Leads coming from a tracked link carry `utm_c`, the base64-encoded title
//! of the campaign. A match bumps the campaign's click counter and links the
//! lead to it.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use crm_core_api::{ApiError, ApiResult, CreateLeadRequest, UpdateLeadRequest};
use crm_core_db::models::business::BusinessModel;
use crm_core_db::models::lead::{BusinessSummary, LeadModel, LeadStatistics, LeadView};
use crm_core_db::repository::create_batch::CreateBatch;
use crm_core_db::repository::delete_batch::DeleteBatch;
use crm_core_db::repository::exist_by_ids::ExistByIds;
use crm_core_db::repository::load::Load;
use crm_core_db::repository::load_batch::LoadBatch;
use crm_core_db::repository::update_batch::UpdateBatch;
use crm_core_postgres::CrmRepositories;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::single;

/// Decodes `utm_c`; values that are not valid base64 UTF-8 are used as is.
pub fn decode_campaign_title(utm_c: &str) -> String {
    STANDARD
        .decode(utm_c.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| utm_c.to_string())
}

async fn ensure_business_exists(repos: &CrmRepositories, business_id: Uuid) -> ApiResult<()> {
    let exists = repos
        .business_repos()
        .business_repository
        .exist_by_ids(&[business_id])
        .await?
        .into_iter()
        .any(|(id, exists)| id == business_id && exists);
    if !exists {
        return Err(ApiError::not_found("Business", business_id));
    }
    Ok(())
}

/// Attaches the business summary of every lead with one batched load.
async fn with_business(repos: &CrmRepositories, leads: Vec<LeadModel>) -> ApiResult<Vec<LeadView>> {
    let mut ids: Vec<Uuid> = leads.iter().filter_map(|lead| lead.business_id).collect();
    ids.sort();
    ids.dedup();

    let mut summaries: HashMap<Uuid, BusinessSummary> = HashMap::new();
    if !ids.is_empty() {
        let loaded: Vec<BusinessModel> = repos
            .business_repos()
            .business_repository
            .load_batch(&ids)
            .await?
            .into_iter()
            .flatten()
            .collect();
        summaries.extend(loaded.iter().map(|b| (b.id, BusinessSummary::from(b))));
    }

    Ok(leads
        .into_iter()
        .map(|lead| {
            let business = lead.business_id.and_then(|id| summaries.get(&id).cloned());
            LeadView { lead, business }
        })
        .collect())
}

async fn view(repos: &CrmRepositories, lead: LeadModel) -> ApiResult<LeadView> {
    single(with_business(repos, vec![lead]).await?, "Lead")
}

pub async fn create(
    repos: &CrmRepositories,
    request: CreateLeadRequest,
    utm_c: Option<&str>,
) -> ApiResult<LeadView> {
    request.validate()?;
    if let Some(business_id) = request.business_id {
        ensure_business_exists(repos, business_id).await?;
    }

    let leads = &repos.lead_repos().lead_repository;
    if let Some(email) = request.email.as_deref() {
        if leads.find_by_email(email).await?.is_some() {
            return Err(ApiError::Conflict("A lead with this email already exists".to_string()));
        }
    }

    let mut campaign_id = None;
    if let Some(utm_c) = utm_c.filter(|value| !value.trim().is_empty()) {
        let title = decode_campaign_title(utm_c);
        let campaigns = &repos.campaign_repos().campaign_repository;
        if let Some(campaign) = campaigns.find_by_title(&title).await? {
            campaigns.increment_clicks(&title).await?;
            campaign_id = Some(campaign.id);
        } else {
            debug!(%title, "No campaign matches the tracked title");
        }
    }

    let lead = LeadModel::from_request(Uuid::new_v4(), Utc::now(), request, campaign_id)?;
    let created = single(leads.create_batch(vec![lead], None).await?, "Lead")?;
    info!(lead_id = %created.id, campaign_id = ?created.campaign_id, "Lead created");
    view(repos, created).await
}

pub async fn list(repos: &CrmRepositories) -> ApiResult<Vec<LeadView>> {
    let leads = repos.lead_repos().lead_repository.find_all().await?;
    with_business(repos, leads).await
}

pub async fn get(repos: &CrmRepositories, id: Uuid) -> ApiResult<LeadView> {
    let lead = load(repos, id).await?;
    view(repos, lead).await
}

async fn load(repos: &CrmRepositories, id: Uuid) -> ApiResult<LeadModel> {
    repos
        .lead_repos()
        .lead_repository
        .load(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Lead", id))
}

pub async fn update(repos: &CrmRepositories, id: Uuid, request: UpdateLeadRequest) -> ApiResult<LeadView> {
    request.validate()?;
    let mut lead = load(repos, id).await?;
    if let Some(business_id) = request.business_id {
        ensure_business_exists(repos, business_id).await?;
    }

    let email = request.email.as_deref().filter(|email| lead.email.as_deref() != Some(*email));
    let cpf_cnpj = request
        .cpf_cnpj
        .as_deref()
        .filter(|cpf| lead.cpf_cnpj.as_deref() != Some(*cpf));
    let leads = &repos.lead_repos().lead_repository;
    if let Some(conflict) = leads.find_conflict(id, email, cpf_cnpj).await? {
        let field = if email.is_some() && conflict.email.as_deref() == email {
            "email"
        } else {
            "CPF/CNPJ"
        };
        return Err(ApiError::Conflict(format!("Another lead already uses this {field}")));
    }

    lead.apply(request, Utc::now())?;
    let updated = single(leads.update_batch(vec![lead], None).await?, "Lead")?;
    view(repos, updated).await
}

pub async fn delete(repos: &CrmRepositories, id: Uuid) -> ApiResult<()> {
    let deleted = repos.lead_repos().lead_repository.delete_batch(&[id], None).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Lead", id));
    }
    Ok(())
}

pub async fn by_business(repos: &CrmRepositories, business_id: Uuid) -> ApiResult<Vec<LeadView>> {
    ensure_business_exists(repos, business_id).await?;
    let leads = repos.lead_repos().lead_repository.find_by_business(business_id).await?;
    with_business(repos, leads).await
}

pub async fn by_status(repos: &CrmRepositories, status: &str) -> ApiResult<Vec<LeadView>> {
    let leads = repos.lead_repos().lead_repository.find_by_status(status).await?;
    with_business(repos, leads).await
}

pub async fn by_email(repos: &CrmRepositories, email: &str) -> ApiResult<LeadView> {
    let lead = repos
        .lead_repos()
        .lead_repository
        .find_by_email(email)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lead with email {email} not found")))?;
    view(repos, lead).await
}

pub async fn by_cpf_cnpj(repos: &CrmRepositories, cpf_cnpj: &str) -> ApiResult<LeadView> {
    let lead = repos
        .lead_repos()
        .lead_repository
        .find_by_cpf_cnpj(cpf_cnpj)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Lead with CPF/CNPJ {cpf_cnpj} not found")))?;
    view(repos, lead).await
}

pub async fn statistics(repos: &CrmRepositories) -> ApiResult<LeadStatistics> {
    Ok(repos.lead_repos().lead_repository.statistics().await?)
}

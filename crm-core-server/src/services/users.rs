use chrono::Utc;
use crm_core_api::{ApiError, ApiResult, CreateInternalUserRequest, UpdateUserRequest};
use crm_core_db::models::user::{InternalUserView, UserModel, UserType};
use crm_core_db::repository::load::Load;
use crm_core_db::repository::update_batch::UpdateBatch;
use crm_core_postgres::CrmRepositories;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{hash_password, AuthenticatedUser};

use super::auth::create_user;
use super::single;

pub async fn profile(repos: &CrmRepositories, caller: &AuthenticatedUser) -> ApiResult<UserModel> {
    repos
        .user_repos()
        .user_repository
        .load(caller.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", caller.id))
}

pub async fn create_internal(
    repos: &CrmRepositories,
    caller: &AuthenticatedUser,
    request: CreateInternalUserRequest,
) -> ApiResult<UserModel> {
    request.validate()?;
    let user = create_user(repos, request, UserType::Internal, Some(caller.id)).await?;
    info!(user_id = %user.id, created_by = %caller.id, "Internal user created");
    Ok(user)
}

pub async fn list_internal(repos: &CrmRepositories) -> ApiResult<Vec<InternalUserView>> {
    Ok(repos.user_repos().user_repository.find_internal().await?)
}

/// Users may only edit themselves, and only while active.
pub async fn update(
    repos: &CrmRepositories,
    caller: &AuthenticatedUser,
    id: Uuid,
    request: UpdateUserRequest,
) -> ApiResult<UserModel> {
    if id != caller.id {
        return Err(ApiError::Forbidden("You can only edit your own data".to_string()));
    }
    request.validate()?;

    let users = &repos.user_repos().user_repository;
    let mut user = users.load(id).await?.ok_or_else(|| ApiError::not_found("User", id))?;
    if !user.is_active {
        return Err(ApiError::Forbidden("Inactive users cannot be edited".to_string()));
    }
    if request.is_empty() {
        return Err(ApiError::Conflict("No data provided for update".to_string()));
    }

    if let Some(email) = request.email {
        if email != user.email {
            if users.find_by_email(&email).await?.is_some() {
                return Err(ApiError::Conflict("This email is already in use".to_string()));
            }
            user.email = email;
        }
    }
    if let Some(name) = request.name {
        user.name = Some(name);
    }
    if let Some(password) = request.password {
        user.password_hash = hash_password(password).await?;
    }

    single(users.update_batch(vec![user], None).await?, "User")
}

pub async fn deactivate(repos: &CrmRepositories, caller: &AuthenticatedUser, id: Uuid) -> ApiResult<()> {
    let found = repos
        .user_repos()
        .user_repository
        .deactivate(id, caller.id, Utc::now())
        .await?;
    if !found {
        return Err(ApiError::not_found("User", id));
    }
    info!(user_id = %id, deleted_by = %caller.id, "User deactivated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_core_api::RegisterRequest;
    use crm_core_postgres::test_helper::setup_test_context;

    async fn internal_caller(repos: &CrmRepositories) -> ApiResult<AuthenticatedUser> {
        let request = RegisterRequest {
            email: format!("staff-{}@example.com", Uuid::new_v4().simple()),
            password: "secret123".to_string(),
            name: Some("Staff".to_string()),
        };
        let user = create_user(repos, request, UserType::Internal, None).await?;
        Ok(AuthenticatedUser::from(&user))
    }

    #[tokio::test]
    async fn test_users_edit_only_themselves() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let caller = internal_caller(ctx.repos()).await?;
        let other = internal_caller(ctx.repos()).await?;

        let request = UpdateUserRequest {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let denied = update(ctx.repos(), &caller, other.id, request.clone()).await;
        assert!(matches!(denied, Err(ApiError::Forbidden(_))));

        let updated = update(ctx.repos(), &caller, caller.id, request).await?;
        assert_eq!(updated.name.as_deref(), Some("Renamed"));

        let empty = update(ctx.repos(), &caller, caller.id, UpdateUserRequest::default()).await;
        assert!(matches!(empty, Err(ApiError::Conflict(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_email_taken_conflicts() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let caller = internal_caller(ctx.repos()).await?;
        let other = internal_caller(ctx.repos()).await?;

        let request = UpdateUserRequest {
            email: Some(other.email.clone()),
            ..Default::default()
        };
        let result = update(ctx.repos(), &caller, caller.id, request).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_created_internal_user_is_listed_with_creator() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let caller = internal_caller(ctx.repos()).await?;

        let request = CreateInternalUserRequest {
            email: format!("new-{}@example.com", Uuid::new_v4().simple()),
            password: "secret123".to_string(),
            name: Some("New".to_string()),
        };
        let created = create_internal(ctx.repos(), &caller, request).await?;
        assert_eq!(created.created_by, Some(caller.id));

        let listed = list_internal(ctx.repos()).await?;
        let row = listed.iter().find(|u| u.id == created.id).ok_or("created user not listed")?;
        assert_eq!(row.created_by_name.as_deref(), Some("Staff"));

        deactivate(ctx.repos(), &caller, created.id).await?;
        let listed = list_internal(ctx.repos()).await?;
        assert!(listed.iter().all(|u| u.id != created.id));

        Ok(())
    }
}

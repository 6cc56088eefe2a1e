use chrono::Utc;
use crm_core_api::{ApiError, ApiResult, LoginRequest, RegisterRequest};
use crm_core_db::models::user::{UserModel, UserType};
use crm_core_db::repository::create_batch::CreateBatch;
use crm_core_postgres::CrmRepositories;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{hash_password, verify_password, JwtKeys};

use super::single;

#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub user: UserModel,
    pub token: String,
    pub message: String,
}

/// Self-registration always creates an external user.
pub async fn register(repos: &CrmRepositories, jwt: &JwtKeys, request: RegisterRequest) -> ApiResult<AuthPayload> {
    request.validate()?;
    let user = create_user(repos, request, UserType::External, None).await?;
    let token = jwt.issue(user.id, &user.email)?;
    info!(user_id = %user.id, "User registered");

    Ok(AuthPayload {
        user,
        token,
        message: "User created successfully".to_string(),
    })
}

pub async fn login(repos: &CrmRepositories, jwt: &JwtKeys, request: LoginRequest) -> ApiResult<AuthPayload> {
    request.validate()?;
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = repos
        .user_repos()
        .user_repository
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        warn!(user_id = %user.id, "Login attempt by inactive user");
        return Err(ApiError::Unauthorized("User is inactive".to_string()));
    }
    if !verify_password(request.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "Login attempt with wrong password");
        return Err(invalid());
    }

    let token = jwt.issue(user.id, &user.email)?;
    info!(user_id = %user.id, "User logged in");
    Ok(AuthPayload {
        user,
        token,
        message: "Login successful".to_string(),
    })
}

/// Shared by registration and internal user creation.
pub(crate) async fn create_user(
    repos: &CrmRepositories,
    request: RegisterRequest,
    user_type: UserType,
    created_by: Option<Uuid>,
) -> ApiResult<UserModel> {
    let users = &repos.user_repos().user_repository;
    if users.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Conflict("A user with this email already exists".to_string()));
    }

    let user = UserModel {
        id: Uuid::new_v4(),
        email: request.email,
        password_hash: hash_password(request.password).await?,
        name: request.name,
        user_type,
        is_active: true,
        created_by,
        deleted_by: None,
        deleted_at: None,
        created_at: Utc::now(),
    };
    single(users.create_batch(vec![user], None).await?, "User")
}

//! Request authentication
//!
//! [`auth_middleware`] turns a bearer token into an [`AuthenticatedUser`]
//! stored in the request extensions; [`require_internal`] additionally
//! rejects external accounts. Handlers read the user through [`AuthUser`].

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use crm_core_api::ApiError;
use crm_core_db::models::user::{UserModel, UserType};
use crm_core_db::repository::load::Load;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub user_type: UserType,
}

impl AuthenticatedUser {
    pub fn is_internal(&self) -> bool {
        self.user_type == UserType::Internal
    }
}

impl From<&UserModel> for AuthenticatedUser {
    fn from(user: &UserModel) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            user_type: user.user_type,
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
    })?;

    let claims = state.jwt.verify(token)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    let user = {
        let (_session, repos) = state.repos.create_all_repositories().await?;
        repos.user_repos().user_repository.load(user_id).await?
    };
    let user = match user {
        Some(user) if user.is_active => user,
        Some(_) => {
            tracing::warn!(%user_id, "Rejected token of inactive user");
            return Err(ApiError::Unauthorized("User is inactive".to_string()).into());
        }
        None => {
            tracing::warn!(%user_id, "Rejected token of unknown user");
            return Err(ApiError::Unauthorized("User not found".to_string()).into());
        }
    };

    request.extensions_mut().insert(AuthenticatedUser::from(&user));
    Ok(next.run(request).await)
}

/// Runs after [`auth_middleware`].
pub async fn require_internal(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    if !user.is_internal() {
        tracing::warn!(user_id = %user.id, "External user denied access to internal route");
        return Err(ApiError::Forbidden("Access restricted to internal users".to_string()).into());
    }
    Ok(next.run(request).await)
}

/// Extractor for the user attached by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::Unauthorized("Authentication required".to_string()).into()
            })
    }
}

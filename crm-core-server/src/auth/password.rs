use crm_core_api::{ApiError, ApiResult};

pub const BCRYPT_COST: u32 = 10;

/// Hashes on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password(password: String) -> ApiResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| ApiError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| ApiError::InternalError(format!("Failed to hash password: {e}")))
}

/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, password_hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash).unwrap_or(false))
        .await
        .map_err(|e| ApiError::InternalError(format!("Password verification task failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("secret123".to_string()).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("secret123".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_hash_does_not_verify() {
        assert!(!verify_password("secret123".to_string(), "not-a-hash".to_string()).await.unwrap());
    }
}

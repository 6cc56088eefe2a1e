use crm_core_db::models::user::InternalUserView;
use sqlx::Row;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    /// Active internal users, newest first, with the creator's name resolved.
    pub async fn find_internal(&self) -> Result<Vec<InternalUserView>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                r#"
                SELECT u.id, u.email, u.name, u.is_active, u.created_at, u.user_type,
                       creator.name AS created_by_name
                FROM users u
                LEFT JOIN users creator ON creator.id = u.created_by
                WHERE u.user_type = 'internal' AND u.is_active = TRUE
                ORDER BY u.created_at DESC, u.id DESC
                "#,
            )
            .fetch_all(&mut **transaction)
            .await?
        };

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(InternalUserView {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                name: row.try_get("name")?,
                is_active: row.try_get("is_active")?,
                created_at: row.try_get("created_at")?,
                user_type: row.try_get("user_type")?,
                created_by_name: row.try_get("created_by_name")?,
            });
        }
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_db::models::user::UserType;
    use crm_core_db::repository::create_batch::CreateBatch;
    use super::super::test_utils::test_utils::create_test_user;

    #[tokio::test]
    async fn test_find_internal_resolves_creator() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.user_repos().user_repository;

        let mut admin = create_test_user(UserType::Internal);
        admin.name = Some("Admin".to_string());
        let mut staff = create_test_user(UserType::Internal);
        staff.created_by = Some(admin.id);
        let external = create_test_user(UserType::External);
        user_repo
            .create_batch(vec![admin.clone(), staff.clone(), external.clone()], None)
            .await?;

        let internal = user_repo.find_internal().await?;
        let staff_row = internal.iter().find(|u| u.id == staff.id).unwrap();
        assert_eq!(staff_row.created_by_name.as_deref(), Some("Admin"));
        assert!(internal.iter().any(|u| u.id == admin.id));
        assert!(!internal.iter().any(|u| u.id == external.id));

        Ok(())
    }
}

use crm_core_db::models::user::UserModel;
use std::error::Error;

use crate::utils::TryFromRow;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(r#"SELECT * FROM users WHERE email = $1"#)
                .bind(email)
                .fetch_optional(&mut **transaction)
                .await?
        };
        row.as_ref().map(UserModel::try_from_row).transpose()
    }
}

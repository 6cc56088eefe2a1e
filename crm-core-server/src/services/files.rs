use chrono::{DateTime, Utc};
use crm_core_api::{ApiError, ApiResult};
use crm_core_db::models::stored_file::StoredFileModel;
use crm_core_db::repository::create_batch::CreateBatch;
use crm_core_postgres::CrmRepositories;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::AppResult;
use crate::storage::{upload_path, ObjectStorage, UploadPolicy};

use super::single;

pub const MAX_FILES_PER_UPLOAD: usize = 20;

/// One multipart part, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedItem {
    pub id: Uuid,
    pub public_url: String,
    pub document_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredFileModel> for UploadedItem {
    fn from(file: &StoredFileModel) -> Self {
        Self {
            id: file.id,
            public_url: file.public_url.clone(),
            document_type: file.document_type.clone(),
            created_at: file.created_at,
        }
    }
}

/// Every file is validated before anything is written.
pub async fn upload_many(
    repos: &CrmRepositories,
    storage: &dyn ObjectStorage,
    policy: &UploadPolicy,
    caller: &AuthenticatedUser,
    files: Vec<UploadedFile>,
) -> AppResult<Vec<StoredFileModel>> {
    if files.is_empty() {
        return Err(ApiError::BadRequest("No file was sent".to_string()).into());
    }
    if files.len() > MAX_FILES_PER_UPLOAD {
        return Err(ApiError::BadRequest(format!("At most {MAX_FILES_PER_UPLOAD} files can be uploaded at once")).into());
    }
    for file in &files {
        policy.validate(&file.filename, file.content_type.as_deref(), file.bytes.len())?;
    }

    let mut stored: Vec<StoredFileModel> = Vec::with_capacity(files.len());
    for file in files {
        match store_one(repos, storage, caller, file).await {
            Ok(model) => stored.push(model),
            Err(err) => {
                let written: Vec<String> = stored.iter().map(|model| model.storage_path.clone()).collect();
                discard(storage, &written).await;
                return Err(err);
            }
        }
    }
    info!(count = stored.len(), uploaded_by = %caller.id, "Files uploaded");
    Ok(stored)
}

async fn store_one(
    repos: &CrmRepositories,
    storage: &dyn ObjectStorage,
    caller: &AuthenticatedUser,
    file: UploadedFile,
) -> AppResult<StoredFileModel> {
    let now = Utc::now();
    let path = upload_path(caller.id, now.timestamp_millis(), &file.filename);
    let object = storage.put(&path, &file.bytes).await?;

    let model = StoredFileModel {
        id: Uuid::new_v4(),
        public_url: object.public_url,
        storage_path: object.path,
        document_type: file.content_type,
        uploaded_by: caller.id,
        created_at: now,
        deleted_at: None,
        deleted_by: None,
    };
    let created = repos
        .stored_file_repos()
        .stored_file_repository
        .create_batch(vec![model], None)
        .await
        .map_err(ApiError::from)
        .and_then(|items| single(items, "File"));
    match created {
        Ok(model) => Ok(model),
        Err(err) => {
            discard(storage, &[path]).await;
            Err(err.into())
        }
    }
}

/// Removes objects whose metadata was never committed.
pub(crate) async fn discard(storage: &dyn ObjectStorage, paths: &[String]) {
    for path in paths {
        if let Err(err) = storage.delete(path).await {
            warn!(path = %path, error = %err, "Failed to remove orphaned upload");
        }
    }
}

pub async fn list(repos: &CrmRepositories) -> ApiResult<Vec<StoredFileModel>> {
    Ok(repos.stored_file_repos().stored_file_repository.find_active().await?)
}

pub async fn soft_delete(repos: &CrmRepositories, caller: &AuthenticatedUser, id: Uuid) -> ApiResult<()> {
    let deleted = repos
        .stored_file_repos()
        .stored_file_repository
        .soft_delete(id, caller.id, Utc::now())
        .await?;
    if !deleted {
        return Err(ApiError::NotFound("File not found".to_string()));
    }
    Ok(())
}

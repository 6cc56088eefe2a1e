use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core_api::ApiError;
use crm_core_db::models::stored_file::StoredFileModel;
use crm_core_postgres::PostgresRepositories;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::services::files::{self, UploadedFile, UploadedItem};
use crate::state::AppState;

/// Buffers every part named `field_name`; other parts are skipped.
pub(crate) async fn read_files(multipart: &mut Multipart, field_name: &str) -> AppResult<Vec<UploadedFile>> {
    let malformed = |e: axum::extract::multipart::MultipartError| -> AppError {
        ApiError::BadRequest(format!("Malformed multipart body: {e}")).into()
    };

    let mut uploaded = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or("file").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(malformed)?;
        uploaded.push(UploadedFile {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Ok(uploaded)
}

pub async fn upload(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Vec<UploadedItem>>)> {
    let uploaded = read_files(&mut multipart, "files").await?;

    let (session, repos) = state.repos.create_all_repositories().await?;
    let stored = files::upload_many(&repos, state.storage.as_ref(), &state.upload_policy, &caller, uploaded).await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(stored.iter().map(UploadedItem::from).collect())))
}

pub async fn list(State(repos): State<PostgresRepositories>) -> AppResult<Json<Vec<StoredFileModel>>> {
    let (_session, repos) = repos.create_all_repositories().await?;
    Ok(Json(files::list(&repos).await?))
}

pub async fn delete(
    State(repos): State<PostgresRepositories>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let (session, repos) = repos.create_all_repositories().await?;
    files::soft_delete(&repos, &caller, id).await?;
    session.commit().await?;
    Ok(Json(json!({ "success": true })))
}

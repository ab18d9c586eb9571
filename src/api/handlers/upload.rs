use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use std::path::PathBuf;
use utoipa::ToSchema;

use crate::AppState;
use crate::api::error::AppError;
use crate::models::{Comparison, ListRole};
use crate::services::scratch::ScratchSession;
use crate::services::{comparator, usernames};
use crate::utils::validation::InputFormat;

pub const MISSING_FILES_MESSAGE: &str = "Please upload both files!";

/// Multipart form accepted by `/upload`.
///
/// Each part is either a `.json` platform export or a headerless CSV with one
/// username per row.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    followers_file: Vec<u8>,
    #[schema(value_type = String, format = Binary)]
    following_file: Vec<u8>,
}

/// A stored upload awaiting parsing
struct StagedList {
    path: PathBuf,
    format: InputFormat,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Both differences computed", body = Comparison),
        (status = 400, description = "Missing part or unreadable list", body = crate::api::error::ErrorResponse),
        (status = 413, description = "Request body too large", body = crate::api::error::ErrorResponse)
    ),
    tag = "compare"
)]
pub async fn upload_files(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Comparison>, AppError> {
    // A non-multipart request carries no files at all
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Not a multipart request: {}", rejection.body_text());
        AppError::BadRequest(MISSING_FILES_MESSAGE.to_string())
    })?;

    let session = state.scratch.session().await?;
    let result = compare_uploads(&session, &mut multipart).await;
    session.close().await;

    result.map(Json)
}

async fn compare_uploads(
    session: &ScratchSession,
    multipart: &mut Multipart,
) -> Result<Comparison, AppError> {
    let mut followers: Option<StagedList> = None;
    let mut following: Option<StagedList> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(role) = field.name().and_then(ListRole::from_field_name) else {
            tracing::debug!("Ignoring multipart field {:?}", field.name());
            continue;
        };

        // Only file parts count; a plain form value under the same name does not
        let Some(filename) = field.file_name() else {
            tracing::debug!("Ignoring {} without a filename", role);
            continue;
        };

        let format = InputFormat::from_filename(filename);
        let data = field.bytes().await.map_err(multipart_error)?;
        let path = session.store(role, format, &data).await?;

        tracing::debug!(
            session = %session.id(),
            "Stored {} as {} ({} bytes)",
            role,
            format,
            data.len()
        );

        let staged = StagedList { path, format };
        match role {
            ListRole::Followers => followers = Some(staged),
            ListRole::Following => following = Some(staged),
        }
    }

    let (Some(followers), Some(following)) = (followers, following) else {
        return Err(AppError::BadRequest(MISSING_FILES_MESSAGE.to_string()));
    };

    let comparison = tokio::task::spawn_blocking(move || -> Result<Comparison, AppError> {
        let followers = usernames::load_username_set(&followers.path, followers.format)
            .map_err(|e| AppError::invalid_upload(ListRole::Followers, e))?;
        let following = usernames::load_username_set(&following.path, following.format)
            .map_err(|e| AppError::invalid_upload(ListRole::Following, e))?;

        tracing::info!(
            "Comparing {} followers against {} following",
            followers.len(),
            following.len()
        );

        Ok(comparator::compare(&followers, &following))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Comparison task failed: {}", e)))??;

    tracing::info!(
        session = %session.id(),
        "Found {} not following back, {} not followed by",
        comparison.not_following_back.len(),
        comparison.not_followed_by.len()
    );

    Ok(comparison)
}

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::SemanticProfile;
use crate::profile::analyze::{analyze_profile, DocumentUpload};
use crate::profile::{scoring, store};
use crate::state::AppState;

/// Media types the analysis accepts, mirroring the upload control's fixed
/// accept list (PDF, DOC/DOCX, plain text, JPEG, PNG).
const SUPPORTED_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "image/jpeg",
    "image/png",
];

/// POST /api/v1/profile/analyze
/// Replaces the stored profile with a fresh analysis of the uploaded batch.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SemanticProfile>, AppError> {
    let mut documents = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let file_name = field.file_name().unwrap_or("document").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        if !SUPPORTED_MEDIA_TYPES.contains(&mime_type.as_str()) {
            return Err(AppError::Validation(format!(
                "unsupported media type '{mime_type}' for '{file_name}'"
            )));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read '{file_name}': {e}")))?;
        documents.push(DocumentUpload {
            file_name,
            mime_type,
            data,
        });
    }

    let profile = analyze_profile(state.model.as_ref(), &documents).await?;
    store::replace(&state.db, &profile).await?;
    Ok(Json(profile))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<SemanticProfile>, AppError> {
    let profile = store::latest(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("no profile has been analyzed yet".to_string()))?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct KeywordAdjustment {
    /// The calibration controls send +5 / -5.
    pub delta: i64,
}

/// PATCH /api/v1/profile/keywords/:index
/// Edit-in-place: the whole profile record is rewritten with the adjustment.
pub async fn handle_adjust_keyword(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<KeywordAdjustment>,
) -> Result<Json<SemanticProfile>, AppError> {
    let mut profile = store::latest(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("no profile has been analyzed yet".to_string()))?;

    if index >= profile.ranked_keywords.len() {
        return Err(AppError::Validation(format!(
            "keyword index {index} out of range (profile has {} keywords)",
            profile.ranked_keywords.len()
        )));
    }

    profile.ranked_keywords = scoring::adjust(&profile.ranked_keywords, index, req.delta);
    store::replace(&state.db, &profile).await?;
    Ok(Json(profile))
}

/// DELETE /api/v1/profile
/// "Upload New Documents" — drops the stored profile.
pub async fn handle_delete_profile(
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    store::clear(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Remote catalog import endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;

/// Import request
#[derive(Deserialize, ToSchema)]
pub struct ImportRequest {
    /// Number of records to import from the feed
    pub count: usize,
}

/// Import response
#[derive(Serialize, ToSchema)]
pub struct ImportResponse {
    /// Status message
    pub message: String,
    /// Records requested
    pub requested: usize,
    /// Books actually created
    pub imported: usize,
}

/// Import books from the remote catalog feed
#[utoipa::path(
    post,
    path = "/import/books",
    tag = "import",
    request_body = ImportRequest,
    responses(
        (status = 201, description = "Books imported", body = ImportResponse),
        (status = 502, description = "Catalog feed unavailable or malformed")
    )
)]
pub async fn import_books(
    State(state): State<crate::AppState>,
    Json(request): Json<ImportRequest>,
) -> AppResult<(StatusCode, Json<ImportResponse>)> {
    let report = state.services.import.import_books(request.count).await?;

    Ok((
        StatusCode::CREATED,
        Json(ImportResponse {
            message: format!("Successfully imported {} books", report.imported),
            requested: report.requested,
            imported: report.imported,
        }),
    ))
}

//! Remote movie list handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use filmdex_core::ListingEntry;
use tracing::error;

use super::handlers::ErrorResponse;
use crate::state::AppState;

/// GET /api/movielist
///
/// Folder entries of the configured listing page.
pub async fn movie_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ListingEntry>>, impl IntoResponse> {
    let Some(url) = state.source_url() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new("Movie list source not configured")),
        ));
    };

    match state.library().folder_listing(url).await {
        Ok(folders) => Ok(Json(folders)),
        Err(e) => {
            error!(url = %url, error = %e, "Error fetching movie list");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal Server Error")),
            ))
        }
    }
}

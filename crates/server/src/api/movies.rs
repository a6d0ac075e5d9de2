//! Dataset query handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use filmdex_core::{strip_links, MovieLibrary, MovieRecord, PublicMovie, Year};
use tokio::task;
use tracing::error;

use super::handlers::{ApiError, ErrorResponse};
use crate::state::AppState;

// ============================================================================
// Helpers
// ============================================================================

fn parse_year(year: &str) -> Result<Year, ApiError> {
    year.parse::<Year>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid year format")),
        )
    })
}

/// Run a dataset read on the blocking pool; the store reads from disk.
async fn read_blocking<T, F>(state: &AppState, read: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&MovieLibrary) -> T + Send + 'static,
{
    let library = state.shared_library();
    task::spawn_blocking(move || read(library.as_ref()))
        .await
        .map_err(|e| {
            error!(error = %e, "Dataset read task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal Server Error")),
            )
        })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/movies/{category}/{year}
///
/// Movies stored under a year in one category, without links.
pub async fn list_by_year(
    State(state): State<Arc<AppState>>,
    Path((category, year)): Path<(String, String)>,
) -> Result<Json<Vec<PublicMovie>>, ApiError> {
    let year = parse_year(&year)?;
    let movies = read_blocking(&state, move |library| {
        library.movies_by_year(&category, year)
    })
    .await?;
    Ok(Json(strip_links(movies)))
}

/// GET /api/{category}/{year}/{slug}
///
/// One movie with its link resolved to a direct file URL when possible.
pub async fn get_detail(
    State(state): State<Arc<AppState>>,
    Path((category, year, slug)): Path<(String, String, String)>,
) -> Result<Json<MovieRecord>, ApiError> {
    let year = parse_year(&year)?;

    let found = read_blocking(&state, move |library| {
        library.find_movie(&category, year, &slug)
    })
    .await?;
    let Some(record) = found else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Movie not found")),
        ));
    };

    let resolved = state.library().resolve_direct_link(record).await;
    Ok(Json(resolved.record))
}

/// GET /api/{category}/{query}
///
/// Movies whose title or name contains the query, sorted by title, without
/// links. `all` searches every category.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Path((category, query)): Path<(String, String)>,
) -> Result<Json<Vec<PublicMovie>>, ApiError> {
    let matched = read_blocking(&state, move |library| library.search(&category, &query)).await?;
    Ok(Json(strip_links(matched)))
}

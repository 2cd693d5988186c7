//! Axum route handlers for favorites.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::pipeline::{load_jobs, score_jobs_for_user};
use crate::jobs::scoring::job_identifier;
use crate::jobs::selection::full_board;
use crate::models::favorite::FavoriteMark;
use crate::models::job::{JobRecord, ScoredJob};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    pub company: String,
    pub identifier: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub company: String,
    pub identifier: String,
    pub is_favorited: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub user_id: String,
    pub jobs: Vec<ScoredJob>,
}

/// True when some current job carries this company and escaped identifier.
pub fn job_exists(jobs: &[JobRecord], mark: &FavoriteMark) -> bool {
    jobs.iter()
        .any(|job| job.company == mark.company && job_identifier(job) == mark.identifier)
}

/// GET /api/v1/favorites/:user_id
///
/// Favorited jobs that still exist, in full-board order.
pub async fn handle_list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<FavoritesResponse>, AppError> {
    let store = state.store.as_ref();
    let jobs = load_jobs(store, &state.config.csv_sources).await;
    let scored = score_jobs_for_user(store, &user_id, jobs, true).await;

    let favorites = full_board(
        scored
            .into_iter()
            .filter(|job| job.is_favorited == Some(true))
            .collect(),
    );

    Ok(Json(FavoritesResponse {
        user_id,
        jobs: favorites,
    }))
}

/// POST /api/v1/favorites/:user_id/toggle
///
/// Returns 404 when no current job matches the pair.
pub async fn handle_toggle_favorite(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ToggleFavoriteRequest>,
) -> Result<Json<ToggleFavoriteResponse>, AppError> {
    let mark = FavoriteMark {
        company: request.company,
        identifier: request.identifier,
    };

    let jobs = load_jobs(state.store.as_ref(), &state.config.csv_sources).await;
    if !job_exists(&jobs, &mark) {
        return Err(AppError::NotFound(format!(
            "Job {} at {} not found",
            mark.identifier, mark.company
        )));
    }

    let is_favorited = state.store.toggle_favorite(&user_id, &mark).await?;
    info!(
        "User {user_id} {} {} at {}",
        if is_favorited { "favorited" } else { "unfavorited" },
        mark.identifier,
        mark.company
    );

    Ok(Json(ToggleFavoriteResponse {
        company: mark.company,
        identifier: mark.identifier,
        is_favorited,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::sample_job;

    #[test]
    fn test_job_exists_matches_escaped_identifier() {
        let mut job = sample_job("Engineer", "Google");
        job.job_id = Some("a/b".to_string());
        let jobs = vec![job];

        let hit = FavoriteMark {
            company: "Google".to_string(),
            identifier: "a%2Fb".to_string(),
        };
        assert!(job_exists(&jobs, &hit));

        let raw = FavoriteMark {
            company: "Google".to_string(),
            identifier: "a/b".to_string(),
        };
        assert!(!job_exists(&jobs, &raw));

        let wrong_company = FavoriteMark {
            company: "Meta".to_string(),
            identifier: "a%2Fb".to_string(),
        };
        assert!(!job_exists(&jobs, &wrong_company));
    }
}

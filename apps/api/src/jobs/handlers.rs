//! Axum route handlers for the job views.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::filters::{apply_filters, BoardFilter, BoardQuery};
use crate::jobs::pipeline::{load_jobs, load_preferences, score_jobs_for_user};
use crate::jobs::scoring::score_jobs;
use crate::jobs::selection::{
    full_board, recommended, trending, TRENDING_COMPACT_LIMIT, TRENDING_PREVIEW_LIMIT,
};
use crate::models::job::{JobType, ScoredJob};
use crate::preferences::summary::{compute_dashboard_stats, DashboardStats};
use crate::state::AppState;

/// Used when a request does not name a user.
pub const DEFAULT_USER_ID: &str = "guest";

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BoardParams {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub q: Option<String>,
    #[serde(default)]
    pub filter: BoardFilter,
    pub job_type: Option<JobType>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendedParams {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub limit: Option<usize>,
    pub min_score: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub user_id: String,
    pub recommended: Vec<ScoredJob>,
    pub trending: Vec<ScoredJob>,
    pub stats: DashboardStats,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub user_id: String,
    pub total: usize,
    pub jobs: Vec<ScoredJob>,
}

impl JobListResponse {
    fn new(user_id: String, jobs: Vec<ScoredJob>) -> Self {
        Self {
            user_id,
            total: jobs.len(),
            jobs,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/home
///
/// Recommended and compact trending views plus the dashboard counters.
pub async fn handle_home(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<HomeResponse>, AppError> {
    let store = state.store.as_ref();
    let jobs = load_jobs(store, &state.config.csv_sources).await;
    let prefs = load_preferences(store, &params.user_id).await;
    let stats = compute_dashboard_stats(jobs.len(), &prefs);

    let scored = score_jobs(jobs, &prefs, None, Utc::now());

    Ok(Json(HomeResponse {
        recommended: recommended(
            &scored,
            state.config.recommended_min_score,
            state.config.recommended_limit,
        ),
        trending: trending(&scored, TRENDING_COMPACT_LIMIT),
        stats,
        user_id: params.user_id,
    }))
}

/// GET /api/v1/jobs
///
/// Full board with favorite flags, optionally narrowed by `q`, `filter`
/// (`all` | `top-matches` | `remote`) and `job_type`.
pub async fn handle_board(
    State(state): State<AppState>,
    Query(params): Query<BoardParams>,
) -> Result<Json<JobListResponse>, AppError> {
    let store = state.store.as_ref();
    let jobs = load_jobs(store, &state.config.csv_sources).await;
    let scored = score_jobs_for_user(store, &params.user_id, jobs, true).await;

    let query = BoardQuery {
        q: params.q,
        filter: params.filter,
        job_type: params.job_type,
    };
    let board = apply_filters(full_board(scored), &query);

    Ok(Json(JobListResponse::new(params.user_id, board)))
}

/// GET /api/v1/jobs/recommended
pub async fn handle_recommended(
    State(state): State<AppState>,
    Query(params): Query<RecommendedParams>,
) -> Result<Json<JobListResponse>, AppError> {
    let store = state.store.as_ref();
    let jobs = load_jobs(store, &state.config.csv_sources).await;
    let scored = score_jobs_for_user(store, &params.user_id, jobs, false).await;

    let picked = recommended(
        &scored,
        params.min_score.unwrap_or(state.config.recommended_min_score),
        params.limit.unwrap_or(state.config.recommended_limit),
    );

    Ok(Json(JobListResponse::new(params.user_id, picked)))
}

/// GET /api/v1/jobs/trending
pub async fn handle_trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Result<Json<JobListResponse>, AppError> {
    let store = state.store.as_ref();
    let jobs = load_jobs(store, &state.config.csv_sources).await;
    let scored = score_jobs_for_user(store, &params.user_id, jobs, false).await;

    let picked = trending(&scored, params.limit.unwrap_or(TRENDING_PREVIEW_LIMIT));

    Ok(Json(JobListResponse::new(params.user_id, picked)))
}

//! Axum route handlers for reading and saving preferences.
//!
//! Saving a dimension replaces it wholesale. Every value is validated before
//! anything is written, so a rejected request leaves stored preferences intact.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::roles::CANONICAL_ROLES;
use crate::models::job::JobType;
use crate::models::preference::{Dimension, PreferenceEntry, Tier};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Tier arrives unvalidated so out-of-range values get a clear message.
#[derive(Debug, Deserialize)]
pub struct RankedValue {
    pub key: String,
    pub tier: i64,
}

#[derive(Debug, Deserialize)]
pub struct SavePreferencesRequest {
    pub entries: Vec<RankedValue>,
}

#[derive(Debug, Deserialize)]
pub struct SaveJobTypesRequest {
    pub types: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub user_id: String,
    pub companies: Vec<PreferenceEntry>,
    pub locations: Vec<PreferenceEntry>,
    pub roles: Vec<PreferenceEntry>,
    pub job_types: Vec<JobType>,
    pub canonical_roles: Vec<&'static str>,
    pub job_type_choices: Vec<JobType>,
}

#[derive(Debug, Serialize)]
pub struct SavedPreferencesResponse {
    pub user_id: String,
    pub dimension: Dimension,
    pub entries: Vec<PreferenceEntry>,
}

#[derive(Debug, Serialize)]
pub struct SavedJobTypesResponse {
    pub user_id: String,
    pub types: Vec<JobType>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Trims keys, rejects blanks and out-of-range tiers. A repeated key keeps
/// its last tier. Output is sorted by key.
pub fn validate_entries(entries: Vec<RankedValue>) -> Result<Vec<PreferenceEntry>, AppError> {
    let mut by_key: BTreeMap<String, Tier> = BTreeMap::new();
    for entry in entries {
        let key = entry.key.trim();
        if key.is_empty() {
            return Err(AppError::Validation(
                "preference key cannot be empty".to_string(),
            ));
        }
        let tier = Tier::try_from(entry.tier)
            .map_err(|e| AppError::Validation(format!("'{key}': {e}")))?;
        by_key.insert(key.to_string(), tier);
    }
    Ok(by_key
        .into_iter()
        .map(|(key, tier)| PreferenceEntry { key, tier })
        .collect())
}

/// Maps labels to job types, rejecting unknown labels and dropping repeats.
pub fn validate_job_types(labels: &[String]) -> Result<Vec<JobType>, AppError> {
    let mut types = Vec::new();
    for label in labels {
        let job_type = JobType::from_label(label.trim())
            .ok_or_else(|| AppError::Validation(format!("unknown job type '{label}'")))?;
        if !types.contains(&job_type) {
            types.push(job_type);
        }
    }
    Ok(types)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/preferences/:user_id
pub async fn handle_get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let store = state.store.as_ref();
    let companies = store.find_preferences(Dimension::Company, &user_id).await?;
    let locations = store.find_preferences(Dimension::Location, &user_id).await?;
    let roles = store.find_preferences(Dimension::Role, &user_id).await?;
    let job_types = store
        .find_job_type_preferences(&user_id)
        .await?
        .unwrap_or_default();

    Ok(Json(PreferencesResponse {
        user_id,
        companies,
        locations,
        roles,
        job_types,
        canonical_roles: CANONICAL_ROLES.to_vec(),
        job_type_choices: JobType::ALL.to_vec(),
    }))
}

/// PUT /api/v1/preferences/:user_id/:dimension
///
/// `dimension` is one of `companies`, `locations`, `roles`.
pub async fn handle_save_preferences(
    State(state): State<AppState>,
    Path((user_id, segment)): Path<(String, String)>,
    Json(request): Json<SavePreferencesRequest>,
) -> Result<Json<SavedPreferencesResponse>, AppError> {
    let dimension = Dimension::from_path_segment(&segment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown preference dimension '{segment}'")))?;
    let entries = validate_entries(request.entries)?;

    state
        .store
        .replace_preferences(dimension, &user_id, &entries)
        .await?;

    Ok(Json(SavedPreferencesResponse {
        user_id,
        dimension,
        entries,
    }))
}

/// PUT /api/v1/preferences/:user_id/job_types
pub async fn handle_save_job_types(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SaveJobTypesRequest>,
) -> Result<Json<SavedJobTypesResponse>, AppError> {
    let types = validate_job_types(&request.types)?;

    state
        .store
        .replace_job_type_preferences(&user_id, &types)
        .await?;

    Ok(Json(SavedJobTypesResponse { user_id, types }))
}

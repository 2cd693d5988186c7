//! One request's pass over the data: load → normalize → dedupe → score.
//!
//! Read failures never reach the views. A store that cannot list jobs
//! contributes no jobs; a store that cannot list preferences yields a neutral
//! profile. Both are logged.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, warn};

use crate::jobs::dedup::dedupe_jobs;
use crate::jobs::normalize::{load_csv_sources, CsvSource};
use crate::jobs::scoring::score_jobs;
use crate::models::favorite::FavoriteMark;
use crate::models::job::{JobRecord, ScoredJob};
use crate::models::preference::{Dimension, Preferences};
use crate::store::JobStore;

/// Persisted jobs first, then each CSV source in order, deduplicated.
pub async fn load_jobs(store: &dyn JobStore, sources: &[CsvSource]) -> Vec<JobRecord> {
    let mut jobs = store.find_all_jobs().await.unwrap_or_else(|e| {
        warn!("Could not load persisted jobs: {e}");
        Vec::new()
    });
    let persisted = jobs.len();

    // CSV parsing is blocking file IO.
    let sources = sources.to_vec();
    let scraped = tokio::task::spawn_blocking(move || load_csv_sources(&sources))
        .await
        .unwrap_or_else(|e| {
            warn!("CSV ingestion task failed: {e}");
            Vec::new()
        });
    let scraped_count = scraped.len();
    jobs.extend(scraped);

    let unique = dedupe_jobs(jobs);
    info!(
        "Loaded {persisted} persisted and {scraped_count} scraped jobs, {} unique",
        unique.len()
    );
    unique
}

/// Reads all four preference dimensions for a user.
pub async fn load_preferences(store: &dyn JobStore, user_id: &str) -> Preferences {
    let mut prefs = Preferences::default();

    for dimension in Dimension::ALL {
        match store.find_preferences(dimension, user_id).await {
            Ok(entries) => {
                let tiers = prefs.tiers_mut(dimension);
                for entry in entries {
                    tiers.insert(entry.key, entry.tier);
                }
            }
            Err(e) => warn!(
                "Could not load {} preferences for {user_id}: {e}",
                dimension.as_str()
            ),
        }
    }

    match store.find_job_type_preferences(user_id).await {
        Ok(types) => prefs.job_types = types.unwrap_or_default().into_iter().collect(),
        Err(e) => warn!("Could not load job type preferences for {user_id}: {e}"),
    }

    prefs
}

pub async fn load_favorites(store: &dyn JobStore, user_id: &str) -> HashSet<FavoriteMark> {
    store
        .find_favorites(user_id)
        .await
        .map(|marks| marks.into_iter().collect())
        .unwrap_or_else(|e| {
            warn!("Could not load favorites for {user_id}: {e}");
            HashSet::new()
        })
}

/// Scores `jobs` against the user's stored preferences as of now.
/// Favorite flags are attached only when `include_favorites` is set.
pub async fn score_jobs_for_user(
    store: &dyn JobStore,
    user_id: &str,
    jobs: Vec<JobRecord>,
    include_favorites: bool,
) -> Vec<ScoredJob> {
    let prefs = load_preferences(store, user_id).await;
    let favorites = if include_favorites {
        Some(load_favorites(store, user_id).await)
    } else {
        None
    };
    score_jobs(jobs, &prefs, favorites.as_ref(), Utc::now())
}

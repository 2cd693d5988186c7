//! Persistence seam. Handlers and the pipeline only ever see `dyn JobStore`;
//! `AppState` carries an `Arc<dyn JobStore>` chosen at startup.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::favorite::FavoriteMark;
use crate::models::job::{JobRecord, JobType};
use crate::models::preference::{Dimension, PreferenceEntry};

pub use memory::InMemoryStore;
pub use postgres::PgJobStore;

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Cheap reachability probe for the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;

    async fn find_all_jobs(&self) -> Result<Vec<JobRecord>, AppError>;

    async fn find_preferences(
        &self,
        dimension: Dimension,
        user_id: &str,
    ) -> Result<Vec<PreferenceEntry>, AppError>;

    /// `None` when the user never saved job type preferences.
    async fn find_job_type_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<Vec<JobType>>, AppError>;

    async fn find_favorites(&self, user_id: &str) -> Result<Vec<FavoriteMark>, AppError>;

    /// Replaces every entry of one dimension for the user.
    async fn replace_preferences(
        &self,
        dimension: Dimension,
        user_id: &str,
        entries: &[PreferenceEntry],
    ) -> Result<(), AppError>;

    async fn replace_job_type_preferences(
        &self,
        user_id: &str,
        types: &[JobType],
    ) -> Result<(), AppError>;

    /// Flips the favorite and returns the new state.
    async fn toggle_favorite(&self, user_id: &str, mark: &FavoriteMark) -> Result<bool, AppError>;
}

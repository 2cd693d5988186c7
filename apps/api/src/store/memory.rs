use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::favorite::FavoriteMark;
use crate::models::job::{JobRecord, JobType};
use crate::models::preference::{Dimension, PreferenceEntry};
use crate::store::JobStore;

/// Process-local store used when no `DATABASE_URL` is configured, and by tests.
/// Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryStore {
    jobs: RwLock<Vec<JobRecord>>,
    preferences: RwLock<HashMap<(String, Dimension), Vec<PreferenceEntry>>>,
    job_types: RwLock<HashMap<String, Vec<JobType>>>,
    favorites: RwLock<HashMap<String, Vec<FavoriteMark>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: RwLock::new(jobs),
            ..Self::default()
        }
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find_all_jobs(&self) -> Result<Vec<JobRecord>, AppError> {
        Ok(self.jobs.read().await.clone())
    }

    async fn find_preferences(
        &self,
        dimension: Dimension,
        user_id: &str,
    ) -> Result<Vec<PreferenceEntry>, AppError> {
        Ok(self
            .preferences
            .read()
            .await
            .get(&(user_id.to_string(), dimension))
            .cloned()
            .unwrap_or_default())
    }

    async fn find_job_type_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<Vec<JobType>>, AppError> {
        Ok(self.job_types.read().await.get(user_id).cloned())
    }

    async fn find_favorites(&self, user_id: &str) -> Result<Vec<FavoriteMark>, AppError> {
        Ok(self
            .favorites
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_preferences(
        &self,
        dimension: Dimension,
        user_id: &str,
        entries: &[PreferenceEntry],
    ) -> Result<(), AppError> {
        self.preferences
            .write()
            .await
            .insert((user_id.to_string(), dimension), entries.to_vec());
        Ok(())
    }

    async fn replace_job_type_preferences(
        &self,
        user_id: &str,
        types: &[JobType],
    ) -> Result<(), AppError> {
        self.job_types
            .write()
            .await
            .insert(user_id.to_string(), types.to_vec());
        Ok(())
    }

    async fn toggle_favorite(&self, user_id: &str, mark: &FavoriteMark) -> Result<bool, AppError> {
        let mut favorites = self.favorites.write().await;
        let marks = favorites.entry(user_id.to_string()).or_default();
        match marks.iter().position(|m| m == mark) {
            Some(index) => {
                marks.remove(index);
                Ok(false)
            }
            None => {
                marks.push(mark.clone());
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preference::Tier;

    #[tokio::test]
    async fn test_replace_preferences_overwrites_dimension() {
        let store = InMemoryStore::new();
        let first = vec![
            PreferenceEntry { key: "Google".to_string(), tier: Tier::TARGET },
            PreferenceEntry { key: "Meta".to_string(), tier: Tier::GOOD },
        ];
        store
            .replace_preferences(Dimension::Company, "u1", &first)
            .await
            .unwrap();
        let second = vec![PreferenceEntry { key: "Apple".to_string(), tier: Tier::SAFETY }];
        store
            .replace_preferences(Dimension::Company, "u1", &second)
            .await
            .unwrap();

        let stored = store.find_preferences(Dimension::Company, "u1").await.unwrap();
        assert_eq!(stored, second);
        assert!(store
            .find_preferences(Dimension::Location, "u1")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_job_types_absent_until_saved() {
        let store = InMemoryStore::new();
        assert_eq!(store.find_job_type_preferences("u1").await.unwrap(), None);
        store
            .replace_job_type_preferences("u1", &[JobType::Contract])
            .await
            .unwrap();
        assert_eq!(
            store.find_job_type_preferences("u1").await.unwrap(),
            Some(vec![JobType::Contract])
        );
    }

    #[tokio::test]
    async fn test_toggle_favorite_flips() {
        let store = InMemoryStore::new();
        let mark = FavoriteMark {
            company: "Google".to_string(),
            identifier: "123".to_string(),
        };
        assert!(store.toggle_favorite("u1", &mark).await.unwrap());
        assert_eq!(store.find_favorites("u1").await.unwrap(), vec![mark.clone()]);
        assert!(!store.toggle_favorite("u1", &mark).await.unwrap());
        assert!(store.find_favorites("u1").await.unwrap().is_empty());
        assert!(store.find_favorites("u2").await.unwrap().is_empty());
    }
}

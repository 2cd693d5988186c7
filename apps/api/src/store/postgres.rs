use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::normalize::classify_job_type;
use crate::models::favorite::FavoriteMark;
use crate::models::job::{JobRecord, JobType};
use crate::models::preference::{Dimension, PreferenceEntry, Tier};
use crate::store::JobStore;

#[derive(Debug, Clone, FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    company: String,
    location: String,
    department: String,
    job_id: Option<String>,
    url: String,
    role: Option<String>,
    tags: Vec<String>,
    scraped_at: Option<DateTime<Utc>>,
    posted_date: Option<DateTime<Utc>>,
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        let company = if row.company.trim().is_empty() {
            "Unknown".to_string()
        } else {
            row.company
        };
        JobRecord {
            id: Some(row.id.to_string()),
            job_type: classify_job_type(&row.title, &row.department),
            title: row.title,
            company,
            location: row.location,
            department: row.department,
            job_id: row.job_id,
            url: row.url,
            role: row.role,
            scraped_at: row.scraped_at,
            posted_date: row.posted_date.or(row.scraped_at),
            tags: row.tags,
            posted: None,
        }
    }
}

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_all_jobs(&self) -> Result<Vec<JobRecord>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, company, location, department, job_id, url, role,
                   tags, scraped_at, posted_date
            FROM jobs
            ORDER BY posted_date DESC NULLS LAST, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter(|row| !row.title.trim().is_empty() && !row.url.trim().is_empty())
            .map(JobRecord::from)
            .collect())
    }

    async fn find_preferences(
        &self,
        dimension: Dimension,
        user_id: &str,
    ) -> Result<Vec<PreferenceEntry>, AppError> {
        let rows: Vec<(String, i16)> = sqlx::query_as(
            "SELECT value, tier FROM preferences WHERE user_id = $1 AND dimension = $2 ORDER BY tier, value",
        )
        .bind(user_id)
        .bind(dimension.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(key, tier)| match Tier::try_from(i64::from(tier)) {
                Ok(tier) => Some(PreferenceEntry { key, tier }),
                Err(e) => {
                    warn!("Ignoring stored {} preference '{key}': {e}", dimension.as_str());
                    None
                }
            })
            .collect())
    }

    async fn find_job_type_preferences(
        &self,
        user_id: &str,
    ) -> Result<Option<Vec<JobType>>, AppError> {
        let types: Option<Vec<String>> =
            sqlx::query_scalar("SELECT types FROM job_type_preferences WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(types.map(|types| {
            types
                .iter()
                .filter_map(|label| JobType::from_label(label))
                .collect()
        }))
    }

    async fn find_favorites(&self, user_id: &str) -> Result<Vec<FavoriteMark>, AppError> {
        Ok(sqlx::query_as::<_, FavoriteMark>(
            "SELECT company, identifier FROM favorites WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn replace_preferences(
        &self,
        dimension: Dimension,
        user_id: &str,
        entries: &[PreferenceEntry],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM preferences WHERE user_id = $1 AND dimension = $2")
            .bind(user_id)
            .bind(dimension.as_str())
            .execute(&mut *tx)
            .await?;

        for entry in entries {
            sqlx::query(
                "INSERT INTO preferences (user_id, dimension, value, tier) VALUES ($1, $2, $3, $4)",
            )
            .bind(user_id)
            .bind(dimension.as_str())
            .bind(&entry.key)
            .bind(entry.tier.get() as i16)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(
            "Saved {} {} preferences for user {user_id}",
            entries.len(),
            dimension.as_str()
        );
        Ok(())
    }

    async fn replace_job_type_preferences(
        &self,
        user_id: &str,
        types: &[JobType],
    ) -> Result<(), AppError> {
        let labels: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM job_type_preferences WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO job_type_preferences (user_id, types) VALUES ($1, $2)")
            .bind(user_id)
            .bind(&labels)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Saved job type preferences {labels:?} for user {user_id}");
        Ok(())
    }

    async fn toggle_favorite(&self, user_id: &str, mark: &FavoriteMark) -> Result<bool, AppError> {
        // The primary key makes a concurrent double toggle settle on one row at most.
        let deleted = sqlx::query(
            "DELETE FROM favorites WHERE user_id = $1 AND company = $2 AND identifier = $3",
        )
        .bind(user_id)
        .bind(&mark.company)
        .bind(&mark.identifier)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted > 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, company, identifier)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, company, identifier) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(&mark.company)
        .bind(&mark.identifier)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Employment type of a posting. Derived from free text, never taken raw
/// from a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    /// Display label, also the value stored in job type preferences.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        JobType::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

/// One posting, reconstructed from source data on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Internal id of persisted rows. CSV rows have none.
    pub id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub department: String,
    pub job_id: Option<String>,
    pub url: String,
    /// Explicit role text, when a source carries one. Scoring falls back to `title`.
    pub role: Option<String>,
    pub scraped_at: Option<DateTime<Utc>>,
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub tags: Vec<String>,
    /// Short display label such as "Oct 07".
    pub posted: Option<String>,
}

impl JobRecord {
    /// `job_id` if non-empty, else `url` if non-empty, else the internal id.
    pub fn stable_key(&self) -> &str {
        match self.job_id.as_deref() {
            Some(job_id) if !job_id.is_empty() => job_id,
            _ if !self.url.is_empty() => &self.url,
            _ => self.id.as_deref().unwrap_or(""),
        }
    }

    /// `posted_date`, falling back to `scraped_at`.
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.posted_date.or(self.scraped_at)
    }

    /// `scraped_at`, falling back to `posted_date`.
    pub fn seen_at(&self) -> Option<DateTime<Utc>> {
        self.scraped_at.or(self.posted_date)
    }
}

/// A job augmented with everything the scorer derives for display and ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobRecord,
    pub identifier: String,
    pub company_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorited: Option<bool>,
    pub match_score: u32,
}

#[cfg(test)]
pub(crate) fn sample_job(title: &str, company: &str) -> JobRecord {
    JobRecord {
        id: None,
        title: title.to_string(),
        company: company.to_string(),
        location: String::new(),
        department: String::new(),
        job_id: None,
        url: format!(
            "https://careers.example.com/{}",
            title.to_lowercase().replace(' ', "-")
        ),
        role: None,
        scraped_at: None,
        posted_date: None,
        job_type: JobType::FullTime,
        tags: vec![],
        posted: None,
    }
}

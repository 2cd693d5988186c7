use serde::Deserialize;

use crate::models::job::{JobType, ScoredJob};

/// Jobs at or above this score count as top matches.
pub const TOP_MATCH_THRESHOLD: u32 = 70;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoardFilter {
    #[default]
    All,
    TopMatches,
    Remote,
}

/// Board narrowing options. Every field is optional and they compose.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub filter: BoardFilter,
    #[serde(default)]
    pub job_type: Option<JobType>,
}

pub fn is_remote(job: &ScoredJob) -> bool {
    job.job.location.to_lowercase().contains("remote")
}

fn matches_text(job: &ScoredJob, needle: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        job.job.title,
        job.job.company,
        job.job.location,
        job.job.tags.join(" ")
    )
    .to_lowercase();
    haystack.contains(needle)
}

/// Keeps the jobs that satisfy every active filter, in their current order.
pub fn apply_filters(jobs: Vec<ScoredJob>, query: &BoardQuery) -> Vec<ScoredJob> {
    let needle = query
        .q
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    jobs.into_iter()
        .filter(|job| needle.as_deref().map_or(true, |n| matches_text(job, n)))
        .filter(|job| match query.filter {
            BoardFilter::All => true,
            BoardFilter::TopMatches => job.match_score >= TOP_MATCH_THRESHOLD,
            BoardFilter::Remote => is_remote(job),
        })
        .filter(|job| query.job_type.map_or(true, |t| job.job.job_type == t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::scoring::score_job;
    use crate::models::job::sample_job;
    use crate::models::preference::Preferences;
    use chrono::Utc;

    fn board() -> Vec<ScoredJob> {
        let mut a = sample_job("Backend Engineer", "Google");
        a.location = "Remote (US)".to_string();
        a.tags = vec!["Cloud".to_string()];
        let mut b = sample_job("Data Intern", "Meta");
        b.location = "Menlo Park, CA".to_string();
        b.job_type = JobType::Internship;
        let mut c = sample_job("Contract Designer", "Apple");
        c.location = "Austin, TX".to_string();
        c.job_type = JobType::Contract;

        let mut jobs: Vec<ScoredJob> = [a, b, c]
            .into_iter()
            .map(|j| score_job(j, &Preferences::default(), None, Utc::now()))
            .collect();
        jobs[0].match_score = 85;
        jobs[1].match_score = 70;
        jobs[2].match_score = 20;
        jobs
    }

    fn titles(jobs: &[ScoredJob]) -> Vec<&str> {
        jobs.iter().map(|j| j.job.title.as_str()).collect()
    }

    #[test]
    fn test_default_query_keeps_everything() {
        assert_eq!(apply_filters(board(), &BoardQuery::default()).len(), 3);
    }

    #[test]
    fn test_text_query_searches_company_and_tags() {
        let query = BoardQuery {
            q: Some("  META ".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&apply_filters(board(), &query)), vec!["Data Intern"]);

        let query = BoardQuery {
            q: Some("cloud".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&apply_filters(board(), &query)), vec!["Backend Engineer"]);
    }

    #[test]
    fn test_top_matches_threshold_is_inclusive() {
        let query = BoardQuery {
            filter: BoardFilter::TopMatches,
            ..Default::default()
        };
        assert_eq!(
            titles(&apply_filters(board(), &query)),
            vec!["Backend Engineer", "Data Intern"]
        );
    }

    #[test]
    fn test_remote_and_type_filters_compose() {
        let query = BoardQuery {
            filter: BoardFilter::Remote,
            job_type: Some(JobType::FullTime),
            ..Default::default()
        };
        assert_eq!(titles(&apply_filters(board(), &query)), vec!["Backend Engineer"]);

        let query = BoardQuery {
            filter: BoardFilter::Remote,
            job_type: Some(JobType::Contract),
            ..Default::default()
        };
        assert!(apply_filters(board(), &query).is_empty());
    }

    #[test]
    fn test_query_string_parsing() {
        let query: BoardQuery =
            serde_json::from_str(r#"{"filter": "top-matches", "job_type": "Internship"}"#).unwrap();
        assert_eq!(query.filter, BoardFilter::TopMatches);
        assert_eq!(query.job_type, Some(JobType::Internship));
    }
}

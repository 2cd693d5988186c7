//! Page views built from a scored job list. All sorts are descending and
//! stable, so ties keep input order. Untimed jobs sort as the Unix epoch.

use chrono::{DateTime, Utc};

use crate::models::job::ScoredJob;

pub const DEFAULT_MIN_SCORE: u32 = 40;
pub const DEFAULT_RECOMMENDED_LIMIT: usize = 8;
pub const TRENDING_COMPACT_LIMIT: usize = 10;
pub const TRENDING_PREVIEW_LIMIT: usize = 20;

fn or_epoch(at: Option<DateTime<Utc>>) -> DateTime<Utc> {
    at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn sort_desc_by<K: Ord>(jobs: &mut [ScoredJob], key: impl Fn(&ScoredJob) -> K) {
    jobs.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Jobs scoring at least `min_score`, best first. When fewer than `limit`
/// qualify, the top `limit` of all jobs is returned instead, so the view
/// holds `min(limit, jobs.len())` entries.
pub fn recommended(jobs: &[ScoredJob], min_score: u32, limit: usize) -> Vec<ScoredJob> {
    let key = |job: &ScoredJob| (job.match_score, or_epoch(job.job.posted_at()));

    let mut picked: Vec<ScoredJob> = jobs
        .iter()
        .filter(|job| job.match_score >= min_score)
        .cloned()
        .collect();

    if picked.len() < limit {
        picked = jobs.to_vec();
    }

    sort_desc_by(&mut picked, key);
    picked.truncate(limit);
    picked
}

/// Most recently seen jobs first, top `limit`.
pub fn trending(jobs: &[ScoredJob], limit: usize) -> Vec<ScoredJob> {
    let mut sorted = jobs.to_vec();
    sort_desc_by(&mut sorted, |job| or_epoch(job.job.seen_at()));
    sorted.truncate(limit);
    sorted
}

/// Every job, best match first, newer first among equal scores.
pub fn full_board(mut jobs: Vec<ScoredJob>) -> Vec<ScoredJob> {
    sort_desc_by(&mut jobs, |job| (job.match_score, or_epoch(job.job.seen_at())));
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::scoring::score_job;
    use crate::models::job::sample_job;
    use crate::models::preference::Preferences;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 17, 12, 0, 0).unwrap()
    }

    fn scored(title: &str, score: u32, days_ago: Option<i64>) -> ScoredJob {
        let mut job = sample_job(title, "Acme");
        job.scraped_at = days_ago.map(|d| now() - Duration::days(d));
        job.posted_date = job.scraped_at;
        let mut scored = score_job(job, &Preferences::default(), None, now());
        scored.match_score = score;
        scored
    }

    fn titles(jobs: &[ScoredJob]) -> Vec<&str> {
        jobs.iter().map(|j| j.job.title.as_str()).collect()
    }

    #[test]
    fn test_recommended_filters_and_sorts() {
        let jobs: Vec<ScoredJob> = (0..10)
            .map(|i| scored(&format!("job{i}"), 40 + i * 5, Some(1)))
            .collect();
        let picked = recommended(&jobs, DEFAULT_MIN_SCORE, 3);
        assert_eq!(titles(&picked), vec!["job9", "job8", "job7"]);
    }

    #[test]
    fn test_recommended_breaks_ties_by_date() {
        let jobs = vec![
            scored("old", 60, Some(10)),
            scored("new", 60, Some(1)),
            scored("untimed", 60, None),
        ];
        let picked = recommended(&jobs, 50, 3);
        assert_eq!(titles(&picked), vec!["new", "old", "untimed"]);
    }

    #[test]
    fn test_recommended_falls_back_when_sparse() {
        let jobs = vec![
            scored("low", 10, Some(3)),
            scored("high", 80, Some(3)),
            scored("mid", 30, Some(3)),
        ];
        let picked = recommended(&jobs, DEFAULT_MIN_SCORE, DEFAULT_RECOMMENDED_LIMIT);
        assert_eq!(titles(&picked), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_recommended_length_is_min_of_limit_and_total() {
        for total in 0..12u32 {
            let jobs: Vec<ScoredJob> = (0..total)
                .map(|i| scored(&format!("job{i}"), i * 9, Some(i as i64)))
                .collect();
            let picked = recommended(&jobs, DEFAULT_MIN_SCORE, DEFAULT_RECOMMENDED_LIMIT);
            assert_eq!(picked.len(), (total as usize).min(DEFAULT_RECOMMENDED_LIMIT));
        }
    }

    #[test]
    fn test_trending_orders_by_recency() {
        let jobs = vec![
            scored("untimed", 99, None),
            scored("week", 10, Some(7)),
            scored("today", 0, Some(0)),
        ];
        assert_eq!(titles(&trending(&jobs, 10)), vec!["today", "week", "untimed"]);
        assert_eq!(titles(&trending(&jobs, 1)), vec!["today"]);
    }

    #[test]
    fn test_trending_ties_keep_input_order() {
        let jobs = vec![
            scored("first", 0, Some(2)),
            scored("second", 0, Some(2)),
            scored("third", 0, None),
            scored("fourth", 0, None),
        ];
        assert_eq!(
            titles(&trending(&jobs, TRENDING_PREVIEW_LIMIT)),
            vec!["first", "second", "third", "fourth"]
        );
    }

    #[test]
    fn test_full_board_sorts_without_truncating() {
        let jobs: Vec<ScoredJob> = (0..30)
            .map(|i| scored(&format!("job{i}"), (i * 7) % 50, Some(i as i64)))
            .collect();
        let board = full_board(jobs);
        assert_eq!(board.len(), 30);
        assert!(board
            .windows(2)
            .all(|pair| pair[0].match_score >= pair[1].match_score));
    }

    #[test]
    fn test_full_board_ranks_preferred_company_first() {
        let jobs = vec![scored("Microsoft", 25, Some(0)), scored("Google", 91, Some(0))];
        assert_eq!(titles(&full_board(jobs)), vec!["Google", "Microsoft"]);
    }
}

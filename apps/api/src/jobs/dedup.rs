use std::collections::HashSet;

use crate::models::job::JobRecord;

/// Merges job lists into a unique set keyed by `(company, stable_key)`.
///
/// First occurrence wins, so callers pass the persisted store's jobs before
/// any CSV source. Output keeps first-insertion order.
pub fn dedupe_jobs(jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(jobs.len());
    jobs.into_iter()
        .filter(|job| seen.insert((job.company.clone(), job.stable_key().to_string())))
        .collect()
}

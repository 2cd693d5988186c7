//! Preference-based match scoring.
//!
//! Pure function of (jobs, preferences, favorites, now). Loading the inputs
//! is the pipeline's job; nothing here touches storage or the clock.
//!
//! Per job, starting from 0:
//! - company tier:  `tier_multiplier(tier) * 22`
//! - location tier: `tier_multiplier(tier) * 18`
//! - role tier:     `tier_multiplier(tier) * 20`, first canonical role match only
//! - job type:      `+15` when the type is accepted
//! - recency:       `max(0, 25 - days_old)`
//!
//! The sum is clamped to `0..=100`.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::jobs::roles::match_canonical_role;
use crate::models::favorite::FavoriteMark;
use crate::models::job::{JobRecord, ScoredJob};
use crate::models::preference::{Preferences, Tier};

pub const COMPANY_WEIGHT: i64 = 22;
pub const LOCATION_WEIGHT: i64 = 18;
pub const ROLE_WEIGHT: i64 = 20;
pub const JOB_TYPE_BONUS: i64 = 15;
pub const RECENCY_WINDOW_DAYS: i64 = 25;
pub const MAX_SCORE: i64 = 100;

/// 1 → +3, 2 → +2, 3 → +1, 4 → −2. "Not at all" is a penalty, not a weak reward.
pub fn tier_multiplier(tier: Tier) -> i64 {
    match tier.get() {
        1 => 3,
        2 => 2,
        3 => 1,
        4 => -2,
        _ => 0,
    }
}

/// Linear decay from 25 on the posting day to 0 after 25 days.
/// Future timestamps count as today; a missing timestamp earns nothing.
pub fn recency_boost(posted_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    let Some(posted_at) = posted_at else {
        return 0;
    };
    let days_old = (now - posted_at).num_days().max(0);
    (RECENCY_WINDOW_DAYS - days_old).max(0)
}

/// URL-escaped `job_id`, `url`, or internal id, in that order of preference.
pub fn job_identifier(job: &JobRecord) -> String {
    urlencoding::encode(job.stable_key()).into_owned()
}

pub fn company_slug(company: &str) -> String {
    company.to_lowercase().replace(' ', "-")
}

/// Short "Mon DD" label, e.g. "Oct 07".
pub fn posted_label(at: DateTime<Utc>) -> String {
    at.format("%b %d").to_string()
}

/// Scores one job. Missing preferences, timestamps or role text contribute
/// nothing; scoring never fails.
pub fn score_job(
    mut job: JobRecord,
    prefs: &Preferences,
    favorites: Option<&HashSet<FavoriteMark>>,
    now: DateTime<Utc>,
) -> ScoredJob {
    let identifier = job_identifier(&job);
    let company_slug = company_slug(&job.company);

    let is_favorited = favorites.map(|favorites| {
        favorites.contains(&FavoriteMark {
            company: job.company.clone(),
            identifier: identifier.clone(),
        })
    });

    let mut raw = 0_i64;

    if let Some(tier) = prefs.companies.get(&job.company) {
        raw += tier_multiplier(*tier) * COMPANY_WEIGHT;
    }

    if let Some(tier) = prefs.locations.get(&job.location) {
        raw += tier_multiplier(*tier) * LOCATION_WEIGHT;
    }

    let role_text = job
        .role
        .as_deref()
        .filter(|role| !role.is_empty())
        .unwrap_or(&job.title);
    if let Some(tier) = match_canonical_role(role_text).and_then(|role| prefs.roles.get(role)) {
        raw += tier_multiplier(*tier) * ROLE_WEIGHT;
    }

    if prefs.job_types.contains(&job.job_type) {
        raw += JOB_TYPE_BONUS;
    }

    let posted_at = job.posted_at();
    raw += recency_boost(posted_at, now);

    let match_score = raw.clamp(0, MAX_SCORE) as u32;

    if job.posted.is_none() {
        job.posted = posted_at.map(posted_label);
    }

    ScoredJob {
        job,
        identifier,
        company_slug,
        is_favorited,
        match_score,
    }
}

/// Scores every job, preserving input order.
pub fn score_jobs(
    jobs: Vec<JobRecord>,
    prefs: &Preferences,
    favorites: Option<&HashSet<FavoriteMark>>,
    now: DateTime<Utc>,
) -> Vec<ScoredJob> {
    jobs.into_iter()
        .map(|job| score_job(job, prefs, favorites, now))
        .collect()
}

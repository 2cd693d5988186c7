//! Job Normalizer: turns scraper CSV rows into canonical `JobRecord`s.
//!
//! Rows missing a title or url are filtered out silently. Timestamps that do
//! not parse are treated as absent. Nothing in here returns an error for bad
//! row content; only an unreadable file is reported.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::job::{JobRecord, JobType};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One row as written by the scrapers:
/// `title, location, department, job_id, url, scraped_at`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJobRow {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub scraped_at: String,
}

/// A CSV file and the company its rows belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSource {
    pub path: PathBuf,
    pub company: String,
}

impl CsvSource {
    /// Builds a source whose company label comes from the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let company = company_label_from_path(&path);
        Self { path, company }
    }
}

/// `meta_jobs.csv` → `Meta`. Anything without the `_jobs` suffix uses the
/// whole file stem.
pub fn company_label_from_path(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let name = stem.strip_suffix("_jobs").unwrap_or(stem);
    capitalize(name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

/// Parses a scraper timestamp as UTC. Returns `None` for anything else.
pub fn parse_scraped_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Case-insensitive keyword classification over title and department.
/// Internship wins over Contract.
pub fn classify_job_type(title: &str, department: &str) -> JobType {
    let title = title.to_lowercase();
    let department = department.to_lowercase();
    let mentions = |needle: &str| title.contains(needle) || department.contains(needle);

    if mentions("intern") {
        JobType::Internship
    } else if mentions("contract") {
        JobType::Contract
    } else {
        JobType::FullTime
    }
}

/// Tags from `department` split on `+`, then the leading location segment.
///
/// Each department part has the literal `more` removed and is trimmed; empty
/// parts and bare overflow counters (the `3` in `+ 3 more`) are dropped.
pub fn derive_tags(department: &str, location: &str) -> Vec<String> {
    let mut tags: Vec<String> = department
        .split('+')
        .map(|part| part.replace("more", "").trim().to_string())
        .filter(|part| !part.is_empty() && !part.chars().all(|c| c.is_ascii_digit()))
        .collect();

    let primary_location = location.split('+').next().unwrap_or("").trim();
    if !primary_location.is_empty() && !tags.iter().any(|t| t == primary_location) {
        tags.push(primary_location.to_string());
    }

    tags
}

/// Normalizes one row. Returns `None` when title or url is blank.
pub fn normalize_row(row: &RawJobRow, company: &str) -> Option<JobRecord> {
    let title = row.title.trim();
    let url = row.url.trim();
    if title.is_empty() || url.is_empty() {
        return None;
    }

    let company = match company.trim() {
        "" => "Unknown",
        c => c,
    };
    let job_id = match row.job_id.trim() {
        "" => None,
        id => Some(id.to_string()),
    };
    let scraped_at = parse_scraped_at(&row.scraped_at);

    Some(JobRecord {
        id: None,
        title: title.to_string(),
        company: company.to_string(),
        location: row.location.trim().to_string(),
        department: row.department.trim().to_string(),
        job_id,
        url: url.to_string(),
        role: None,
        scraped_at,
        posted_date: scraped_at,
        job_type: classify_job_type(title, &row.department),
        tags: derive_tags(&row.department, &row.location),
        posted: None,
    })
}

/// Reads and normalizes every row of one CSV file.
/// Rows that fail to deserialize are skipped like rows missing a title.
pub fn read_csv_source(source: &CsvSource) -> Result<Vec<JobRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(&source.path)?;

    let mut jobs = Vec::new();
    let mut dropped = 0usize;
    for result in reader.deserialize::<RawJobRow>() {
        match result.ok().and_then(|row| normalize_row(&row, &source.company)) {
            Some(job) => jobs.push(job),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(
            "Dropped {dropped} unusable rows from {}",
            source.path.display()
        );
    }
    Ok(jobs)
}

/// Loads all configured sources in order. Missing or unreadable files are
/// skipped with a warning.
pub fn load_csv_sources(sources: &[CsvSource]) -> Vec<JobRecord> {
    let mut all = Vec::new();
    for source in sources {
        if !source.path.exists() {
            warn!("Job source {} not found, skipping", source.path.display());
            continue;
        }
        match read_csv_source(source) {
            Ok(jobs) => {
                info!(
                    "Loaded {} {} jobs from {}",
                    jobs.len(),
                    source.company,
                    source.path.display()
                );
                all.extend(jobs);
            }
            Err(e) => warn!("Skipping job source {}: {e}", source.path.display()),
        }
    }
    all
}

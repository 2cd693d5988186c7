use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::jobs::normalize::CsvSource;
use crate::jobs::selection::{DEFAULT_MIN_SCORE, DEFAULT_RECOMMENDED_LIMIT};

const DEFAULT_CSV_SOURCES: &str =
    "meta_jobs.csv,microsoft_jobs.csv,amazon_jobs.csv,google_jobs.csv,apple_jobs.csv";

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values; only `DATABASE_URL` may be absent.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means the in-memory store is used.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub data_dir: PathBuf,
    /// Scraper CSV files in precedence order.
    pub csv_sources: Vec<CsvSource>,
    pub recommended_min_score: u32,
    pub recommended_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            csv_sources: parse_csv_sources(&data_dir, DEFAULT_CSV_SOURCES),
            data_dir,
            recommended_min_score: DEFAULT_MIN_SCORE,
            recommended_limit: DEFAULT_RECOMMENDED_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let data_dir = std::env::var("JOB_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let sources =
            std::env::var("JOB_CSV_SOURCES").unwrap_or_else(|_| DEFAULT_CSV_SOURCES.to_string());

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            port: parse_env("PORT", defaults.port).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            csv_sources: parse_csv_sources(&data_dir, &sources),
            data_dir,
            recommended_min_score: parse_env("RECOMMENDED_MIN_SCORE", defaults.recommended_min_score)
                .context("RECOMMENDED_MIN_SCORE must be a non-negative integer")?,
            recommended_limit: parse_env("RECOMMENDED_LIMIT", defaults.recommended_limit)
                .context("RECOMMENDED_LIMIT must be a non-negative integer")?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        Err(_) => Ok(default),
    }
}

/// Parses `file[=Company],file[=Company],...` relative to `data_dir`.
/// Entries without a label take their company from the file name.
pub fn parse_csv_sources(data_dir: &Path, list: &str) -> Vec<CsvSource> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((file, company)) if !company.trim().is_empty() => CsvSource {
                path: data_dir.join(file.trim()),
                company: company.trim().to_string(),
            },
            Some((file, _)) => CsvSource::from_path(data_dir.join(file.trim())),
            None => CsvSource::from_path(data_dir.join(entry)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources_follow_scraper_order() {
        let config = Config::default();
        let companies: Vec<&str> = config
            .csv_sources
            .iter()
            .map(|s| s.company.as_str())
            .collect();
        assert_eq!(companies, vec!["Meta", "Microsoft", "Amazon", "Google", "Apple"]);
        assert_eq!(config.csv_sources[0].path, PathBuf::from("data/meta_jobs.csv"));
    }

    #[test]
    fn test_explicit_company_label() {
        let sources = parse_csv_sources(Path::new("/srv"), " netflix.csv = Netflix ,, stripe_jobs.csv");
        assert_eq!(
            sources,
            vec![
                CsvSource {
                    path: PathBuf::from("/srv/netflix.csv"),
                    company: "Netflix".to_string(),
                },
                CsvSource {
                    path: PathBuf::from("/srv/stripe_jobs.csv"),
                    company: "Stripe".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_label_falls_back_to_file_name() {
        let sources = parse_csv_sources(Path::new("data"), "google_jobs.csv=");
        assert_eq!(sources[0].company, "Google");
    }
}

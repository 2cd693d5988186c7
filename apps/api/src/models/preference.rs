use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::job::JobType;

/// The tiered preference dimensions. Job type is a plain set and lives
/// outside this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Company,
    Location,
    Role,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Company, Dimension::Location, Dimension::Role];

    /// Value stored in the `preferences.dimension` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Company => "company",
            Dimension::Location => "location",
            Dimension::Role => "role",
        }
    }

    /// Maps the plural path segment used by the preference routes.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "companies" => Some(Dimension::Company),
            "locations" => Some(Dimension::Location),
            "roles" => Some(Dimension::Role),
            _ => None,
        }
    }
}

/// Preference rank for one dimension value: 1 = Target, 2 = Good,
/// 3 = Safety, 4 = Not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Tier(u8);

impl Tier {
    pub const TARGET: Tier = Tier(1);
    pub const GOOD: Tier = Tier(2);
    pub const SAFETY: Tier = Tier(3);
    pub const NOT_AT_ALL: Tier = Tier(4);

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Tier {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1..=4 => Ok(Tier(value as u8)),
            _ => Err(format!("tier must be between 1 and 4, got {value}")),
        }
    }
}

impl From<Tier> for i64 {
    fn from(tier: Tier) -> Self {
        tier.0 as i64
    }
}

/// One stored `{key, tier}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub key: String,
    pub tier: Tier,
}

/// A user's full preference profile, as read for a single scoring pass.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    pub companies: HashMap<String, Tier>,
    pub locations: HashMap<String, Tier>,
    pub roles: HashMap<String, Tier>,
    pub job_types: HashSet<JobType>,
}

impl Preferences {
    pub fn tiers_mut(&mut self, dimension: Dimension) -> &mut HashMap<String, Tier> {
        match dimension {
            Dimension::Company => &mut self.companies,
            Dimension::Location => &mut self.locations,
            Dimension::Role => &mut self.roles,
        }
    }

    #[cfg(test)]
    pub fn with_tier(mut self, dimension: Dimension, key: &str, tier: Tier) -> Self {
        self.tiers_mut(dimension).insert(key.to_string(), tier);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_accepts_one_through_four() {
        for value in 1..=4 {
            assert_eq!(Tier::try_from(value).unwrap().get() as i64, value);
        }
    }

    #[test]
    fn test_tier_rejects_out_of_range() {
        assert!(Tier::try_from(0).is_err());
        assert!(Tier::try_from(5).is_err());
        assert!(Tier::try_from(-1).is_err());
    }

    #[test]
    fn test_tier_deserialize_validates() {
        let ok: Result<PreferenceEntry, _> =
            serde_json::from_str(r#"{"key": "Google", "tier": 2}"#);
        assert_eq!(ok.unwrap().tier, Tier::GOOD);

        let bad: Result<PreferenceEntry, _> =
            serde_json::from_str(r#"{"key": "Google", "tier": 5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_dimension_path_segments() {
        assert_eq!(Dimension::from_path_segment("companies"), Some(Dimension::Company));
        assert_eq!(Dimension::from_path_segment("roles"), Some(Dimension::Role));
        assert_eq!(Dimension::from_path_segment("job_types"), None);
    }

    #[test]
    fn test_with_tier_targets_one_dimension() {
        let prefs = Preferences::default().with_tier(Dimension::Location, "Remote", Tier::TARGET);
        assert_eq!(prefs.locations.get("Remote"), Some(&Tier::TARGET));
        assert!(prefs.companies.is_empty());
    }
}

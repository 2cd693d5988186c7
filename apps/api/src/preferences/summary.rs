use std::collections::HashMap;

use serde::Serialize;

use crate::models::preference::{Preferences, Tier};

/// Dashboard counters. A preference counts as watched unless it is tier 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_live_jobs: usize,
    pub watched_companies: usize,
    pub tracked_locations: usize,
    pub tracked_roles: usize,
    pub accepted_job_types: usize,
}

fn count_tracked(tiers: &HashMap<String, Tier>) -> usize {
    tiers
        .values()
        .filter(|tier| **tier != Tier::NOT_AT_ALL)
        .count()
}

pub fn compute_dashboard_stats(total_live_jobs: usize, prefs: &Preferences) -> DashboardStats {
    DashboardStats {
        total_live_jobs,
        watched_companies: count_tracked(&prefs.companies),
        tracked_locations: count_tracked(&prefs.locations),
        tracked_roles: count_tracked(&prefs.roles),
        accepted_job_types: prefs.job_types.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;
    use crate::models::preference::Dimension;

    #[test]
    fn test_tier_four_is_not_counted() {
        let mut prefs = Preferences::default()
            .with_tier(Dimension::Company, "Google", Tier::TARGET)
            .with_tier(Dimension::Company, "Meta", Tier::SAFETY)
            .with_tier(Dimension::Company, "Initech", Tier::NOT_AT_ALL)
            .with_tier(Dimension::Location, "Remote", Tier::NOT_AT_ALL)
            .with_tier(Dimension::Role, "Data Engineer", Tier::GOOD);
        prefs.job_types.insert(JobType::FullTime);

        let stats = compute_dashboard_stats(42, &prefs);
        assert_eq!(
            stats,
            DashboardStats {
                total_live_jobs: 42,
                watched_companies: 2,
                tracked_locations: 0,
                tracked_roles: 1,
                accepted_job_types: 1,
            }
        );
    }

    #[test]
    fn test_empty_profile() {
        let stats = compute_dashboard_stats(0, &Preferences::default());
        assert_eq!(stats.watched_companies, 0);
        assert_eq!(stats.accepted_job_types, 0);
    }
}

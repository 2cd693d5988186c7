// User preference profiles: the save flows behind the preferences page and
// the counters shown on the dashboard.

pub mod handlers;
pub mod summary;

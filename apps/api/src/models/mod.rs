pub mod favorite;
pub mod job;
pub mod preference;

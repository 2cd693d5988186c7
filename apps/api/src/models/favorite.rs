use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's favorite, keyed by company and the job's escaped identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct FavoriteMark {
    pub company: String,
    pub identifier: String,
}

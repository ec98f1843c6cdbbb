use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Kind of pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolCategory {
    /// Ordered posts, like the pages of a comic.
    Series,
    /// Loosely related posts.
    Collection,
}

impl Display for PoolCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PoolCategory::Series => "series",
            PoolCategory::Collection => "collection",
        })
    }
}

/// A pool as returned by `pools.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    id: u64,
    name: String,
    created_at: DateTime<FixedOffset>,
    updated_at: DateTime<FixedOffset>,
    creator_id: u64,
    #[serde(default)]
    creator_name: String,
    #[serde(default)]
    description: String,
    is_active: bool,
    category: PoolCategory,
    #[serde(default)]
    post_ids: Vec<u64>,
    #[serde(default)]
    post_count: u64,
}

impl Pool {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name with spaces stored as underscores.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<FixedOffset> {
        self.updated_at
    }

    pub fn creator_id(&self) -> u64 {
        self.creator_id
    }

    pub fn creator_name(&self) -> &str {
        &self.creator_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn category(&self) -> PoolCategory {
        self.category
    }

    /// Post ids in pool order.
    pub fn post_ids(&self) -> &[u64] {
        &self.post_ids
    }

    pub fn post_count(&self) -> u64 {
        self.post_count
    }
}

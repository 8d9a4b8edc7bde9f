//! Offset pagination for list queries.

use serde::{Deserialize, Serialize};

/// Default page size when `first` is omitted.
const DEFAULT_PAGE_SIZE: u64 = 25;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// `skip`/`first` window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of rows to skip.
    #[serde(default)]
    pub skip: u64,
    /// Number of rows to return.
    #[serde(default = "default_first")]
    pub first: u64,
}

impl PageRequest {
    /// Create a new window; `first` is clamped to `1..=100`.
    pub fn new(skip: u64, first: u64) -> Self {
        Self {
            skip,
            first: first.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Build a window from optional, possibly negative GraphQL arguments.
    pub fn from_args(skip: Option<i32>, first: Option<i32>) -> Self {
        let skip = skip.map(|s| s.max(0) as u64).unwrap_or(0);
        let first = first.map(|f| f.max(1) as u64).unwrap_or(DEFAULT_PAGE_SIZE);
        Self::new(skip, first)
    }

    /// The SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.skip
    }

    /// The SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.first
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            first: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_first() -> u64 {
    DEFAULT_PAGE_SIZE
}

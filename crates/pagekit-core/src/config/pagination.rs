//! Pagination defaults applied by the request entry point.

use serde::{Deserialize, Serialize};

/// Page size used when a request carries no `size` parameter.
pub const DEFAULT_QUERY_PAGE_SIZE: u64 = 10;

/// Pagination entry-point configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the `size` query parameter is absent or empty.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_QUERY_PAGE_SIZE
}

//! The parsed pagination request.

use tracing::{debug, warn};

use crate::config::pagination::PaginationConfig;
use crate::error::AppError;
use crate::result::AppResult;
use crate::types::query::{QueryParams, QueryValue};
use crate::types::sorting::{Sort, SortParam, parse_sort};

/// Default page size for a directly constructed [`Pageable`].
///
/// The request entry point uses [`PaginationConfig::default_page_size`]
/// instead, which defaults to 10.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Where a [`Pageable`]'s sort comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortSource {
    /// An already-built sort, used as-is.
    Parsed(Sort),
    /// Raw query text, routed through the sort parser.
    Param(SortParam),
}

impl From<Sort> for SortSource {
    fn from(sort: Sort) -> Self {
        Self::Parsed(sort)
    }
}

impl From<SortParam> for SortSource {
    fn from(param: SortParam) -> Self {
        Self::Param(param)
    }
}

/// Pagination request: which slice of a result set to return, in which
/// order, and in which output shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    page: u64,
    size: u64,
    indexed: bool,
    sort: Option<Sort>,
}

impl Pageable {
    /// Create a request for `page` (0-based) holding `size` elements.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            indexed: false,
            sort: None,
        }
    }

    /// Build from already-validated numbers and an optional raw sort.
    pub fn from_parts(
        page: u64,
        size: u64,
        indexed: bool,
        sort: Option<SortSource>,
    ) -> AppResult<Self> {
        let sort = match sort {
            None => None,
            Some(SortSource::Parsed(sort)) => Some(sort),
            Some(SortSource::Param(raw)) => Some(parse_sort(&raw)?),
        };
        Ok(Self {
            page,
            size,
            indexed,
            sort,
        })
    }

    /// Build from request query parameters.
    ///
    /// Reads `page` (default 0), `size` (default from `config`), `sort`
    /// (single or repeated), and `indexed` (only the exact text `"true"`).
    /// A `sort` with no keys, such as `sort=` or `sort=,`, counts as absent.
    pub fn from_query(params: &QueryParams, config: &PaginationConfig) -> AppResult<Self> {
        let page = parse_number(params.get_str("page"), 0)?;
        let size = parse_number(params.get_str("size"), config.default_page_size)?;
        if size == 0 {
            warn!("Rejected zero page size");
            return Err(AppError::number_format("0"));
        }
        let indexed = params.get_str("indexed") == Some("true");
        let sort = params
            .get("sort")
            .map(|value| match value {
                QueryValue::Single(raw) => SortParam::Single(raw.clone()),
                QueryValue::Multi(raw) => SortParam::Multi(raw.clone()),
            })
            .map(|raw| parse_sort(&raw))
            .transpose()?
            .filter(|sort| !sort.is_empty())
            .map(SortSource::Parsed);

        let pageable = Self::from_parts(page, size, indexed, sort)?;
        debug!(
            page = pageable.page,
            size = pageable.size,
            indexed = pageable.indexed,
            sort_keys = pageable.sort.as_ref().map_or(0, Sort::len),
            "Parsed pagination request"
        );
        Ok(pageable)
    }

    /// Request the indexed (id/index map) output shape.
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Attach a sort.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Page index (0-based).
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Page size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether the indexed output shape was requested.
    pub fn indexed(&self) -> bool {
        self.indexed
    }

    /// Requested sort, if any.
    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// Number of elements to skip, e.g. for SQL `OFFSET`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Number of elements to take, e.g. for SQL `LIMIT`.
    pub fn limit(&self) -> u64 {
        self.size
    }
}

impl Default for Pageable {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

fn parse_number(raw: Option<&str>, default: u64) -> AppResult<u64> {
    match raw {
        None | Some("") => Ok(default),
        Some(text) => text.parse().map_err(|_| {
            warn!(input = %text, "Rejected non-numeric pagination parameter");
            AppError::number_format(text)
        }),
    }
}

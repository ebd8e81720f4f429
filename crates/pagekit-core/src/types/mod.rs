//! Pagination, sorting, and page container types.

pub mod page;
pub mod pagination;
pub mod query;
pub mod response;
pub mod sorting;

pub use page::{ArrayPage, HasIdentifier, IndexablePage, IndexedPage, Page, PageMeta, WirePage};
pub use pagination::{DEFAULT_PAGE_SIZE, Pageable, SortSource};
pub use query::{QueryParams, QueryValue};
pub use response::ApiErrorResponse;
pub use sorting::{Direction, Order, Sort, SortParam, parse_sort};

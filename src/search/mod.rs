pub mod compiler;
pub mod pipeline;
pub mod types;

pub use pipeline::{execute_search, execute_search_with, list_countries, lookup_companies};
pub use types::{PaginationInfo, SearchCriteria, SearchResponse, SearchSummary};

//! Paginated collections
//!
//! Per-resource cursor/page state machines for orders, users and products.

mod fetcher;
mod resource;
mod state;

pub use fetcher::CollectionFetcher;
pub use resource::Paginated;
pub use state::{derive_counts, CollectionState, PaginationCursor, UNKNOWN_LABEL};

//! Reverse cache for rendered HTML pages.
//!
//! [`PageCache`] holds response bodies keyed by full request URI, [`reverse_cache`] is the
//! middleware that fills it for GET requests. Mutating handlers call
//! [`PageCache::invalidate`] once their write succeeded.

mod diag;
mod middleware;
mod pages;

pub use diag::Diag;
pub use middleware::{CacheState, request_key, reverse_cache};
pub use pages::{InvalidationEvent, PageCache};

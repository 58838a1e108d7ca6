use dashmap::DashMap;

/// What kind of write happened, selecting which cached pages get dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationEvent {
    /// A post was created, updated or deleted
    PostsUpdated,
    /// Any tag this cache does not know how to handle
    Unrecognized(String),
}

impl InvalidationEvent {
    const POSTS_UPDATED_TAG: &'static str = "post";

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            Self::POSTS_UPDATED_TAG => Self::PostsUpdated,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::PostsUpdated => Self::POSTS_UPDATED_TAG,
            Self::Unrecognized(tag) => tag,
        }
    }
}

impl From<&str> for InvalidationEvent {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

/// Rendered HTML keyed by full request URI.
///
/// Entries never expire on their own. Every write that can change a rendered page must
/// call [`PageCache::invalidate`] after it completed.
#[derive(Default)]
pub struct PageCache {
    pages: DashMap<String, String>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.pages.get(key).map(|entry| entry.value().clone())
    }

    /// Inserts or overwrites the page stored under `key`
    pub fn set(&self, key: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(key.into(), html.into());
    }

    pub fn invalidate(&self, event: &InvalidationEvent) {
        match event {
            InvalidationEvent::PostsUpdated => self.invalidate_for_posts(),
            InvalidationEvent::Unrecognized(tag) => {
                tracing::warn!(event = %tag, "invalid cache event");
            }
        }
    }

    /// Drops the home page and every page under /posts, listings included.
    ///
    /// Listing pages aggregate over all posts, so any post write sweeps all of them.
    /// Matching is a plain substring test on the key.
    fn invalidate_for_posts(&self) {
        // retain locks one shard at a time, concurrent readers of other shards proceed
        self.pages.retain(|key, _| {
            let stale = key.contains("/home") || key.contains("/posts");
            if stale {
                tracing::info!(key = %key, "invalidated cached page");
            }
            !stale
        });
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

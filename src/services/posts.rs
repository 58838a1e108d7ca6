use std::sync::Arc;

use moka::future::Cache;
use tokio::sync::Mutex;

use crate::{
    db::{PostStore, StoreError},
    domain::{PageQuery, Post, PostDraft, PostId, PostPage},
};

/// Cache-aside wrapper around a [`PostStore`].
///
/// Only single-post reads go through the lookup table. Listings always hit the store,
/// their rendered pages are covered by the page cache instead.
///
/// Every update or delete bumps a write generation. A read only fills the table when no
/// write finished while it was loading, so a load that saw the store before a write can
/// never put the old record back after that write returned.
pub struct PostCache {
    store: Arc<dyn PostStore>,
    by_id: Cache<PostId, Post>,
    /// changes to the table decided under this lock
    generation: Mutex<u64>,
    /// one update or delete at a time, store and table together
    writes: Mutex<()>,
}

impl PostCache {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            by_id: Cache::builder().build(),
            generation: Mutex::new(0),
            writes: Mutex::new(()),
        }
    }

    /// Read-through lookup. Misses and failures of the store are not remembered.
    #[tracing::instrument(name = "services::find_post", skip(self))]
    pub async fn find_by_id(&self, id: PostId) -> Result<Post, StoreError> {
        if let Some(post) = self.by_id.get(&id).await {
            return Ok(post);
        }

        let seen = *self.generation.lock().await;
        let post = self.store.find_by_id(id).await?;

        let generation = self.generation.lock().await;
        if *generation == seen {
            self.by_id.insert(id, post.clone()).await;
        } else {
            tracing::debug!(id, "post written during load, not caching");
        }

        Ok(post)
    }

    pub async fn find_paginated(&self, query: &PageQuery) -> Result<PostPage, StoreError> {
        self.store.find_paginated(query).await
    }

    #[tracing::instrument(name = "services::create_post", skip(self, draft))]
    pub async fn create(&self, draft: &PostDraft) -> Result<PostId, StoreError> {
        let id = self.store.create(draft).await?;
        tracing::info!(id, "post created");
        Ok(id)
    }

    /// Updates the store first, then replaces the cached record with the stored one
    #[tracing::instrument(name = "services::update_post", skip(self, draft))]
    pub async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, StoreError> {
        let _write = self.writes.lock().await;
        let post = self.store.update(id, draft).await?;

        let mut generation = self.generation.lock().await;
        *generation += 1;
        self.by_id.insert(id, post.clone()).await;

        Ok(post)
    }

    #[tracing::instrument(name = "services::delete_post", skip(self))]
    pub async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        let _write = self.writes.lock().await;
        self.store.delete(id).await?;

        let mut generation = self.generation.lock().await;
        *generation += 1;
        self.by_id.invalidate(&id).await;

        Ok(())
    }

    /// whether the lookup table currently holds `id`
    pub fn is_cached(&self, id: PostId) -> bool {
        self.by_id.contains_key(&id)
    }
}

use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use anyhow::anyhow;
use async_trait::async_trait;
use blog_pages::{
    db::{PostStore, StoreError},
    domain::{PageQuery, Post, PostDraft, PostId, PostPage},
};
use time::OffsetDateTime;

/// In-memory store that counts reads and can be switched into failing
#[derive(Default)]
pub struct MemoryPostStore {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    read_delay: Mutex<Duration>,
    pub find_by_id_calls: AtomicUsize,
    pub paginated_calls: AtomicUsize,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a post with a fixed creation date
    pub fn insert_at(&self, title: &str, content: &str, created_at: OffsetDateTime) -> PostId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.posts.lock().unwrap().push(Post {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at,
            updated_at: created_at,
        });
        id
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// `find_by_id` waits this long after reading before it returns
    pub fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock().unwrap() = delay;
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn paginated_calls(&self) -> usize {
        self.paginated_calls.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Other(anyhow!("store is unavailable")));
        }
        Ok(())
    }
}

fn matches(post: &Post, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    post.title.to_lowercase().contains(&keyword) || post.content.to_lowercase().contains(&keyword)
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, draft: &PostDraft) -> Result<PostId, StoreError> {
        self.check()?;
        Ok(self.insert_at(draft.title(), draft.content(), OffsetDateTime::now_utc()))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Post, StoreError> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let found = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id));

        let delay = *self.read_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        found
    }

    async fn find_paginated(&self, query: &PageQuery) -> Result<PostPage, StoreError> {
        self.paginated_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut found: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !query.has_keyword() || matches(p, &query.keyword))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = found.len() as u64;
        let posts = found
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();

        Ok(PostPage { posts, total })
    }

    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, StoreError> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        post.title = draft.title().to_string();
        post.content = draft.content().to_string();
        post.updated_at = OffsetDateTime::now_utc();
        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        self.check()?;
        self.posts.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{PageQuery, Post, PostDraft, PostId, PostPage};

mod postgres;

pub use postgres::{PgPostStore, connect_to_db};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post {0} does not exist")]
    NotFound(PostId),
    #[error("database error {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persistence for posts
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Stores a new post and returns its id
    async fn create(&self, draft: &PostDraft) -> Result<PostId, StoreError>;

    /// # Errors
    /// [`StoreError::NotFound`] if no post has the given id
    async fn find_by_id(&self, id: PostId) -> Result<Post, StoreError>;

    /// Newest posts first. A non-empty keyword matches title or content, ignoring case.
    async fn find_paginated(&self, query: &PageQuery) -> Result<PostPage, StoreError>;

    /// Replaces title and content, returning the stored record
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if no post has the given id
    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, StoreError>;

    /// Deleting a post that does not exist is not an error
    async fn delete(&self, id: PostId) -> Result<(), StoreError>;
}

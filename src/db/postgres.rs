use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{PostStore, StoreError},
    domain::{PageQuery, Post, PostDraft, PostId, PostPage},
};

pub async fn connect_to_db(database_url: &str) -> Result<PgPool> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    // Run SQL migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("SQL migrations failed")?;

    Ok(pool)
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turns a keyword into an ILIKE pattern matching it literally anywhere in the text
fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl PostStore for PgPostStore {
    #[tracing::instrument(name = "db::create_post", skip(self, draft))]
    async fn create(&self, draft: &PostDraft) -> Result<PostId, StoreError> {
        let id: PostId = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(draft.title())
        .bind(draft.content())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(name = "db::find_post_by_id", skip(self))]
    async fn find_by_id(&self, id: PostId) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    #[tracing::instrument(name = "db::find_posts_paginated", skip(self))]
    async fn find_paginated(&self, query: &PageQuery) -> Result<PostPage, StoreError> {
        let pattern = contains_pattern(&query.keyword);
        let has_keyword = query.has_keyword();

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM posts
            WHERE NOT $1 OR title ILIKE $2 OR content ILIKE $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            OFFSET $4
            "#,
        )
        .bind(has_keyword)
        .bind(&pattern)
        .bind(i64::from(query.limit))
        .bind(query.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts
            WHERE NOT $1 OR title ILIKE $2 OR content ILIKE $2
            "#,
        )
        .bind(has_keyword)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(PostPage {
            posts,
            total: total.max(0) as u64,
        })
    }

    #[tracing::instrument(name = "db::update_post", skip(self, draft))]
    async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, StoreError> {
        let updated = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $1, content = $2, updated_at = now()
            WHERE id = $3
            RETURNING id, title, content, created_at, updated_at
            "#,
        )
        .bind(draft.title())
        .bind(draft.content())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(post) => {
                tracing::info!(id, "post updated");
                Ok(post)
            }
            None => {
                tracing::warn!(id, "no post found to update");
                Err(StoreError::NotFound(id))
            }
        }
    }

    #[tracing::instrument(name = "db::delete_post", skip(self))]
    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

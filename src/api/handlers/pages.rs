use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::{
    api::ApiError,
    app::AppState,
    domain::{PageQuery, PostId},
    views::{
        self, CreateTemplate, EditTemplate, HomeTemplate, ListTemplate, Listing,
        ModerationTemplate, PostTemplate, SearchTemplate,
    },
};

/// `?page=&limit=&keyword=`, every part optional
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub keyword: Option<String>,
}

impl ListParams {
    fn page_query(&self, default_limit: u32) -> PageQuery {
        PageQuery::normalized(self.page, self.limit, self.keyword.as_deref(), default_limit)
    }
}

pub async fn home(State(app): State<AppState>) -> Result<Html<String>, ApiError> {
    let query = PageQuery::first_page(app.posts_per_page);
    let page = app.posts.find_paginated(&query).await?;

    views::render(&HomeTemplate::new(&page.posts))
}

pub async fn list_posts(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, ApiError> {
    let query = params.page_query(app.posts_per_page);
    let page = app.posts.find_paginated(&query).await?;

    views::render(&ListTemplate {
        listing: Listing::cards(&page, &query),
    })
}

pub async fn search_page(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, ApiError> {
    let query = params.page_query(app.posts_per_page);
    let page = app.posts.find_paginated(&query).await?;

    views::render(&SearchTemplate {
        listing: Listing::cards(&page, &query),
    })
}

pub async fn create_page() -> Result<Html<String>, ApiError> {
    views::render(&CreateTemplate)
}

pub async fn moderation_page(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, ApiError> {
    let query = params.page_query(app.posts_per_page);
    let page = app.posts.find_paginated(&query).await?;

    views::render(&ModerationTemplate {
        listing: Listing::moderation(&page, &query),
    })
}

pub async fn show_post(
    State(app): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<Html<String>, ApiError> {
    let post = app.posts.find_by_id(id).await?;
    views::render(&PostTemplate::new(&post))
}

pub async fn edit_page(
    State(app): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<Html<String>, ApiError> {
    let post = app.posts.find_by_id(id).await?;
    views::render(&EditTemplate::new(&post))
}

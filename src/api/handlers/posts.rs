use axum::{
    extract::{Form, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::ApiError,
    app::AppState,
    cache::InvalidationEvent,
    domain::{PostDraft, PostId},
};

/// Missing fields deserialize as empty so they fail validation instead of extraction
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl PostForm {
    fn draft(&self) -> Result<PostDraft, ApiError> {
        PostDraft::parse(&self.title, &self.content).map_err(ApiError::from)
    }
}

pub async fn create_post(
    State(app): State<AppState>,
    Form(form): Form<PostForm>,
) -> Result<Response, ApiError> {
    let draft = form.draft()?;
    let id = app.posts.create(&draft).await?;

    app.pages.invalidate(&InvalidationEvent::PostsUpdated);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/posts/{id}"))],
        "Post created",
    )
        .into_response())
}

pub async fn update_post(
    State(app): State<AppState>,
    Path(id): Path<PostId>,
    Form(form): Form<PostForm>,
) -> Result<Response, ApiError> {
    let draft = form.draft()?;
    app.posts.update(id, &draft).await?;

    app.pages.invalidate(&InvalidationEvent::PostsUpdated);

    Ok((StatusCode::OK, "Post updated").into_response())
}

pub async fn delete_post(
    State(app): State<AppState>,
    Path(id): Path<PostId>,
) -> Result<StatusCode, ApiError> {
    app.posts.delete(id).await?;

    app.pages.invalidate(&InvalidationEvent::PostsUpdated);

    Ok(StatusCode::NO_CONTENT)
}

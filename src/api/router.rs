use axum::{
    Router, middleware,
    response::Redirect,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{api::handlers, app::AppState, cache::reverse_cache};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/home") }))
        .route("/home", get(handlers::home))
        .route("/posts", get(handlers::list_posts).post(handlers::create_post))
        .route("/posts/search", get(handlers::search_page))
        .route("/posts/create", get(handlers::create_page))
        .route("/posts/edit", get(handlers::moderation_page))
        .route(
            "/posts/{id}",
            get(handlers::show_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/posts/{id}/edit", get(handlers::edit_page))
        .layer(middleware::from_fn_with_state(
            state.cache_state(),
            reverse_cache,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

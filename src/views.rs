//! HTML pages rendered with askama.
//!
//! Templates live in `templates/`. Everything they print is prepared here, the templates
//! only lay it out.

use askama::Template;
use axum::response::Html;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    api::ApiError,
    domain::{PageQuery, Post, PostId, PostPage, total_pages},
};

const CARD_TITLE_MAX: usize = 25;
const CARD_CONTENT_MAX: usize = 32;
const HOME_CONTENT_MAX: usize = 150;
const MODERATION_TITLE_MAX: usize = 45;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day], [year]");
const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:long] [day padding:none], [year] at [hour repr:12 padding:none]:[minute] [period]"
);

/// Shortens text for previews.
///
/// Text shorter than `max` characters is kept. Longer text with more than six words is cut
/// to its first six words when those fit, otherwise to its first `max` characters.
pub fn truncate_content(content: &str, max: usize) -> String {
    if content.chars().count() < max {
        return content.to_string();
    }

    let words: Vec<&str> = content.split_whitespace().collect();
    if words.len() > 6 {
        let first_words = words[..6].join(" ");
        if first_words.chars().count() < max {
            return first_words + "...";
        }
    }

    content.chars().take(max).collect::<String>() + "..."
}

/// `Jan 02, 2006`
pub fn format_date(date: OffsetDateTime) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// `January 2, 2006 at 3:04 PM`
pub fn format_date_time(date: OffsetDateTime) -> String {
    date.format(DATE_TIME_FORMAT).unwrap_or_default()
}

pub fn render<T: Template>(template: &T) -> Result<Html<String>, ApiError> {
    template.render().map(Html).map_err(ApiError::from)
}

/// A post as shown in listings
pub struct PostCard {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub date: String,
}

impl PostCard {
    fn new(post: &Post, title_max: usize, content_max: usize) -> Self {
        Self {
            id: post.id,
            title: truncate_content(&post.title, title_max),
            content: truncate_content(&post.content, content_max),
            date: format_date(post.created_at),
        }
    }
}

/// One page of posts with its pagination controls
pub struct Listing {
    pub posts: Vec<PostCard>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_posts: u64,
    pub prev_page: u64,
    pub next_page: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub limit: u32,
    pub keyword: String,
}

impl Listing {
    fn new(page: &PostPage, query: &PageQuery, title_max: usize, content_max: usize) -> Self {
        let current_page = u64::from(query.page);
        let total_pages = total_pages(page.total, query.limit);

        Self {
            posts: page
                .posts
                .iter()
                .map(|post| PostCard::new(post, title_max, content_max))
                .collect(),
            current_page,
            total_pages,
            total_posts: page.total,
            prev_page: current_page.saturating_sub(1),
            next_page: current_page + 1,
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
            limit: query.limit,
            keyword: query.keyword.clone(),
        }
    }

    pub fn cards(page: &PostPage, query: &PageQuery) -> Self {
        Self::new(page, query, CARD_TITLE_MAX, CARD_CONTENT_MAX)
    }

    pub fn moderation(page: &PostPage, query: &PageQuery) -> Self {
        Self::new(page, query, MODERATION_TITLE_MAX, CARD_CONTENT_MAX)
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub posts: Vec<PostCard>,
}

impl HomeTemplate {
    pub fn new(posts: &[Post]) -> Self {
        Self {
            posts: posts
                .iter()
                .map(|post| PostCard::new(post, usize::MAX, HOME_CONTENT_MAX))
                .collect(),
        }
    }
}

/// htmx fragment swapped into `#posts-content`
#[derive(Template)]
#[template(path = "posts_list.html")]
pub struct ListTemplate {
    pub listing: Listing,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub listing: Listing,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub title: String,
    pub content: String,
    pub created: String,
    pub updated: Option<String>,
}

impl PostTemplate {
    pub fn new(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            created: format_date_time(post.created_at),
            updated: post
                .was_updated()
                .then(|| format_date_time(post.updated_at)),
        }
    }
}

#[derive(Template)]
#[template(path = "create.html")]
pub struct CreateTemplate;

#[derive(Template)]
#[template(path = "moderation.html")]
pub struct ModerationTemplate {
    pub listing: Listing,
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created: String,
    pub updated: String,
}

impl EditTemplate {
    pub fn new(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            created: format_date_time(post.created_at),
            updated: format_date_time(post.updated_at),
        }
    }
}

mod pagination;
mod post;

pub use pagination::{DEFAULT_POSTS_PER_PAGE, MAX_PAGE_LIMIT, PageQuery, PostPage, total_pages};
pub use post::{Post, PostDraft, PostDraftError, PostId};

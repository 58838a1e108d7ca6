mod pages;
mod posts;

pub(crate) use pages::{
    create_page, edit_page, home, list_posts, moderation_page, search_page, show_post,
};
pub(crate) use posts::{create_post, delete_post, update_post};

pub use pages::ListParams;
pub use posts::PostForm;

use thiserror::Error;
use time::OffsetDateTime;

pub type PostId = i64;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Post {
    /// true once the post was edited after creation
    pub fn was_updated(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Validated title and content of a post that is about to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PostDraftError {
    #[error("title is required")]
    MissingTitle,
    #[error("content is required")]
    MissingContent,
}

impl PostDraft {
    pub fn parse(title: &str, content: &str) -> Result<Self, PostDraftError> {
        if title.trim().is_empty() {
            return Err(PostDraftError::MissingTitle);
        }
        if content.trim().is_empty() {
            return Err(PostDraftError::MissingContent);
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepted_drafts() {
        let drafts = [
            ("Hello", "World"),
            ("  padded title  ", "content"),
            ("t", "multi\nline\ncontent"),
        ];
        for (title, content) in drafts {
            let result = PostDraft::parse(title, content);
            assert!(
                result.is_ok(),
                "({title:?}, {content:?}) should be accepted, instead: {result:?}"
            );
        }
    }

    #[test]
    fn rejected_drafts() {
        let drafts = [
            ("", "content", PostDraftError::MissingTitle),
            ("   ", "content", PostDraftError::MissingTitle),
            ("title", "", PostDraftError::MissingContent),
            ("title", "\n\t ", PostDraftError::MissingContent),
            ("", "", PostDraftError::MissingTitle),
        ];
        for (title, content, expected) in drafts {
            assert_eq!(
                PostDraft::parse(title, content),
                Err(expected),
                "({title:?}, {content:?}) should be rejected"
            );
        }
    }

    #[test]
    fn draft_keeps_input_verbatim() {
        let draft = PostDraft::parse(" Title ", "Body ").expect("valid draft");
        assert_eq!(draft.title(), " Title ");
        assert_eq!(draft.content(), "Body ");
    }
}

use crate::domain::Post;

pub const DEFAULT_POSTS_PER_PAGE: u32 = 12;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A page of a (possibly keyword filtered) listing, 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub keyword: String,
}

impl PageQuery {
    /// Clamps raw query parameters into a usable query.
    ///
    /// A missing or non-positive page falls back to the first page, a missing or
    /// non-positive limit to `default_limit`. Limits are capped at [`MAX_PAGE_LIMIT`].
    pub fn normalized(
        page: Option<i64>,
        limit: Option<i64>,
        keyword: Option<&str>,
        default_limit: u32,
    ) -> Self {
        let page = page
            .filter(|p| *p >= 1)
            .map_or(1, |p| p.min(u32::MAX as i64) as u32);
        let limit = limit
            .filter(|l| *l >= 1)
            .map_or(default_limit.max(1), |l| l.min(u32::MAX as i64) as u32)
            .min(MAX_PAGE_LIMIT);

        Self {
            page,
            limit,
            keyword: keyword.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    pub fn first_page(limit: u32) -> Self {
        Self::normalized(None, Some(limit as i64), None, limit)
    }

    /// number of records to skip: `(page - 1) * limit`
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn has_keyword(&self) -> bool {
        !self.keyword.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostPage {
    pub posts: Vec<Post>,
    /// number of records matching the query across all pages
    pub total: u64,
}

/// Number of pages needed to show `total` records, never less than one
pub fn total_pages(total: u64, limit: u32) -> u64 {
    let limit = u64::from(limit.max(1));
    total.div_ceil(limit).max(1)
}

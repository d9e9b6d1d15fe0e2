/// Feed ordering
///
/// Posts are ranked by like count (most liked first), then by creation time
/// (oldest first). The sort is stable, so posts equal on both keys keep the
/// order the store returned them in.
use crate::models::Post;
use serde::Deserialize;
use std::cmp::Ordering;

pub const MAX_PAGE_SIZE: usize = 100;

/// Optional paging applied after ranking
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FeedPage {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl FeedPage {
    /// Limit clamped to `1..=MAX_PAGE_SIZE`; `None` means every post
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE))
    }

    pub fn effective_offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

fn feed_order(a: &Post, b: &Post) -> Ordering {
    b.like_count()
        .cmp(&a.like_count())
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// Sort posts into feed order and cut out the requested page
pub fn rank_posts(mut posts: Vec<Post>, page: FeedPage) -> Vec<Post> {
    posts.sort_by(feed_order);

    let ranked = posts.into_iter().skip(page.effective_offset());
    match page.effective_limit() {
        Some(limit) => ranked.take(limit).collect(),
        None => ranked.collect(),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::PostId;

/// One post as it appears in the listing. Display fields are passed through
/// to the card untouched; only `post_id` carries meaning for the listing
/// itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub post_id: PostId,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// One page of the listing, as served by the content API. The slice and the
/// page count always come from the same response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,
    pub total_pages: u32,
}

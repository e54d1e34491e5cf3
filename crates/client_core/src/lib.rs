use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use shared::{error::ApiError, protocol::PostPage};

/// Query parameters for the posts listing endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
struct ListPostsQuery {
    page: u32,
    page_size: u32,
}

/// HTTP client for the remote content API that serves the blog listing.
///
/// The client is deliberately thin: one request per call, no caching, no
/// retry. Callers decide what a failed page means for them.
pub struct ContentClient {
    http: Client,
    base_url: String,
}

impl ContentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of the post listing.
    ///
    /// `page` is 1-based; the server picks the slice and reports the total
    /// page count alongside it. Any failure (transport, HTTP status, payload
    /// decode) surfaces as an error with the request context attached; a
    /// structured [`ApiError`] body, when the server provides one, is kept
    /// as the root cause.
    pub async fn fetch_posts(&self, page: u32, page_size: u32) -> Result<PostPage> {
        let response = self
            .http
            .get(format!("{}/posts", self.base_url))
            .query(&ListPostsQuery { page, page_size })
            .send()
            .await
            .with_context(|| format!("posts request for page {page} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return Err(anyhow::Error::new(api_error)
                    .context(format!("content api rejected posts request for page {page}")));
            }
            anyhow::bail!("content api returned {status} for posts page {page}");
        }

        let listing: PostPage = response
            .json()
            .await
            .with_context(|| format!("invalid posts payload for page {page}"))?;

        tracing::debug!(
            page,
            posts = listing.posts.len(),
            total_pages = listing.total_pages,
            "fetched post listing page"
        );
        Ok(listing)
    }
}

fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests;

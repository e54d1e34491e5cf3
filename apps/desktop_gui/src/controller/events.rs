//! Events flowing from the backend worker to the UI thread.

use shared::protocol::PostSummary;

pub enum UiEvent {
    /// A fetch cycle settled with a page of posts.
    PageLoaded {
        page: u32,
        posts: Vec<PostSummary>,
        total_pages: u32,
    },
    /// A fetch cycle settled with a fault. The concrete fault was already
    /// logged worker-side; the UI shows one fixed message for all of them.
    PageLoadFailed { page: u32 },
    /// The worker itself is unusable; queued fetches will never settle.
    WorkerFailed { detail: String },
}

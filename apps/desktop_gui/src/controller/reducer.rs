//! Listing state machine for the paginated post feed.
//!
//! One fetch cycle runs from [`ListingState::begin_fetch`] to a settled
//! `finish_fetch_*` call. Responses are applied in arrival order and each
//! one overwrites the phase unconditionally, so overlapping cycles resolve
//! last-writer-wins rather than by suppressing stale responses.

use shared::protocol::PostSummary;

/// Number of posts requested per listing page.
pub const PAGE_SIZE: u32 = 9;

/// The one user-facing message shown for any fetch fault.
pub const LOAD_FAILURE_MESSAGE: &str =
    "We couldn't load the posts. Please try again in a moment.";

#[derive(Debug, Clone, PartialEq)]
pub enum ListingPhase {
    /// A fetch cycle is in flight; nothing to show yet.
    Loading,
    /// The last fetch cycle settled with a fault.
    Failed { message: String },
    /// The last fetch cycle settled successfully. `posts` and `total_pages`
    /// always come from the same response.
    Ready {
        posts: Vec<PostSummary>,
        total_pages: u32,
    },
}

#[derive(Debug, Clone)]
pub struct ListingState {
    current_page: u32,
    phase: ListingPhase,
}

impl ListingState {
    /// A fresh listing starts out loading page 1.
    pub fn new() -> Self {
        Self {
            current_page: 1,
            phase: ListingPhase::Loading,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn phase(&self) -> &ListingPhase {
        &self.phase
    }

    /// Starts a fetch cycle for `page`: any previous items or error are
    /// cleared synchronously, before the request is even dispatched.
    ///
    /// `page` is taken as-is; range enforcement against the page count
    /// belongs to the pager that produced it.
    pub fn begin_fetch(&mut self, page: u32) {
        debug_assert!(page >= 1, "listing pages are 1-based");
        self.current_page = page;
        self.phase = ListingPhase::Loading;
    }

    /// Settles the cycle with a page of posts. Items and page count are
    /// installed together; a later response overwrites an earlier one.
    pub fn finish_fetch_ok(&mut self, posts: Vec<PostSummary>, total_pages: u32) {
        self.phase = ListingPhase::Ready { posts, total_pages };
    }

    /// Settles the cycle with a fault. Every fault kind collapses into the
    /// same stored message.
    pub fn finish_fetch_err(&mut self) {
        self.phase = ListingPhase::Failed {
            message: LOAD_FAILURE_MESSAGE.to_string(),
        };
    }

    /// The pager is shown only for a successfully loaded multi-page listing.
    pub fn pager_visible(&self) -> bool {
        matches!(&self.phase, ListingPhase::Ready { total_pages, .. } if *total_pages > 1)
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::PostId;

    fn post(id: i64, title: &str) -> PostSummary {
        PostSummary {
            post_id: PostId(id),
            title: title.to_string(),
            summary: format!("{title}, at length"),
            author: Some("m. wren".to_string()),
            published_at: "2024-03-05T09:30:00Z".parse().expect("timestamp"),
        }
    }

    fn posts(ids: std::ops::Range<i64>) -> Vec<PostSummary> {
        ids.map(|id| post(id, "entry")).collect()
    }

    #[test]
    fn begin_fetch_enters_loading_synchronously_for_any_page() {
        let mut listing = ListingState::new();
        listing.finish_fetch_ok(posts(1..4), 4);

        for page in [1_u32, 2, 7, 4096] {
            listing.begin_fetch(page);
            assert_eq!(listing.current_page(), page);
            assert_eq!(*listing.phase(), ListingPhase::Loading);
            assert!(!listing.pager_visible());
        }
    }

    #[test]
    fn successful_cycle_installs_items_and_page_count_together() {
        let mut listing = ListingState::new();
        listing.finish_fetch_ok(posts(1..3), 5);

        match listing.phase() {
            ListingPhase::Ready { posts, total_pages } => {
                assert_eq!(posts.len(), 2);
                assert_eq!(*total_pages, 5);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn failed_cycle_stores_the_fixed_message_and_no_items() {
        let mut listing = ListingState::new();
        listing.begin_fetch(3);
        listing.finish_fetch_err();

        assert_eq!(
            *listing.phase(),
            ListingPhase::Failed {
                message: LOAD_FAILURE_MESSAGE.to_string(),
            }
        );
        assert_eq!(listing.current_page(), 3);
        assert!(!listing.pager_visible());
    }

    #[test]
    fn repeating_a_page_after_completion_yields_the_same_state() {
        let mut first = ListingState::new();
        first.begin_fetch(2);
        first.finish_fetch_ok(posts(10..15), 3);

        let mut second = first.clone();
        second.begin_fetch(2);
        second.finish_fetch_ok(posts(10..15), 3);

        assert_eq!(first.current_page(), second.current_page());
        assert_eq!(*first.phase(), *second.phase());
    }

    #[test]
    fn later_response_overwrites_an_earlier_one() {
        let mut listing = ListingState::new();
        listing.begin_fetch(2);
        // Two in-flight cycles settle back to back; the second write wins
        // regardless of which request was issued first.
        listing.finish_fetch_ok(posts(1..10), 3);
        listing.finish_fetch_ok(posts(10..15), 3);

        match listing.phase() {
            ListingPhase::Ready { posts, .. } => {
                assert_eq!(posts.len(), 5);
                assert_eq!(posts[0].post_id, PostId(10));
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn pager_shows_only_for_multi_page_ready_listings() {
        let mut listing = ListingState::new();
        assert!(!listing.pager_visible());

        listing.finish_fetch_ok(posts(1..2), 1);
        assert!(!listing.pager_visible());

        listing.finish_fetch_ok(posts(1..2), 2);
        assert!(listing.pager_visible());

        listing.finish_fetch_ok(Vec::new(), 0);
        assert!(!listing.pager_visible());

        listing.finish_fetch_err();
        assert!(!listing.pager_visible());
    }

    #[test]
    fn page_two_of_three_with_five_posts_shows_five_cards_and_the_pager() {
        let mut listing = ListingState::new();
        listing.begin_fetch(2);
        listing.finish_fetch_ok(posts(19..24), 3);

        assert_eq!(listing.current_page(), 2);
        assert!(listing.pager_visible());
        match listing.phase() {
            ListingPhase::Ready { posts, total_pages } => {
                assert_eq!(posts.len(), 5);
                assert_eq!(*total_pages, 3);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn rejected_source_yields_the_error_view_with_no_pager() {
        let mut listing = ListingState::new();
        listing.begin_fetch(1);
        listing.finish_fetch_err();

        let ListingPhase::Failed { message } = listing.phase() else {
            panic!("expected Failed, got {:?}", listing.phase());
        };
        assert_eq!(message, LOAD_FAILURE_MESSAGE);
        assert!(!listing.pager_visible());
    }
}

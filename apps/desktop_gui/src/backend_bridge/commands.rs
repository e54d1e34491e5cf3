//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    /// Fetch one page of the post listing.
    LoadPage { page: u32 },
}

use serde::{Deserialize, Serialize};

/// Identity of a published post. Stable across listing pages; used as the
/// rendering key for post cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub i64);

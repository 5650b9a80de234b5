//! Seam between the shell and whatever serves repository listings.

use crate::error::ContentResult;
use crate::listing::Contents;

/// Produces the root listing of a hosted repository.
///
/// Calls are synchronous: the shell blocks its event flow on them.
pub trait ContentSource {
    fn fetch_contents(&self, owner: &str, repo: &str) -> ContentResult<Contents>;
}

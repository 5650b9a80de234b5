//! Types shared by the browser shell and the repository content service.

pub mod error;
pub mod listing;
pub mod source;

pub use error::{ContentError, ContentResult};
pub use listing::{Contents, Entry, EntryKind, RepoListing};
pub use source::ContentSource;

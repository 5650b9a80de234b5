//! Repository listing wire types.

use serde::{Deserialize, Serialize};

/// Kind of a repository entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// One file or directory record in a repository listing.
///
/// Field order matches the JSON shape the content service emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Directories have no download URL.
    pub download_url: Option<String>,
    pub html_url: Option<String>,
    pub size: u64,
    pub sha: String,
}

impl Entry {
    /// Display line used by listing panels, e.g. `README.md (10 bytes) (abc)`.
    pub fn label(&self) -> String {
        format!("{} ({} bytes) ({})", self.name, self.size, self.sha)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Result of a contents lookup: a directory listing or a single file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Listing(Vec<Entry>),
    Single(Entry),
}

impl Contents {
    /// An empty directory listing.
    pub fn empty() -> Self {
        Self::Listing(Vec::new())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Listing(entries) => entries.len(),
            Self::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_entries(self) -> Vec<Entry> {
        match self {
            Self::Listing(entries) => entries,
            Self::Single(entry) => vec![entry],
        }
    }
}

impl Default for Contents {
    fn default() -> Self {
        Self::empty()
    }
}

/// The root listing of one repository, as fetched for a single navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoListing {
    owner: String,
    repo: String,
    entries: Vec<Entry>,
}

impl RepoListing {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, contents: Contents) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            entries: contents.into_entries(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// `owner/repo`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

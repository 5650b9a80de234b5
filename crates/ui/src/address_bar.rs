//! Address bar component.
//!
//! Shows the active tab's location. While the user edits, the typed text is
//! held as a draft and the shown location keeps following the tab.

use crate::navigation::NavigationTarget;

/// What the shown location refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationKind {
    Web,
    /// A `GitHub/<owner>/<repo>` listing panel.
    Repository,
}

/// Edit key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Backspace,
    Enter,
    Escape,
}

/// Result of finishing an edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// Navigate the active tab with the text exactly as typed.
    Submit(String),
    Abandon,
}

/// Address bar.
#[derive(Debug, Default)]
pub struct AddressBar {
    location: String,
    draft: Option<String>,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of the active tab.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Follow the active tab. An edit in progress is not disturbed.
    pub fn show(&mut self, location: &str) {
        self.location = location.to_string();
    }

    pub fn kind(&self) -> LocationKind {
        if NavigationTarget::is_pseudo_url(&self.location) {
            LocationKind::Repository
        } else {
            LocationKind::Web
        }
    }

    /// Text currently displayed: the draft while editing, else the location.
    pub fn text(&self) -> &str {
        self.draft.as_deref().unwrap_or(self.location.as_str())
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Start editing, seeded with the current location.
    pub fn begin_edit(&mut self) {
        self.draft = Some(self.location.clone());
    }

    /// Replace the draft wholesale, starting an edit if needed.
    pub fn replace_text(&mut self, text: &str) {
        self.draft = Some(text.to_string());
    }

    /// Apply a key. Keys other than Enter and Escape never finish the edit.
    pub fn on_key(&mut self, key: EditKey) -> Option<EditOutcome> {
        match key {
            EditKey::Char(c) => {
                self.draft.get_or_insert_with(String::new).push(c);
                None
            }
            EditKey::Backspace => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.pop();
                }
                None
            }
            EditKey::Enter => self.draft.take().map(EditOutcome::Submit),
            EditKey::Escape => self.draft.take().map(|_| EditOutcome::Abandon),
        }
    }
}

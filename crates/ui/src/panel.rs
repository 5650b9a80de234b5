//! Custom content panels shown in place of a web view.

use crate::navigation::github_location;
use common::{ContentError, RepoListing};

/// What a panel displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    /// Root listing of a hosted repository.
    GithubListing,
}

/// Outcome of the fetch behind a panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelState {
    Loaded(RepoListing),
    Failed(ContentError),
}

/// A non-web tab body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomPanel {
    kind: PanelKind,
    owner: String,
    repo: String,
    state: PanelState,
}

impl CustomPanel {
    pub fn github_listing(owner: impl Into<String>, repo: impl Into<String>, state: PanelState) -> Self {
        Self {
            kind: PanelKind::GithubListing,
            owner: owner.into(),
            repo: repo.into(),
            state,
        }
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn set_state(&mut self, state: PanelState) {
        self.state = state;
    }

    /// Tab label for this panel.
    pub fn label(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Address-bar text for this panel.
    pub fn location(&self) -> String {
        github_location(&self.owner, &self.repo)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, PanelState::Failed(_))
    }

    /// One display line per entry. Empty for a failed fetch.
    pub fn lines(&self) -> Vec<String> {
        match &self.state {
            PanelState::Loaded(listing) => listing.entries().iter().map(|e| e.label()).collect(),
            PanelState::Failed(_) => Vec::new(),
        }
    }

    /// Render the panel as a standalone HTML document for the embedded view.
    pub fn render_html(&self) -> String {
        let title = escape_html_text(&self.label());
        let body = match &self.state {
            PanelState::Loaded(listing) => {
                let mut items = String::new();
                for entry in listing.entries() {
                    let text = escape_html_text(&entry.label());
                    match &entry.html_url {
                        Some(href) => items.push_str(&format!(
                            "<li class=\"{}\"><a href=\"{}\">{}</a></li>",
                            if entry.is_dir() { "dir" } else { "file" },
                            escape_html_attribute(href),
                            text
                        )),
                        None => items.push_str(&format!("<li>{}</li>", text)),
                    }
                }
                format!("<ul class=\"listing\">{}</ul>", items)
            }
            PanelState::Failed(err) => format!(
                "<div class=\"error\" style=\"{}\"><strong>{}</strong><p>{}</p></div>",
                ERROR_STYLE,
                escape_html_text(err.heading()),
                escape_html_text(&err.to_string())
            ),
        };

        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
             <body><h1>{title}</h1>{body}</body></html>"
        )
    }
}

const ERROR_STYLE: &str = "color:#b00020;background:#fdecea;border:1px solid #b00020;padding:8px;border-radius:4px";

/// Escape HTML text content.
fn escape_html_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape HTML attribute value.
fn escape_html_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

//! Browser tab.

use crate::panel::CustomPanel;

/// Tab identifier. Stable for the life of the tab, unlike its index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

/// State of the embedded web view behind a tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebView {
    /// Current URL, exactly as requested or as last reported by the view.
    url: String,
    /// Last page title reported by the view.
    title: Option<String>,
    /// Loading state.
    loading: bool,
    /// Number of reloads requested.
    reloads: u32,
}

impl WebView {
    /// Create a view that starts loading `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            loading: true,
            reloads: 0,
        }
    }

    /// Get the current URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the last reported page title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Check if loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Get the number of reloads requested.
    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// Navigate to a URL. The old page's title is dropped.
    pub fn navigate(&mut self, url: &str) {
        self.url = url.to_string();
        self.title = None;
        self.loading = true;
    }

    /// Reload the page.
    pub fn reload(&mut self) {
        self.loading = true;
        self.reloads += 1;
    }
}

/// What a tab shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TabContent {
    WebView(WebView),
    CustomPanel(CustomPanel),
}

/// Browser tab.
#[derive(Clone, Debug)]
pub struct Tab {
    /// Tab ID.
    id: TabId,
    /// Display title in the tab bar.
    label: String,
    /// Tab body.
    content: TabContent,
    /// Inline message shown over the content, e.g. a rejected address.
    notice: Option<String>,
}

impl Tab {
    /// Create a tab whose web view starts loading `url`.
    pub fn new(id: TabId, url: &str, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            content: TabContent::WebView(WebView::new(url)),
            notice: None,
        }
    }

    /// Get the tab ID.
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Get the tab bar label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the tab body.
    pub fn content(&self) -> &TabContent {
        &self.content
    }

    /// Get the web view, if this tab shows one.
    pub fn web_view(&self) -> Option<&WebView> {
        match &self.content {
            TabContent::WebView(view) => Some(view),
            TabContent::CustomPanel(_) => None,
        }
    }

    /// Get the panel, if this tab shows one.
    pub fn panel(&self) -> Option<&CustomPanel> {
        match &self.content {
            TabContent::CustomPanel(panel) => Some(panel),
            TabContent::WebView(_) => None,
        }
    }

    pub fn panel_mut(&mut self) -> Option<&mut CustomPanel> {
        match &mut self.content {
            TabContent::CustomPanel(panel) => Some(panel),
            TabContent::WebView(_) => None,
        }
    }

    /// Address-bar text for this tab.
    pub fn location(&self) -> String {
        match &self.content {
            TabContent::WebView(view) => view.url().to_string(),
            TabContent::CustomPanel(panel) => panel.location(),
        }
    }

    /// Title the window shows while this tab is active: the page title,
    /// falling back to the label.
    pub fn window_title(&self) -> &str {
        match &self.content {
            TabContent::WebView(view) => view.title().unwrap_or(self.label.as_str()),
            TabContent::CustomPanel(_) => &self.label,
        }
    }

    /// Load a URL in the web view, replacing a panel if one is shown.
    pub fn navigate(&mut self, url: &str) {
        match self.content {
            TabContent::WebView(ref mut view) => view.navigate(url),
            TabContent::CustomPanel(_) => self.content = TabContent::WebView(WebView::new(url)),
        }
        self.notice = None;
    }

    /// Replace the body with a panel. The label follows the panel.
    pub fn show_panel(&mut self, panel: CustomPanel) {
        self.label = panel.label();
        self.content = TabContent::CustomPanel(panel);
        self.notice = None;
    }

    /// Reload the web view. Returns false for panels, which the caller
    /// refreshes itself.
    pub fn reload(&mut self) -> bool {
        match &mut self.content {
            TabContent::WebView(view) => {
                view.reload();
                true
            }
            TabContent::CustomPanel(_) => false,
        }
    }

    /// Get the inline notice.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Show an inline notice without touching the content.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Called when the view reports a new page title.
    ///
    /// An empty title clears the page title but keeps the label. Returns
    /// false when the label did not change or the report is stale (the tab
    /// shows a panel now).
    pub fn on_title_changed(&mut self, title: &str) -> bool {
        match &mut self.content {
            TabContent::WebView(view) => {
                if title.is_empty() {
                    view.title = None;
                    return false;
                }
                view.title = Some(title.to_string());
                self.label = title.to_string();
                true
            }
            TabContent::CustomPanel(_) => false,
        }
    }

    /// Called when the view reports a URL change (redirects, in-page links).
    pub fn on_url_changed(&mut self, url: &str) -> bool {
        match &mut self.content {
            TabContent::WebView(view) => {
                view.url = url.to_string();
                true
            }
            TabContent::CustomPanel(_) => false,
        }
    }

    /// Called when page load completes.
    pub fn on_load_finished(&mut self) {
        if let TabContent::WebView(view) = &mut self.content {
            view.loading = false;
        }
    }
}

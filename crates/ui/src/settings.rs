//! Shell settings.

/// Settings the shell needs to build windows and tabs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellSettings {
    /// Page loaded into new tabs.
    pub home_page: String,
    /// Label given to a tab before its page reports a title.
    pub new_tab_label: String,
    /// Window title before any page reports one.
    pub window_title: String,
}

impl ShellSettings {
    pub fn with_home_page(mut self, home_page: impl Into<String>) -> Self {
        self.home_page = home_page.into();
        self
    }
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            home_page: "https://duckduckgo.com".to_string(),
            new_tab_label: "New Tab".to_string(),
            window_title: "web browser".to_string(),
        }
    }
}

//! Browser window: the ordered tab collection and its chrome.

use crate::address_bar::AddressBar;
use crate::settings::ShellSettings;
use crate::tab::{Tab, TabId};

/// Closing is refused below this many tabs, so a window never ends up empty.
pub const MIN_TABS_FOR_CLOSE: usize = 2;

/// Browser window.
pub struct BrowserWindow {
    /// Tabs in display order.
    tabs: Vec<Tab>,
    /// Index of the active tab.
    active: usize,
    /// Tab ID counter.
    tab_counter: u64,
    /// Window title.
    title: String,
    /// Address bar.
    address_bar: AddressBar,
}

impl BrowserWindow {
    /// Create a new browser window with one tab on the home page.
    pub fn new(settings: &ShellSettings) -> Self {
        let mut window = Self {
            tabs: Vec::new(),
            active: 0,
            tab_counter: 0,
            title: settings.window_title.clone(),
            address_bar: AddressBar::new(),
        };

        window.open_tab(&settings.home_page, &settings.new_tab_label);
        window
    }

    /// Insert a tab right after the active one and activate it.
    pub fn open_tab(&mut self, url: &str, label: &str) -> TabId {
        self.tab_counter += 1;
        let id = TabId(self.tab_counter);

        let index = if self.tabs.is_empty() { 0 } else { self.active + 1 };
        self.tabs.insert(index, Tab::new(id, url, label));
        self.active = index;

        id
    }

    /// Remove the tab at `index`.
    ///
    /// Refused (returns `None`) when fewer than [`MIN_TABS_FOR_CLOSE`] tabs
    /// exist or the index is out of range. If the active tab is removed, the
    /// tab sliding into its position (or the new last tab) becomes active.
    pub fn close_tab(&mut self, index: usize) -> Option<Tab> {
        if self.tabs.len() < MIN_TABS_FOR_CLOSE || index >= self.tabs.len() {
            return None;
        }

        let removed = self.tabs.remove(index);
        if index < self.active || self.active >= self.tabs.len() {
            self.active -= 1;
        }

        Some(removed)
    }

    /// Activate the tab at `index`. Returns false if out of range.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// Get a tab.
    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    /// Get a mutable tab.
    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id() == id)
    }

    /// Current position of a tab.
    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == id)
    }

    /// Get the active tab.
    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    /// Get the active tab mutably.
    pub fn active_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    /// Get the active tab ID.
    pub fn active_tab_id(&self) -> TabId {
        self.active_tab().id()
    }

    /// Get the active tab index.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Get all tabs in display order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Get the tab count.
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Get the window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the address bar.
    pub fn address_bar(&self) -> &AddressBar {
        &self.address_bar
    }

    /// Get the address bar mutably.
    pub fn address_bar_mut(&mut self) -> &mut AddressBar {
        &mut self.address_bar
    }

    /// Copy the active tab's title into the window title.
    /// Returns the new title if it changed.
    pub fn sync_title(&mut self) -> Option<String> {
        let title = self.active_tab().window_title().to_string();
        if title == self.title {
            return None;
        }
        self.title = title.clone();
        Some(title)
    }

    /// Copy the active tab's location into the address bar.
    /// Returns the new location if it changed.
    pub fn sync_address_bar(&mut self) -> Option<String> {
        let location = self.active_tab().location();
        if location == self.address_bar.location() {
            return None;
        }
        self.address_bar.show(&location);
        Some(location)
    }
}

//! Main browser controller.
//!
//! [`Browser`] owns the window and routes user intent (shortcuts, menu
//! actions, address-bar input, view events) to the right tab. Repository
//! pseudo-URLs are resolved through a [`ContentSource`].

use crate::address_bar::{EditKey, EditOutcome};
use crate::events::{EventBus, ShellEvent, ShellEventKind, ViewEvent};
use crate::menu::{Menu, MenuBar, MenuItem, Toolbar};
use crate::navigation::{NavigationTarget, PseudoUrlError};
use crate::panel::{CustomPanel, PanelState};
use crate::settings::ShellSettings;
use crate::tab::{Tab, TabId};
use crate::window::BrowserWindow;
use common::{ContentSource, RepoListing};

/// Something the user asked the shell to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellAction {
    NewTab,
    /// Close the tab at the index, or the active tab.
    CloseTab(Option<usize>),
    Reload,
    Quit,
    Navigate(String),
    SelectTab(usize),
}

/// Keyboard shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardShortcut {
    NewTab,
    CloseTab,
    Reload,
    Quit,
}

impl KeyboardShortcut {
    pub const ALL: [KeyboardShortcut; 4] = [Self::NewTab, Self::CloseTab, Self::Reload, Self::Quit];

    /// Parse a chord such as `Ctrl+T`. Case-insensitive; `Control` is
    /// accepted for `Ctrl`.
    pub fn from_chord(chord: &str) -> Option<Self> {
        let (modifier, key) = chord.trim().split_once('+')?;
        let modifier = modifier.trim();
        if !modifier.eq_ignore_ascii_case("ctrl") && !modifier.eq_ignore_ascii_case("control") {
            return None;
        }

        match key.trim().to_ascii_uppercase().as_str() {
            "T" => Some(Self::NewTab),
            "W" => Some(Self::CloseTab),
            "R" => Some(Self::Reload),
            "Q" => Some(Self::Quit),
            _ => None,
        }
    }

    /// Canonical chord text, as shown in menus.
    pub fn chord(self) -> &'static str {
        match self {
            Self::NewTab => "Ctrl+T",
            Self::CloseTab => "Ctrl+W",
            Self::Reload => "Ctrl+R",
            Self::Quit => "Ctrl+Q",
        }
    }

    pub fn action(self) -> ShellAction {
        match self {
            Self::NewTab => ShellAction::NewTab,
            Self::CloseTab => ShellAction::CloseTab(None),
            Self::Reload => ShellAction::Reload,
            Self::Quit => ShellAction::Quit,
        }
    }
}

/// Browser application.
pub struct Browser {
    /// The single browser window.
    window: BrowserWindow,
    /// Shell settings.
    settings: ShellSettings,
    /// Where repository listings come from.
    source: Box<dyn ContentSource>,
    /// Window menu bar.
    menu_bar: MenuBar,
    /// Toolbar above the tab bar.
    toolbar: Toolbar,
    /// Outbound event observers.
    events: EventBus,
    /// Whether the browser is running.
    running: bool,
}

impl Browser {
    /// Create a browser with one window holding one home-page tab.
    pub fn new(settings: ShellSettings, source: Box<dyn ContentSource>) -> Self {
        let mut window = BrowserWindow::new(&settings);
        window.sync_address_bar();

        Self {
            window,
            settings,
            source,
            menu_bar: MenuBar::create_default(),
            toolbar: Toolbar::create_default(),
            events: EventBus::new(),
            running: true,
        }
    }

    /// Register an observer for outbound shell events.
    pub fn subscribe(&mut self, kind: ShellEventKind, handler: impl FnMut(&ShellEvent) + 'static) {
        self.events.subscribe(kind, handler);
    }

    /// Get the window.
    pub fn window(&self) -> &BrowserWindow {
        &self.window
    }

    /// Get the settings.
    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn menu_bar(&self) -> &MenuBar {
        &self.menu_bar
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    /// Get the active tab.
    pub fn active_tab(&self) -> &Tab {
        self.window.active_tab()
    }

    /// Check if the browser is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Open a new tab after the active one and make it active.
    ///
    /// The text is not validated. A pseudo-URL opens the home page first and
    /// is then resolved in the new tab.
    pub fn open(&mut self, text: &str) -> TabId {
        let target = NavigationTarget::resolve(text);
        let url = match &target {
            Ok(NavigationTarget::Web(url)) => url.clone(),
            _ => self.settings.home_page.clone(),
        };

        let id = self.window.open_tab(&url, &self.settings.new_tab_label);
        let index = self.window.active_index();
        tracing::debug!(tab = id.0, index, url = %url, "Opened tab");
        self.events.emit(ShellEvent::TabOpened { tab: id, index });
        self.events.emit(ShellEvent::ActiveTabChanged { tab: id, index });

        match target {
            Ok(NavigationTarget::Web(_)) => {}
            Ok(NavigationTarget::GithubRepo { owner, repo }) => self.show_repository(&owner, &repo),
            Err(err) => self.show_notice(&err),
        }

        self.sync_chrome();
        id
    }

    /// Open a tab on the home page.
    pub fn new_tab(&mut self) -> TabId {
        let home = self.settings.home_page.clone();
        self.open(&home)
    }

    /// Close the tab at `index`. Returns false if refused.
    pub fn close(&mut self, index: usize) -> bool {
        let previous = self.window.active_tab_id();

        let Some(removed) = self.window.close_tab(index) else {
            tracing::debug!(index, tabs = self.window.tab_count(), "Close refused");
            return false;
        };

        tracing::debug!(tab = removed.id().0, index, "Closed tab");
        self.events.emit(ShellEvent::TabClosed {
            tab: removed.id(),
            index,
        });

        let active = self.window.active_tab_id();
        if active != previous {
            self.events.emit(ShellEvent::ActiveTabChanged {
                tab: active,
                index: self.window.active_index(),
            });
        }

        self.sync_chrome();
        true
    }

    /// Close the active tab.
    pub fn close_active(&mut self) -> bool {
        self.close(self.window.active_index())
    }

    /// Activate the tab at `index`. Returns false if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        let previous = self.window.active_index();
        if !self.window.set_active(index) {
            return false;
        }

        if index != previous {
            self.events.emit(ShellEvent::ActiveTabChanged {
                tab: self.window.active_tab_id(),
                index,
            });
        }

        self.sync_chrome();
        true
    }

    /// Navigate the active tab.
    ///
    /// Plain input goes to the web view verbatim. `GitHub/<owner>/<repo>`
    /// replaces the tab body with a listing panel. A malformed pseudo-URL
    /// leaves the tab as it was and shows an inline notice.
    pub fn navigate(&mut self, text: &str) -> Result<(), PseudoUrlError> {
        match NavigationTarget::resolve(text) {
            Ok(NavigationTarget::Web(url)) => {
                tracing::debug!(url = %url, "Navigating");
                self.window.active_tab_mut().navigate(&url);
            }
            Ok(NavigationTarget::GithubRepo { owner, repo }) => self.show_repository(&owner, &repo),
            Err(err) => {
                self.show_notice(&err);
                self.sync_chrome();
                return Err(err);
            }
        }

        self.sync_chrome();
        Ok(())
    }

    /// Reload the active tab. Listing panels are fetched again.
    pub fn reload(&mut self) {
        let tab = self.window.active_tab_mut();
        if tab.reload() {
            return;
        }

        let Some((owner, repo)) = tab.panel().map(|p| (p.owner().to_string(), p.repo().to_string())) else {
            return;
        };
        let id = tab.id();

        let state = self.fetch_listing(&owner, &repo);
        if let Some(panel) = self.window.active_tab_mut().panel_mut() {
            panel.set_state(state);
        }
        self.events.emit(ShellEvent::PanelUpdated { tab: id });
    }

    /// Stop the browser.
    pub fn quit(&mut self) {
        tracing::info!("Quit requested");
        self.running = false;
        self.events.emit(ShellEvent::Quit);
    }

    /// Execute an action from any input surface.
    pub fn perform(&mut self, action: ShellAction) {
        match action {
            ShellAction::NewTab => {
                self.new_tab();
            }
            ShellAction::CloseTab(Some(index)) => {
                self.close(index);
            }
            ShellAction::CloseTab(None) => {
                self.close_active();
            }
            ShellAction::Reload => self.reload(),
            ShellAction::Quit => self.quit(),
            ShellAction::Navigate(text) => {
                // A rejected pseudo-URL is already surfaced as a notice.
                let _ = self.navigate(&text);
            }
            ShellAction::SelectTab(index) => {
                self.select(index);
            }
        }
    }

    /// Handle keyboard shortcut.
    pub fn handle_shortcut(&mut self, shortcut: KeyboardShortcut) {
        self.perform(shortcut.action());
    }

    /// Handle a chord such as `Ctrl+T`. Returns false if it is not bound.
    pub fn handle_chord(&mut self, chord: &str) -> bool {
        match KeyboardShortcut::from_chord(chord) {
            Some(shortcut) => {
                self.handle_shortcut(shortcut);
                true
            }
            None => false,
        }
    }

    /// Choose a menu bar item by label. Returns false if there is no such
    /// enabled item.
    pub fn activate_menu_item(&mut self, label: &str) -> bool {
        let action = self.menu_bar.find(label).and_then(MenuItem::activate);
        self.perform_item(label, action)
    }

    /// Choose a toolbar item by label.
    pub fn activate_toolbar_item(&mut self, label: &str) -> bool {
        let action = self.toolbar.find(label).and_then(MenuItem::activate);
        self.perform_item(label, action)
    }

    /// Choose an item from the context menu of the tab at `index`.
    pub fn activate_tab_menu_item(&mut self, index: usize, label: &str) -> bool {
        if index >= self.window.tab_count() {
            return false;
        }
        let action = Menu::tab_context(index).find(label).and_then(MenuItem::activate);
        self.perform_item(label, action)
    }

    fn perform_item(&mut self, label: &str, action: Option<ShellAction>) -> bool {
        let Some(action) = action else {
            tracing::debug!(label, "No such menu item");
            return false;
        };
        tracing::debug!(label, ?action, "Menu item chosen");
        self.perform(action);
        true
    }

    /// Start editing the address bar.
    pub fn edit_address(&mut self) {
        self.window.address_bar_mut().begin_edit();
    }

    /// Feed a key to the address bar. Enter navigates with the typed text.
    pub fn on_address_key(&mut self, key: EditKey) -> Result<(), PseudoUrlError> {
        match self.window.address_bar_mut().on_key(key) {
            Some(EditOutcome::Submit(text)) => self.navigate(&text),
            Some(EditOutcome::Abandon) | None => Ok(()),
        }
    }

    /// Apply a notification from a tab's web view.
    pub fn handle_view_event(&mut self, event: ViewEvent) {
        let active = self.window.active_tab_id();

        match event {
            ViewEvent::TitleChanged { tab, title } => {
                let Some(target) = self.window.tab_mut(tab) else {
                    tracing::debug!(tab = tab.0, "Title for unknown tab");
                    return;
                };
                if !target.on_title_changed(&title) {
                    return;
                }
                self.events.emit(ShellEvent::TabLabelChanged { tab, label: title });
                if tab == active {
                    self.sync_chrome();
                }
            }
            ViewEvent::UrlChanged { tab, url } => {
                let changed = self
                    .window
                    .tab_mut(tab)
                    .map_or(false, |target| target.on_url_changed(&url));
                if changed && tab == active {
                    self.sync_chrome();
                }
            }
            ViewEvent::LoadFinished { tab } => {
                if let Some(target) = self.window.tab_mut(tab) {
                    target.on_load_finished();
                }
            }
        }
    }

    /// Replace the active tab's body with the listing for `owner/repo`.
    fn show_repository(&mut self, owner: &str, repo: &str) {
        let state = self.fetch_listing(owner, repo);
        let panel = CustomPanel::github_listing(owner, repo, state);
        let label = panel.label();

        let tab = self.window.active_tab_mut();
        tab.show_panel(panel);
        let id = tab.id();

        self.events.emit(ShellEvent::TabLabelChanged { tab: id, label });
        self.events.emit(ShellEvent::PanelUpdated { tab: id });
    }

    fn fetch_listing(&self, owner: &str, repo: &str) -> PanelState {
        match self.source.fetch_contents(owner, repo) {
            Ok(contents) => {
                tracing::info!(owner, repo, entries = contents.len(), "Loaded repository listing");
                PanelState::Loaded(RepoListing::new(owner, repo, contents))
            }
            Err(err) => {
                tracing::warn!(owner, repo, error = %err, "Failed to load repository listing");
                PanelState::Failed(err)
            }
        }
    }

    fn show_notice(&mut self, err: &PseudoUrlError) {
        let message = err.to_string();
        tracing::warn!("{}", message);

        let tab = self.window.active_tab_mut();
        tab.set_notice(message.clone());
        let id = tab.id();
        self.events.emit(ShellEvent::NoticeShown { tab: id, message });
    }

    /// Bring the window title and address bar in line with the active tab.
    fn sync_chrome(&mut self) {
        if let Some(title) = self.window.sync_title() {
            self.events.emit(ShellEvent::WindowTitleChanged(title));
        }
        if let Some(location) = self.window.sync_address_bar() {
            self.events.emit(ShellEvent::UrlBarChanged(location));
        }
    }
}

//! Menu system.
//!
//! Menus, the toolbar and the tab context menu are data: each actionable
//! item carries the [`ShellAction`] the browser performs when it is chosen.

use crate::browser::{KeyboardShortcut, ShellAction};

/// Menu bar.
pub struct MenuBar {
    menus: Vec<Menu>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self { menus: Vec::new() }
    }

    pub fn add_menu(&mut self, menu: Menu) {
        self.menus.push(menu);
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn create_default() -> Self {
        let mut bar = Self::new();

        bar.add_menu(Menu::new("File")
            .add_item(MenuItem::shortcut("New Tab", KeyboardShortcut::NewTab))
            .add_item(MenuItem::shortcut("Reload", KeyboardShortcut::Reload))
            .add_item(MenuItem::shortcut("Close Tab", KeyboardShortcut::CloseTab))
            .add_item(MenuItem::separator())
            .add_item(MenuItem::shortcut("Quit", KeyboardShortcut::Quit)));

        bar
    }

    /// Find the first item with this label in any menu.
    pub fn find(&self, label: &str) -> Option<&MenuItem> {
        self.menus.iter().find_map(|m| m.find(label))
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::create_default()
    }
}

/// A menu.
#[derive(Clone, Debug)]
pub struct Menu {
    label: String,
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            items: Vec::new(),
        }
    }

    pub fn add_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, label: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.label == label)
    }

    /// Context menu for the tab at `index` in the tab bar.
    pub fn tab_context(index: usize) -> Self {
        Self::new("Tab")
            .add_item(MenuItem::action("New Tab", ShellAction::NewTab))
            .add_item(MenuItem::action("Reload Tab", ShellAction::Reload))
            .add_item(MenuItem::separator())
            .add_item(MenuItem::action("Close Tab", ShellAction::CloseTab(Some(index))))
    }
}

/// Menu item.
#[derive(Clone, Debug)]
pub struct MenuItem {
    pub item_type: MenuItemType,
    pub label: String,
    pub shortcut: String,
    pub enabled: bool,
    pub action: Option<ShellAction>,
}

impl MenuItem {
    pub fn action(label: &str, action: ShellAction) -> Self {
        Self {
            item_type: MenuItemType::Action,
            label: label.to_string(),
            shortcut: String::new(),
            enabled: true,
            action: Some(action),
        }
    }

    /// An item bound to a keyboard shortcut, showing its chord.
    pub fn shortcut(label: &str, shortcut: KeyboardShortcut) -> Self {
        Self {
            shortcut: shortcut.chord().to_string(),
            ..Self::action(label, shortcut.action())
        }
    }

    pub fn separator() -> Self {
        Self {
            item_type: MenuItemType::Separator,
            label: String::new(),
            shortcut: String::new(),
            enabled: true,
            action: None,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The action to perform when chosen, if the item is actionable.
    pub fn activate(&self) -> Option<ShellAction> {
        if !self.enabled {
            return None;
        }
        self.action.clone()
    }
}

/// Menu item type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItemType {
    Action,
    Separator,
}

/// Toolbar above the tab bar.
pub struct Toolbar {
    items: Vec<MenuItem>,
}

impl Toolbar {
    pub fn create_default() -> Self {
        Self {
            items: vec![MenuItem::action("New Tab", ShellAction::NewTab)],
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, label: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.label == label)
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::create_default()
    }
}

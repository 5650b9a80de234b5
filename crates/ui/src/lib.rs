//! Browser UI shell.
//!
//! This crate provides the browser user interface model including:
//! - Window and tab management
//! - Address bar
//! - Pseudo-URL navigation for repository listings
//! - Listing panels
//! - Menus, shortcuts and event dispatch

pub mod address_bar;
pub mod browser;
pub mod events;
pub mod menu;
pub mod navigation;
pub mod panel;
pub mod settings;
pub mod tab;
pub mod window;

pub use address_bar::{AddressBar, EditKey, EditOutcome, LocationKind};
pub use browser::{Browser, KeyboardShortcut, ShellAction};
pub use events::{EventBus, ShellEvent, ShellEventKind, ViewEvent};
pub use menu::{Menu, MenuBar, MenuItem, Toolbar};
pub use navigation::{NavigationTarget, PseudoUrlError};
pub use panel::{CustomPanel, PanelKind, PanelState};
pub use settings::ShellSettings;
pub use tab::{Tab, TabContent, TabId, WebView};
pub use window::BrowserWindow;

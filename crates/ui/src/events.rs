//! Shell event dispatch.
//!
//! Inbound [`ViewEvent`]s come from the embedded web views. Outbound
//! [`ShellEvent`]s are published to observers registered per event kind.
//! Everything runs synchronously on the UI thread, in registration order.

use crate::tab::TabId;
use std::collections::HashMap;

/// Notification from a tab's embedded web view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    TitleChanged { tab: TabId, title: String },
    UrlChanged { tab: TabId, url: String },
    LoadFinished { tab: TabId },
}

/// Something the shell's chrome should react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    TabOpened { tab: TabId, index: usize },
    TabClosed { tab: TabId, index: usize },
    ActiveTabChanged { tab: TabId, index: usize },
    TabLabelChanged { tab: TabId, label: String },
    WindowTitleChanged(String),
    UrlBarChanged(String),
    PanelUpdated { tab: TabId },
    NoticeShown { tab: TabId, message: String },
    Quit,
}

/// Discriminant of [`ShellEvent`], used as the subscription key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShellEventKind {
    TabOpened,
    TabClosed,
    ActiveTabChanged,
    TabLabelChanged,
    WindowTitleChanged,
    UrlBarChanged,
    PanelUpdated,
    NoticeShown,
    Quit,
}

impl ShellEvent {
    pub fn kind(&self) -> ShellEventKind {
        match self {
            Self::TabOpened { .. } => ShellEventKind::TabOpened,
            Self::TabClosed { .. } => ShellEventKind::TabClosed,
            Self::ActiveTabChanged { .. } => ShellEventKind::ActiveTabChanged,
            Self::TabLabelChanged { .. } => ShellEventKind::TabLabelChanged,
            Self::WindowTitleChanged(_) => ShellEventKind::WindowTitleChanged,
            Self::UrlBarChanged(_) => ShellEventKind::UrlBarChanged,
            Self::PanelUpdated { .. } => ShellEventKind::PanelUpdated,
            Self::NoticeShown { .. } => ShellEventKind::NoticeShown,
            Self::Quit => ShellEventKind::Quit,
        }
    }
}

type Handler = Box<dyn FnMut(&ShellEvent)>;

/// Observer registry keyed by event kind.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<ShellEventKind, Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every event of `kind`.
    pub fn subscribe(&mut self, kind: ShellEventKind, handler: impl FnMut(&ShellEvent) + 'static) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Deliver `event` to its subscribers.
    pub fn emit(&mut self, event: ShellEvent) {
        tracing::trace!(?event, "emit");
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(&event);
            }
        }
    }

    pub fn handler_count(&self, kind: ShellEventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

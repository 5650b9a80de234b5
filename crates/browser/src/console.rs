//! Line-oriented front end for the browser shell.
//!
//! Each input line is one of:
//! - a chord such as `Ctrl+T`
//! - `:select N` to activate tab N
//! - `:title N text` to report a page title for tab N
//! - `:tabs` to print the tab strip
//! - `:menu Label`, `:toolbar Label` or `:context N Label` to choose a menu item
//! - anything else, navigated in the active tab as typed

use std::io::{self, BufRead, Write};
use thiserror::Error;
use ui::{Browser, KeyboardShortcut, PanelState, ShellAction, TabContent, ViewEvent};

/// Console errors.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Invalid tab index: {0}")]
    InvalidIndex(String),
    #[error("No tab at index {0}")]
    NoSuchTab(usize),
    #[error("No menu item '{0}'")]
    NoSuchMenuItem(String),
}

/// A parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Shortcut(KeyboardShortcut),
    Select(usize),
    Title { index: usize, title: String },
    Tabs,
    Menu(String),
    Toolbar(String),
    Context { index: usize, label: String },
    Navigate(String),
    Empty,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, ConsoleError> {
        if line.trim().is_empty() {
            return Ok(Self::Empty);
        }

        if let Some(rest) = line.trim().strip_prefix(':') {
            let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            return match name {
                "select" => Ok(Self::Select(parse_index(args)?)),
                "title" => {
                    let (index, title) = args.trim().split_once(char::is_whitespace).unwrap_or((args.trim(), ""));
                    Ok(Self::Title {
                        index: parse_index(index)?,
                        title: title.trim().to_string(),
                    })
                }
                "tabs" => Ok(Self::Tabs),
                "menu" => Ok(Self::Menu(args.trim().to_string())),
                "toolbar" => Ok(Self::Toolbar(args.trim().to_string())),
                "context" => {
                    let (index, label) = args.trim().split_once(char::is_whitespace).unwrap_or((args.trim(), ""));
                    Ok(Self::Context {
                        index: parse_index(index)?,
                        label: label.trim().to_string(),
                    })
                }
                _ => Err(ConsoleError::UnknownCommand(name.to_string())),
            };
        }

        match KeyboardShortcut::from_chord(line) {
            Some(shortcut) => Ok(Self::Shortcut(shortcut)),
            None => Ok(Self::Navigate(line.to_string())),
        }
    }
}

fn parse_index(text: &str) -> Result<usize, ConsoleError> {
    text.trim()
        .parse()
        .map_err(|_| ConsoleError::InvalidIndex(text.trim().to_string()))
}

/// Apply a command to the browser.
pub fn execute(browser: &mut Browser, command: Command) -> Result<(), ConsoleError> {
    match command {
        Command::Shortcut(shortcut) => browser.handle_shortcut(shortcut),
        Command::Select(index) => {
            if !browser.select(index) {
                return Err(ConsoleError::NoSuchTab(index));
            }
        }
        Command::Title { index, title } => {
            let tab = browser
                .window()
                .tabs()
                .get(index)
                .map(|t| t.id())
                .ok_or(ConsoleError::NoSuchTab(index))?;
            browser.handle_view_event(ViewEvent::TitleChanged { tab, title });
        }
        Command::Menu(label) => {
            if !browser.activate_menu_item(&label) {
                return Err(ConsoleError::NoSuchMenuItem(label));
            }
        }
        Command::Toolbar(label) => {
            if !browser.activate_toolbar_item(&label) {
                return Err(ConsoleError::NoSuchMenuItem(label));
            }
        }
        Command::Context { index, label } => {
            if index >= browser.window().tab_count() {
                return Err(ConsoleError::NoSuchTab(index));
            }
            if !browser.activate_tab_menu_item(index, &label) {
                return Err(ConsoleError::NoSuchMenuItem(label));
            }
        }
        Command::Navigate(text) => browser.perform(ShellAction::Navigate(text)),
        Command::Tabs | Command::Empty => {}
    }
    Ok(())
}

/// Write the tab strip.
pub fn render_tabs<W: Write>(browser: &Browser, out: &mut W) -> io::Result<()> {
    let window = browser.window();
    for (index, tab) in window.tabs().iter().enumerate() {
        let marker = if index == window.active_index() { '*' } else { ' ' };
        writeln!(out, "{marker} [{index}] {}", tab.label())?;
    }
    Ok(())
}

/// Write the window chrome and the active tab's body.
pub fn render<W: Write>(browser: &Browser, out: &mut W) -> io::Result<()> {
    let window = browser.window();
    let tab = window.active_tab();

    writeln!(
        out,
        "{} | [{}/{}] {} | {}",
        window.title(),
        window.active_index() + 1,
        window.tab_count(),
        tab.label(),
        window.address_bar().text()
    )?;

    if let Some(notice) = tab.notice() {
        writeln!(out, "! {notice}")?;
    }

    if let TabContent::CustomPanel(panel) = tab.content() {
        match panel.state() {
            PanelState::Loaded(listing) if listing.entries().is_empty() => writeln!(out, "  (empty)")?,
            PanelState::Loaded(_) => {
                for line in panel.lines() {
                    writeln!(out, "  {line}")?;
                }
            }
            PanelState::Failed(err) => writeln!(out, "  error: {}: {err}", err.heading())?,
        }
    }

    Ok(())
}

/// Drive the browser from `input` until end of input or quit.
pub fn run<R: BufRead, W: Write>(browser: &mut Browser, input: R, mut out: W) -> Result<(), ConsoleError> {
    render(browser, &mut out)?;

    for line in input.lines() {
        let line = line?;

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "? {err}")?;
                continue;
            }
        };

        let show_tabs = command == Command::Tabs;
        if let Err(err) = execute(browser, command) {
            writeln!(out, "? {err}")?;
            continue;
        }

        if !browser.is_running() {
            break;
        }

        if show_tabs {
            render_tabs(browser, &mut out)?;
        } else {
            render(browser, &mut out)?;
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ContentError, ContentResult, ContentSource, Contents, Entry, EntryKind};
    use ui::ShellSettings;

    struct StaticSource(ContentResult<Contents>);

    impl ContentSource for StaticSource {
        fn fetch_contents(&self, _owner: &str, _repo: &str) -> ContentResult<Contents> {
            self.0.clone()
        }
    }

    fn browser(result: ContentResult<Contents>) -> Browser {
        Browser::new(ShellSettings::default(), Box::new(StaticSource(result)))
    }

    fn readme() -> Entry {
        Entry {
            name: "README.md".to_string(),
            path: "README.md".to_string(),
            kind: EntryKind::File,
            download_url: None,
            html_url: None,
            size: 10,
            sha: "abc".to_string(),
        }
    }

    fn drive(browser: &mut Browser, script: &str) -> String {
        let mut out = Vec::new();
        run(browser, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("Ctrl+T").unwrap(), Command::Shortcut(KeyboardShortcut::NewTab));
        assert_eq!(Command::parse(":select 2").unwrap(), Command::Select(2));
        assert_eq!(
            Command::parse(":title 0 Example Domain").unwrap(),
            Command::Title {
                index: 0,
                title: "Example Domain".to_string(),
            }
        );
        assert_eq!(Command::parse(":tabs").unwrap(), Command::Tabs);
        assert_eq!(Command::parse(":menu Close Tab").unwrap(), Command::Menu("Close Tab".to_string()));
        assert_eq!(Command::parse(":toolbar New Tab").unwrap(), Command::Toolbar("New Tab".to_string()));
        assert_eq!(
            Command::parse(":context 1 Reload Tab").unwrap(),
            Command::Context {
                index: 1,
                label: "Reload Tab".to_string(),
            }
        );
        assert_eq!(
            Command::parse("GitHub/alice/repo1").unwrap(),
            Command::Navigate("GitHub/alice/repo1".to_string())
        );
        assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse(":select x"), Err(ConsoleError::InvalidIndex(_))));
        assert!(matches!(Command::parse(":title"), Err(ConsoleError::InvalidIndex(_))));
        assert!(matches!(Command::parse(":bogus"), Err(ConsoleError::UnknownCommand(_))));
        assert!(matches!(Command::parse(":context x Close Tab"), Err(ConsoleError::InvalidIndex(_))));
    }

    #[test]
    fn test_run_lists_repository() {
        let mut browser = browser(Ok(Contents::Listing(vec![readme()])));
        let output = drive(&mut browser, "GitHub/alice/repo1\n");

        assert!(output.contains("alice/repo1 | [1/1] alice/repo1 | GitHub/alice/repo1"));
        assert!(output.contains("  README.md (10 bytes) (abc)"));
    }

    #[test]
    fn test_run_shows_failures_and_notices() {
        let mut browser = browser(Err(ContentError::timeout("no response after 5s")));
        let output = drive(&mut browser, "GitHub/bad-format\nGitHub/alice/repo1\n");

        assert!(output.contains("! Invalid address 'GitHub/bad-format'"));
        assert!(output.contains("error: The content service did not answer in time"));
    }

    #[test]
    fn test_run_reports_bad_commands_and_continues() {
        let mut browser = browser(Ok(Contents::empty()));
        let output = drive(&mut browser, ":select 9\nCtrl+T\n:tabs\n");

        assert!(output.contains("? No tab at index 9"));
        assert!(output.contains("  [0] New Tab"));
        assert!(output.contains("* [1] New Tab"));
    }

    #[test]
    fn test_run_stops_on_quit() {
        let mut browser = browser(Ok(Contents::empty()));
        let output = drive(&mut browser, "Ctrl+Q\nhttps://example.com\n");

        assert!(!browser.is_running());
        assert!(!output.contains("https://example.com"));
    }

    #[test]
    fn test_title_command_updates_window() {
        let mut browser = browser(Ok(Contents::empty()));
        drive(&mut browser, ":title 0 Example Domain\n");

        assert_eq!(browser.window().title(), "Example Domain");
        assert_eq!(browser.active_tab().label(), "Example Domain");
    }

    #[test]
    fn test_menu_commands_drive_browser() {
        let mut browser = browser(Ok(Contents::empty()));
        let output = drive(
            &mut browser,
            ":toolbar New Tab\n:menu New Tab\n:context 0 Close Tab\n:menu Bookmarks\n:context 7 Close Tab\n:tabs\n",
        );

        assert!(output.contains("? No menu item 'Bookmarks'"));
        assert!(output.contains("? No tab at index 7"));
        assert_eq!(browser.window().tab_count(), 2);
        assert_eq!(browser.window().active_index(), 1);
    }

    #[test]
    fn test_menu_quit_stops_loop() {
        let mut browser = browser(Ok(Contents::empty()));
        drive(&mut browser, ":menu Quit\n:toolbar New Tab\n");

        assert!(!browser.is_running());
        assert_eq!(browser.window().tab_count(), 1);
    }
}

//! Terminal shell and entry point.
//!
//! A thin crossterm layer around the library: it owns the terminal, turns key
//! presses into [`Event`]s, executes the [`Action`]s that come back, and
//! redraws the frame produced by [`vcfinder::ui::render`].
//!
//! ```text
//! ┌─────────────────────────┐
//! │      UI thread          │
//! │  ┌──────────────────┐   │
//! │  │  Shell + AppState│   │  ← keys, timers, rendering
//! │  └──────────────────┘   │
//! │          │ mpsc         │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  SearchWorker    │   │  ← searches, preference writes
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Anywhere:
//! - `Ctrl+t`: Toggle theme
//! - `Ctrl+c`: Quit
//!
//! While typing:
//! - Printable keys edit the query, `Backspace` deletes, `Ctrl+u` clears
//! - `Down`/`Up`: Move through suggestions, `Down` enters the results when no
//!   suggestions are shown
//! - `Tab`: Fill the input with the highlighted suggestion
//! - `Enter`: Search
//! - `Esc`: Close suggestions, then move to the results
//!
//! While browsing results:
//! - `j`/`Down`, `k`/`Up`: Move between cards
//! - `c`: Copy email, `o`: Open website
//! - `g`: Back to top, `b`: Back to previous card
//! - `1`-`8`: Search a popular industry (before the first search)
//! - `/`: Edit the query
//! - `t`: Toggle theme
//! - `q`: Quit

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, terminal};

use vcfinder::app::COPIED_CONFIRMATION;
use vcfinder::infrastructure::{copy_to_clipboard, default_config_path, open_url};
use vcfinder::storage::{JsonPreferences, MemoryPreferences, PreferenceStore};
use vcfinder::worker::{InMemoryBackend, SearchWorker, WorkerHandle};
use vcfinder::{handle_event, Action, AppState, Config, Event, Focus, Result};

/// How long to wait for input before checking the worker and timers.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() {
    let config = match load_config(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vcfinder: {e}");
            std::process::exit(2);
        }
    };
    vcfinder::observability::init_tracing(&config);

    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "vcfinder exited with an error");
        eprintln!("vcfinder: {e}");
        std::process::exit(1);
    }
}

#[derive(Debug, Parser)]
#[command(name = "vcfinder")]
#[command(about = "Find venture capital firms by industry", version)]
struct Cli {
    /// TOML config file. Default: ~/.config/vcfinder/config.toml if present.
    #[arg(env = "VCFINDER_CONFIG", value_name = "CONFIG")]
    config: Option<PathBuf>,
}

/// Config from the path on the command line or in `VCFINDER_CONFIG`, else the
/// default location if a file exists there.
fn load_config(cli: Cli) -> Result<Config> {
    let path = cli.config.or_else(|| default_config_path().filter(|p| p.is_file()));
    path.map_or_else(|| Ok(Config::default()), Config::from_file)
}

fn open_store(config: &Config) -> Box<dyn PreferenceStore> {
    let path = config.preferences_path();
    match JsonPreferences::new(path.clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "preferences unavailable, keeping them in memory");
            Box::new(MemoryPreferences::default())
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let _span = tracing::info_span!("vcfinder_session").entered();

    let store = open_store(config);
    let app = vcfinder::initialize(config, store.as_ref())?;
    let backend = InMemoryBackend::new(app.corpus.clone(), config.search_latency());
    let worker = SearchWorker::new(Box::new(backend), Some(store)).spawn()?;

    let mut shell = Shell::new(app, worker);
    let result = TerminalGuard::enter().and_then(|_guard| shell.run(&mut io::stdout()));

    shell.worker.shutdown();
    result
}

/// Raw mode and the alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Application state plus the shell's own concerns: the worker link and the
/// pending "Copied!" timeouts.
struct Shell {
    app: AppState,
    worker: WorkerHandle,
    copied_deadlines: Vec<(String, Instant)>,
    quit: bool,
}

impl Shell {
    const fn new(app: AppState, worker: WorkerHandle) -> Self {
        Self {
            app,
            worker,
            copied_deadlines: Vec::new(),
            quit: false,
        }
    }

    fn run(&mut self, out: &mut impl Write) -> Result<()> {
        let (mut cols, mut rows) = terminal::size()?;
        self.draw(out, rows, cols)?;

        while !self.quit {
            let mut dirty = false;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(event) = map_key_event(&self.app, &key) {
                            dirty |= self.dispatch(&event);
                        }
                    }
                    TermEvent::Resize(new_cols, new_rows) => {
                        cols = new_cols;
                        rows = new_rows;
                        dirty = true;
                    }
                    _ => {}
                }
            }

            while let Some(response) = self.worker.try_recv() {
                dirty |= self.dispatch(&Event::WorkerResponse(response));
            }

            dirty |= self.expire_confirmations(Instant::now());

            if dirty && !self.quit {
                self.draw(out, rows, cols)?;
            }
        }

        tracing::debug!("quit requested");
        Ok(())
    }

    /// Handles an event and executes its actions. Returns whether to redraw.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((mut should_render, actions)) => {
                for action in actions {
                    if let Some(follow_up) = self.execute_action(action) {
                        should_render |= self.dispatch(&follow_up);
                    }
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Executes an action, returning the event it produced, if any.
    fn execute_action(&mut self, action: Action) -> Option<Event> {
        match action {
            Action::PostToWorker(message) => {
                let kind = message.kind();
                if let Err(e) = self.worker.post(message) {
                    tracing::error!(kind = kind, error = %e, "failed to reach search worker");
                }
                None
            }
            Action::CopyToClipboard { firm_id, email } => match copy_to_clipboard(&email) {
                Ok(()) => {
                    self.copied_deadlines.retain(|(id, _)| id != &firm_id);
                    self.copied_deadlines.push((firm_id.clone(), Instant::now() + COPIED_CONFIRMATION));
                    Some(Event::EmailCopied { firm_id })
                }
                Err(e) => {
                    tracing::warn!(firm_id = %firm_id, error = %e, "failed to copy email");
                    None
                }
            },
            Action::OpenUrl { url } => {
                if let Err(e) = open_url(&url) {
                    tracing::warn!(url = %url, error = %e, "failed to open website");
                }
                None
            }
            Action::Quit => {
                self.quit = true;
                None
            }
        }
    }

    fn expire_confirmations(&mut self, now: Instant) -> bool {
        let (expired, pending): (Vec<_>, Vec<_>) =
            self.copied_deadlines.drain(..).partition(|(_, deadline)| *deadline <= now);
        self.copied_deadlines = pending;

        expired
            .into_iter()
            .fold(false, |dirty, (firm_id, _)| self.dispatch(&Event::CopiedExpired { firm_id }) | dirty)
    }

    fn draw(&self, out: &mut impl Write, rows: u16, cols: u16) -> Result<()> {
        let frame = vcfinder::ui::render(&self.app, usize::from(rows), usize::from(cols));
        queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Maps a key press to an application event for the current focus.
fn map_key_event(app: &AppState, key: &KeyEvent) -> Option<Event> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => return Some(Event::Quit),
        KeyCode::Char('t') if ctrl => return Some(Event::ToggleTheme),
        _ => {}
    }

    match app.focus {
        Focus::Typing => match key.code {
            KeyCode::Char('u') if ctrl => Some(Event::ClearQuery),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => None,
            KeyCode::Char(c) => Some(Event::Char(c)),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Down if app.suggestions_visible() => Some(Event::SuggestionNext),
            KeyCode::Down if !app.results.is_empty() => Some(Event::FocusResults),
            KeyCode::Up if app.suggestions_visible() => Some(Event::SuggestionPrevious),
            KeyCode::Tab => Some(Event::FillSuggestion),
            KeyCode::Enter => Some(Event::Confirm),
            KeyCode::Esc => Some(Event::Dismiss),
            _ => None,
        },
        Focus::Browsing => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Event::CardDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Event::CardUp),
            KeyCode::Char('c') => Some(Event::CopyEmail),
            KeyCode::Char('o') => Some(Event::OpenWebsite),
            KeyCode::Char('g') => Some(Event::ScrollToTop),
            KeyCode::Char('b') => Some(Event::ScrollToPrevious),
            KeyCode::Char('/') => Some(Event::FocusInput),
            KeyCode::Char('t') => Some(Event::ToggleTheme),
            KeyCode::Char('q') => Some(Event::Quit),
            KeyCode::Char(d @ '1'..='8') => d.to_digit(10).map(|n| Event::PickPopular(n as usize - 1)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcfinder::domain::Corpus;
    use vcfinder::ThemePreference;

    fn state() -> AppState {
        AppState::new(Corpus::embedded().unwrap(), ThemePreference::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_keys_edit_the_query() {
        let app = state();
        assert_eq!(map_key_event(&app, &press(KeyCode::Char('q'))), Some(Event::Char('q')));
        assert_eq!(
            map_key_event(&app, &KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(Event::ClearQuery)
        );
        assert_eq!(map_key_event(&app, &press(KeyCode::Down)), None);
    }

    #[test]
    fn browsing_keys_drive_cards() {
        let mut app = state();
        app.focus = Focus::Browsing;
        assert_eq!(map_key_event(&app, &press(KeyCode::Char('j'))), Some(Event::CardDown));
        assert_eq!(map_key_event(&app, &press(KeyCode::Char('3'))), Some(Event::PickPopular(2)));
        assert_eq!(map_key_event(&app, &press(KeyCode::Char('q'))), Some(Event::Quit));
        assert_eq!(map_key_event(&app, &press(KeyCode::Char('9'))), None);
    }

    #[test]
    fn config_path_is_positional() {
        let cli = Cli::try_parse_from(["vcfinder", "/tmp/vcfinder.toml"]).expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/vcfinder.toml")));
    }

    #[test]
    fn help_and_version_are_flags_not_paths() {
        let help = Cli::try_parse_from(["vcfinder", "--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
        let version = Cli::try_parse_from(["vcfinder", "-V"]).unwrap_err();
        assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search_latency_ms = 5\n").unwrap();

        let config = load_config(Cli { config: Some(path) }).unwrap();
        assert_eq!(config.search_latency_ms, 5);
    }

    #[test]
    fn global_shortcuts_ignore_focus() {
        let app = state();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(&app, &ctrl_c), Some(Event::Quit));
    }
}

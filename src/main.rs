//! Terminal driver and entry point.
//!
//! This binary is the thin integration layer between the Hire Box library and
//! a real terminal. It owns the wall clock, the raw-mode key loop and the
//! screen; everything else lives in [`hirebox::Runtime`].
//!
//! # Loop
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ poll key (50 ms)             │ → Event / history step
//! │ advance timers to wall clock │ → Event::Timer
//! │ pump worker responses        │ → Event::WorkerResponse
//! │ render if anything changed   │
//! └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```text
//! hirebox [PATH] [--offline]
//! ```
//!
//! `PATH` is the start route (`/`, `/about`, `/42`, ...). `--offline` serves the
//! sample postings from memory instead of the configured store.
//!
//! # Keybindings
//!
//! Listing, normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`: Open posting
//! - `/`: Enter search mode
//! - `a`, `p`, `t`, `h`: About, Privacy, Terms, home
//! - `Left`/`Right`: History back/forward
//! - `q`: Quit
//!
//! Listing, search mode:
//! - Characters: Edit query
//! - `Enter`: Jump to results (typing) or open posting (navigating)
//! - `/`: Return to search input
//! - `Esc`: Exit search
//!
//! Detail and static pages:
//! - `Enter`: Apply now, then open the apply link once ready
//! - `b`: Back to jobs
//!
//! `Ctrl+C` quits from anywhere.

#![allow(clippy::multiple_crate_versions)]

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::{cursor, execute, terminal};
use hirebox::app::{AppState, InputMode, SearchFocus, View};
use hirebox::infrastructure::config_file;
use hirebox::runtime::Environment;
use hirebox::store::fallback::sample_records;
use hirebox::store::MemoryStore;
use hirebox::{Config, DataGateway, Event, Runtime};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a key press asks for.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    App(Event),
    HistoryBack,
    HistoryForward,
}

struct Args {
    path: String,
    offline: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Args {
    let mut parsed = Args { path: "/".to_string(), offline: false };
    for arg in args {
        if arg == "--offline" {
            parsed.offline = true;
        } else if arg.starts_with('/') {
            parsed.path = arg;
        }
    }
    parsed
}

fn main() -> hirebox::Result<()> {
    let args = parse_args(std::env::args().skip(1));
    let config = Config::load(config_file().as_deref(), std::env::vars())?;
    hirebox::observability::init_tracing(&config);

    let span = tracing::info_span!("session", start_path = %args.path, offline = args.offline);
    let _guard = span.enter();

    let env = Environment::terminal(&args.path);
    let runtime = if args.offline {
        let gateway = DataGateway::new(Arc::new(MemoryStore::new(sample_records())));
        Runtime::new(hirebox::load_theme(&config), gateway, env)
    } else {
        hirebox::initialize(&config, env)
    };

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableBracketedPaste, cursor::Hide)?;

    let result = run(runtime, &mut stdout);

    execute!(stdout, cursor::Show, DisableBracketedPaste, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "session ended with error");
    }
    result
}

fn run(mut runtime: Runtime, stdout: &mut io::Stdout) -> hirebox::Result<()> {
    let started = Instant::now();
    runtime.start()?;
    draw(&runtime, stdout)?;

    while !runtime.is_quit() {
        let mut redraw = false;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    match map_key(runtime.state(), key) {
                        Some(Input::App(event)) => runtime.dispatch(&event)?,
                        Some(Input::HistoryBack) => runtime.back()?,
                        Some(Input::HistoryForward) => runtime.forward()?,
                        None => {}
                    }
                }
                TermEvent::Paste(text) => runtime.dispatch(&Event::SetQuery(text))?,
                TermEvent::Resize(..) => redraw = true,
                _ => {}
            }
        }

        runtime.advance_to(started.elapsed())?;
        runtime.pump_worker()?;

        if runtime.take_render() || redraw {
            draw(&runtime, stdout)?;
        }
    }

    Ok(())
}

fn draw(runtime: &Runtime, stdout: &mut io::Stdout) -> hirebox::Result<()> {
    let (cols, rows) = terminal::size()?;
    let frame = hirebox::ui::render(runtime.state(), usize::from(rows), usize::from(cols), chrono::Utc::now());
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Maps a key press to an input, given the mounted view and its mode.
fn map_key(state: &AppState, key: KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::App(Event::Quit));
    }

    match &state.view {
        Some(View::Listings(_)) => map_listing_key(state.input_mode(), key.code),
        Some(View::Detail(detail)) => match key.code {
            KeyCode::Enter if detail.gate.is_ready() => Some(Input::App(Event::OpenApplyLink)),
            KeyCode::Enter => Some(Input::App(Event::RequestApply)),
            other => map_global_key(other),
        },
        Some(View::Page(_)) | None => map_global_key(key.code),
    }
}

fn map_listing_key(mode: InputMode, code: KeyCode) -> Option<Input> {
    let event = match (mode, code) {
        (_, KeyCode::Down) => Event::KeyDown,
        (_, KeyCode::Up) => Event::KeyUp,
        (InputMode::Search(_), KeyCode::Esc) => Event::ExitSearch,

        (InputMode::Search(SearchFocus::Typing), KeyCode::Enter) => Event::FocusResults,
        (InputMode::Search(SearchFocus::Typing), KeyCode::Backspace) => Event::Backspace,
        (InputMode::Search(SearchFocus::Typing), KeyCode::Char(c)) => Event::Char(c),

        (InputMode::Search(SearchFocus::Navigating), KeyCode::Char('/')) => Event::FocusSearchBar,
        (InputMode::Search(SearchFocus::Navigating), KeyCode::Char('j')) => Event::KeyDown,
        (InputMode::Search(SearchFocus::Navigating), KeyCode::Char('k')) => Event::KeyUp,
        (InputMode::Search(SearchFocus::Navigating), KeyCode::Enter) => Event::SelectPosting,

        (InputMode::Normal, KeyCode::Char('j')) => Event::KeyDown,
        (InputMode::Normal, KeyCode::Char('k')) => Event::KeyUp,
        (InputMode::Normal, KeyCode::Enter) => Event::SelectPosting,
        (InputMode::Normal, KeyCode::Char('/')) => Event::SearchMode,
        (InputMode::Normal, other) => return map_global_key(other),

        _ => return None,
    };
    Some(Input::App(event))
}

/// Keys shared by every view outside search mode.
fn map_global_key(code: KeyCode) -> Option<Input> {
    let event = match code {
        KeyCode::Left => return Some(Input::HistoryBack),
        KeyCode::Right => return Some(Input::HistoryForward),
        KeyCode::Char('q') => Event::Quit,
        KeyCode::Char('b') => Event::Back,
        KeyCode::Char('a') => Event::Navigate("/about".to_string()),
        KeyCode::Char('p') => Event::Navigate("/privacy".to_string()),
        KeyCode::Char('t') => Event::Navigate("/terms".to_string()),
        KeyCode::Char('h') => Event::Navigate("/".to_string()),
        _ => return None,
    };
    Some(Input::App(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn args_take_path_and_offline_flag() {
        let args = parse_args(["--offline".to_string(), "/42".to_string()]);
        assert_eq!(args.path, "/42");
        assert!(args.offline);
    }

    #[test]
    fn typing_search_captures_letters() {
        let typing = InputMode::Search(SearchFocus::Typing);
        assert_eq!(map_listing_key(typing, KeyCode::Char('q')), Some(Input::App(Event::Char('q'))));
        assert_eq!(map_listing_key(InputMode::Normal, KeyCode::Char('q')), Some(Input::App(Event::Quit)));
    }

    #[test]
    fn enter_on_detail_depends_on_gate() {
        let mut state = AppState::new("/13", hirebox::Theme::default());
        let _ = state.mount_current();
        assert_eq!(map_key(&state, key(KeyCode::Enter)), Some(Input::App(Event::RequestApply)));
        assert_eq!(map_key(&state, key(KeyCode::Left)), Some(Input::HistoryBack));
    }
}

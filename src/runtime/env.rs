//! Browsing-environment collaborators.
//!
//! The core never reaches for globals. Navigation history, analytics, document
//! metadata and link opening are injected as trait objects and bundled in an
//! [`Environment`]. Apart from history, every collaborator is fire-and-forget:
//! the runtime logs and drops its errors.

use crate::app::{AnalyticsEvent, DocumentMeta};
use crate::app::router::ROOT_PATH;
use crate::domain::error::{HireBoxError, Result};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Addressable navigation history.
pub trait History {
    /// Path of the current entry.
    fn current_path(&self) -> String;

    /// Appends `path` after the current entry, discarding any forward entries.
    ///
    /// # Errors
    ///
    /// Implementations backed by an external environment may fail.
    fn push(&mut self, path: &str) -> Result<()>;

    /// Steps back. Returns the new current path, or `None` at the first entry.
    fn back(&mut self) -> Option<String>;

    /// Steps forward. Returns the new current path, or `None` at the last entry.
    fn forward(&mut self) -> Option<String>;
}

/// Receives apply click and redirect notifications.
pub trait Analytics {
    /// # Errors
    ///
    /// Delivery failures; the runtime ignores them.
    fn track(&mut self, event: &AnalyticsEvent) -> Result<()>;
}

/// Receives the title and description of each mounted view.
pub trait DocumentMetadata {
    /// # Errors
    ///
    /// Delivery failures; the runtime ignores them.
    fn set(&mut self, meta: &DocumentMeta) -> Result<()>;
}

/// Opens external URLs in a new browsing context.
pub trait LinkOpener {
    /// # Errors
    ///
    /// Launch failures; the runtime ignores them.
    fn open(&mut self, url: &str) -> Result<()>;
}

/// In-process history stack with back/forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial_path: &str) -> Self {
        Self { entries: vec![initial_path.to_string()], index: 0 }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(ROOT_PATH)
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, path: &str) -> Result<()> {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
        Ok(())
    }

    fn back(&mut self) -> Option<String> {
        self.index = self.index.checked_sub(1)?;
        Some(self.current_path())
    }

    fn forward(&mut self) -> Option<String> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current_path())
    }
}

/// Collaborator that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Noop;

impl Analytics for Noop {
    fn track(&mut self, _event: &AnalyticsEvent) -> Result<()> {
        Ok(())
    }
}

impl DocumentMetadata for Noop {
    fn set(&mut self, _meta: &DocumentMeta) -> Result<()> {
        Ok(())
    }
}

impl LinkOpener for Noop {
    fn open(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }
}

/// Analytics sink that emits each event as a structured log record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&mut self, event: &AnalyticsEvent) -> Result<()> {
        tracing::info!(
            target: "hirebox::analytics",
            event = event.kind.as_str(),
            label = %event.label,
            value = event.value,
            "analytics event"
        );
        Ok(())
    }
}

/// Publishes the document title as the terminal window title.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalTitle;

impl DocumentMetadata for TerminalTitle {
    fn set(&mut self, meta: &DocumentMeta) -> Result<()> {
        let mut stdout = std::io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::SetTitle(&meta.title))?;
        stdout.flush()?;
        Ok(())
    }
}

/// Opens URLs with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            std::process::Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut command = std::process::Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        } else {
            std::process::Command::new("xdg-open")
        };

        command.arg(url);
        spawn_reaped(command).map_err(|e| HireBoxError::Collaborator(format!("failed to open {url}: {e}")))?;
        Ok(())
    }
}

/// Spawns `command` with null stdio and waits for it on a detached thread, so
/// the child never lingers as a zombie.
fn spawn_reaped(mut command: std::process::Command) -> std::io::Result<std::thread::JoinHandle<()>> {
    let mut child = command
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;

    std::thread::Builder::new().name("hirebox-opener".to_string()).spawn(move || match child.wait() {
        Ok(status) if !status.success() => tracing::debug!(%status, "link opener exited with failure"),
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "failed to wait for link opener"),
    })
}

/// Collaborator that records every call, for inspection after the fact.
///
/// Clones share the same log.
#[derive(Debug, Clone)]
pub struct Recorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> Recorder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { calls: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Snapshot of recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: T) -> Result<()> {
        self.calls
            .lock()
            .map_err(|_| HireBoxError::Collaborator("recorder poisoned".to_string()))?
            .push(call);
        Ok(())
    }
}

impl Analytics for Recorder<AnalyticsEvent> {
    fn track(&mut self, event: &AnalyticsEvent) -> Result<()> {
        self.record(event.clone())
    }
}

impl DocumentMetadata for Recorder<DocumentMeta> {
    fn set(&mut self, meta: &DocumentMeta) -> Result<()> {
        self.record(meta.clone())
    }
}

impl LinkOpener for Recorder<String> {
    fn open(&mut self, url: &str) -> Result<()> {
        self.record(url.to_string())
    }
}

/// The injected collaborators a runtime drives.
pub struct Environment {
    pub history: Box<dyn History>,
    pub analytics: Box<dyn Analytics>,
    pub metadata: Box<dyn DocumentMetadata>,
    pub links: Box<dyn LinkOpener>,
}

impl Environment {
    /// In-memory history at `initial_path` and no-op collaborators.
    #[must_use]
    pub fn headless(initial_path: &str) -> Self {
        Self {
            history: Box::new(MemoryHistory::new(initial_path)),
            analytics: Box::new(Noop),
            metadata: Box::new(Noop),
            links: Box::new(Noop),
        }
    }

    /// Collaborators for the interactive terminal binary.
    #[must_use]
    pub fn terminal(initial_path: &str) -> Self {
        Self {
            history: Box::new(MemoryHistory::new(initial_path)),
            analytics: Box::new(TracingAnalytics),
            metadata: Box::new(TerminalTitle),
            links: Box::new(SystemBrowser),
        }
    }

    #[must_use]
    pub fn with_analytics(mut self, analytics: impl Analytics + 'static) -> Self {
        self.analytics = Box::new(analytics);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: impl DocumentMetadata + 'static) -> Self {
        self.metadata = Box::new(metadata);
        self
    }

    #[must_use]
    pub fn with_links(mut self, links: impl LinkOpener + 'static) -> Self {
        self.links = Box::new(links);
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: impl History + 'static) -> Self {
        self.history = Box::new(history);
        self
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("path", &self.history.current_path())
            .finish_non_exhaustive()
    }
}

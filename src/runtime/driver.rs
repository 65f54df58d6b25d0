//! Action executor and event pump.
//!
//! [`Runtime`] owns the [`AppState`], the [`TimerQueue`], the [`FetchWorker`]
//! and the injected [`Environment`]. Every event goes through
//! [`Runtime::dispatch`], which runs [`handle_event`] and then executes the
//! returned actions in order before returning. Events are therefore processed
//! one at a time, and a timer cancelled by one event can never fire in a later
//! one.
//!
//! Time only moves when the owner calls [`Runtime::advance`] or
//! [`Runtime::advance_to`]; the terminal binary drives it from a wall clock,
//! tests drive it directly.

use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::runtime::env::{Environment, History};
use crate::runtime::timer::TimerQueue;
use crate::store::DataGateway;
use crate::ui::Theme;
use crate::worker::FetchWorker;
use std::time::{Duration, Instant};

/// Drives the application against its collaborators.
#[derive(Debug)]
pub struct Runtime {
    state: AppState,
    timers: TimerQueue,
    worker: FetchWorker,
    env: Environment,
    needs_render: bool,
    quit: bool,
}

impl Runtime {
    /// Creates a runtime at the environment's current path. Call
    /// [`Runtime::start`] to mount the first view.
    #[must_use]
    pub fn new(theme: Theme, gateway: DataGateway, env: Environment) -> Self {
        let path = env.history.current_path();
        Self {
            state: AppState::new(&path, theme),
            timers: TimerQueue::new(),
            worker: FetchWorker::new(gateway),
            env,
            needs_render: false,
            quit: false,
        }
    }

    /// Mounts the view for the initial path.
    ///
    /// # Errors
    ///
    /// Propagates worker failures.
    pub fn start(&mut self) -> Result<()> {
        self.dispatch(&Event::Start)
    }

    /// Handles one event and executes its actions.
    ///
    /// # Errors
    ///
    /// Propagates handler and worker failures. Collaborator failures are
    /// logged and never returned.
    pub fn dispatch(&mut self, event: &Event) -> Result<()> {
        let (render, actions) = handle_event(&mut self.state, event)?;
        self.needs_render |= render;
        for action in actions {
            self.execute(action)?;
        }
        Ok(())
    }

    fn execute(&mut self, action: Action) -> Result<()> {
        match action {
            Action::PushHistory(path) => {
                if let Err(e) = self.env.history.push(&path) {
                    tracing::warn!(error = %e, path = %path, "history push failed");
                }
            }
            Action::PostToWorker(message) => self.worker.post(message)?,
            Action::ScheduleTimer { id, after, repeat } => self.timers.schedule(id, after, repeat),
            Action::CancelTimer(id) => {
                self.timers.cancel(id);
            }
            Action::Track(event) => {
                if let Err(e) = self.env.analytics.track(&event) {
                    tracing::warn!(error = %e, event = event.kind.as_str(), "analytics delivery failed");
                }
            }
            Action::SetMetadata(meta) => {
                if let Err(e) = self.env.metadata.set(&meta) {
                    tracing::warn!(error = %e, title = %meta.title, "metadata update failed");
                }
            }
            Action::OpenLink(url) => {
                tracing::info!(url = %url, "opening apply link");
                if let Err(e) = self.env.links.open(&url) {
                    tracing::warn!(error = %e, url = %url, "link open failed");
                }
            }
            Action::Quit => self.quit = true,
        }
        Ok(())
    }

    /// Advances virtual time by `by`, firing every timer due on the way.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures.
    pub fn advance(&mut self, by: Duration) -> Result<()> {
        self.advance_to(self.timers.now() + by)
    }

    /// Advances virtual time to `until`, measured from runtime creation.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures.
    pub fn advance_to(&mut self, until: Duration) -> Result<()> {
        while let Some(id) = self.timers.pop_due(until) {
            self.dispatch(&Event::Timer(id))?;
        }
        self.timers.settle(until);
        Ok(())
    }

    /// Delivers every worker response that has already arrived.
    ///
    /// Returns the number delivered.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures.
    pub fn pump_worker(&mut self) -> Result<usize> {
        let responses = self.worker.drain();
        let count = responses.len();
        for response in responses {
            self.dispatch(&Event::WorkerResponse(response))?;
        }
        Ok(count)
    }

    /// Blocks until every in-flight fetch is delivered or `timeout` elapses.
    ///
    /// Returns whether the worker went idle.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures.
    pub fn wait_for_worker(&mut self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        while self.worker.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(false);
            }
            if let Some(response) = self.worker.recv_timeout(remaining) {
                self.dispatch(&Event::WorkerResponse(response))?;
            }
        }
        Ok(true)
    }

    /// Steps history back and follows the path change.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures.
    pub fn back(&mut self) -> Result<()> {
        match self.env.history.back() {
            Some(path) => self.dispatch(&Event::PathChanged(path)),
            None => Ok(()),
        }
    }

    /// Steps history forward and follows the path change.
    ///
    /// # Errors
    ///
    /// Propagates dispatch failures.
    pub fn forward(&mut self) -> Result<()> {
        match self.env.history.forward() {
            Some(path) => self.dispatch(&Event::PathChanged(path)),
            None => Ok(()),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    #[must_use]
    pub fn history(&self) -> &dyn History {
        self.env.history.as_ref()
    }

    /// Virtual time since creation.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    #[must_use]
    pub const fn is_quit(&self) -> bool {
        self.quit
    }

    /// Returns and clears the pending re-render flag.
    pub fn take_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }
}

//! Fetch worker implementation.
//!
//! [`PostingWorker`] turns a [`WorkerMessage`] into a [`WorkerResponse`] by
//! calling the [`DataGateway`]; it is synchronous and easy to test on its own.
//! [`FetchWorker`] runs it off the event loop: each posted message gets its own
//! thread, so requests never wait on one another, and responses come back over
//! a channel that the event loop drains between events.

use crate::domain::error::{HireBoxError, Result};
use crate::store::DataGateway;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Synchronous message handler over a [`DataGateway`].
#[derive(Debug, Clone)]
pub struct PostingWorker {
    gateway: DataGateway,
}

impl PostingWorker {
    #[must_use]
    pub const fn new(gateway: DataGateway) -> Self {
        Self { gateway }
    }

    /// Attaches the parent trace context carried by a message to this thread.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::ListPostings { request, .. } => {
                let fetched = self.gateway.list_postings();
                WorkerResponse::PostingsListed {
                    request,
                    postings: fetched.value,
                    origin: fetched.origin,
                }
            }
            WorkerMessage::GetPosting { request, id, .. } => {
                let fetched = self.gateway.get_posting(id);
                WorkerResponse::PostingFetched {
                    request,
                    id,
                    posting: fetched.value,
                    origin: fetched.origin,
                }
            }
        }
    }
}

/// Background fetch worker with a response channel.
#[derive(Debug)]
pub struct FetchWorker {
    worker: PostingWorker,
    responses_tx: Sender<WorkerResponse>,
    responses_rx: Receiver<WorkerResponse>,
    in_flight: usize,
}

impl FetchWorker {
    #[must_use]
    pub fn new(gateway: DataGateway) -> Self {
        let (responses_tx, responses_rx) = mpsc::channel();
        Self {
            worker: PostingWorker::new(gateway),
            responses_tx,
            responses_rx,
            in_flight: 0,
        }
    }

    /// Runs `message` on a new thread.
    ///
    /// # Errors
    ///
    /// Returns [`HireBoxError::Worker`] if the thread cannot be spawned.
    pub fn post(&mut self, message: WorkerMessage) -> Result<()> {
        let worker = self.worker.clone();
        let tx = self.responses_tx.clone();
        let request = message.request();

        std::thread::Builder::new()
            .name(format!("hirebox-fetch-{}", request.0))
            .spawn(move || {
                let response = worker.handle_message(message);
                if tx.send(response).is_err() {
                    tracing::debug!(request = request.0, "event loop gone, dropping response");
                }
            })
            .map_err(|e| HireBoxError::Worker(format!("failed to spawn fetch thread: {e}")))?;

        self.in_flight += 1;
        tracing::debug!(request = request.0, in_flight = self.in_flight, "fetch posted");
        Ok(())
    }

    /// Number of posted requests whose response has not been received.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns every response that has already arrived.
    pub fn drain(&mut self) -> Vec<WorkerResponse> {
        let mut responses = Vec::new();
        loop {
            match self.responses_rx.try_recv() {
                Ok(response) => responses.push(response),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        self.in_flight = self.in_flight.saturating_sub(responses.len());
        responses
    }

    /// Waits up to `timeout` for the next response.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<WorkerResponse> {
        match self.responses_rx.recv_timeout(timeout) {
            Ok(response) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(response)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

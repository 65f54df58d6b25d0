//! Fetch worker message types.
//!
//! This module defines the request and response protocol between the event loop
//! and the background fetch worker. Every request carries the [`RequestId`] of
//! the view mount that issued it, so a response arriving after that view has
//! been replaced can be recognised and dropped. Requests also carry a
//! [`TraceContext`] so worker-thread spans join the caller's trace.

use crate::domain::Posting;
use crate::store::DataOrigin;
use serde::{Deserialize, Serialize};

/// Identifies one view mount's fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is otherwise invalid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    list_postings(ListPostings { request: RequestId }),
    get_posting(GetPosting { request: RequestId, id: i64 }),
}

/// Requests sent from the event loop to the fetch worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch the full posting list.
    ListPostings {
        /// Mount that issued the request.
        request: RequestId,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch one posting by id.
    GetPosting {
        /// Mount that issued the request.
        request: RequestId,

        /// Identifier parsed from the route.
        id: i64,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// The mount that issued this request.
    #[must_use]
    pub const fn request(&self) -> RequestId {
        match self {
            Self::ListPostings { request, .. } | Self::GetPosting { request, .. } => *request,
        }
    }

    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ListPostings { trace_context, .. } | Self::GetPosting { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the fetch worker back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The posting list, in store order.
    PostingsListed {
        request: RequestId,
        postings: Vec<Posting>,
        origin: DataOrigin,
    },

    /// A single posting lookup finished; `None` means the store has no such id.
    PostingFetched {
        request: RequestId,
        id: i64,
        posting: Option<Posting>,
        origin: DataOrigin,
    },
}

impl WorkerResponse {
    /// The mount this response answers.
    #[must_use]
    pub const fn request(&self) -> RequestId {
        match self {
            Self::PostingsListed { request, .. } | Self::PostingFetched { request, .. } => *request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_carry_request_id() {
        let message = WorkerMessage::get_posting(RequestId(3), 42);
        assert_eq!(message.request(), RequestId(3));
        assert!(matches!(message, WorkerMessage::GetPosting { id: 42, .. }));
    }

    #[test]
    fn trace_context_is_omitted_when_absent() {
        let message = WorkerMessage::ListPostings {
            request: RequestId(1),
            trace_context: None,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
    }
}

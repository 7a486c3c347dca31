//! Distributed trace context structures.
//!
//! This module defines the values produced by extraction:
//! - **`SpanContext`**: trace ID, span ID, sampling decision and tags of a remote span
//! - **`Sampling`**: the sampling decision carried by the incoming header
//! - **`Context`**: the immutable parent handed to span-creation logic, either the
//!   root context or one wrapping an extracted remote `SpanContext`
//!
//! # Usage
//!
//! ```text
//! Incoming message attributes
//!   ↓
//! Extract SpanContext (from AWSTraceHeader / traceparent)
//!   ↓
//! Context (root, or remote parent)
//!   ↓
//! Span creation reads Context as "the parent"
//! ```

use std::{collections::HashMap, sync::Arc};

/// Sampling decision propagated with a trace.
///
/// An absent `Sampling` on a `SpanContext` means the upstream did not decide,
/// and downstream sampling should apply its own default policy.
///
/// # Example
///
/// ```
/// use datadog_trace_propagation::traces::context::Sampling;
///
/// let sampling = Sampling { sampled: true };
/// assert!(sampling.sampled);
/// ```
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct Sampling {
    /// Whether the originating system recorded this trace.
    pub sampled: bool,
}

/// Trace context of a span, usually one received from a remote process.
///
/// # Core Identity
///
/// - **`trace_id`**: 128-bit identifier shared by every span in the distributed trace
/// - **`span_id`**: 64-bit identifier of the span that becomes the parent
///
/// # Example
///
/// ```
/// use datadog_trace_propagation::traces::context::{Sampling, SpanContext};
/// use std::collections::HashMap;
///
/// let context = SpanContext {
///     trace_id: 0x5759_e988_bd86_2e3f_e1be_46a9_9427_2793,
///     span_id: 0x5399_5c3f_42cd_8ad8,
///     sampling: Some(Sampling { sampled: true }),
///     is_remote: true,
///     tags: HashMap::new(),
/// };
///
/// assert_eq!(context.trace_id_hex(), "5759e988bd862e3fe1be46a994272793");
/// assert_eq!(context.span_id_hex(), "53995c3f42cd8ad8");
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct SpanContext {
    /// 128-bit trace identifier. Zero is never produced by extraction.
    pub trace_id: u128,
    /// 64-bit span identifier. Zero is never produced by extraction.
    pub span_id: u64,
    /// Sampling decision from the carrier, `None` when the carrier had none.
    pub sampling: Option<Sampling>,
    /// `true` when this context was decoded from a carrier rather than created locally.
    pub is_remote: bool,
    /// Format-specific values kept alongside the identifiers (e.g. `tracestate`).
    pub tags: HashMap<String, String>,
}

impl SpanContext {
    /// Trace ID as 32 lowercase hex characters.
    #[must_use]
    pub fn trace_id_hex(&self) -> String {
        format!("{:032x}", self.trace_id)
    }

    /// Span ID as 16 lowercase hex characters.
    #[must_use]
    pub fn span_id_hex(&self) -> String {
        format!("{:016x}", self.span_id)
    }

    /// Trace ID in X-Ray form: `1-{8 hex epoch}-{24 hex unique}`.
    #[must_use]
    pub fn xray_trace_id(&self) -> String {
        let hex = self.trace_id_hex();
        format!("1-{}-{}", &hex[..8], &hex[8..])
    }

    /// `Some(true)` / `Some(false)` when the carrier decided, `None` otherwise.
    #[must_use]
    pub fn is_sampled(&self) -> Option<bool> {
        self.sampling.map(|s| s.sampled)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.trace_id != 0 && self.span_id != 0
    }
}

/// The parent context used when creating spans.
///
/// A `Context` is either the root context (no ancestry) or carries an
/// extracted remote `SpanContext`. It is immutable once built and cheap to
/// clone: clones share the same `SpanContext` allocation, so it can be handed
/// to any number of readers and threads.
///
/// # Example
///
/// ```
/// use datadog_trace_propagation::traces::context::{Context, SpanContext};
///
/// assert!(Context::root().is_root());
///
/// let remote = Context::with_remote_parent(SpanContext {
///     trace_id: 1,
///     span_id: 2,
///     ..SpanContext::default()
/// });
/// assert_eq!(remote.span_context().map(|sc| sc.span_id), Some(2));
/// assert!(remote.span_context().is_some_and(|sc| sc.is_remote));
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Context {
    span_context: Option<Arc<SpanContext>>,
}

impl Context {
    /// The context with no parent.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Wraps `span_context` as a remote parent. The `is_remote` flag is forced on.
    #[must_use]
    pub fn with_remote_parent(mut span_context: SpanContext) -> Self {
        span_context.is_remote = true;
        Self {
            span_context: Some(Arc::new(span_context)),
        }
    }

    /// Turns the outcome of an extraction into a context, `None` becomes root.
    #[must_use]
    pub fn from_extracted(span_context: Option<SpanContext>) -> Self {
        span_context.map_or_else(Self::root, Self::with_remote_parent)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.span_context.is_none()
    }

    /// The remote parent, if any.
    #[must_use]
    pub fn span_context(&self) -> Option<&SpanContext> {
        self.span_context.as_deref()
    }
}

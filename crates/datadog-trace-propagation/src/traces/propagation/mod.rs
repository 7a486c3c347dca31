//! Distributed trace context propagation for connecting traces across service boundaries.
//!
//! This module implements the extraction side of propagation: reading trace
//! context from an incoming carrier (message attributes, HTTP headers) so that
//! new spans can be parented to the remote span that produced the message.
//!
//! # Propagation Styles
//!
//! - **AWS X-Ray**: the `X-Amzn-Trace-Id` header (`Root=...;Parent=...;Sampled=...`)
//! - **W3C TraceContext**: `traceparent` / `tracestate`
//!
//! Every style implements [`Propagator`] and produces the same
//! [`SpanContext`] shape, so callers never depend on which format was used.
//!
//! # Trace Context Flow
//!
//! ```text
//! Carrier (attributes / headers)
//!   ↓
//! Propagator::extract (decode one format, fail open)
//!   ↓
//! Option<SpanContext>
//!   ↓
//! Context (remote parent, or root)
//! ```
//!
//! # Example: Extracting Trace Context
//!
//! ```
//! use std::collections::HashMap;
//! use datadog_trace_propagation::traces::context::Context;
//! use datadog_trace_propagation::traces::propagation::{
//!     text_map_propagator::AwsXrayPropagator, Propagator,
//! };
//!
//! let headers = HashMap::from([(
//!     "X-Amzn-Trace-Id".to_string(),
//!     "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1".to_string(),
//! )]);
//!
//! let context = AwsXrayPropagator.extract_with_context(&Context::root(), &headers);
//! assert!(!context.is_root());
//! ```

use std::sync::Arc;

use crate::{
    config::{self, trace_propagation_style::TracePropagationStyle},
    traces::context::{Context, SpanContext},
};
use carrier::Extractor;

pub mod carrier;
pub mod error;
pub mod text_map_propagator;

/// Trait for extracting distributed trace context from a carrier.
///
/// # Thread Safety
///
/// Propagators hold no state; the boxed ones used by [`CompositePropagator`]
/// are `Send + Sync`.
pub trait Propagator {
    /// Extracts trace context from a carrier.
    ///
    /// # Returns
    ///
    /// `Some(SpanContext)` if valid trace context was found, `None` otherwise.
    /// Malformed input is never an error for the caller.
    fn extract(&self, carrier: &dyn Extractor) -> Option<SpanContext>;

    /// Extracts trace context and wraps it as the remote parent.
    ///
    /// Returns `cx` unchanged when the carrier holds no usable context, or when
    /// the extracted trace or span id is zero. Pass `Context::root()` to get
    /// the root context in that case.
    fn extract_with_context(&self, cx: &Context, carrier: &dyn Extractor) -> Context {
        match self.extract(carrier).filter(SpanContext::is_valid) {
            Some(span_context) => Context::with_remote_parent(span_context),
            None => cx.clone(),
        }
    }
}

/// Propagator chaining the styles configured for extraction.
///
/// Styles are tried in `trace_propagation_style_extract` order and the first
/// one that yields a context wins. `None` entries contribute no propagator.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use datadog_trace_propagation::config::{
///     trace_propagation_style::TracePropagationStyle, Config,
/// };
/// use datadog_trace_propagation::traces::propagation::CompositePropagator;
///
/// let config = Arc::new(Config {
///     trace_propagation_style_extract: vec![
///         TracePropagationStyle::XRay,
///         TracePropagationStyle::TraceContext,
///     ],
///     ..Default::default()
/// });
///
/// let propagator = CompositePropagator::new(config);
/// assert_eq!(propagator.styles(), &[TracePropagationStyle::XRay, TracePropagationStyle::TraceContext]);
/// ```
pub struct CompositePropagator {
    /// Configured propagators in extraction order, paired with their style.
    propagators: Vec<(TracePropagationStyle, Box<dyn Propagator + Send + Sync>)>,
    styles: Vec<TracePropagationStyle>,
}

impl Propagator for CompositePropagator {
    fn extract(&self, carrier: &dyn Extractor) -> Option<SpanContext> {
        self.propagators.iter().find_map(|(style, propagator)| {
            let context = propagator.extract(carrier);
            if context.is_some() {
                tracing::trace!("Extracted trace context using {style} propagation");
            }
            context
        })
    }
}

impl CompositePropagator {
    /// Creates a composite propagator from the configured extraction styles.
    #[must_use]
    pub fn new(config: Arc<config::Config>) -> Self {
        let propagators: Vec<(TracePropagationStyle, Box<dyn Propagator + Send + Sync>)> = config
            .trace_propagation_style_extract
            .iter()
            .filter_map(|style| match style {
                TracePropagationStyle::XRay => Some((
                    *style,
                    Box::new(text_map_propagator::AwsXrayPropagator)
                        as Box<dyn Propagator + Send + Sync>,
                )),
                TracePropagationStyle::TraceContext => Some((
                    *style,
                    Box::new(text_map_propagator::TraceContextPropagator)
                        as Box<dyn Propagator + Send + Sync>,
                )),
                TracePropagationStyle::None => None,
            })
            .collect();

        let styles = propagators.iter().map(|(style, _)| *style).collect();

        Self {
            propagators,
            styles,
        }
    }

    /// Styles that contribute a propagator, in extraction order.
    #[must_use]
    pub fn styles(&self) -> &[TracePropagationStyle] {
        &self.styles
    }
}

//! # Datadog Trace Propagation
//!
//! Resolves the parent trace context of messages consumed from Amazon SQS.
//!
//! ## Overview
//!
//! Producers instrumented with AWS X-Ray attach their trace context to SQS
//! messages through the `AWSTraceHeader` system attribute. This crate reads
//! that attribute, decodes the X-Ray header it holds and returns a
//! [`traces::context::Context`] whose remote parent is the producing span, or
//! the root context when nothing usable is present.
//!
//! ## Architecture
//!
//! - [`traces`]: Context model, propagators and the SQS entry point
//! - [`config`]: Log level and extraction styles from `datadog.yaml` and `DD_*` variables
//! - [`logger`]: Prefixed log formatter and subscriber setup
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use datadog_trace_propagation::traces::sqs::SqsParentContext;
//!
//! let attributes = HashMap::from([(
//!     "AWSTraceHeader".to_string(),
//!     "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1".to_string(),
//! )]);
//!
//! let parent = SqsParentContext::of_system_attributes(&attributes);
//! assert_eq!(
//!     parent.span_context().map(|sc| sc.xray_trace_id()),
//!     Some("1-5759e988-bd862e3fe1be46a994272793".to_string())
//! );
//! ```

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

/// Configuration loading from YAML and environment variables
pub mod config;

/// Log formatting and subscriber initialization
pub mod logger;

/// Trace context model, propagators and SQS parent resolution
pub mod traces;

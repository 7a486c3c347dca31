// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Trace context extraction for consumed messages.
//!
//! # Components
//!
//! - **`context`**: `SpanContext`, `Sampling` and the immutable parent `Context`
//! - **`propagation`**: carrier traits and the X-Ray / W3C TraceContext propagators
//! - **`sqs`**: the SQS entry point reading the `AWSTraceHeader` system attribute
//!
//! # Flow
//!
//! ```text
//! SQS message system attributes
//!   ↓
//! SqsParentContext (re-keys AWSTraceHeader → X-Amzn-Trace-Id)
//!   ↓
//! AwsXrayPropagator (decodes Root / Parent / Sampled)
//!   ↓
//! Context (remote parent, or root)
//! ```

pub mod context;
pub mod propagation;
pub mod sqs;

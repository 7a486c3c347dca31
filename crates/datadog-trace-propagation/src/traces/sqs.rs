//! Parent context resolution for messages received from Amazon SQS.
//!
//! SQS does not carry trace context natively. Producers instrumented with AWS
//! X-Ray store the X-Ray trace header in the `AWSTraceHeader` message system
//! attribute, using the same grammar as the `X-Amzn-Trace-Id` HTTP header.
//! [`SqsParentContext`] reads that one attribute and decodes it with the
//! [`AwsXrayPropagator`].
//!
//! ```text
//! SQS system attributes {"AWSTraceHeader": "Root=...;Parent=...;Sampled=1", ...}
//!   ↓ re-key the single attribute
//! SingleEntryCarrier {"X-Amzn-Trace-Id": "Root=...;Parent=...;Sampled=1"}
//!   ↓ AwsXrayPropagator
//! Context (remote parent, or root)
//! ```

use serde_json::Value;

use crate::traces::{
    context::Context,
    propagation::{
        carrier::{Extractor, SingleEntryCarrier},
        text_map_propagator::{AwsXrayPropagator, AWS_XRAY_TRACE_HEADER_KEY},
        Propagator,
    },
};

/// SQS message system attribute holding the X-Ray trace header.
pub const AWS_TRACE_SYSTEM_ATTRIBUTE: &str = "AWSTraceHeader";

/// Key of the system attribute map inside an SQS record of a Lambda event.
const SQS_RECORD_ATTRIBUTES_KEY: &str = "attributes";

/// Resolves the parent `Context` of an SQS message.
///
/// Every call is independent: no state is kept, nothing is copied from the
/// attribute map, and the result is the root context whenever the
/// `AWSTraceHeader` attribute is missing or unusable.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use datadog_trace_propagation::traces::sqs::SqsParentContext;
///
/// let attributes = HashMap::from([(
///     "AWSTraceHeader".to_string(),
///     "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1".to_string(),
/// )]);
///
/// let context = SqsParentContext::of_system_attributes(&attributes);
/// let parent = context.span_context().expect("remote parent");
/// assert_eq!(parent.trace_id_hex(), "5759e988bd862e3fe1be46a994272793");
///
/// assert!(SqsParentContext::of_system_attributes(&HashMap::new()).is_root());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SqsParentContext;

impl SqsParentContext {
    /// Parent context from a message's system attributes.
    #[must_use]
    pub fn of_system_attributes(system_attributes: &dyn Extractor) -> Context {
        let trace_header = system_attributes.get(AWS_TRACE_SYSTEM_ATTRIBUTE);
        let carrier = SingleEntryCarrier::new(AWS_XRAY_TRACE_HEADER_KEY, trace_header);

        AwsXrayPropagator.extract_with_context(&Context::root(), &carrier)
    }

    /// Parent context from an SQS record in Lambda event JSON shape.
    ///
    /// The system attributes are read from the record's `attributes` object;
    /// a record without one resolves to the root context.
    ///
    /// ```
    /// use serde_json::json;
    /// use datadog_trace_propagation::traces::sqs::SqsParentContext;
    ///
    /// let record = json!({
    ///     "messageId": "059f36b4-87a3-44ab-83d2-661975830a7d",
    ///     "attributes": {
    ///         "AWSTraceHeader": "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=0",
    ///         "ApproximateReceiveCount": "1"
    ///     }
    /// });
    ///
    /// let context = SqsParentContext::of_message_json(&record);
    /// assert_eq!(context.span_context().and_then(|sc| sc.is_sampled()), Some(false));
    /// ```
    #[must_use]
    pub fn of_message_json(record: &Value) -> Context {
        match record.get(SQS_RECORD_ATTRIBUTES_KEY) {
            Some(attributes) => Self::of_system_attributes(attributes),
            None => Context::root(),
        }
    }
}

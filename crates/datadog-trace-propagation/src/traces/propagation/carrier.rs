//! Carrier traits for trace context propagation.
//!
//! Carriers provide a read-only view over the different transport mechanisms
//! (SQS system attributes, HTTP headers, JSON event payloads) that trace context
//! travels in across service boundaries.
//!
//! # Carrier Types
//!
//! This module implements carriers for:
//! - **HashMap** / **BTreeMap**: Message attribute maps and in-memory headers
//! - **serde_json::Value**: JSON-based message formats (e.g. Lambda SQS events)
//! - **SingleEntryCarrier**: A borrowed one-key view used to re-key a single value
//!
//! # Key Matching
//!
//! `Extractor::get` is an exact lookup, message attribute names are case
//! sensitive. Propagators that read HTTP-style header keys go through
//! [`get_ignore_ascii_case`], which falls back to scanning `keys()`.
//!
//! # Inspired By
//!
//! Code inspired and adapted from the OpenTelemetry Rust project:
//! <https://github.com/open-telemetry/opentelemetry-rust/blob/main/opentelemetry/src/propagation/mod.rs>

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

/// Trait for extracting trace context from a carrier.
///
/// Extractors provide a generic interface for reading trace context from
/// various transport mechanisms like message attributes or HTTP headers,
/// without the propagator knowing the concrete container type.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use datadog_trace_propagation::traces::propagation::carrier::Extractor;
///
/// let attributes = HashMap::from([("AWSTraceHeader".to_string(), "Root=...".to_string())]);
///
/// assert_eq!(Extractor::get(&attributes, "AWSTraceHeader"), Some("Root=..."));
/// assert_eq!(Extractor::get(&attributes, "SenderId"), None);
/// ```
pub trait Extractor {
    /// Gets a value from the carrier by key.
    ///
    /// # Returns
    ///
    /// `Some(&str)` if the key exists, `None` otherwise. A missing key is a
    /// normal outcome, not an error.
    fn get(&self, key: &str) -> Option<&str>;

    /// Gets all keys present in the carrier. Order is not significant.
    fn keys(&self) -> Vec<&str>;
}

/// Looks up `key` ignoring ASCII case.
///
/// Tries an exact lookup first and only scans the carrier keys when that
/// misses, so well-formed carriers never pay for the scan.
pub fn get_ignore_ascii_case<'a>(carrier: &'a dyn Extractor, key: &str) -> Option<&'a str> {
    if let Some(value) = carrier.get(key) {
        return Some(value);
    }

    carrier
        .keys()
        .into_iter()
        .find(|k| k.eq_ignore_ascii_case(key))
        .and_then(|k| carrier.get(k))
}

impl<S: std::hash::BuildHasher> Extractor for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect::<Vec<_>>()
    }
}

impl Extractor for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect::<Vec<_>>()
    }
}

/// `Extractor` implementation for `serde_json::Value`.
///
/// Only `Value::Object` variants act as carriers, and only string members are
/// visible through `get`. Non-object values return `None`.
impl Extractor for Value {
    fn get(&self, key: &str) -> Option<&str> {
        if let Value::Object(map) = self {
            map.get(key).and_then(Value::as_str)
        } else {
            None
        }
    }

    fn keys(&self) -> Vec<&str> {
        if let Value::Object(map) = self {
            map.keys().map(String::as_str).collect::<Vec<_>>()
        } else {
            Vec::new()
        }
    }
}

/// A carrier holding at most one borrowed key/value pair.
///
/// Used to hand a single attribute to a propagator under the key the
/// propagator expects, without copying the attribute map it came from.
///
/// # Example
///
/// ```
/// use datadog_trace_propagation::traces::propagation::carrier::{Extractor, SingleEntryCarrier};
///
/// let carrier = SingleEntryCarrier::new("X-Amzn-Trace-Id", Some("Root=..."));
/// assert_eq!(carrier.get("X-Amzn-Trace-Id"), Some("Root=..."));
///
/// let empty = SingleEntryCarrier::new("X-Amzn-Trace-Id", None);
/// assert!(empty.keys().is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleEntryCarrier<'a> {
    key: &'a str,
    value: Option<&'a str>,
}

impl<'a> SingleEntryCarrier<'a> {
    #[must_use]
    pub fn new(key: &'a str, value: Option<&'a str>) -> Self {
        Self { key, value }
    }
}

impl Extractor for SingleEntryCarrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        if key == self.key {
            self.value
        } else {
            None
        }
    }

    fn keys(&self) -> Vec<&str> {
        match self.value {
            Some(_) => vec![self.key],
            None => Vec::new(),
        }
    }
}

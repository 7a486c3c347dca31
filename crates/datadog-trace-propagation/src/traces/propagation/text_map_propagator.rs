//! Text map propagators for AWS X-Ray and W3C TraceContext formats.
//!
//! # AWS X-Ray Format
//!
//! The `AwsXrayPropagator` extracts trace context from the single
//! `X-Amzn-Trace-Id` header:
//! - **`Root`**: X-Ray trace ID, `1-{8 hex epoch seconds}-{24 hex unique}`
//! - **`Parent`**: 64-bit parent span ID, 16 hex characters
//! - **`Sampled`**: `1` (sampled), `0` (not sampled), absent (undecided)
//!
//! Fields are `;`-separated `key=value` pairs in any order. Unknown fields
//! (`Lineage`, `Self`, ...) are ignored.
//!
//! # W3C TraceContext Format
//!
//! The `TraceContextPropagator` extracts trace context from W3C headers:
//! - **`traceparent`**: Version, trace ID, span ID and flags
//! - **`tracestate`**: Vendor state, kept verbatim as a tag
//!
//! # Header Format Examples
//!
//! **X-Ray Header:**
//! ```text
//! X-Amzn-Trace-Id: Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1
//! ```
//!
//! **W3C TraceContext Headers:**
//! ```text
//! traceparent: 00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01
//! tracestate: congo=t61rcWkgMzE
//! ```
//!
//! # Failure Handling
//!
//! Both propagators fail open: any missing or malformed value is logged at
//! debug level and extraction yields `None`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::traces::context::{Sampling, SpanContext};
use crate::traces::propagation::{
    carrier::{get_ignore_ascii_case, Extractor},
    error::Error,
    Propagator,
};

// ============================================================================
// AWS X-Ray Keys
// ============================================================================

/// Header key under which the X-Ray propagation format travels.
///
/// Example: `X-Amzn-Trace-Id: Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1`
pub const AWS_XRAY_TRACE_HEADER_KEY: &str = "X-Amzn-Trace-Id";

const XRAY_TRACE_ID_KEY: &str = "Root";
const XRAY_PARENT_ID_KEY: &str = "Parent";
const XRAY_SAMPLED_KEY: &str = "Sampled";

const XRAY_PROPAGATOR_NAME: &str = "xray";

// ============================================================================
// W3C TraceContext Keys
// ============================================================================

/// HTTP header key for W3C traceparent (version-traceId-spanId-flags).
///
/// Example: `traceparent: 00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01`
pub const TRACEPARENT_KEY: &str = "traceparent";

/// HTTP header key for W3C tracestate (vendor-specific state).
///
/// Example: `tracestate: congo=t61rcWkgMzE,rojo=00f067aa0ba902b7`
pub const TRACESTATE_KEY: &str = "tracestate";

const TRACEPARENT_PROPAGATOR_NAME: &str = "traceparent";

lazy_static! {
    /// X-Ray trace ID: version `1`, 8 hex digits of epoch seconds, 24 hex digits.
    static ref XRAY_TRACE_ID_REGEX: Regex =
        Regex::new(r"^1-([0-9a-fA-F]{8})-([0-9a-fA-F]{24})$").expect("failed creating regex");

    /// X-Ray parent ID: exactly 16 hex digits.
    static ref XRAY_PARENT_ID_REGEX: Regex =
        Regex::new(r"^[0-9a-fA-F]{16}$").expect("failed creating regex");

    /// Regex for parsing W3C traceparent header.
    ///
    /// Format: `version-traceId-spanId-flags[-optional]`
    static ref TRACEPARENT_REGEX: Regex =
        Regex::new(r"^([a-f0-9]{2})-([a-f0-9]{32})-([a-f0-9]{16})-([a-f0-9]{2})(-.*)?$")
            .expect("failed creating regex");

    /// Regex for detecting invalid all-zero segments (e.g., "00000000").
    static ref INVALID_SEGMENT_REGEX: Regex = Regex::new(r"^0+$").expect("failed creating regex");

    /// Regex for detecting invalid non-ASCII characters in tracestate.
    static ref INVALID_ASCII_CHARACTERS_REGEX: Regex =
        Regex::new(r"[^\x20-\x7E]+").expect("failed creating regex");
}

/// Propagator for the AWS X-Ray trace header.
///
/// # Extraction
///
/// 1. **Header**: looked up under `X-Amzn-Trace-Id` (ASCII case-insensitive);
///    absent or blank means no context
/// 2. **Root**: required, must match `1-{8 hex}-{24 hex}` and not be all zeros
/// 3. **Parent**: required, exactly 16 hex digits, not all zeros
/// 4. **Sampled**: optional, `0` or `1`; anything else rejects the header
///
/// When a field appears more than once the last occurrence is used.
///
/// # Example
///
/// ```
/// use datadog_trace_propagation::traces::propagation::text_map_propagator::AwsXrayPropagator;
///
/// let context = AwsXrayPropagator::parse_header(
///     "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1",
/// )
/// .expect("valid header");
///
/// assert_eq!(context.trace_id_hex(), "5759e988bd862e3fe1be46a994272793");
/// assert_eq!(context.span_id_hex(), "53995c3f42cd8ad8");
/// assert_eq!(context.is_sampled(), Some(true));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AwsXrayPropagator;

impl Propagator for AwsXrayPropagator {
    fn extract(&self, carrier: &dyn Extractor) -> Option<SpanContext> {
        let header = get_ignore_ascii_case(carrier, AWS_XRAY_TRACE_HEADER_KEY)?;
        Self::parse_header(header)
    }
}

impl AwsXrayPropagator {
    /// Parses one X-Ray header value, `None` when it carries no usable parent.
    #[must_use]
    pub fn parse_header(header: &str) -> Option<SpanContext> {
        let header = header.trim();
        if header.is_empty() {
            return None;
        }

        match Self::extract_header(header) {
            Ok(context) => Some(context),
            Err(e) => {
                debug!("{e}: {header}");
                None
            }
        }
    }

    fn extract_header(header: &str) -> Result<SpanContext, Error> {
        let mut root = None;
        let mut parent = None;
        let mut sampled = None;

        for field in header.split(';') {
            let Some((key, value)) = field.split_once('=') else {
                continue;
            };

            match key.trim() {
                XRAY_TRACE_ID_KEY => root = Some(value.trim()),
                XRAY_PARENT_ID_KEY => parent = Some(value.trim()),
                XRAY_SAMPLED_KEY => sampled = Some(value.trim()),
                _ => {}
            }
        }

        let trace_id = Self::extract_trace_id(
            root.ok_or(Error::extract("`Root` not found", XRAY_PROPAGATOR_NAME))?,
        )?;
        let span_id = Self::extract_parent_id(
            parent.ok_or(Error::extract("`Parent` not found", XRAY_PROPAGATOR_NAME))?,
        )?;
        let sampling = sampled.map(Self::extract_sampling).transpose()?;

        Ok(SpanContext {
            trace_id,
            span_id,
            sampling,
            is_remote: true,
            tags: HashMap::new(),
        })
    }

    fn extract_trace_id(root: &str) -> Result<u128, Error> {
        let captures = XRAY_TRACE_ID_REGEX
            .captures(root)
            .ok_or(Error::extract("invalid `Root` found", XRAY_PROPAGATOR_NAME))?;

        let trace_id = format!("{}{}", &captures[1], &captures[2]);
        if INVALID_SEGMENT_REGEX.is_match(&trace_id) {
            return Err(Error::extract(
                "`0` value for `Root` is invalid",
                XRAY_PROPAGATOR_NAME,
            ));
        }

        u128::from_str_radix(&trace_id, 16)
            .map_err(|_| Error::extract("Failed to decode `Root`", XRAY_PROPAGATOR_NAME))
    }

    fn extract_parent_id(parent: &str) -> Result<u64, Error> {
        if !XRAY_PARENT_ID_REGEX.is_match(parent) {
            return Err(Error::extract(
                "invalid `Parent` found",
                XRAY_PROPAGATOR_NAME,
            ));
        }

        if INVALID_SEGMENT_REGEX.is_match(parent) {
            return Err(Error::extract(
                "`0` value for `Parent` is invalid",
                XRAY_PROPAGATOR_NAME,
            ));
        }

        u64::from_str_radix(parent, 16)
            .map_err(|_| Error::extract("Failed to decode `Parent`", XRAY_PROPAGATOR_NAME))
    }

    fn extract_sampling(sampled: &str) -> Result<Sampling, Error> {
        match sampled {
            "1" => Ok(Sampling { sampled: true }),
            "0" => Ok(Sampling { sampled: false }),
            _ => Err(Error::extract(
                "ambiguous `Sampled` found",
                XRAY_PROPAGATOR_NAME,
            )),
        }
    }
}

/// Parsed W3C traceparent header components.
///
/// Header: `00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01`
/// - Version: `00`
/// - Trace ID: `4bf92f3577b34da6a3ce929d0e0e4736` (128-bit)
/// - Span ID: `00f067aa0ba902b7` (64-bit)
/// - Flags: `01` (sampled)
struct Traceparent {
    sampled: bool,
    trace_id: u128,
    span_id: u64,
}

/// Propagator for W3C TraceContext format.
///
/// Produces the same `SpanContext` shape as [`AwsXrayPropagator`], so span
/// creation does not care which format a parent came from. A valid
/// `tracestate` is stored verbatim under the `tracestate` tag, together with
/// the raw `traceparent`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceContextPropagator;

impl Propagator for TraceContextPropagator {
    fn extract(&self, carrier: &dyn Extractor) -> Option<SpanContext> {
        Self::extract_context(carrier)
    }
}

impl TraceContextPropagator {
    fn extract_context(carrier: &dyn Extractor) -> Option<SpanContext> {
        let tp = get_ignore_ascii_case(carrier, TRACEPARENT_KEY)?.trim();

        match Self::extract_traceparent(tp) {
            Ok(traceparent) => {
                let mut tags = HashMap::new();
                tags.insert(TRACEPARENT_KEY.to_string(), tp.to_string());

                if let Some(ts) = get_ignore_ascii_case(carrier, TRACESTATE_KEY) {
                    if let Some(tracestate) = Self::extract_tracestate(ts) {
                        tags.insert(TRACESTATE_KEY.to_string(), tracestate);
                    }
                }

                Some(SpanContext {
                    trace_id: traceparent.trace_id,
                    span_id: traceparent.span_id,
                    sampling: Some(Sampling {
                        sampled: traceparent.sampled,
                    }),
                    is_remote: true,
                    tags,
                })
            }
            Err(e) => {
                debug!("Failed to extract traceparent: {e}");
                None
            }
        }
    }

    fn extract_tracestate(tracestate: &str) -> Option<String> {
        let ts = tracestate
            .split(',')
            .map(str::trim)
            .filter(|member| !member.is_empty())
            .collect::<Vec<&str>>()
            .join(",");

        if ts.is_empty() || INVALID_ASCII_CHARACTERS_REGEX.is_match(&ts) {
            debug!("Received invalid tracestate header {tracestate}");
            return None;
        }

        Some(ts)
    }

    fn extract_traceparent(traceparent: &str) -> Result<Traceparent, Error> {
        let captures = TRACEPARENT_REGEX
            .captures(traceparent)
            .ok_or_else(|| Error::extract("invalid traceparent", TRACEPARENT_PROPAGATOR_NAME))?;

        let version = &captures[1];
        let trace_id = &captures[2];
        let span_id = &captures[3];
        let flags = &captures[4];
        let tail = captures.get(5).map_or("", |m| m.as_str());

        Self::extract_version(version, tail)?;

        let trace_id = Self::extract_trace_id(trace_id)?;
        let span_id = Self::extract_span_id(span_id)?;
        let trace_flags = Self::extract_trace_flags(flags)?;

        Ok(Traceparent {
            sampled: trace_flags & 0x1 != 0,
            trace_id,
            span_id,
        })
    }

    fn extract_version(version: &str, tail: &str) -> Result<(), Error> {
        match version {
            "ff" => {
                return Err(Error::extract(
                    "`ff` is an invalid traceparent version",
                    TRACEPARENT_PROPAGATOR_NAME,
                ));
            }
            "00" => {
                if !tail.is_empty() {
                    return Err(Error::extract(
                        "Traceparent with version `00` should contain only 4 values delimited by `-`",
                        TRACEPARENT_PROPAGATOR_NAME,
                    ));
                }
            }
            _ => {
                warn!("Unsupported traceparent version {version}, still attempting to parse");
            }
        }

        Ok(())
    }

    fn extract_trace_id(trace_id: &str) -> Result<u128, Error> {
        if INVALID_SEGMENT_REGEX.is_match(trace_id) {
            return Err(Error::extract(
                "`0` value for trace_id is invalid",
                TRACEPARENT_PROPAGATOR_NAME,
            ));
        }

        u128::from_str_radix(trace_id, 16)
            .map_err(|_| Error::extract("Failed to decode trace_id", TRACEPARENT_PROPAGATOR_NAME))
    }

    fn extract_span_id(span_id: &str) -> Result<u64, Error> {
        if INVALID_SEGMENT_REGEX.is_match(span_id) {
            return Err(Error::extract(
                "`0` value for span_id is invalid",
                TRACEPARENT_PROPAGATOR_NAME,
            ));
        }

        u64::from_str_radix(span_id, 16)
            .map_err(|_| Error::extract("Failed to decode span_id", TRACEPARENT_PROPAGATOR_NAME))
    }

    fn extract_trace_flags(flags: &str) -> Result<u8, Error> {
        u8::from_str_radix(flags, 16).map_err(|_| {
            Error::extract("Failed to decode trace_flags", TRACEPARENT_PROPAGATOR_NAME)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use proptest::prelude::*;
    use tracing_test::traced_test;

    use super::*;

    const VALID_XRAY_HEADER: &str =
        "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1";

    macro_rules! test_xray_parse_header {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (header, expected): (&str, Option<(&str, &str, Option<bool>)>) = $value;

                    let context = AwsXrayPropagator::parse_header(header);
                    let got = context.as_ref().map(|c| (c.trace_id_hex(), c.span_id_hex(), c.is_sampled()));
                    let expected = expected.map(|(t, s, sampled)| (t.to_string(), s.to_string(), sampled));

                    assert_eq!(got, expected);
                }
            )*
        }
    }

    test_xray_parse_header! {
        xray_sampled: (
            VALID_XRAY_HEADER,
            Some(("5759e988bd862e3fe1be46a994272793", "53995c3f42cd8ad8", Some(true))),
        ),
        xray_not_sampled: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=0",
            Some(("5759e988bd862e3fe1be46a994272793", "53995c3f42cd8ad8", Some(false))),
        ),
        xray_no_sampling_decision: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8",
            Some(("5759e988bd862e3fe1be46a994272793", "53995c3f42cd8ad8", None)),
        ),
        xray_fields_out_of_order: (
            "Sampled=1;Parent=53995c3f42cd8ad8;Root=1-5759e988-bd862e3fe1be46a994272793",
            Some(("5759e988bd862e3fe1be46a994272793", "53995c3f42cd8ad8", Some(true))),
        ),
        xray_unknown_fields_ignored: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1;Lineage=a87bd80c:1|68fd508a:5;Foo=bar",
            Some(("5759e988bd862e3fe1be46a994272793", "53995c3f42cd8ad8", Some(true))),
        ),
        xray_whitespace_around_fields: (
            " Root = 1-5759e988-bd862e3fe1be46a994272793 ; Parent=53995c3f42cd8ad8 ;Sampled=1 ",
            Some(("5759e988bd862e3fe1be46a994272793", "53995c3f42cd8ad8", Some(true))),
        ),
        xray_uppercase_hex: (
            "Root=1-5759E988-BD862E3FE1BE46A994272793;Parent=53995C3F42CD8AD8;Sampled=1",
            Some(("5759e988bd862e3fe1be46a994272793", "53995c3f42cd8ad8", Some(true))),
        ),
        xray_last_duplicate_wins: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=0000000000000001;Parent=53995c3f42cd8ad8",
            Some(("5759e988bd862e3fe1be46a994272793", "53995c3f42cd8ad8", None)),
        ),
        xray_empty: ("", None),
        xray_blank: ("   ", None),
        xray_garbage: ("garbage", None),
        xray_only_separators: (";;;", None),
        xray_short_root: ("Root=abc;Parent=53995c3f42cd8ad8;Sampled=1", None),
        xray_missing_root: ("Parent=53995c3f42cd8ad8;Sampled=1", None),
        xray_missing_parent: ("Root=1-5759e988-bd862e3fe1be46a994272793;Sampled=1", None),
        xray_root_wrong_version: (
            "Root=2-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1",
            None,
        ),
        xray_root_truncated: (
            "Root=1-5759e988-bd862e3fe1be46a99427279;Parent=53995c3f42cd8ad8;Sampled=1",
            None,
        ),
        xray_root_non_hex: (
            "Root=1-5759e988-bd862e3fe1be46a99427279z;Parent=53995c3f42cd8ad8;Sampled=1",
            None,
        ),
        xray_root_without_dashes: (
            "Root=5759e988bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1",
            None,
        ),
        xray_root_all_zeros: (
            "Root=1-00000000-000000000000000000000000;Parent=53995c3f42cd8ad8;Sampled=1",
            None,
        ),
        xray_parent_too_long: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad80;Sampled=1",
            None,
        ),
        xray_parent_non_hex: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8adx;Sampled=1",
            None,
        ),
        xray_parent_all_zeros: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=0000000000000000;Sampled=1",
            None,
        ),
        xray_sampled_ambiguous: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=?",
            None,
        ),
        xray_sampled_out_of_range: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=2",
            None,
        ),
        xray_sampled_empty: (
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=",
            None,
        ),
        xray_lowercase_field_names_not_recognized: (
            "root=1-5759e988-bd862e3fe1be46a994272793;parent=53995c3f42cd8ad8;sampled=1",
            None,
        ),
    }

    #[test]
    fn test_extract_xray_propagator() {
        let headers = HashMap::from([(
            AWS_XRAY_TRACE_HEADER_KEY.to_string(),
            VALID_XRAY_HEADER.to_string(),
        )]);

        let context = AwsXrayPropagator
            .extract(&headers)
            .expect("couldn't extract trace context");

        assert_eq!(context.trace_id, 0x5759_e988_bd86_2e3f_e1be_46a9_9427_2793);
        assert_eq!(context.span_id, 0x5399_5c3f_42cd_8ad8);
        assert_eq!(context.sampling, Some(Sampling { sampled: true }));
        assert!(context.is_remote);
        assert!(context.tags.is_empty());
    }

    #[test]
    fn test_extract_xray_propagator_header_key_case() {
        let headers = HashMap::from([(
            "x-amzn-trace-id".to_string(),
            VALID_XRAY_HEADER.to_string(),
        )]);

        assert!(AwsXrayPropagator.extract(&headers).is_some());
    }

    #[test]
    fn test_extract_xray_propagator_missing_header() {
        let headers = HashMap::from([(
            TRACEPARENT_KEY.to_string(),
            "00-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7-01".to_string(),
        )]);

        assert_eq!(AwsXrayPropagator.extract(&headers), None);
    }

    #[test]
    fn test_extract_xray_propagator_does_not_mutate_carrier() {
        let headers = HashMap::from([(
            AWS_XRAY_TRACE_HEADER_KEY.to_string(),
            "garbage".to_string(),
        )]);
        let before = headers.clone();

        assert_eq!(AwsXrayPropagator.extract(&headers), None);
        assert_eq!(headers, before);
    }

    #[test]
    fn test_xray_errors_describe_the_field() {
        assert_eq!(
            AwsXrayPropagator::extract_header("Parent=53995c3f42cd8ad8")
                .unwrap_err()
                .message(),
            "`Root` not found"
        );
        assert_eq!(
            AwsXrayPropagator::extract_header(
                "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=xyz"
            )
            .unwrap_err()
            .message(),
            "invalid `Parent` found"
        );
        assert_eq!(
            AwsXrayPropagator::extract_header(
                "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=yes"
            )
            .unwrap_err()
            .message(),
            "ambiguous `Sampled` found"
        );
    }

    #[test]
    #[traced_test]
    fn test_rejected_xray_header_is_logged() {
        assert_eq!(AwsXrayPropagator::parse_header("Root=abc"), None);

        assert!(logs_contain("Cannot extract from xray, invalid `Root` found"));
    }

    #[test]
    fn test_xray_parse_is_idempotent() {
        let first = AwsXrayPropagator::parse_header(VALID_XRAY_HEADER);
        let second = AwsXrayPropagator::parse_header(VALID_XRAY_HEADER);

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_valid_xray_headers_decode(
            epoch in "[0-9a-f]{8}",
            unique in "[0-9a-f]{24}",
            parent in "[0-9a-f]{16}",
            sampled in prop::sample::select(vec!["0", "1"]),
        ) {
            let trace_id_hex = format!("{epoch}{unique}");
            prop_assume!(!trace_id_hex.chars().all(|c| c == '0'));
            prop_assume!(!parent.chars().all(|c| c == '0'));

            let header = format!("Root=1-{epoch}-{unique};Parent={parent};Sampled={sampled}");
            let context = AwsXrayPropagator::parse_header(&header).expect("valid header");

            prop_assert_eq!(context.trace_id_hex(), trace_id_hex);
            prop_assert_eq!(context.span_id_hex(), parent.clone());
            prop_assert_eq!(context.is_sampled(), Some(sampled == "1"));

            let reordered = format!("Sampled={sampled};Parent={parent};Root=1-{epoch}-{unique};Foo=bar");
            prop_assert_eq!(AwsXrayPropagator::parse_header(&reordered), Some(context));
        }

        #[test]
        fn prop_arbitrary_input_never_panics(header in ".*") {
            let first = AwsXrayPropagator::parse_header(&header);
            let second = AwsXrayPropagator::parse_header(&header);

            prop_assert_eq!(first.clone(), second);
            if let Some(context) = first {
                prop_assert!(context.is_valid());
            }
        }
    }

    #[test]
    fn test_extract_traceparent_propagator() {
        let headers = HashMap::from([
            (
                "traceparent".to_string(),
                "00-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7-01".to_string(),
            ),
            (
                "tracestate".to_string(),
                "dd=p:00f067aa0ba902b7;s:2;o:rum, congo=t61rcWkgMzE".to_string(),
            ),
        ]);

        let propagator = TraceContextPropagator;
        let context = propagator
            .extract(&headers)
            .expect("couldn't extract trace context");

        assert_eq!(context.trace_id_hex(), "80f198ee56343ba864fe8b2a57d3eff7");
        assert_eq!(context.span_id, 67_667_974_448_284_343);
        assert_eq!(context.is_sampled(), Some(true));
        assert!(context.is_remote);
        assert_eq!(
            context.tags.get("traceparent").unwrap(),
            "00-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7-01"
        );
        assert_eq!(
            context.tags.get("tracestate").unwrap(),
            "dd=p:00f067aa0ba902b7;s:2;o:rum,congo=t61rcWkgMzE"
        );
    }

    #[test]
    fn test_extract_traceparent_not_sampled_without_tracestate() {
        let headers = HashMap::from([(
            "Traceparent".to_string(),
            "00-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7-00".to_string(),
        )]);

        let context = TraceContextPropagator
            .extract(&headers)
            .expect("couldn't extract trace context");

        assert_eq!(context.is_sampled(), Some(false));
        assert!(!context.tags.contains_key(TRACESTATE_KEY));
    }

    #[test]
    fn test_extract_traceparent_invalid() {
        for traceparent in [
            "ff-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7-01",
            "00-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7-01-extra",
            "00-00000000000000000000000000000000-00f067aa0ba902b7-01",
            "00-80f198ee56343ba864fe8b2a57d3eff7-0000000000000000-01",
            "00-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7",
            "00-80F198EE56343BA864FE8B2A57D3EFF7-00f067aa0ba902b7-01",
            "00-80f198ee56343ba864fe8b2a57d3eff7-00F067AA0BA902B7-01",
            "FF-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7-01",
            "garbage",
        ] {
            let headers = HashMap::from([("traceparent".to_string(), traceparent.to_string())]);

            assert_eq!(
                TraceContextPropagator.extract(&headers),
                None,
                "{traceparent} should be rejected"
            );
        }
    }

    #[test]
    fn test_extract_traceparent_future_version_with_tail() {
        let headers = HashMap::from([(
            "traceparent".to_string(),
            "01-80f198ee56343ba864fe8b2a57d3eff7-00f067aa0ba902b7-01-future".to_string(),
        )]);

        assert!(TraceContextPropagator.extract(&headers).is_some());
    }

    #[test]
    fn test_extract_tracestate_rejects_non_ascii() {
        assert_eq!(TraceContextPropagator::extract_tracestate("congo=é"), None);
        assert_eq!(TraceContextPropagator::extract_tracestate(" , "), None);
    }
}

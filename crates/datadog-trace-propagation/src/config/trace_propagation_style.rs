//! Trace context propagation styles.
//!
//! Styles select which header formats the [`CompositePropagator`] reads.
//!
//! - **XRay**: AWS X-Ray `X-Amzn-Trace-Id` header, also used by the SQS `AWSTraceHeader` attribute
//! - **TraceContext**: W3C Trace Context standard (`traceparent` / `tracestate`)
//! - **None**: no extraction
//!
//! # Configuration
//!
//! - **Environment variable**: `DD_TRACE_PROPAGATION_STYLE_EXTRACT=xray,tracecontext`
//! - **YAML config**: `trace_propagation_style: "xray,tracecontext"`
//!
//! [`CompositePropagator`]: crate::traces::propagation::CompositePropagator

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer};
use tracing::error;

/// Trace context propagation style.
///
/// | Style | Headers | Example |
/// |-------|---------|---------|
/// | XRay | `X-Amzn-Trace-Id` | `Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1` |
/// | TraceContext | `traceparent`, `tracestate` | `00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01` |
/// | None | - | No propagation |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TracePropagationStyle {
    XRay,
    TraceContext,
    None,
}

/// Parses styles case-insensitively.
impl FromStr for TracePropagationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xray" | "awsxray" | "aws_xray" => Ok(TracePropagationStyle::XRay),
            "tracecontext" => Ok(TracePropagationStyle::TraceContext),
            "none" => Ok(TracePropagationStyle::None),
            _ => Err(format!("Trace propagation style is invalid: {s:?}")),
        }
    }
}

impl Display for TracePropagationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let style = match self {
            TracePropagationStyle::XRay => "xray",
            TracePropagationStyle::TraceContext => "tracecontext",
            TracePropagationStyle::None => "none",
        };
        write!(f, "{style}")
    }
}

/// Deserializes a comma-separated list of styles, e.g. `"xray, tracecontext"`.
///
/// Whitespace around entries is trimmed and empty entries are skipped. Unknown
/// styles are logged and become `TracePropagationStyle::None`, so a typo
/// disables a style rather than failing configuration.
#[allow(clippy::module_name_repetitions)]
pub fn deserialize_trace_propagation_style<'de, D>(
    deserializer: D,
) -> Result<Vec<TracePropagationStyle>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;

    Ok(s.split(',')
        .map(str::trim)
        .filter(|style| !style.is_empty())
        .map(|style| {
            TracePropagationStyle::from_str(style).unwrap_or_else(|e| {
                error!("{e}, using None");
                TracePropagationStyle::None
            })
        })
        .collect())
}

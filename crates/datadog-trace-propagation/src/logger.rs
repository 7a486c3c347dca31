//! Custom tracing formatter for trace propagation logs.
//!
//! Every line is prefixed with `DD_TRACE_PROPAGATION` so rejected headers can
//! be told apart from application logs in CloudWatch.
//!
//! # Format
//!
//! ```text
//! DD_TRACE_PROPAGATION | LEVEL | [span_name{span_fields}:] message {event_fields}
//! ```
//!
//! # Examples
//!
//! ```text
//! DD_TRACE_PROPAGATION | DEBUG | Cannot extract from xray, invalid `Root` found: Root=abc
//! DD_TRACE_PROPAGATION | TRACE | sqs_receive{queue="orders"}: Extracted trace context using xray propagation
//! ```

use std::fmt;

use thiserror::Error;
use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::{
    format::{self, FormatEvent, FormatFields},
    FmtContext, FormattedFields,
};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Log line prefix.
pub const LOG_PREFIX: &str = "DD_TRACE_PROPAGATION";

/// Errors installing the global subscriber.
#[derive(Debug, Error)]
pub enum Error {
    #[error("setting default subscriber failed: {0}")]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Log formatter that prefixes messages with [`LOG_PREFIX`].
#[derive(Debug, Clone, Copy)]
pub struct Formatter;

impl<S, N> FormatEvent<S, N> for Formatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        write!(&mut writer, "{LOG_PREFIX} | {} | ", metadata.level())?;

        // Spans from root to current
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name())?;

                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                write!(writer, ": ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Builds the filter for `config.log_level`.
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::default().add_directive(config.log_level.as_level_filter().into())
}

/// Installs the global subscriber writing prefixed lines to stdout.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init(config: &Config) -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter(config))
        .event_format(Formatter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!("Logging subsystem enabled");

    Ok(())
}

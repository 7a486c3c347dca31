//! Configuration Module
//!
//! Configuration for trace context extraction and logging.
//!
//! ## Configuration Priority
//!
//! Sources are applied in the following order (later sources override earlier):
//!
//! 1. **Defaults** - Hard-coded defaults in the code
//! 2. **YAML file** - `datadog.yaml` in the configuration directory (if present)
//! 3. **Environment variables** - `DD_*` environment variables (highest priority)
//!
//! ## Keys
//!
//! | Environment | YAML | Default |
//! |-------------|------|---------|
//! | `DD_LOG_LEVEL` | `log_level` | `warn` |
//! | `DD_TRACE_PROPAGATION_STYLE` | `trace_propagation_style` | `xray,tracecontext` |
//! | `DD_TRACE_PROPAGATION_STYLE_EXTRACT` | `trace_propagation_style_extract` | same as `trace_propagation_style` |
//!
//! The SQS attribute name and the X-Ray header key are constants, not configuration.

pub mod env;
pub mod log_level;
pub mod trace_propagation_style;
pub mod yaml;

use std::path::Path;

use tracing::{debug, error};

use crate::config::{
    env::EnvConfigSource, log_level::LogLevel, trace_propagation_style::TracePropagationStyle,
    yaml::YamlConfigSource,
};

/// Helper macro to merge Option<T> fields to T fields when Option<T> is Some
#[macro_export]
macro_rules! merge_option_to_value {
    ($config:expr, $source:expr, $field:ident) => {
        if let Some(value) = &$source.$field {
            $config.$field = value.clone();
        }
    };
}

/// Helper macro to merge `Vec` fields when `Vec` is not empty
#[macro_export]
macro_rules! merge_vec {
    ($config:expr, $source:expr, $field:ident) => {
        if !$source.$field.is_empty() {
            $config.$field.clone_from(&$source.$field);
        }
    };
}

#[derive(Debug, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum ConfigError {
    ParseError(String),
    UnsupportedField(String),
}

#[allow(clippy::module_name_repetitions)]
pub trait ConfigSource {
    fn load(&self, config: &mut Config) -> Result<(), ConfigError>;
}

#[derive(Default)]
#[allow(clippy::module_name_repetitions)]
pub struct ConfigBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
    config: Config,
}

#[allow(clippy::module_name_repetitions)]
impl ConfigBuilder {
    #[must_use]
    pub fn add_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn build(&mut self) -> Config {
        let mut failed_sources = 0;
        for source in &self.sources {
            match source.load(&mut self.config) {
                Ok(()) => (),
                Err(e) => {
                    error!("Failed to load config: {:?}", e);
                    failed_sources += 1;
                }
            }
        }

        if !self.sources.is_empty() && failed_sources == self.sources.len() {
            debug!("All sources failed to load config, using default config.");
        }

        // If extraction is not set, set it to the same as the propagation style
        if self.config.trace_propagation_style_extract.is_empty() {
            self.config
                .trace_propagation_style_extract
                .clone_from(&self.config.trace_propagation_style);
        }

        self.config.clone()
    }
}

#[derive(Debug, PartialEq, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct Config {
    pub log_level: LogLevel,

    // Trace Propagation
    pub trace_propagation_style: Vec<TracePropagationStyle>,
    pub trace_propagation_style_extract: Vec<TracePropagationStyle>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            trace_propagation_style: vec![
                TracePropagationStyle::XRay,
                TracePropagationStyle::TraceContext,
            ],
            trace_propagation_style_extract: vec![],
        }
    }
}

/// Load configuration from `datadog.yaml` in `config_directory` and the environment.
///
/// A missing or unreadable YAML file is logged and skipped.
#[allow(clippy::module_name_repetitions)]
#[inline]
#[must_use]
pub fn get_config(config_directory: &Path) -> Config {
    let path: std::path::PathBuf = config_directory.join("datadog.yaml");
    ConfigBuilder::default()
        .add_source(Box::new(YamlConfigSource { path }))
        .add_source(Box::new(EnvConfigSource))
        .build()
}

//! Environment variable configuration.
//!
//! Reads `DD_`-prefixed variables through figment's `Env` provider:
//!
//! ```text
//! DD_LOG_LEVEL=debug
//! DD_TRACE_PROPAGATION_STYLE=xray,tracecontext
//! DD_TRACE_PROPAGATION_STYLE_EXTRACT=xray
//! ```

use figment::{providers::Env, Figment};
use serde::Deserialize;

use crate::{
    config::{
        log_level::LogLevel,
        trace_propagation_style::{deserialize_trace_propagation_style, TracePropagationStyle},
        Config, ConfigError, ConfigSource,
    },
    merge_option_to_value, merge_vec,
};

/// The subset of `DD_*` variables this crate understands.
#[derive(Debug, PartialEq, Deserialize, Clone, Default)]
#[serde(default)]
#[allow(clippy::module_name_repetitions)]
pub struct EnvConfig {
    /// `DD_LOG_LEVEL`
    pub log_level: Option<LogLevel>,
    /// `DD_TRACE_PROPAGATION_STYLE`
    #[serde(deserialize_with = "deserialize_trace_propagation_style")]
    pub trace_propagation_style: Vec<TracePropagationStyle>,
    /// `DD_TRACE_PROPAGATION_STYLE_EXTRACT`
    #[serde(deserialize_with = "deserialize_trace_propagation_style")]
    pub trace_propagation_style_extract: Vec<TracePropagationStyle>,
}

fn merge_config(config: &mut Config, env_config: &EnvConfig) {
    merge_option_to_value!(config, env_config, log_level);
    merge_vec!(config, env_config, trace_propagation_style);
    merge_vec!(config, env_config, trace_propagation_style_extract);
}

#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct EnvConfigSource;

impl ConfigSource for EnvConfigSource {
    fn load(&self, config: &mut Config) -> Result<(), ConfigError> {
        let figment = Figment::new().merge(Env::prefixed("DD_"));

        let env_config = figment.extract::<EnvConfig>().map_err(|e| {
            ConfigError::ParseError(format!(
                "Failed to parse config from environment variables: {e}, using default config."
            ))
        })?;
        merge_config(config, &env_config);

        Ok(())
    }
}

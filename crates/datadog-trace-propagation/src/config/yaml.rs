//! YAML file-based configuration.
//!
//! # Example Configuration
//!
//! ```yaml
//! log_level: debug
//! trace_propagation_style: "xray,tracecontext"
//! trace_propagation_style_extract: "xray"
//! ```

use std::path::PathBuf;

use figment::{
    providers::{Format, Yaml},
    Figment,
};
use serde::Deserialize;

use crate::{
    config::{
        log_level::LogLevel,
        trace_propagation_style::{deserialize_trace_propagation_style, TracePropagationStyle},
        Config, ConfigError, ConfigSource,
    },
    merge_option_to_value, merge_vec,
};

/// `YamlConfig` holds the fields of `datadog.yaml` this crate reads.
#[derive(Debug, PartialEq, Deserialize, Clone, Default)]
#[serde(default)]
#[allow(clippy::module_name_repetitions)]
pub struct YamlConfig {
    pub log_level: Option<LogLevel>,
    #[serde(deserialize_with = "deserialize_trace_propagation_style")]
    pub trace_propagation_style: Vec<TracePropagationStyle>,
    #[serde(deserialize_with = "deserialize_trace_propagation_style")]
    pub trace_propagation_style_extract: Vec<TracePropagationStyle>,
}

fn merge_config(config: &mut Config, yaml_config: &YamlConfig) {
    merge_option_to_value!(config, yaml_config, log_level);
    merge_vec!(config, yaml_config, trace_propagation_style);
    merge_vec!(config, yaml_config, trace_propagation_style_extract);
}

#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct YamlConfigSource {
    pub path: PathBuf,
}

impl ConfigSource for YamlConfigSource {
    fn load(&self, config: &mut Config) -> Result<(), ConfigError> {
        let figment = Figment::new().merge(Yaml::file(self.path.clone()));

        match figment.extract::<YamlConfig>() {
            Ok(yaml_config) => merge_config(config, &yaml_config),
            Err(e) => {
                return Err(ConfigError::ParseError(format!(
                    "Failed to parse config from yaml file: {e}, using default config."
                )));
            }
        }

        Ok(())
    }
}

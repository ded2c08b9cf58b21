//! # GitHub Action Inputs
//!
//! Actions expose step inputs as `INPUT_<NAME>` environment variables.
//! A blank input falls back to its default; a boolean input is true only
//! when its trimmed, lowercased value is `true`.

use crate::config::{AwsCredentials, SyncConfig};
use crate::constants::ACTION_INPUT_PREFIX;
use std::path::PathBuf;

/// Reads action inputs through a lookup function
struct ActionInputs<F> {
    lookup: F,
}

impl<F> ActionInputs<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn input(&self, name: &str) -> String {
        let variable = format!("{ACTION_INPUT_PREFIX}{}", name.to_uppercase());
        (self.lookup)(&variable)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn bool_input(&self, name: &str) -> bool {
        self.input(name).to_lowercase() == "true"
    }

    /// One entry per non-blank line
    fn multiline_input(&self, name: &str) -> Vec<String> {
        self.input(name)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Build the run configuration from action inputs
pub fn config_from_inputs<F>(lookup: F) -> SyncConfig
where
    F: Fn(&str) -> Option<String>,
{
    let inputs = ActionInputs { lookup };

    let json_file_path = inputs.input("json_file_path");
    let endpoint_url = inputs.input("endpoint_url");

    SyncConfig {
        credentials: AwsCredentials::new(
            inputs.input("aws_access_key_id"),
            inputs.input("aws_secret_access_key"),
        ),
        aws_region: inputs.input("aws_region"),
        endpoint_url: (!endpoint_url.is_empty()).then_some(endpoint_url),
        secret_name: inputs.input("secret_name"),
        json_file_path: (!json_file_path.is_empty()).then(|| PathBuf::from(json_file_path)),
        exclude: inputs.multiline_input("exclude"),
        show_values: inputs.bool_input("show_values"),
        create_secret: inputs.bool_input("create_secret"),
        delete_secret: inputs.bool_input("delete_secret"),
        dry_run: inputs.bool_input("dry_run"),
    }
}

/// Build the run configuration from the process environment
pub fn config_from_env() -> SyncConfig {
    config_from_inputs(|name| std::env::var(name).ok())
}

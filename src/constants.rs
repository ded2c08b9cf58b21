//! # Constants
//!
//! Shared constants used throughout the sync tool.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Placeholder shown instead of a secret value when values are hidden
pub const MASKED_VALUE: &str = "**********";

/// Key of the single entry a newly created secret holds
pub const CREATE_PLACEHOLDER_KEY: &str = "generated";

/// Value stored under [`CREATE_PLACEHOLDER_KEY`]
pub const CREATE_PLACEHOLDER_VALUE: &str = "true";

/// Recovery window applied when deleting a secret (days, AWS accepts 7-30)
pub const DELETE_RECOVERY_WINDOW_DAYS: i64 = 7;

/// Skip pattern applied by the command-line front end when none is given
pub const DEFAULT_CLI_EXCLUDE_PATTERN: &str = "^_";

/// Provider label used in metrics and spans
pub const AWS_PROVIDER: &str = "aws";

/// Default log level when `LOG_LEVEL` is unset
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Default log format when `LOG_FORMAT` is unset
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Prefix GitHub Actions uses for action inputs exposed as environment variables
pub const ACTION_INPUT_PREFIX: &str = "INPUT_";

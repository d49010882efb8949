//! Default values for lexent configuration.

/// Engine binding strategy used when none is configured.
pub const DEFAULT_ENGINE_STRATEGY: &str = "prebuilt";

/// Parser language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// Project-local configuration file name.
pub const CONFIG_FILE_NAME: &str = "lexent.toml";

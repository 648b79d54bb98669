//! Default names and locations

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "htmlmaps.toml";

/// Template root folder, relative to the configuration file
pub const DEFAULT_TEMPLATE_ROOT: &str = "views";

/// Persisted map location, relative to the configuration file
pub const DEFAULT_MAP_OUTPUT: &str = "html-map.json";

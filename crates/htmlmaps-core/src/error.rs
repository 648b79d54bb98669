use crate::template::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HtmlMapsError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID: failed to parse htmlmaps.toml: {0}")]
    ConfigInvalid(String),

    // Template errors
    #[error("TEMPLATE_ERROR: {0}")]
    Template(#[from] TemplateError),

    // Map errors
    #[error("MAP_WRITE_ERROR: failed to write html map: {0}")]
    MapWriteError(String),

    #[error("MAP_READ_ERROR: failed to read html map: {0}")]
    MapReadError(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for HtmlMapsError {
    fn from(err: serde_json::Error) -> Self {
        HtmlMapsError::Generic(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, HtmlMapsError>;

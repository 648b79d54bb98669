// Core modules
pub mod config;
pub mod error;
pub mod map;
pub mod template;

// Re-export commonly used types
pub use error::{HtmlMapsError, Result};
pub use map::{Frame, HtmlMap, Range};
pub use template::{RenderOutput, TemplateContext, TemplateEngine, TemplateError};

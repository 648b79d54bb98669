//! Template error types

use crate::map::Frame;
use std::fmt;

/// Template loading, parsing and rendering errors
///
/// Every variant that stems from a position in a template carries the
/// [`Frame`] it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Template source could not be read
    TemplateNotFound {
        /// Name the template was requested by
        name: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// `{%` without a matching `%}`
    UnclosedTag { at: Frame },

    /// Character right after `{%` is neither `=` nor whitespace
    UnexpectedModifier { modifier: char, at: Frame },

    /// `extends` used after another tag
    MisplacedExtends { at: Frame },

    /// `for` without a binding or iterable
    MalformedDirective { directive: String, at: Frame },

    /// `end` or `endblock` with nothing open to close
    UnbalancedEnd { directive: String, at: Frame },

    /// `for` or `block` still open at end of file
    UnclosedDirective { directive: String, at: Frame },

    /// Template transitively includes itself
    IncludeCycle {
        /// Names from the outermost template to the repeated one
        chain: Vec<String>,
    },

    /// Dotted path has no value (diagnostic mode only)
    UndefinedValue {
        path: String,
        /// First segment that could not be resolved
        segment: String,
        at: Frame,
    },

    /// Loop over a value that is not a sequence
    NotIterable {
        path: String,
        found: &'static str,
        at: Frame,
    },

    /// Sequence used directly in a placeholder
    SequenceInPlaceholder { path: String, at: Frame },

    /// Mapping used directly in a placeholder
    MappingInPlaceholder { path: String, at: Frame },
}

impl TemplateError {
    /// Source position the error refers to, if any
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            TemplateError::UnclosedTag { at }
            | TemplateError::UnexpectedModifier { at, .. }
            | TemplateError::MisplacedExtends { at }
            | TemplateError::MalformedDirective { at, .. }
            | TemplateError::UnbalancedEnd { at, .. }
            | TemplateError::UnclosedDirective { at, .. }
            | TemplateError::UndefinedValue { at, .. }
            | TemplateError::NotIterable { at, .. }
            | TemplateError::SequenceInPlaceholder { at, .. }
            | TemplateError::MappingInPlaceholder { at, .. } => Some(at),
            TemplateError::TemplateNotFound { .. } | TemplateError::IncludeCycle { .. } => None,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::TemplateNotFound { name, reason } => {
                write!(f, "Template '{}' could not be read: {}", name, reason)
            }
            TemplateError::UnclosedTag { at } => {
                write!(f, "Unclosed {{% at {}. Add %}} to close this tag", at)
            }
            TemplateError::UnexpectedModifier { modifier, at } => {
                write!(f, "Unexpected modifier '{}' after {{% at {}", modifier, at)
            }
            TemplateError::MisplacedExtends { at } => {
                write!(
                    f,
                    "extends must be the first tag of a template, found at {}",
                    at
                )
            }
            TemplateError::MalformedDirective { directive, at } => {
                write!(f, "Malformed directive '{}' at {}", directive, at)
            }
            TemplateError::UnbalancedEnd { directive, at } => {
                write!(f, "Unexpected {{% {} %}} at {} with nothing open", directive, at)
            }
            TemplateError::UnclosedDirective { directive, at } => {
                write!(f, "Unclosed {{% {} %}} opened at {}", directive, at)
            }
            TemplateError::IncludeCycle { chain } => {
                write!(f, "Template inclusion cycle: {}", chain.join(" -> "))
            }
            TemplateError::UndefinedValue { path, segment, at } => {
                write!(
                    f,
                    "Undefined value '{}' at {} (no '{}' in context)",
                    path, at, segment
                )
            }
            TemplateError::NotIterable { path, found, at } => {
                write!(
                    f,
                    "Cannot iterate over '{}' at {}: expected a sequence, found {}",
                    path, at, found
                )
            }
            TemplateError::SequenceInPlaceholder { path, at } => {
                write!(
                    f,
                    "Sequence '{}' used in placeholder at {}. Use {{% for item in {} %}} ... {{% end %}}",
                    path, at, path
                )
            }
            TemplateError::MappingInPlaceholder { path, at } => {
                write!(
                    f,
                    "Mapping '{}' cannot be used directly in placeholder at {}. Use nested keys like {}.field",
                    path, at, path
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

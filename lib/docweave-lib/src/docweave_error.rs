use core::fmt;
use std::io;

use crate::parse_error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocweaveErrorKind {
    /// Template source could not be parsed
    Parse,
    /// Page location is empty, malformed or in an unknown section
    InvalidLocation,
    /// A required parameter object field was omitted
    MissingField,
    /// A parameter object field holds an unusable value
    InvalidField,
    /// A conditional references a flag outside the context schema
    UndeclaredFlag,
    /// No fragment exists under the given identifier
    UnknownFragment,
    /// Fragment inclusion reached a fragment already being rendered
    FragmentCycle,
    /// A placeholder has no value in any scope
    PlaceholderMismatch,
    /// A code sample does not cover the declared language set
    LanguageMismatch,
    Io,
}

#[derive(Debug)]
pub struct DocweaveError {
    message: String,
    context: Option<String>,
    kind: DocweaveErrorKind,
}
impl DocweaveError {
    pub fn new<S: Into<String>>(message: S, kind: DocweaveErrorKind) -> DocweaveError {
        DocweaveError {
            message: message.into(),
            kind,
            context: None,
        }
    }

    pub fn invalid_location<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::InvalidLocation)
    }

    pub fn missing_field<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::MissingField)
    }

    pub fn invalid_field<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::InvalidField)
    }

    pub fn undeclared_flag<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::UndeclaredFlag)
    }

    pub fn unknown_fragment<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::UnknownFragment)
    }

    pub fn fragment_cycle<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::FragmentCycle)
    }

    pub fn placeholder_mismatch<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::PlaceholderMismatch)
    }

    pub fn language_mismatch<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::LanguageMismatch)
    }

    pub fn parse<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::Parse)
    }

    pub fn io<S: Into<String>>(message: S) -> DocweaveError {
        Self::new(message, DocweaveErrorKind::Io)
    }

    /// Attach context, keeping the innermost context if one is already set
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if self.context.is_none() {
            self.context = Some(context.into());
        }
        self
    }

    pub fn kind(&self) -> DocweaveErrorKind {
        self.kind
    }
}
impl From<ParseError> for DocweaveError {
    fn from(error: ParseError) -> Self {
        Self::new(error.to_string(), DocweaveErrorKind::Parse)
    }
}
impl From<io::Error> for DocweaveError {
    fn from(error: io::Error) -> Self {
        Self::new(error.to_string(), DocweaveErrorKind::Io)
    }
}
impl From<toml::de::Error> for DocweaveError {
    fn from(error: toml::de::Error) -> Self {
        Self::new(error.to_string(), DocweaveErrorKind::Parse)
    }
}
impl From<regex::Error> for DocweaveError {
    fn from(error: regex::Error) -> Self {
        Self::new(error.to_string(), DocweaveErrorKind::Parse)
    }
}
impl From<glob::PatternError> for DocweaveError {
    fn from(error: glob::PatternError) -> Self {
        Self::new(error.to_string(), DocweaveErrorKind::Io)
    }
}
impl From<glob::GlobError> for DocweaveError {
    fn from(error: glob::GlobError) -> Self {
        Self::new(error.to_string(), DocweaveErrorKind::Io)
    }
}

impl fmt::Display for DocweaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let context = if let Some(context) = &self.context {
            format!(" in {context}")
        } else {
            "".into()
        };
        write!(f, "{}{context}", self.message)
    }
}

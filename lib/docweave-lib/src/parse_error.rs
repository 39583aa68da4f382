use std::{error, fmt};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    EndOfFile,
    InvalidInput,
    Unsupported,
}

/// Error raised while lexing a template source.
#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
}

impl ParseError {
    pub fn new<S: Into<String>>(message: S, kind: ParseErrorKind) -> ParseError {
        ParseError {
            message: message.into(),
            kind,
        }
    }

    pub fn invalid<S: Into<String>>(message: S) -> ParseError {
        Self::new(message, ParseErrorKind::InvalidInput)
    }

    pub fn unsupported<S: Into<String>>(message: S) -> ParseError {
        Self::new(message, ParseErrorKind::Unsupported)
    }

    pub fn eof<S: Into<String>>(message: S) -> ParseError {
        Self::new(message, ParseErrorKind::EndOfFile)
    }
}

impl error::Error for ParseError {}
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error while parsing template: {}", self.message)
    }
}

//! Error types for OBJ and MTL loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::lexer::Token;

/// Errors that can stop a load.
///
/// Parse variants carry the line and column (both 1-based) of the offending
/// token; their `Display` form is `(line:column) <message>`. Unknown
/// keywords, unknown material names, and missing material libraries are
/// tolerated and never surface here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open file '{}'", .path.display())]
    IoOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read file '{}'", .path.display())]
    IoRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("({line}:{column}) Error parsing float")]
    ParseFloat { line: u32, column: u32 },

    #[error("({line}:{column}) Error parsing int")]
    ParseInt { line: u32, column: u32 },

    #[error("({line}:{column}) Failed to parse face")]
    ParseFace { line: u32, column: u32 },

    #[error("({line}:{column}) Expected name after '{keyword}'")]
    ExpectedName {
        keyword: &'static str,
        line: u32,
        column: u32,
    },

    #[error("({line}:{column}) Face needs at least 3 vertices")]
    FaceTooShort { line: u32, column: u32 },
}

// Helper constructors for error values anchored at a token.
impl LoadError {
    pub(crate) fn parse_float(token: &Token<'_>) -> Self {
        Self::ParseFloat {
            line: token.line,
            column: token.column,
        }
    }

    pub(crate) fn parse_int(token: &Token<'_>) -> Self {
        Self::ParseInt {
            line: token.line,
            column: token.column,
        }
    }

    pub(crate) fn parse_face(token: &Token<'_>) -> Self {
        Self::ParseFace {
            line: token.line,
            column: token.column,
        }
    }

    pub(crate) fn expected_name(keyword: &'static str, token: &Token<'_>) -> Self {
        Self::ExpectedName {
            keyword,
            line: token.line,
            column: token.column,
        }
    }

    pub(crate) fn face_too_short(token: &Token<'_>) -> Self {
        Self::FaceTooShort {
            line: token.line,
            column: token.column,
        }
    }
}

//! Error types for the atom reader

use thiserror::Error;

/// Reader errors
///
/// The parser itself never returns these. Token and structural problems are
/// recorded in the tree as `Error` atoms (whose message is the `Display`
/// text of a variant) or as [`Diagnostic`]s. Only the I/O
/// boundary hands out `Result<T>`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Token matched none of the literal grammars
    ///
    /// **Triggered by:** `12a`, `a'b`, `1.2.3`
    #[error("Can't parse: {token}")]
    CantParse {
        /// Offending token text
        token: String,
    },

    /// A `"` appeared right after a non-empty token
    ///
    /// **Triggered by:** `abc"def"` (the first `"` is dropped)
    #[error("Unexpected '\"' after token at line {line}, column {column}")]
    StrayQuote {
        /// Line number (1-indexed)
        line: usize,
        /// Column number (1-indexed)
        column: usize,
    },

    /// A `)` with no open list; reading stops there
    #[error("Unexpected ')' at line {line}, column {column}")]
    UnexpectedClose {
        /// Line number (1-indexed)
        line: usize,
        /// Column number (1-indexed)
        column: usize,
    },

    /// End of input inside a string literal
    #[error("Unterminated string: {token}")]
    UnterminatedString {
        /// Accumulated token, opening quote included
        token: String,
    },

    /// End of input before the matching `)`
    #[error("Unterminated list")]
    UnterminatedList {
        /// Number of lists still open
        depth: usize,
    },

    /// A list was opened past the configured nesting limit
    #[error("Nesting too deep: limit {limit}")]
    NestingTooDeep {
        /// Configured maximum depth
        limit: usize,
    },

    /// Reading source text failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Create a classification error for a token
    pub fn cant_parse(token: impl Into<String>) -> Self {
        Error::CantParse {
            token: token.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Result type for reader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Diagnostic severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The tree holds an `Error` atom for this problem
    Error,
    /// Reported only; nothing in the tree marks it
    Warning,
}

/// A problem noticed while reading, with its source position
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// What went wrong
    pub error: Error,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Whether an `Error` atom was placed in the tree
    pub in_tree: bool,
}

impl Diagnostic {
    /// Creates a report-only diagnostic
    pub fn new(error: Error, line: usize, column: usize) -> Self {
        Diagnostic {
            error,
            line,
            column,
            in_tree: false,
        }
    }

    /// Marks the diagnostic as also present in the tree
    pub fn with_atom(mut self) -> Self {
        self.in_tree = true;
        self
    }

    /// Classify severity
    pub fn severity(&self) -> Severity {
        if self.in_tree {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}:{}: {}: {}", self.line, self.column, label, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cant_parse_message() {
        assert_eq!(Error::cant_parse("12a").to_string(), "Can't parse: 12a");
    }

    #[test]
    fn test_unterminated_messages() {
        let err = Error::UnterminatedString {
            token: "\"abc".to_string(),
        };
        assert_eq!(err.to_string(), "Unterminated string: \"abc");
        assert_eq!(
            Error::UnterminatedList { depth: 2 }.to_string(),
            "Unterminated list"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.lisp");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(ref msg) if msg.contains("missing.lisp")));
    }

    #[test]
    fn test_diagnostic_display_and_severity() {
        let diag = Diagnostic::new(Error::StrayQuote { line: 2, column: 7 }, 2, 7);
        assert_eq!(diag.severity(), Severity::Warning);
        assert_eq!(
            diag.to_string(),
            "2:7: warning: Unexpected '\"' after token at line 2, column 7"
        );

        let diag = Diagnostic::new(Error::NestingTooDeep { limit: 4 }, 1, 5).with_atom();
        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.to_string(), "1:5: error: Nesting too deep: limit 4");
    }
}

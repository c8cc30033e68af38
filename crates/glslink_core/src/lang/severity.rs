//! Diagnostic severities emitted by reference-style GLSL compilers.
//!
//! Logs follow the `SEVERITY: column:row: message` convention, e.g. `ERROR: 0:12: 'foo' : undeclared
//! identifier`. The severity token includes its trailing colon.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Parse the first token of a log line. Anything other than `ERROR:` / `WARNING:` is not a
    /// positioned diagnostic.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ERROR:" => Some(Severity::Error),
            "WARNING:" => Some(Severity::Warning),
            _ => None,
        }
    }

    /// The token as it appears in compiler logs (with the colon).
    pub fn as_token(self) -> &'static str {
        match self {
            Severity::Error => "ERROR:",
            Severity::Warning => "WARNING:",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

//! Structured configuration issues
//!
//! Validation never fails hard on its own: it reports every issue it finds
//! and lets the caller decide whether errors are fatal.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work as written.
    Error,
    /// The configuration works but a value was replaced by a fallback.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field, e.g. `conference.rounds`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(severity: Severity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// True if any of the issues is an error.
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(ConfigIssue::is_error)
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity.as_str(), self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let issue = ConfigIssue::new(Severity::Warning, "pacing.after_chair_ms", "too long");
        assert_eq!(issue.to_string(), "[warning] pacing.after_chair_ms: too long");
    }

    #[test]
    fn test_has_errors() {
        let warning = ConfigIssue::new(Severity::Warning, "a", "b");
        let error = ConfigIssue::new(Severity::Error, "c", "d");
        assert!(!ConfigIssue::has_errors(&[warning.clone()]));
        assert!(ConfigIssue::has_errors(&[warning, error]));
    }
}

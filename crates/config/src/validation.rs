//! Environment validation utilities

use types::ConfigError;

/// Aggregating validation report for environment configuration
///
/// Unlike fail-fast validation, every issue is collected so the startup
/// error names all offending variables at once.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

/// A single validation issue tied to one environment variable
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub variable: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, variable: &str, message: &str) {
        self.issues.push(ValidationIssue {
            variable: variable.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// One line per issue, `VARIABLE: message`
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(|issue| format!("{}: {}", issue.variable, issue.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Convert the report into a fatal configuration error
    pub fn into_error(self) -> ConfigError {
        ConfigError::Invalid {
            summary: self.summary(),
        }
    }
}

/// Coerce common stringly-typed truthy/falsy representations to a boolean
///
/// Accepts true/false, 1/0, yes/no, on/off (case-insensitive). Anything else
/// is rejected so typos fail validation instead of silently reading as false.
pub fn coerce_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_bool_accepts_common_forms() {
        assert_eq!(coerce_bool("true"), Some(true));
        assert_eq!(coerce_bool("TRUE"), Some(true));
        assert_eq!(coerce_bool("1"), Some(true));
        assert_eq!(coerce_bool("yes"), Some(true));
        assert_eq!(coerce_bool("on"), Some(true));
        assert_eq!(coerce_bool("false"), Some(false));
        assert_eq!(coerce_bool("0"), Some(false));
        assert_eq!(coerce_bool("no"), Some(false));
        assert_eq!(coerce_bool(""), Some(false));
        assert_eq!(coerce_bool("maybe"), None);
    }

    #[test]
    fn summary_lists_each_variable_on_its_own_line() {
        let mut report = ValidationReport::new();
        report.add("DB_CONNECTION_STRING", "missing required value");
        report.add("DB_MIGRATING", "not a boolean");
        let summary = report.summary();
        let lines: Vec<_> = summary.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("DB_CONNECTION_STRING"));
        assert!(lines[1].starts_with("DB_MIGRATING"));
    }

    #[test]
    fn empty_report_has_no_issues() {
        let report = ValidationReport::new();
        assert!(!report.has_issues());
        assert_eq!(report.summary(), "");
    }
}

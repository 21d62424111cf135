use anyhow::Result;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use crate::builders::classifier::{LineClassifier, LineKind};
use crate::builders::patterns::{Rejection, RuleBuilder, RuleKind};
use crate::core::config;

/// Hostname syntax: dot-separated labels of letters, digits, `-` and `_`,
/// optionally ending in a dot.
static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_](?:[A-Za-z0-9_-]*[A-Za-z0-9_])?\.)*[A-Za-z0-9_](?:[A-Za-z0-9_-]*[A-Za-z0-9_])?\.?$")
        .expect("hostname pattern is valid")
});

/// The `ConfigValidator` trait defines the public interface for validating the
/// converter configuration.
pub trait ConfigValidator {
    /// Performs a full validation of the `ConverterConfig` and returns
    /// a list of issues found.
    ///
    /// # Arguments
    /// * `config`: The `ConverterConfig` to be validated.
    ///
    /// # Returns
    /// A `Result<Vec<String>>` where each string describes one issue. An empty
    /// vector means the config is usable.
    fn validate_config(&self, config: &config::ConverterConfig) -> Result<Vec<String>>;
}

/// Checks a config for values the converter or its host would refuse.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigValidator for StandardValidator {
    fn validate_config(&self, config: &config::ConverterConfig) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if config.version != config::CONFIG_VERSION {
            issues.push(format!("Unsupported config version: {}", config.version));
        }

        // The host treats priority 0 as invalid.
        if config.rules.priority < 1 {
            issues.push("Rule priority must be at least 1".to_string());
        }

        if config.rules.resource_types.is_empty() {
            issues.push("At least one resource type is required".to_string());
        }

        let mut seen = HashSet::new();
        for resource_type in &config.rules.resource_types {
            if !seen.insert(resource_type) {
                issues.push(format!("Duplicate resource type: {resource_type}"));
            }
        }

        if config.output.max_rules == Some(0) {
            issues.push("max_rules of 0 would drop every rule".to_string());
        }

        Ok(issues)
    }
}

/// How much a diagnostic matters for the converted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The line is converted, but the result may not do what the author meant.
    Warning,
    /// The line produces no rule.
    Skipped,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Skipped => write!(f, "skipped"),
        }
    }
}

/// A note about one line of a filter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} [{}]: {}", self.line, self.severity, self.message)
    }
}

/// The `ListChecker` trait describes why lines of a filter list will or will
/// not turn into rules.
///
/// Checking never changes what the converter produces; it only explains it.
pub trait ListChecker {
    /// Returns one diagnostic per noteworthy line, in source order.
    fn check_list(&self, content: &str) -> Vec<Diagnostic>;
}

/// Standard list checker built on the same classifier and builder the
/// conversion uses, so its verdicts always agree with the output.
pub struct ListValidator<'a> {
    classifier: &'a LineClassifier,
    builder: &'a RuleBuilder,
}

impl<'a> ListValidator<'a> {
    pub fn new(classifier: &'a LineClassifier, builder: &'a RuleBuilder) -> Self {
        Self {
            classifier,
            builder,
        }
    }

    /// Names the unsupported syntax a skipped line appears to use.
    ///
    /// These are descriptions only; none of these shapes is converted.
    fn describe_unsupported(&self, line: &str) -> &'static str {
        if line.starts_with('[') && line.ends_with(']') {
            "list header"
        } else if line.starts_with("@@") {
            "exception rules are not supported"
        } else if line.contains("#@#") || line.contains("##") || line.contains("#?#") {
            "element hiding rules are not supported"
        } else if line.len() > 1 && line.starts_with('/') && line.ends_with('/') {
            "regex rules are not supported"
        } else if line.contains('$') {
            "rule options are not supported"
        } else {
            "unsupported rule syntax"
        }
    }

    fn check_domain(&self, domain: &str) -> Option<String> {
        if HOSTNAME.is_match(domain) {
            None
        } else {
            Some(format!("domain {domain:?} is not a plain hostname"))
        }
    }
}

impl ListChecker for ListValidator<'_> {
    fn check_list(&self, content: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for line in self.classifier.classify(content) {
            if line.kind != LineKind::Candidate {
                continue;
            }

            let (severity, message) = match self.builder.recognize(line.text) {
                Ok(RuleKind::DomainBlock { domain }) => match self.check_domain(&domain) {
                    Some(message) => (Severity::Warning, message),
                    None => continue,
                },
                Err(Rejection::EmptyDomain) => {
                    (Severity::Skipped, Rejection::EmptyDomain.to_string())
                }
                Err(Rejection::Unrecognized) => (
                    Severity::Skipped,
                    self.describe_unsupported(line.text).to_string(),
                ),
            };

            diagnostics.push(Diagnostic {
                line: line.number,
                severity,
                message,
            });
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::patterns::ResourceType;
    use crate::core::config::ConverterConfig;

    #[test]
    fn test_default_config_is_valid() {
        let issues = StandardValidator::new()
            .validate_config(&ConverterConfig::default())
            .unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_config_issues() {
        let mut config = ConverterConfig::default();
        config.version = "2.0".to_string();
        config.rules.priority = 0;
        config.rules.resource_types = vec![ResourceType::Script, ResourceType::Script];
        config.output.max_rules = Some(0);

        let issues = StandardValidator::new().validate_config(&config).unwrap();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().any(|i| i.contains("Duplicate resource type: script")));
    }

    #[test]
    fn test_list_diagnostics() {
        let classifier = LineClassifier::new();
        let builder = RuleBuilder::default();
        let checker = ListValidator::new(&classifier, &builder);

        let content = "[Adblock Plus 2.0]\n! comment\n||good.example^\n@@||allowed.example^\n\
                       example.com##.banner\n||ads.example^$third-party\n||^\n||bad domain^\n/ads[0-9]+/";
        let diagnostics = checker.check_list(content);
        let summary: Vec<(usize, Severity)> =
            diagnostics.iter().map(|d| (d.line, d.severity)).collect();
        assert_eq!(
            summary,
            vec![
                (1, Severity::Skipped),
                (4, Severity::Skipped),
                (5, Severity::Skipped),
                (6, Severity::Skipped),
                (7, Severity::Skipped),
                (8, Severity::Warning),
                (9, Severity::Skipped),
            ]
        );
        assert_eq!(diagnostics[0].message, "list header");
        assert_eq!(diagnostics[1].message, "exception rules are not supported");
        assert_eq!(diagnostics[2].message, "element hiding rules are not supported");
        assert_eq!(diagnostics[3].message, "rule options are not supported");
        assert_eq!(diagnostics[4].message, "empty domain");
        assert_eq!(diagnostics[6].message, "regex rules are not supported");
    }

    #[test]
    fn test_hostname_check() {
        assert!(HOSTNAME.is_match("example.com"));
        assert!(HOSTNAME.is_match("a-b.c_d.example."));
        assert!(!HOSTNAME.is_match("*.example.com"));
        assert!(!HOSTNAME.is_match("ex\"ample"));
        assert!(!HOSTNAME.is_match("-example.com"));
    }
}

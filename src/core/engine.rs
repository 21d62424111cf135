use anyhow::Result;
use log::{debug, info, warn};

use crate::builders::classifier::{LineClassifier, LineKind};
use crate::builders::patterns::{FIRST_RULE_ID, FilterRule, RuleBuilder, RulePolicy};
use crate::builders::serializer::{JsonStyle, RuleSetSerializer};
use crate::core::config::ConverterConfig;

/// Line counts gathered during one conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub comment_lines: usize,
    pub rules: usize,
    pub skipped_lines: usize,
    /// Rules dropped from the tail because of `max_rules`.
    pub truncated_rules: usize,
}

/// The rules produced by one run, in source order, plus its statistics.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub rules: Vec<FilterRule>,
    pub stats: ConversionStats,
}

/// Drives classifier -> builder -> serializer for one input at a time.
///
/// The engine is immutable; the rule identifier counter lives on the stack of
/// [`ConversionEngine::convert`], so one engine may serve many runs,
/// concurrently if need be.
pub struct ConversionEngine {
    classifier: LineClassifier,
    builder: RuleBuilder,
    serializer: RuleSetSerializer,
    max_rules: Option<usize>,
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new(RulePolicy::default(), JsonStyle::Compact, None)
    }
}

impl ConversionEngine {
    pub fn new(policy: RulePolicy, style: JsonStyle, max_rules: Option<usize>) -> Self {
        Self {
            classifier: LineClassifier::new(),
            builder: RuleBuilder::new(policy),
            serializer: RuleSetSerializer::new(style),
            max_rules,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        let style = if config.output.pretty {
            JsonStyle::Pretty
        } else {
            JsonStyle::Compact
        };
        Self::new(config.rules.clone(), style, config.output.max_rules)
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    pub fn builder(&self) -> &RuleBuilder {
        &self.builder
    }

    /// Parses `content` into rules. Never fails: lines that do not form a
    /// supported rule are counted as skipped and otherwise ignored.
    pub fn convert(&self, content: &str) -> Conversion {
        let mut stats = ConversionStats::default();
        let mut rules = Vec::new();
        let mut next_id = FIRST_RULE_ID;

        for line in self.classifier.classify(content) {
            stats.total_lines += 1;
            match line.kind {
                LineKind::Blank => stats.blank_lines += 1,
                LineKind::Comment => stats.comment_lines += 1,
                LineKind::Candidate => match self.builder.build(line.text, next_id) {
                    Some((rule, following)) => {
                        rules.push(rule);
                        next_id = following;
                    }
                    None => {
                        debug!("Skipping line {}: {:?}", line.number, line.text);
                        stats.skipped_lines += 1;
                    }
                },
            }
        }

        if let Some(max) = self.max_rules
            && rules.len() > max
        {
            warn!("Truncating from {} to {} rules", rules.len(), max);
            stats.truncated_rules = rules.len() - max;
            rules.truncate(max);
        }
        stats.rules = rules.len();

        info!(
            "Parsed {} rules from {} lines ({} skipped)",
            stats.rules, stats.total_lines, stats.skipped_lines
        );
        Conversion { rules, stats }
    }

    /// Serializes previously converted rules with this engine's JSON style.
    pub fn render(&self, rules: &[FilterRule]) -> Result<String> {
        self.serializer.to_json(rules)
    }

    /// Converts and serializes in one step.
    pub fn transform(&self, content: &str) -> Result<String> {
        let conversion = self.convert(content);
        self.render(&conversion.rules)
    }
}

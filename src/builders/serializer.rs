use anyhow::{Context, Result};
use serde::Serialize;

use crate::builders::patterns::{ActionKind, FilterRule, ResourceType, RuleId};

/// Wire shape of one declarative rule.
///
/// These structs borrow from the [`FilterRule`]s they describe, so building
/// the document costs no string copies. serde_json performs all escaping.
#[derive(Debug, Serialize)]
pub struct DnrRule<'a> {
    pub id: RuleId,
    pub priority: u32,
    pub action: DnrAction,
    pub condition: DnrCondition<'a>,
}

#[derive(Debug, Serialize)]
pub struct DnrAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DnrCondition<'a> {
    pub url_filter: &'a str,
    pub resource_types: &'a [ResourceType],
}

impl<'a> From<&'a FilterRule> for DnrRule<'a> {
    fn from(rule: &'a FilterRule) -> Self {
        Self {
            id: rule.id,
            priority: rule.priority,
            action: DnrAction { kind: rule.action },
            condition: DnrCondition {
                url_filter: &rule.url_filter,
                resource_types: &rule.resource_types,
            },
        }
    }
}

/// Layout of the emitted JSON text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    #[default]
    Compact,
    Pretty,
}

/// Renders an ordered rule list as a JSON array.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleSetSerializer {
    style: JsonStyle,
}

impl RuleSetSerializer {
    pub fn new(style: JsonStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> JsonStyle {
        self.style
    }

    /// Serializes `rules` in order. An empty slice renders as `[]`.
    pub fn to_json(&self, rules: &[FilterRule]) -> Result<String> {
        let document: Vec<DnrRule<'_>> = rules.iter().map(DnrRule::from).collect();
        match self.style {
            JsonStyle::Compact => {
                serde_json::to_string(&document).context("Failed to serialize rules to JSON")
            }
            JsonStyle::Pretty => serde_json::to_string_pretty(&document)
                .context("Failed to serialize rules to JSON"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::patterns::{RuleBuilder, FIRST_RULE_ID};
    use serde_json::{Value, json};

    fn rule_for(line: &str) -> FilterRule {
        RuleBuilder::default().build(line, FIRST_RULE_ID).unwrap().0
    }

    #[test]
    fn test_empty_rule_set() {
        let serializer = RuleSetSerializer::default();
        assert_eq!(serializer.to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_rule_schema() {
        let serializer = RuleSetSerializer::default();
        let output = serializer.to_json(&[rule_for("||example.com^")]).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            json!([{
                "id": 1,
                "priority": 1,
                "action": { "type": "block" },
                "condition": {
                    "urlFilter": "||example.com/",
                    "resourceTypes": ["main_frame", "sub_frame", "script", "xmlhttprequest"]
                }
            }])
        );
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let serializer = RuleSetSerializer::default();
        let output = serializer
            .to_json(&[rule_for("||ev\"il\\dom\u{1}ain^")])
            .unwrap();
        assert!(output.contains(r#"ev\"il\\dom\u0001ain"#));

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value[0]["condition"]["urlFilter"],
            Value::String("||ev\"il\\dom\u{1}ain/".to_string())
        );
    }

    #[test]
    fn test_pretty_output_parses_to_same_value() {
        let rules = [rule_for("||a.com^"), rule_for("||b.com^")];
        let compact = RuleSetSerializer::new(JsonStyle::Compact).to_json(&rules).unwrap();
        let pretty = RuleSetSerializer::new(JsonStyle::Pretty).to_json(&rules).unwrap();
        assert!(pretty.contains('\n'));
        let a: Value = serde_json::from_str(&compact).unwrap();
        let b: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }
}

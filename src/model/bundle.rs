//! Rule bundles (analysis targets) and uploaded rule files.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a bundle's rulesets are alternatives or all apply together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleKind {
    /// Rulesets are alternative targets; exactly one is picked
    Category,
    /// Every ruleset applies
    #[default]
    #[serde(other)]
    Bundle,
}

/// Target / source labels a ruleset contributes to the analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub name: String,
    #[serde(default)]
    pub metadata: RulesetMetadata,
}

/// A selectable card on the targets step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBundle {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: BundleKind,
    #[serde(default)]
    pub rulesets: Vec<Ruleset>,
}

impl RuleBundle {
    #[must_use]
    pub fn is_category(&self) -> bool {
        self.kind == BundleKind::Category
    }

    /// Non-empty ruleset targets, in ruleset order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.rulesets
            .iter()
            .filter_map(|r| r.metadata.target.as_deref())
            .filter(|t| !t.is_empty())
    }

    /// Non-empty ruleset sources, in ruleset order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.rulesets
            .iter()
            .filter_map(|r| r.metadata.source.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Whether `target` belongs to one of this bundle's rulesets.
    #[must_use]
    pub fn owns_target(&self, target: &str) -> bool {
        self.rulesets
            .iter()
            .any(|r| r.metadata.target.as_deref() == Some(target))
    }

    #[must_use]
    pub fn owns_source(&self, source: &str) -> bool {
        self.rulesets
            .iter()
            .any(|r| r.metadata.source.as_deref() == Some(source))
    }
}

/// Outcome of reading an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReadResult {
    Success,
    Danger,
}

/// A custom rules file attached on the custom-rules step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadFile {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_result: Option<ReadResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl ReadFile {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.load_result == Some(ReadResult::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_a_plain_bundle() {
        let bundle: RuleBundle =
            serde_json::from_str(r#"{"id": 1, "name": "EAP", "kind": "something-new"}"#)
                .expect("valid bundle");
        assert!(!bundle.is_category());
        assert!(bundle.rulesets.is_empty());
    }

    #[test]
    fn test_targets_skip_empty_metadata() {
        let bundle: RuleBundle = serde_json::from_str(
            r#"{"id": 1, "name": "Cloud", "kind": "category", "rulesets": [
                {"name": "a", "metadata": {"target": "cloud-readiness", "source": "java"}},
                {"name": "b", "metadata": {"target": ""}},
                {"name": "c"}
            ]}"#,
        )
        .expect("valid bundle");
        assert!(bundle.is_category());
        assert_eq!(bundle.targets().collect::<Vec<_>>(), vec!["cloud-readiness"]);
        assert_eq!(bundle.sources().collect::<Vec<_>>(), vec!["java"]);
        assert!(bundle.owns_target("cloud-readiness"));
        assert!(!bundle.owns_source("go"));
    }
}

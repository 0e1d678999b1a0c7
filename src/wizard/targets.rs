//! Rule bundle cards on the set-targets step.
//!
//! Each card is a [`RuleBundle`]. Selecting a card contributes its targets
//! and sources to the form and records a reference to the bundle; a
//! category bundle contributes only the one target picked on the card.

use super::schema::WizardValues;
use crate::model::{Ref, RuleBundle};

/// Bundles in the configured display order. Unknown ids are skipped.
pub fn ordered_bundles<'a>(order: &[u64], bundles: &'a [RuleBundle]) -> Vec<&'a RuleBundle> {
    order
        .iter()
        .filter_map(|id| {
            let bundle = bundles.iter().find(|b| b.id == *id);
            if bundle.is_none() {
                tracing::debug!(bundle_id = id, "bundle order names an unknown bundle");
            }
            bundle
        })
        .collect()
}

/// Target a card shows preselected: the first ruleset target.
#[must_use]
pub fn default_card_target(bundle: &RuleBundle) -> Option<&str> {
    bundle.targets().next()
}

/// Targets a card contributes when `selected_target` is picked on it.
fn card_targets(bundle: &RuleBundle, selected_target: &str) -> Vec<String> {
    if bundle.is_category() {
        vec![selected_target.to_string()]
    } else {
        bundle.targets().map(str::to_string).collect()
    }
}

impl WizardValues {
    /// Whether `bundle`'s card is selected. Cards match by bundle name.
    #[must_use]
    pub fn is_card_selected(&self, bundle: &RuleBundle) -> bool {
        self.targets
            .form_rule_bundles
            .iter()
            .any(|r| r.name == bundle.name)
    }

    /// Pick a different target on an already selected card.
    ///
    /// The bundle's previous targets are replaced; other cards are untouched.
    pub fn select_card_target(&mut self, selected_target: &str, bundle: &RuleBundle) {
        let targets = &mut self.targets.form_targets;
        targets.retain(|t| !bundle.owns_target(t));
        targets.extend(card_targets(bundle, selected_target));
    }

    /// Select or deselect a card.
    pub fn toggle_card(&mut self, is_selecting: bool, selected_target: &str, bundle: &RuleBundle) {
        self.custom_rules
            .form_sources
            .retain(|s| !bundle.owns_source(s));
        self.targets.form_targets.retain(|t| !bundle.owns_target(t));
        self.targets.form_rule_bundles.retain(|r| r.id != bundle.id);

        if is_selecting {
            self.custom_rules
                .form_sources
                .extend(bundle.sources().map(str::to_string));
            self.targets
                .form_targets
                .extend(card_targets(bundle, selected_target));
            self.targets
                .form_rule_bundles
                .push(Ref::new(bundle.id, bundle.name.clone()));
        }
        tracing::debug!(
            bundle = %bundle.name,
            is_selecting,
            targets = self.targets.form_targets.len(),
            "toggled target card"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BundleKind, Ruleset, RulesetMetadata};

    fn ruleset(target: &str, source: Option<&str>) -> Ruleset {
        Ruleset {
            name: target.to_string(),
            metadata: RulesetMetadata {
                target: Some(target.to_string()),
                source: source.map(str::to_string),
            },
        }
    }

    fn eap() -> RuleBundle {
        RuleBundle {
            id: 1,
            name: "JBoss EAP".into(),
            description: None,
            kind: BundleKind::Bundle,
            rulesets: vec![ruleset("eap7", Some("eap6")), ruleset("eap8", None)],
        }
    }

    fn linux() -> RuleBundle {
        RuleBundle {
            id: 2,
            name: "Linux".into(),
            description: None,
            kind: BundleKind::Category,
            rulesets: vec![ruleset("linux", None), ruleset("rhel", None)],
        }
    }

    #[test]
    fn test_ordered_bundles_skips_unknown_ids() {
        let bundles = vec![eap(), linux()];
        let ordered = ordered_bundles(&[2, 99, 1], &bundles);
        assert_eq!(ordered.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_selecting_plain_bundle_adds_all_targets_and_sources() {
        let mut values = WizardValues::default();
        values.toggle_card(true, "eap7", &eap());

        assert_eq!(values.targets.form_targets, vec!["eap7", "eap8"]);
        assert_eq!(values.custom_rules.form_sources, vec!["eap6"]);
        assert!(values.is_card_selected(&eap()));
    }

    #[test]
    fn test_category_card_contributes_picked_target_only() {
        let mut values = WizardValues::default();
        values.toggle_card(true, "rhel", &linux());
        assert_eq!(values.targets.form_targets, vec!["rhel"]);

        values.select_card_target("linux", &linux());
        assert_eq!(values.targets.form_targets, vec!["linux"]);
    }

    #[test]
    fn test_deselecting_keeps_other_cards() {
        let mut values = WizardValues::default();
        values.toggle_card(true, "eap7", &eap());
        values.toggle_card(true, "rhel", &linux());
        values.toggle_card(false, "eap7", &eap());

        assert_eq!(values.targets.form_targets, vec!["rhel"]);
        assert!(values.custom_rules.form_sources.is_empty());
        assert!(!values.is_card_selected(&eap()));
        assert!(values.is_card_selected(&linux()));
    }

    #[test]
    fn test_reselecting_does_not_duplicate() {
        let mut values = WizardValues::default();
        values.toggle_card(true, "eap7", &eap());
        values.toggle_card(true, "eap7", &eap());
        assert_eq!(values.targets.form_targets.len(), 2);
        assert_eq!(values.targets.form_rule_bundles.len(), 1);
    }

    #[test]
    fn test_default_card_target() {
        assert_eq!(default_card_target(&linux()), Some("linux"));
    }
}

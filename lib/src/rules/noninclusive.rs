use crate::error::{ModelError, ValidationError};
use crate::model::Node;
use crate::occurrence::TextOccurrence;
use crate::report::ValidationEvent;
use crate::validate::TextOccurrenceConsumer;
use serde::Deserialize;
use std::collections::BTreeMap;

const DEFAULT_TERMS: &[(&str, &[&str])] = &[
    ("master", &["primary", "leader", "main"]),
    ("slave", &["secondary", "replica", "follower", "worker"]),
    ("blacklist", &["denyList"]),
    ("whitelist", &["allowList"]),
];

/// Settings for [`NoninclusiveTermsRule`].
///
/// `terms` maps each term to flag onto its suggested replacements; they are
/// added to the built-in list unless `exclude_defaults` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NoninclusiveTermsConfig {
    pub terms: BTreeMap<String, Vec<String>>,
    pub exclude_defaults: bool,
}

impl NoninclusiveTermsConfig {
    pub fn from_json(value: serde_json::Value) -> Result<Self, ModelError> {
        serde_json::from_value(value).map_err(|e| ModelError::InvalidConfig(e.to_string()))
    }

    pub fn from_node(node: &Node) -> Result<Self, ModelError> {
        Self::from_json(node.clone().into())
    }
}

/// Flags text anywhere in the model that contains a non-inclusive term.
#[derive(Debug, Clone)]
pub struct NoninclusiveTermsRule {
    // lowercased term -> replacements
    terms: BTreeMap<String, Vec<String>>,
}

impl NoninclusiveTermsRule {
    pub const NAME: &'static str = "NoninclusiveTerms";

    pub fn new(config: NoninclusiveTermsConfig) -> Result<Self, ModelError> {
        if config.exclude_defaults && config.terms.is_empty() {
            return Err(ModelError::InvalidConfig(
                "`excludeDefaults` requires at least one entry in `terms`".to_string(),
            ));
        }
        let mut terms = BTreeMap::new();
        if !config.exclude_defaults {
            for (term, replacements) in DEFAULT_TERMS {
                terms.insert(
                    term.to_string(),
                    replacements.iter().map(|r| r.to_string()).collect(),
                );
            }
        }
        for (term, replacements) in config.terms {
            terms.insert(term.to_lowercase(), replacements);
        }
        Ok(NoninclusiveTermsRule { terms })
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    fn message(occurrence: &TextOccurrence, term: &str, replacements: &[String]) -> String {
        let suggestion = if replacements.is_empty() {
            String::new()
        } else {
            let quoted: Vec<String> = replacements.iter().map(|r| format!("`{}`", r)).collect();
            format!(
                " Consider using one of the following terms instead: {}",
                quoted.join(", ")
            )
        };

        let Some(trait_id) = occurrence.trait_id() else {
            return format!(
                "Shape name `{}` uses a non-inclusive term `{}`.{}",
                occurrence.text(),
                term,
                suggestion
            );
        };

        let path = match occurrence.path_string() {
            p if p.is_empty() => "<root>".to_string(),
            p => p,
        };
        let location = if occurrence.is_trait_key_name() { "key" } else { "value" };
        format!(
            "'{}' trait {} at path `{}` uses a non-inclusive term `{}`.{}",
            trait_id, location, path, term, suggestion
        )
    }
}

impl TextOccurrenceConsumer for NoninclusiveTermsRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(
        &self,
        occurrence: &TextOccurrence,
    ) -> Result<Vec<ValidationEvent>, ValidationError> {
        let haystack = occurrence.text().to_lowercase();
        let events = self
            .terms
            .iter()
            .filter(|(term, _)| haystack.contains(term.as_str()))
            .map(|(term, replacements)| {
                ValidationEvent::warning(
                    Self::NAME,
                    occurrence.shape().clone(),
                    occurrence.trait_id().cloned(),
                    Self::message(occurrence, term, replacements),
                )
            })
            .collect();
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeId;
    use serde_json::json;

    fn rule() -> NoninclusiveTermsRule {
        NoninclusiveTermsRule::new(NoninclusiveTermsConfig::default()).unwrap()
    }

    fn shape() -> ShapeId {
        ShapeId::new("example", "MasterRecord")
    }

    #[test]
    fn flags_shape_names_case_insensitively() {
        let occurrence = TextOccurrence::shape_name(shape(), "MasterRecord");
        let events = rule().evaluate(&occurrence).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].message(),
            "Shape name `MasterRecord` uses a non-inclusive term `master`. Consider using one \
             of the following terms instead: `primary`, `leader`, `main`"
        );
        assert_eq!(events[0].trait_id(), None);
    }

    #[test]
    fn reports_trait_location() {
        let doc = ShapeId::new("smithy.api", "documentation");
        let key = TextOccurrence::in_trait(
            &shape(),
            &doc,
            "whitelist",
            vec!["config".into(), ".whitelist".into()],
            true,
        );
        let value = TextOccurrence::in_trait(&shape(), &doc, "the slave node", Vec::new(), false);
        let rule = rule();

        let key_events = rule.evaluate(&key).unwrap();
        assert!(key_events[0]
            .message()
            .starts_with("'smithy.api#documentation' trait key at path `config.whitelist`"));
        assert_eq!(key_events[0].trait_id(), Some(&doc));

        let value_events = rule.evaluate(&value).unwrap();
        assert!(value_events[0]
            .message()
            .starts_with("'smithy.api#documentation' trait value at path `<root>`"));
    }

    #[test]
    fn custom_terms_only() {
        let config = NoninclusiveTermsConfig::from_json(json!({
            "terms": {"Dummy": []},
            "excludeDefaults": true
        }))
        .unwrap();
        let rule = NoninclusiveTermsRule::new(config).unwrap();
        assert_eq!(rule.terms().collect::<Vec<_>>(), ["dummy"]);

        let hit = rule
            .evaluate(&TextOccurrence::shape_name(shape(), "DummyValue"))
            .unwrap();
        assert_eq!(
            hit[0].message(),
            "Shape name `DummyValue` uses a non-inclusive term `dummy`."
        );
        let miss = rule
            .evaluate(&TextOccurrence::shape_name(shape(), "MasterRecord"))
            .unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn rejects_empty_exclusive_config() {
        let config = NoninclusiveTermsConfig {
            terms: BTreeMap::new(),
            exclude_defaults: true,
        };
        assert!(matches!(
            NoninclusiveTermsRule::new(config),
            Err(ModelError::InvalidConfig(_))
        ));
        assert!(NoninclusiveTermsConfig::from_json(json!({"unknown": 1})).is_err());
    }

    #[test]
    fn config_from_node() {
        let node = Node::from(json!({"terms": {"foo": ["bar"]}}));
        let config = NoninclusiveTermsConfig::from_node(&node).unwrap();
        assert_eq!(config.terms["foo"], ["bar".to_string()]);
        assert!(!config.exclude_defaults);
    }
}

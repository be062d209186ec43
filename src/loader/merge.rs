//! Combining per-module translation objects into one.
//!
//! All strategies are right-biased: when two modules set the same key, the
//! one later in merge order wins.

use super::options::{LoaderConfig, TranslateMerger};
use super::TranslationObject;
use crate::error::LoaderError;
use serde_json::Value;
use std::fmt;

/// Merge `source` into `target`, recursing where both sides hold objects.
pub fn deep_merge(target: &mut TranslationObject, source: TranslationObject) {
    for (key, value) in source {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = target.get_mut(&key) {
                deep_merge(existing, incoming);
                continue;
            }
            target.insert(key, Value::Object(incoming));
        } else {
            target.insert(key, value);
        }
    }
}

/// Overwrite top-level keys of `target` with those of `source`.
pub fn shallow_merge(target: &mut TranslationObject, source: TranslationObject) {
    target.extend(source);
}

/// Fold `translations` left to right with the deep or shallow merge.
pub fn merge_all(translations: Vec<TranslationObject>, deep: bool) -> TranslationObject {
    translations
        .into_iter()
        .fold(TranslationObject::new(), |mut acc, translation| {
            if deep {
                deep_merge(&mut acc, translation);
            } else {
                shallow_merge(&mut acc, translation);
            }
            acc
        })
}

#[derive(Clone)]
pub enum MergeStrategy {
    Deep,
    Shallow,
    /// Caller-supplied; its result is returned verbatim.
    Custom(TranslateMerger),
}

impl MergeStrategy {
    /// A custom merger wins over the `deep_merge` flag.
    pub fn from_config(config: &LoaderConfig) -> Self {
        match &config.translate_merger {
            Some(merger) => MergeStrategy::Custom(merger.clone()),
            None if config.deep_merge => MergeStrategy::Deep,
            None => MergeStrategy::Shallow,
        }
    }

    pub fn merge(&self, translations: Vec<TranslationObject>) -> Result<TranslationObject, LoaderError> {
        match self {
            MergeStrategy::Deep => Ok(merge_all(translations, true)),
            MergeStrategy::Shallow => Ok(merge_all(translations, false)),
            MergeStrategy::Custom(merger) => merger(translations).map_err(LoaderError::Merge),
        }
    }
}

impl fmt::Debug for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::Deep => f.write_str("Deep"),
            MergeStrategy::Shallow => f.write_str("Shallow"),
            MergeStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn obj(value: Value) -> TranslationObject {
        value.as_object().cloned().expect("test value must be an object")
    }

    // ==================== Deep Merge Tests ====================

    #[test]
    fn test_deep_merge_keeps_nested_keys_from_both_sides() {
        let merged = merge_all(
            vec![obj(json!({"parent": {"x": 1}})), obj(json!({"parent": {"y": 2}}))],
            true,
        );
        assert_eq!(Value::Object(merged), json!({"parent": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_deep_merge_later_value_wins() {
        let merged = merge_all(
            vec![
                obj(json!({"key": "root", "parent": {"child": {"a": "root"}}})),
                obj(json!({"key": "feature", "parent": {"child": {"a": "feature", "b": "x"}}})),
            ],
            true,
        );
        assert_eq!(
            Value::Object(merged),
            json!({"key": "feature", "parent": {"child": {"a": "feature", "b": "x"}}})
        );
    }

    #[test]
    fn test_deep_merge_object_replaces_scalar_and_back() {
        let merged = merge_all(
            vec![
                obj(json!({"a": "text", "b": {"nested": "x"}})),
                obj(json!({"a": {"now": "object"}, "b": "now text"})),
            ],
            true,
        );
        assert_eq!(
            Value::Object(merged),
            json!({"a": {"now": "object"}, "b": "now text"})
        );
    }

    #[test]
    fn test_deep_merge_does_not_alias_inputs() {
        let first = obj(json!({"parent": {"x": 1}}));
        let mut merged = merge_all(vec![first.clone(), obj(json!({"parent": {"y": 2}}))], true);
        merged.insert("extra".to_string(), json!(true));
        assert_eq!(first, obj(json!({"parent": {"x": 1}})));
    }

    // ==================== Shallow Merge Tests ====================

    #[test]
    fn test_shallow_merge_never_recurses() {
        let merged = merge_all(
            vec![obj(json!({"parent": {"x": 1}})), obj(json!({"parent": {"y": 2}}))],
            false,
        );
        assert_eq!(Value::Object(merged), json!({"parent": {"y": 2}}));
    }

    #[test]
    fn test_merge_empty_list() {
        assert!(merge_all(Vec::new(), true).is_empty());
        assert!(merge_all(Vec::new(), false).is_empty());
    }

    // ==================== Strategy Tests ====================

    #[test]
    fn test_strategy_from_config() {
        let config = LoaderConfig::default();
        assert!(matches!(MergeStrategy::from_config(&config), MergeStrategy::Deep));

        let config = LoaderConfig::default().with_deep_merge(false);
        assert!(matches!(MergeStrategy::from_config(&config), MergeStrategy::Shallow));

        let config = LoaderConfig::default()
            .with_deep_merge(false)
            .with_translate_merger(|_| Ok(TranslationObject::new()));
        assert!(matches!(MergeStrategy::from_config(&config), MergeStrategy::Custom(_)));
    }

    #[test]
    fn test_custom_merger_result_is_verbatim() {
        let config = LoaderConfig::default().with_translate_merger(|translations| {
            let mut out = TranslationObject::new();
            out.insert("count".to_string(), json!(translations.len()));
            Ok(out)
        });
        let merged = MergeStrategy::from_config(&config)
            .merge(vec![obj(json!({"a": 1})), obj(json!({"b": 2}))])
            .expect("merger succeeds");
        assert_eq!(Value::Object(merged), json!({"count": 2}));
    }

    #[test]
    fn test_custom_merger_error_propagates() {
        let config = LoaderConfig::default()
            .with_translate_merger(|_| Err(anyhow::anyhow!("conflicting keys")));
        let result = MergeStrategy::from_config(&config).merge(vec![TranslationObject::new()]);
        match result {
            Err(LoaderError::Merge(e)) => assert_eq!(e.to_string(), "conflicting keys"),
            other => panic!("expected merge error, got {:?}", other),
        }
    }

    // ==================== Property Tests ====================

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof!["[a-z]{0,4}".prop_map(Value::String), any::<bool>().prop_map(Value::Bool)]
    }

    fn value() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 16, 3, |inner| {
            proptest::collection::btree_map("[a-c]", inner, 0..3)
                .prop_map(|map| Value::Object(map.into_iter().collect()))
        })
    }

    fn translation() -> impl Strategy<Value = TranslationObject> {
        proptest::collection::btree_map("[a-c]", value(), 0..4)
            .prop_map(|map| map.into_iter().collect())
    }

    /// Sections of string leaves, so a key is an object in every operand or in none.
    fn sectioned() -> impl Strategy<Value = TranslationObject> {
        let section = proptest::collection::btree_map("[a-c]", "[a-z]{0,3}", 0..3).prop_map(|map| {
            Value::Object(map.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
        });
        proptest::collection::btree_map("[A-C]", section, 0..3)
            .prop_map(|map| map.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_deep_merge_is_associative(a in sectioned(), b in sectioned(), c in sectioned()) {
            let flat = merge_all(vec![a.clone(), b.clone(), c.clone()], true);
            let right = merge_all(vec![a.clone(), merge_all(vec![b.clone(), c.clone()], true)], true);
            let left = merge_all(vec![merge_all(vec![a, b], true), c], true);
            prop_assert_eq!(&flat, &right);
            prop_assert_eq!(&flat, &left);
        }

        #[test]
        fn prop_later_scalar_always_wins(a in translation(), key in "[a-c]", scalar in leaf()) {
            let mut b = TranslationObject::new();
            b.insert(key.clone(), scalar.clone());
            let deep = merge_all(vec![a.clone(), b.clone()], true);
            let shallow = merge_all(vec![a, b], false);
            prop_assert_eq!(deep.get(&key), Some(&scalar));
            prop_assert_eq!(shallow.get(&key), Some(&scalar));
        }

        #[test]
        fn prop_shallow_merge_keeps_top_level_keys(a in translation(), b in translation()) {
            let merged = merge_all(vec![a.clone(), b.clone()], false);
            for (key, value) in &b {
                prop_assert_eq!(merged.get(key), Some(value));
            }
            for key in a.keys() {
                prop_assert!(merged.contains_key(key));
            }
        }
    }
}

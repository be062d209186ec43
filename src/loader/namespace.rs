//! Namespacing and per-module reshaping of translation objects.

use super::options::{NamespaceCase, TranslateMap};
use super::TranslationObject;
use serde_json::Value;
use std::fmt;

/// Effective namespace key for a module.
///
/// The root module (no name) never gets one. An explicit, non-empty
/// `namespace` is used verbatim; otherwise the module name is cased.
pub fn namespace_key(
    module_name: Option<&str>,
    namespace: Option<&str>,
    case: NamespaceCase,
) -> Option<String> {
    let module_name = module_name?;
    match namespace.filter(|ns| !ns.is_empty()) {
        Some(ns) => Some(ns.to_string()),
        None => Some(case.apply(module_name)),
    }
}

/// `{ key: translation }`
pub fn wrap(key: &str, translation: TranslationObject) -> TranslationObject {
    let mut wrapped = TranslationObject::new();
    wrapped.insert(key.to_string(), Value::Object(translation));
    wrapped
}

/// What happens to a module's parsed translation before merging.
#[derive(Clone)]
pub enum Shape {
    /// Caller-supplied mapping takes full responsibility for the output.
    Mapped(TranslateMap),
    /// Nest under this key.
    Namespaced(String),
    Unchanged,
}

impl Shape {
    pub fn apply(&self, translation: TranslationObject) -> TranslationObject {
        match self {
            Shape::Mapped(map) => map(translation),
            Shape::Namespaced(key) => wrap(key, translation),
            Shape::Unchanged => translation,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Shape::Namespaced(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Mapped(_) => f.write_str("Mapped(..)"),
            Shape::Namespaced(key) => f.debug_tuple("Namespaced").field(key).finish(),
            Shape::Unchanged => f.write_str("Unchanged"),
        }
    }
}

//! Path templating for translation resources.
//!
//! A template such as `{baseTranslateUrl}/{moduleName}/{language}` is expanded
//! by plain string substitution, the file extension is appended, and
//! duplicate slashes left behind by empty placeholders are collapsed.

use super::options::Version;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static DUPLICATE_SLASH_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([^}]+)\}").unwrap())
}

/// Values available to a path template.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathValues<'a> {
    pub base_translate_url: &'a str,
    pub module_name: Option<&'a str>,
    pub language: &'a str,
}

impl<'a> PathValues<'a> {
    /// Look up a placeholder by name. Unknown names have no value.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        match name {
            "baseTranslateUrl" => Some(self.base_translate_url),
            "moduleName" => self.module_name,
            "language" => Some(self.language),
            _ => None,
        }
    }
}

/// Names of the placeholders [`PathValues`] understands.
pub const KNOWN_PLACEHOLDERS: [&str; 3] = ["baseTranslateUrl", "moduleName", "language"];

/// Every `{name}` token in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Replace each `{name}` with its value, or with nothing when it has none.
pub fn expand_template(template: &str, values: &PathValues<'_>) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| {
            values.get(&caps[1]).unwrap_or("").to_string()
        })
        .into_owned()
}

/// Collapse `//` runs into `/`, leaving the one after a `scheme:` alone.
///
/// A run at the very start has no preceding character and survives as `//`,
/// so a base URL of `/` yields a protocol-relative path such as `//en.json`.
pub fn clean_path(path: &str) -> String {
    let regex = DUPLICATE_SLASH_REGEX.get_or_init(|| Regex::new(r"([^:]/)/+").unwrap());
    regex.replace_all(path, "${1}").into_owned()
}

/// Expand `template`, append `.extension` and clean the result.
///
/// An empty extension appends nothing.
pub fn resolve_path(template: &str, values: &PathValues<'_>, extension: &str) -> String {
    let expanded = expand_template(template, values);
    let with_extension = if extension.is_empty() {
        expanded
    } else {
        format!("{}.{}", expanded, extension)
    };
    clean_path(&with_extension)
}

/// Append `?v=<version>` (or `&v=` when the path already has a query).
pub fn with_version(path: &str, version: Option<&Version>) -> String {
    match version {
        Some(version) if version.is_set() => {
            let separator = if path.contains('?') { '&' } else { '?' };
            format!("{}{}v={}", path, separator, version)
        }
        _ => path.to_string(),
    }
}

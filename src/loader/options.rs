//! Loader configuration: modules, global flags and customization hooks.
//!
//! Both [`LoaderConfig`] and [`ModuleSpec`] are plain values built with
//! `new` + `with_*` methods. They are consumed once by
//! [`ModuleTranslateLoader::new`](super::ModuleTranslateLoader::new) and never
//! mutated afterwards.

use super::TranslationObject;
use crate::error::FetchError;
use anyhow::{bail, Context};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::fmt;
use std::sync::Arc;

/// Template used for modules without a module name.
pub const DEFAULT_PATH_TEMPLATE: &str = "{baseTranslateUrl}/{language}";

/// Template used for named modules.
pub const DEFAULT_MODULE_PATH_TEMPLATE: &str = "{baseTranslateUrl}/{moduleName}/{language}";

/// Extension appended to resolved paths when no parser overrides it.
pub const DEFAULT_FILE_EXTENSION: &str = "json";

/// Turns a raw response body into a translation object.
pub type ParseFn = Arc<dyn Fn(&str) -> anyhow::Result<TranslationObject> + Send + Sync>;

/// Reshapes one module's translation object after parsing.
pub type TranslateMap = Arc<dyn Fn(TranslationObject) -> TranslationObject + Send + Sync>;

/// Called with the error and the failed path whenever a module cannot be loaded.
pub type TranslateError = Arc<dyn Fn(&FetchError, &str) + Send + Sync>;

/// Replaces the built-in merge with a custom one.
pub type TranslateMerger =
    Arc<dyn Fn(Vec<TranslationObject>) -> anyhow::Result<TranslationObject> + Send + Sync>;

/// Parse a JSON document whose top level is an object.
pub fn parse_json(text: &str) -> anyhow::Result<TranslationObject> {
    let value: Value = serde_json::from_str(text).context("invalid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "expected a JSON object at the top level, found {}",
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// How raw text becomes a translation object, and which extension to request.
#[derive(Clone)]
pub struct FileParser {
    /// Appended to resolved paths, without the leading dot (e.g. `json5`).
    pub file_extension: String,
    /// Parser for the response body.
    pub parse_fn: ParseFn,
}

impl FileParser {
    /// A parser for `.<file_extension>` files backed by `parse_fn`.
    pub fn new<F>(file_extension: impl Into<String>, parse_fn: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<TranslationObject> + Send + Sync + 'static,
    {
        Self {
            file_extension: file_extension.into(),
            parse_fn: Arc::new(parse_fn),
        }
    }

    /// The default parser: JSON objects, `.json` extension.
    pub fn json() -> Self {
        Self::new(DEFAULT_FILE_EXTENSION, parse_json)
    }

    /// JSON parser that requests a different extension.
    pub fn json_with_extension(file_extension: impl Into<String>) -> Self {
        Self::new(file_extension, parse_json)
    }

    /// Run the parse function over a fetched body.
    pub fn parse(&self, text: &str) -> anyhow::Result<TranslationObject> {
        (self.parse_fn)(text)
    }
}

impl Default for FileParser {
    fn default() -> Self {
        Self::json()
    }
}

impl fmt::Debug for FileParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileParser")
            .field("file_extension", &self.file_extension)
            .finish_non_exhaustive()
    }
}

/// Case applied to module names when they become namespace keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceCase {
    #[default]
    Upper,
    Lower,
}

impl NamespaceCase {
    /// Convert `name` to this case.
    pub fn apply(self, name: &str) -> String {
        match self {
            NamespaceCase::Upper => name.to_uppercase(),
            NamespaceCase::Lower => name.to_lowercase(),
        }
    }
}

/// Cache-busting token appended as `?v=<version>`.
///
/// Numbers keep their JSON form, so `1.5` and `-3` are sent as written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Version {
    Number(Number),
    Text(String),
}

impl Version {
    /// `0` and the empty string mean "no version".
    pub fn is_set(&self) -> bool {
        match self {
            Version::Number(n) => n.as_f64() != Some(0.0),
            Version::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Number(n) => write!(f, "{}", n),
            Version::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        Version::Text(value.to_string())
    }
}

impl From<String> for Version {
    fn from(value: String) -> Self {
        Version::Text(value)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Version::Number(value.into())
    }
}

impl From<u32> for Version {
    fn from(value: u32) -> Self {
        Version::Number(value.into())
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Version::Number(value.into())
    }
}

/// NaN and infinities have no JSON form and become an unset version.
impl From<f64> for Version {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(Version::Number)
            .unwrap_or_else(|| Version::Text(String::new()))
    }
}

/// One independently fetched translation resource.
///
/// A module without a name is the root module: it is fetched with the root
/// path template and its keys are merged at the top level, never namespaced.
#[derive(Clone, Default)]
pub struct ModuleSpec {
    /// Module name, e.g. `feature1`. `None` for the root module.
    pub module_name: Option<String>,
    /// Base location of the translation files, e.g. `./assets/i18n`.
    pub base_translate_url: String,
    /// Namespace key override. Used verbatim, no case transform.
    pub namespace: Option<String>,
    /// Path template override for this module only.
    pub path_template: Option<String>,
    /// Parser override for this module only.
    pub file_parser: Option<FileParser>,
    /// Custom reshaping; replaces namespacing for this module.
    pub translate_map: Option<TranslateMap>,
    /// Request headers for this module only. Replace the global headers.
    pub headers: Option<HeaderMap>,
}

impl ModuleSpec {
    /// A module whose keys land at the top level of the merged result.
    pub fn root(base_translate_url: impl Into<String>) -> Self {
        Self {
            base_translate_url: base_translate_url.into(),
            ..Self::default()
        }
    }

    /// A module namespaced under its (cased) name.
    pub fn named(module_name: impl Into<String>, base_translate_url: impl Into<String>) -> Self {
        Self {
            module_name: Some(module_name.into()),
            base_translate_url: base_translate_url.into(),
            ..Self::default()
        }
    }

    /// Use `namespace` verbatim as the key instead of the module name.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Fetch this module with its own template.
    pub fn with_path_template(mut self, template: impl Into<String>) -> Self {
        self.path_template = Some(template.into());
        self
    }

    /// Parse this module's files with `parser`.
    pub fn with_file_parser(mut self, parser: FileParser) -> Self {
        self.file_parser = Some(parser);
        self
    }

    /// Reshape the parsed object with `map` instead of namespacing it.
    pub fn with_translate_map<F>(mut self, map: F) -> Self
    where
        F: Fn(TranslationObject) -> TranslationObject + Send + Sync + 'static,
    {
        self.translate_map = Some(Arc::new(map));
        self
    }

    /// Send `headers` instead of the global ones.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// True when the module has no name.
    pub fn is_root(&self) -> bool {
        self.module_name.is_none()
    }
}

impl fmt::Debug for ModuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleSpec")
            .field("module_name", &self.module_name)
            .field("base_translate_url", &self.base_translate_url)
            .field("namespace", &self.namespace)
            .field("path_template", &self.path_template)
            .field("file_parser", &self.file_parser)
            .field("translate_map", &self.translate_map.is_some())
            .field("headers", &self.headers)
            .finish()
    }
}

/// Global loader configuration.
#[derive(Clone)]
pub struct LoaderConfig {
    /// Modules in configuration order.
    pub modules: Vec<ModuleSpec>,
    /// Never wrap module translations under a namespace key.
    pub disable_namespace: bool,
    /// Case applied to module names used as namespace keys.
    pub namespace_case: NamespaceCase,
    /// Recursive merge (`true`) or top-level overwrite (`false`).
    pub deep_merge: bool,
    /// Cache-busting token appended to every request.
    pub version: Option<Version>,
    /// Headers sent with every request unless a module sets its own.
    pub headers: HeaderMap,
    /// Parser used unless a module sets its own.
    pub file_parser: FileParser,
    /// Template for root modules.
    pub path_template: String,
    /// Template for named modules.
    pub module_path_template: String,
    pub translate_error: Option<TranslateError>,
    pub translate_merger: Option<TranslateMerger>,
}

impl LoaderConfig {
    /// Create a configuration with default settings for `modules`.
    pub fn new(modules: Vec<ModuleSpec>) -> Self {
        Self {
            modules,
            ..Self::default()
        }
    }

    /// Merge every module at the top level.
    pub fn with_disable_namespace(mut self, disable: bool) -> Self {
        self.disable_namespace = disable;
        self
    }

    /// Lowercase derived namespace keys instead of uppercasing them.
    pub fn with_lowercase_namespace(mut self, lowercase: bool) -> Self {
        self.namespace_case = if lowercase {
            NamespaceCase::Lower
        } else {
            NamespaceCase::Upper
        };
        self
    }

    /// Choose between deep and shallow merging.
    pub fn with_deep_merge(mut self, deep_merge: bool) -> Self {
        self.deep_merge = deep_merge;
        self
    }

    /// Append `?v=<version>` to every request.
    pub fn with_version(mut self, version: impl Into<Version>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Headers sent with every request that has no module headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Parser for modules without their own.
    pub fn with_file_parser(mut self, parser: FileParser) -> Self {
        self.file_parser = parser;
        self
    }

    /// Template for root modules.
    pub fn with_path_template(mut self, template: impl Into<String>) -> Self {
        self.path_template = template.into();
        self
    }

    /// Template for named modules.
    pub fn with_module_path_template(mut self, template: impl Into<String>) -> Self {
        self.module_path_template = template.into();
        self
    }

    /// Called with the error and the path of every module that fails to load.
    pub fn with_translate_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&FetchError, &str) + Send + Sync + 'static,
    {
        self.translate_error = Some(Arc::new(callback));
        self
    }

    /// Replace the built-in merge with `merger`.
    pub fn with_translate_merger<F>(mut self, merger: F) -> Self
    where
        F: Fn(Vec<TranslationObject>) -> anyhow::Result<TranslationObject> + Send + Sync + 'static,
    {
        self.translate_merger = Some(Arc::new(merger));
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            disable_namespace: false,
            namespace_case: NamespaceCase::Upper,
            deep_merge: true,
            version: None,
            headers: HeaderMap::new(),
            file_parser: FileParser::json(),
            path_template: DEFAULT_PATH_TEMPLATE.to_string(),
            module_path_template: DEFAULT_MODULE_PATH_TEMPLATE.to_string(),
            translate_error: None,
            translate_merger: None,
        }
    }
}

impl fmt::Debug for LoaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderConfig")
            .field("modules", &self.modules)
            .field("disable_namespace", &self.disable_namespace)
            .field("namespace_case", &self.namespace_case)
            .field("deep_merge", &self.deep_merge)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("file_parser", &self.file_parser)
            .field("path_template", &self.path_template)
            .field("module_path_template", &self.module_path_template)
            .field("translate_error", &self.translate_error.is_some())
            .field("translate_merger", &self.translate_merger.is_some())
            .finish()
    }
}

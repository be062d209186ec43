use crate::loader::{FileParser, LoaderConfig, ModuleSpec, NamespaceCase, Version};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for the command-line loader, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file describing the modules (see [`LoaderFile`])
    pub loader_file: PathBuf,

    /// Origin that relative translation paths are resolved against
    pub base_url: String,

    pub request_timeout: Duration,

    /// Language used when none is given on the command line
    pub default_language: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            loader_file: std::env::var("TRANSLATE_CONFIG")
                .context("TRANSLATE_CONFIG not set")?
                .into(),
            base_url: std::env::var("TRANSLATE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4200/".to_string()),
            request_timeout: Duration::from_secs(
                std::env::var("TRANSLATE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            default_language: std::env::var("TRANSLATE_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
        })
    }
}

/// Declarative loader configuration, as stored in a JSON file.
///
/// Hooks (`translate_map`, `translate_merger`, custom parse functions) can
/// only be set in code; a file can still pick the file extension.
///
/// ```json
/// {
///   "modules": [
///     { "baseTranslateUrl": "./assets/i18n" },
///     { "moduleName": "feature1", "baseTranslateUrl": "./assets/i18n", "namespace": "F1" }
///   ],
///   "lowercaseNamespace": true,
///   "version": 42
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoaderFile {
    pub modules: Vec<ModuleEntry>,
    #[serde(default)]
    pub disable_namespace: bool,
    #[serde(default)]
    pub lowercase_namespace: bool,
    pub deep_merge: Option<bool>,
    pub version: Option<Version>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub file_extension: Option<String>,
    pub path_template: Option<String>,
    pub module_path_template: Option<String>,
}

/// One module in a [`LoaderFile`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleEntry {
    pub module_name: Option<String>,
    pub base_translate_url: String,
    pub namespace: Option<String>,
    pub path_template: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    pub file_extension: Option<String>,
}

impl LoaderFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read loader config {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid loader config {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse loader config JSON")
    }

    pub fn into_loader_config(self) -> Result<LoaderConfig> {
        let modules = self
            .modules
            .into_iter()
            .map(ModuleEntry::into_module_spec)
            .collect::<Result<Vec<_>>>()?;

        let mut config = LoaderConfig::new(modules)
            .with_disable_namespace(self.disable_namespace)
            .with_deep_merge(self.deep_merge.unwrap_or(true))
            .with_headers(header_map(&self.headers)?);
        config.namespace_case = if self.lowercase_namespace {
            NamespaceCase::Lower
        } else {
            NamespaceCase::Upper
        };
        config.version = self.version;
        if let Some(extension) = self.file_extension {
            config.file_parser = FileParser::json_with_extension(extension);
        }
        if let Some(template) = self.path_template {
            config.path_template = template;
        }
        if let Some(template) = self.module_path_template {
            config.module_path_template = template;
        }
        Ok(config)
    }
}

impl ModuleEntry {
    fn into_module_spec(self) -> Result<ModuleSpec> {
        let headers = self.headers.as_ref().map(header_map).transpose()?;
        Ok(ModuleSpec {
            module_name: self.module_name,
            base_translate_url: self.base_translate_url,
            namespace: self.namespace,
            path_template: self.path_template,
            file_parser: self.file_extension.map(FileParser::json_with_extension),
            translate_map: None,
            headers,
        })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("Invalid header name '{}'", name))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("Invalid value for header '{}'", name))?;
        map.insert(name, value);
    }
    Ok(map)
}

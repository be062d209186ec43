//! Loader configuration validation.
//!
//! Errors make the loader refuse the configuration. Warnings flag setups that
//! load fine but are probably a mistake, such as two modules competing for the
//! same namespace key.

use super::namespace::namespace_key;
use super::options::LoaderConfig;
use super::path::{placeholders, KNOWN_PLACEHOLDERS};
use std::collections::HashMap;

/// Findings for one [`LoaderConfig`], split by whether the loader can start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Reasons the loader refuses the configuration
    pub errors: Vec<String>,

    /// Setups that load but likely lose or misplace translations
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// True when `ModuleTranslateLoader::new` would reject the configuration.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Nothing to log at construction time.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for loader configurations.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate `config`.
    ///
    /// Errors:
    /// - no modules configured
    /// - a module with an empty `base_translate_url`
    ///
    /// Warnings:
    /// - more than one root module
    /// - a base URL made only of slashes (the path becomes protocol-relative)
    /// - a namespace override on a root module (ignored)
    /// - two modules resolving to the same namespace key
    /// - unknown `{placeholders}` in any template
    pub fn validate(config: &LoaderConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        if config.modules.is_empty() {
            report
                .errors
                .push("at least one module must be configured".to_string());
            return report;
        }

        let root_count = config.modules.iter().filter(|m| m.is_root()).count();
        if root_count > 1 {
            report.warnings.push(format!(
                "{} modules have no module name; their keys all merge at the top level",
                root_count
            ));
        }

        for module in &config.modules {
            let label = module.module_name.as_deref().unwrap_or("<root>");
            if module.base_translate_url.is_empty() {
                report
                    .errors
                    .push(format!("Module {} has an empty base translate URL", label));
            } else if module.base_translate_url.chars().all(|c| c == '/') {
                report.warnings.push(format!(
                    "Module {} base translate URL {:?} resolves to a protocol-relative path",
                    label, module.base_translate_url
                ));
            }
            if module.is_root() && module.namespace.is_some() {
                report.warnings.push(
                    "Namespace override on the root module is ignored".to_string(),
                );
            }
        }

        Self::check_namespaces(config, &mut report);
        Self::check_templates(config, &mut report);

        report
    }

    fn check_namespaces(config: &LoaderConfig, report: &mut ValidationReport) {
        if config.disable_namespace {
            return;
        }

        let mut owners: HashMap<String, Vec<&str>> = HashMap::new();
        for module in config.modules.iter().filter(|m| m.translate_map.is_none()) {
            let key = namespace_key(
                module.module_name.as_deref(),
                module.namespace.as_deref(),
                config.namespace_case,
            );
            if let (Some(key), Some(name)) = (key, module.module_name.as_deref()) {
                owners.entry(key).or_default().push(name);
            }
        }

        let mut duplicates: Vec<_> = owners.into_iter().filter(|(_, m)| m.len() > 1).collect();
        duplicates.sort();
        for (key, modules) in duplicates {
            report.warnings.push(format!(
                "Namespace {} is shared by modules {:?}; the last one wins on conflicting keys",
                key, modules
            ));
        }
    }

    fn check_templates(config: &LoaderConfig, report: &mut ValidationReport) {
        let templates = [
            Some(config.path_template.as_str()),
            Some(config.module_path_template.as_str()),
        ]
        .into_iter()
        .chain(config.modules.iter().map(|m| m.path_template.as_deref()))
        .flatten();

        for template in templates {
            for name in placeholders(template) {
                if !KNOWN_PLACEHOLDERS.contains(&name.as_str()) {
                    report.warnings.push(format!(
                        "Unknown placeholder {{{}}} in template {} resolves to an empty string",
                        name, template
                    ));
                }
            }
        }
    }
}

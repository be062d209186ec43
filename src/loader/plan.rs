//! Effective per-module configuration.
//!
//! Per-module overrides (template, parser, headers, mapping) are folded over
//! the global settings once, when the loader is built. Each call then only
//! has to substitute the language.

use super::namespace::{namespace_key, Shape};
use super::options::{FileParser, LoaderConfig, ModuleSpec};
use super::path::{resolve_path, PathValues};
use reqwest::header::HeaderMap;

/// One module with every override already applied.
#[derive(Debug, Clone)]
pub struct ModulePlan {
    /// `None` for a root module
    pub module_name: Option<String>,
    pub base_translate_url: String,
    /// Path template still holding `{language}`
    pub template: String,
    pub parser: FileParser,
    /// Headers sent with this module's request
    pub headers: HeaderMap,
    /// How the parsed object is placed in the merged result
    pub shape: Shape,
}

impl ModulePlan {
    /// Fold `module`'s overrides over the global settings in `config`.
    pub fn resolve(module: &ModuleSpec, config: &LoaderConfig) -> Self {
        let template = match (&module.path_template, &module.module_name) {
            (Some(template), _) if !template.is_empty() => template.clone(),
            (_, Some(_)) => config.module_path_template.clone(),
            (_, None) => config.path_template.clone(),
        };

        let shape = if let Some(map) = &module.translate_map {
            Shape::Mapped(map.clone())
        } else if config.disable_namespace {
            Shape::Unchanged
        } else {
            namespace_key(
                module.module_name.as_deref(),
                module.namespace.as_deref(),
                config.namespace_case,
            )
            .map(Shape::Namespaced)
            .unwrap_or(Shape::Unchanged)
        };

        Self {
            module_name: module.module_name.clone(),
            base_translate_url: module.base_translate_url.clone(),
            template,
            parser: module
                .file_parser
                .clone()
                .unwrap_or_else(|| config.file_parser.clone()),
            headers: module
                .headers
                .clone()
                .unwrap_or_else(|| config.headers.clone()),
            shape,
        }
    }

    /// Resolved path for `language`, without the version query.
    pub fn path_for(&self, language: &str) -> String {
        let values = PathValues {
            base_translate_url: &self.base_translate_url,
            module_name: self.module_name.as_deref(),
            language,
        };
        resolve_path(&self.template, &values, &self.parser.file_extension)
    }

    /// Display label for logs.
    pub fn label(&self) -> &str {
        self.module_name.as_deref().unwrap_or("<root>")
    }
}

/// Plans for every module in merge order: root modules first, then named
/// modules, each group in configuration order.
pub fn plan_modules(config: &LoaderConfig) -> Vec<ModulePlan> {
    let (roots, named): (Vec<&ModuleSpec>, Vec<&ModuleSpec>) =
        config.modules.iter().partition(|module| module.is_root());

    roots
        .into_iter()
        .chain(named)
        .map(|module| ModulePlan::resolve(module, config))
        .collect()
}

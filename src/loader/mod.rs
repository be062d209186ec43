//! Module translation loader.
//!
//! Fetches one translation file per configured module, namespaces each one,
//! and merges them into a single translation object.
//!
//! # Architecture
//!
//! - `options`: `LoaderConfig`, `ModuleSpec` and the customization hooks
//! - `plan`: effective per-module settings, computed once at construction
//! - `path`: path templating
//! - `fetch`: fetch + parse + shape for one module, with error containment
//! - `namespace`: namespace keys and reshaping
//! - `merge`: deep, shallow or custom merge
//! - `validator`: configuration checks run at construction
//! - `metrics`: per-loader counters
//!
//! # Example
//!
//! ```rust,ignore
//! use module_translate_loader::{LoaderConfig, ModuleSpec, ModuleTranslateLoader, ReqwestClient};
//!
//! let client = ReqwestClient::default().with_base_url("http://localhost:4200")?;
//! let config = LoaderConfig::new(vec![
//!     ModuleSpec::root("./assets/i18n"),
//!     ModuleSpec::named("feature1", "./assets/i18n"),
//! ]);
//! let loader = ModuleTranslateLoader::new(client, config)?;
//!
//! // { ...root keys, "FEATURE1": { ...feature1 keys } }
//! let translation = loader.get_translation("en").await?;
//! ```

mod fetch;
mod merge;
mod metrics;
mod namespace;
mod options;
mod path;
mod plan;
mod validator;

#[cfg(test)]
mod mock;

pub use merge::{deep_merge, merge_all, shallow_merge, MergeStrategy};
pub use metrics::{LoaderMetrics, MetricsReport};
pub use namespace::namespace_key;
pub use options::{
    parse_json, FileParser, LoaderConfig, ModuleSpec, NamespaceCase, ParseFn, TranslateError,
    TranslateMap, TranslateMerger, Version, DEFAULT_FILE_EXTENSION, DEFAULT_MODULE_PATH_TEMPLATE,
    DEFAULT_PATH_TEMPLATE,
};
pub use path::{clean_path, expand_template, resolve_path, with_version, PathValues};
pub use validator::{ConfigValidator, ValidationReport};

use crate::error::LoaderError;
use crate::http::{HttpClient, ReqwestClient};
use fetch::{fetch_module, FetchContext};
use futures::future::join_all;
use plan::{plan_modules, ModulePlan};
use tracing::{debug, info, warn};

/// A nested mapping of string keys to strings or further mappings.
pub type TranslationObject = serde_json::Map<String, serde_json::Value>;

/// Loads and merges per-module translation files for a language.
///
/// The configuration is validated and resolved once in [`new`](Self::new);
/// every [`get_translation`](Self::get_translation) call is independent.
pub struct ModuleTranslateLoader<C = ReqwestClient> {
    client: C,
    modules: Vec<ModulePlan>,
    version: Option<Version>,
    translate_error: Option<TranslateError>,
    merge: MergeStrategy,
    metrics: LoaderMetrics,
}

impl<C: HttpClient> ModuleTranslateLoader<C> {
    /// Validate `config` and build a loader around `client`.
    ///
    /// Fails with [`LoaderError::InvalidConfig`] when no modules are
    /// configured or a module has an empty base URL. Validation warnings
    /// are logged.
    pub fn new(client: C, config: LoaderConfig) -> Result<Self, LoaderError> {
        let report = ConfigValidator::validate(&config);
        for warning in &report.warnings {
            warn!("Translation loader configuration: {}", warning);
        }
        if report.has_errors() {
            return Err(LoaderError::InvalidConfig(report.errors.join("; ")));
        }

        let modules = plan_modules(&config);
        let merge = MergeStrategy::from_config(&config);
        info!(
            "Translation loader ready: {} modules, {:?} merge",
            modules.len(),
            merge
        );

        Ok(Self {
            client,
            modules,
            version: config.version,
            translate_error: config.translate_error,
            merge,
            metrics: LoaderMetrics::new(),
        })
    }

    /// Fetch every module for `language` concurrently and merge the results.
    ///
    /// A module that fails to load contributes an empty object; only a
    /// failing custom merger makes this return an error. Dropping the
    /// returned future cancels all in-flight requests.
    pub async fn get_translation(&self, language: &str) -> Result<TranslationObject, LoaderError> {
        self.metrics.record_translation_call();
        debug!(
            "Loading {} translation files for language '{}'",
            self.modules.len(),
            language
        );

        let ctx = FetchContext {
            language,
            version: self.version.as_ref(),
            translate_error: self.translate_error.as_ref(),
            metrics: &self.metrics,
        };

        let translations = join_all(
            self.modules
                .iter()
                .map(|plan| fetch_module(&self.client, plan, &ctx)),
        )
        .await;

        self.merge.merge(translations).map_err(|e| {
            self.metrics.record_merge_failure();
            e
        })
    }

    /// Resolved request paths for `language`, in merge order, without the
    /// version query.
    pub fn paths_for(&self, language: &str) -> Vec<String> {
        self.modules
            .iter()
            .map(|plan| plan.path_for(language))
            .collect()
    }

    pub fn metrics(&self) -> &LoaderMetrics {
        &self.metrics
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

//! Fetch, parse and shape a single module's translation file.
//!
//! Every failure is contained here: it is reported through the
//! `translate_error` hook, logged, and replaced with an empty object so the
//! other modules still make it into the merge.

use super::metrics::LoaderMetrics;
use super::options::{TranslateError, Version};
use super::path::with_version;
use super::plan::ModulePlan;
use super::TranslationObject;
use crate::error::FetchError;
use crate::http::HttpClient;
use tracing::{debug, error};

/// Per-call inputs shared by all module fetches.
pub struct FetchContext<'a> {
    pub language: &'a str,
    pub version: Option<&'a Version>,
    pub translate_error: Option<&'a TranslateError>,
    pub metrics: &'a LoaderMetrics,
}

/// Load one module. Never fails; a failed module contributes `{}`.
pub async fn fetch_module<C>(
    client: &C,
    plan: &ModulePlan,
    ctx: &FetchContext<'_>,
) -> TranslationObject
where
    C: HttpClient + ?Sized,
{
    let path = plan.path_for(ctx.language);
    let request_path = with_version(&path, ctx.version);

    ctx.metrics.record_request();
    match load(client, plan, &request_path).await {
        Ok(translation) => {
            debug!(
                "Loaded {} keys for module {} from {}",
                translation.len(),
                plan.label(),
                request_path
            );
            plan.shape.apply(translation)
        }
        Err(e) => {
            ctx.metrics.record_module_failure();
            if let Some(callback) = ctx.translate_error {
                callback(&e, &path);
            }
            error!("Unable to load translation file: {} ({})", path, e);
            TranslationObject::new()
        }
    }
}

async fn load<C>(
    client: &C,
    plan: &ModulePlan,
    request_path: &str,
) -> Result<TranslationObject, FetchError>
where
    C: HttpClient + ?Sized,
{
    let text = client.get_text(request_path, &plan.headers).await?;
    plan.parser.parse(&text).map_err(FetchError::Parse)
}

use anyhow::{Context, Result};
use module_translate_loader::config::{Config, LoaderFile};
use module_translate_loader::{ModuleTranslateLoader, ReqwestClient};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the merged translation
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("module_translate_loader=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let language = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.default_language.clone());

    info!("Loading translations for '{}'", language);

    let loader_config = LoaderFile::from_path(&config.loader_file)?.into_loader_config()?;
    let client = ReqwestClient::with_timeout(config.request_timeout)?.with_base_url(&config.base_url)?;
    let loader = ModuleTranslateLoader::new(client, loader_config)?;

    let translation = loader.get_translation(&language).await?;

    let report = loader.metrics().report();
    info!(
        "Merged {} top-level keys from {} requests ({} failed)",
        translation.len(),
        report.requests,
        report.module_failures
    );
    debug!("Metrics: {}", serde_json::to_string(&report)?);

    let output =
        serde_json::to_string_pretty(&translation).context("Failed to serialize translation")?;
    println!("{}", output);
    Ok(())
}

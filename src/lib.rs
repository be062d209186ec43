//! Fetch per-module translation files over HTTP, namespace them and merge
//! them into one translation object.
//!
//! The entry point is [`ModuleTranslateLoader`]: configure it once with a
//! [`LoaderConfig`], then call
//! [`get_translation`](ModuleTranslateLoader::get_translation) per language.

pub mod config;
pub mod error;
pub mod http;
pub mod loader;

pub use error::{FetchError, HttpError, LoaderError};
pub use http::{HttpClient, ReqwestClient};
pub use loader::{
    FileParser, LoaderConfig, ModuleSpec, ModuleTranslateLoader, NamespaceCase,
    TranslationObject, Version,
};

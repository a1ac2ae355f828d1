//! Remote catalog records consumed by the importer

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn unknown_title() -> String {
    "Unknown Title".to_string()
}

fn unknown_author() -> String {
    "Unknown Author".to_string()
}

/// A single record from the remote catalog feed.
///
/// The feed is loosely typed; missing fields fall back to placeholder values
/// rather than failing the whole import.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteBook {
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default = "unknown_author")]
    pub authors: String,
}

/// Envelope returned by the remote catalog API
#[derive(Debug, Deserialize)]
pub struct CatalogFeed {
    pub message: Vec<RemoteBook>,
}

/// Report returned after a bulk import
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportReport {
    pub requested: usize,
    pub imported: usize,
}

//! Remote catalog import service
//!
//! Pulls records from the configured catalog feed and files them through
//! ordinary book creation, one copy per imported record.

use std::time::Duration;

use crate::{
    config::ImportConfig,
    error::{AppError, AppResult},
    models::book::CreateBook,
    models::remote_book::{CatalogFeed, ImportReport},
    repository::Repository,
};

#[derive(Clone)]
pub struct ImportService {
    repository: Repository,
    client: reqwest::Client,
    config: ImportConfig,
}

impl ImportService {
    pub fn new(repository: Repository, config: ImportConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            repository,
            client,
            config,
        })
    }

    /// Fetch up to `count` records from the remote feed and create one book
    /// per record, stocked with a single copy.
    pub async fn import_books(&self, count: usize) -> AppResult<ImportReport> {
        tracing::info!(count, url = %self.config.catalog_url, "importing books from remote catalog");

        let response = self.client.get(&self.config.catalog_url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Catalog feed answered {}",
                response.status()
            )));
        }

        let feed: CatalogFeed = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid catalog payload: {}", e)))?;

        let mut imported = 0;
        for record in feed.message.into_iter().take(count) {
            let book = CreateBook {
                title: record.title,
                author: record.authors,
                stock: 1,
            };
            self.repository.books.create(&book).await?;
            imported += 1;
        }

        tracing::info!(imported, "import finished");

        Ok(ImportReport {
            requested: count,
            imported,
        })
    }
}

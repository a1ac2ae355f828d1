//! Business logic services

pub mod catalog;
pub mod import;
pub mod lending;
pub mod members;

use std::sync::Arc;

use crate::{
    config::{ImportConfig, LendingConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    pub lending: lending::LendingService,
    pub import: import::ImportService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        lending_config: &LendingConfig,
        import_config: ImportConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            lending: lending::LendingService::new(
                Arc::new(repository.clone()),
                lending_config.into(),
            ),
            import: import::ImportService::new(repository, import_config)?,
        })
    }
}

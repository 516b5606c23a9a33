//! Business logic services

pub mod borrows;
pub mod catalog;
pub mod users;

use crate::{config::LendingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub borrows: borrows::BorrowsService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lending: LendingConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            borrows: borrows::BorrowsService::new(repository.clone(), lending),
            users: users::UsersService::new(repository),
        }
    }
}

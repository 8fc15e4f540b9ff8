//! Business logic services

pub mod catalog;

use crate::repository::SharedBookStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services on top of the given book store
    pub fn new(store: SharedBookStore) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store),
        }
    }
}

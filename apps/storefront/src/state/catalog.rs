//! # Catalog State
//!
//! Shared handle around the catalog reducer. Created once at startup from the
//! seed products.

use std::sync::{Arc, Mutex, PoisonError};

use storefront_core::{CatalogState, Product};

#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog: Arc<Mutex<CatalogState>>,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>) -> Self {
        CatalogStore {
            catalog: Arc::new(Mutex::new(CatalogState::new(products))),
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CatalogState) -> R,
    {
        let catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    /// Executes a function with write access to the catalog.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CatalogState) -> R,
    {
        let mut catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }

    /// Clones a product out so the lock is not held by the caller.
    pub fn find(&self, id: &str) -> Option<Product> {
        self.with_catalog(|catalog| catalog.product(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::seed;

    #[test]
    fn test_find_clones_product() {
        let store = CatalogStore::new(seed::products());
        let product = store.find("1").unwrap();
        assert_eq!(product.id, "1");
        assert!(store.find("missing").is_none());
    }

    #[test]
    fn test_mutation_is_visible_to_clones() {
        let store = CatalogStore::new(seed::products());
        let other = store.clone();

        store.with_catalog_mut(|catalog| catalog.filter_by_category("shoes"));

        other.with_catalog(|catalog| {
            assert_eq!(catalog.current_category(), Some("shoes"));
            assert!(catalog
                .filtered_products()
                .iter()
                .all(|p| p.category == "shoes"));
        });
    }
}

//! The inventory store: an in-memory keyed collection of products.

use std::collections::btree_map;
use std::iter::FusedIterator;
use std::path::Path;

use tracing::{debug, info, warn};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

use crate::config::StoreConfig;
use crate::persistence::{self, Items, PersistenceError};
use crate::product::Product;
use crate::report::{InventoryReport, StockStatus};

/// Keyed collection of [`Product`]s.
///
/// - Keys are product ids; a key is never rewritten in place.
/// - Iteration (listing, search, report) is ordered by id.
/// - Failed operations leave the collection unchanged.
/// - Nothing is written to disk unless [`save`](Self::save) is called.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    items: Items,
    config: StoreConfig,
}

impl InventoryStore {
    /// Create an empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            items: Items::new(),
            config,
        }
    }

    /// Create a store and load the configured data file into it.
    pub fn open(config: StoreConfig) -> Result<Self, PersistenceError> {
        let mut store = Self::new(config);
        store.load()?;
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn low_alert_threshold(&self) -> u64 {
        self.config.low_alert_threshold
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn exists(&self, id: &str) -> bool {
        self.search_by_id(id).is_ok()
    }

    pub fn get(&self, id: &str) -> DomainResult<&Product> {
        self.search_by_id(id)
    }

    /// The one lookup every existence check goes through.
    pub fn search_by_id(&self, id: &str) -> DomainResult<&Product> {
        let found = self.items.get(id);
        debug!(product_id = id, found = found.is_some(), "lookup");
        found.ok_or_else(|| DomainError::not_found(id))
    }

    /// Insert a new product. Never overwrites an existing entry.
    pub fn add(&mut self, product: Product) -> DomainResult<StockStatus> {
        if self.exists(product.id().as_str()) {
            return Err(DomainError::already_exists(product.id().as_str()));
        }
        let status = self.observe_stock(&product);
        debug!(product_id = %product.id(), "product added");
        self.items.insert(product.id().clone(), product);
        Ok(status)
    }

    /// Replace the entry with the same id. Never inserts.
    pub fn update(&mut self, product: Product) -> DomainResult<StockStatus> {
        self.search_by_id(product.id().as_str())?;
        let status = self.observe_stock(&product);
        debug!(product_id = %product.id(), "product updated");
        self.items.insert(product.id().clone(), product);
        Ok(status)
    }

    /// Remove and return the entry with the given id.
    pub fn delete(&mut self, id: &str) -> DomainResult<Product> {
        self.search_by_id(id)?;
        let removed = self
            .items
            .remove(id)
            .ok_or_else(|| DomainError::not_found(id))?;
        debug!(product_id = id, "product deleted");
        Ok(removed)
    }

    /// All products in id order.
    pub fn list(&self) -> btree_map::Values<'_, ProductId, Product> {
        self.items.values()
    }

    /// Products whose id, name, quantity or price text contains `keyword`,
    /// ignoring case.
    ///
    /// The returned iterator is lazy and can be cloned to restart the scan.
    pub fn search_by_keyword(&self, keyword: &str) -> KeywordMatches<'_> {
        KeywordMatches {
            products: self.items.values(),
            needle: keyword.to_lowercase(),
        }
    }

    /// Products at or below the alert threshold, in id order.
    pub fn list_low_stock(&self) -> impl Iterator<Item = &Product> + Clone + '_ {
        let threshold = self.low_alert_threshold();
        self.items
            .values()
            .filter(move |product| product.is_low_stock(threshold))
    }

    pub fn generate_report(&self) -> InventoryReport<'_> {
        InventoryReport::build(self.items.values(), self.low_alert_threshold())
    }

    /// Load the configured data file. See [`load_from`](Self::load_from).
    pub fn load(&mut self) -> Result<(), PersistenceError> {
        let path = self.config.data_path.clone();
        self.load_from(&path)
    }

    /// Replace the current contents with the document at `path`.
    ///
    /// The whole document is decoded and validated before anything is swapped
    /// in; on error the store keeps its previous contents. A missing file is
    /// not an error and changes nothing.
    pub fn load_from(&mut self, path: &Path) -> Result<(), PersistenceError> {
        match persistence::read_document(path)? {
            Some(items) => {
                info!(path = %path.display(), count = items.len(), "inventory loaded");
                self.items = items;
            }
            None => {
                info!(path = %path.display(), "no inventory file; nothing loaded");
            }
        }
        Ok(())
    }

    /// Write the whole collection to the configured data file.
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.save_to(&self.config.data_path)
    }

    /// Overwrite `path` with the whole collection.
    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::write_document(path, &self.items)?;
        info!(path = %path.display(), count = self.items.len(), "inventory saved");
        Ok(())
    }

    fn observe_stock(&self, product: &Product) -> StockStatus {
        let status = StockStatus::of(product, self.low_alert_threshold());
        if status.is_low() {
            warn!(
                product_id = %product.id(),
                quantity = product.quantity(),
                threshold = self.low_alert_threshold(),
                "low inventory alert"
            );
        }
        status
    }
}

/// Lazy keyword search over a store; see [`InventoryStore::search_by_keyword`].
#[derive(Debug, Clone)]
pub struct KeywordMatches<'a> {
    products: btree_map::Values<'a, ProductId, Product>,
    needle: String,
}

impl<'a> Iterator for KeywordMatches<'a> {
    type Item = &'a Product;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.products.find(|product| product.matches_lowercase(needle))
    }
}

impl FusedIterator for KeywordMatches<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn product(id: &str, name: &str, price: f64, quantity: i64) -> Product {
        Product::new(id, name, price, quantity).unwrap()
    }

    fn store() -> InventoryStore {
        InventoryStore::new(StoreConfig::default())
    }

    fn sample_store() -> InventoryStore {
        let mut store = store();
        store.add(product("A1", "iPhone 18", 999.99, 5)).unwrap();
        store.add(product("A2", "Galaxy S30", 899.0, 2)).unwrap();
        store.add(product("A3", "Pixel 11", 799.5, 0)).unwrap();
        store.add(product("B1", "USB-C Cable", 19.99, 40)).unwrap();
        store
    }

    fn ids<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<String> {
        products.map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn add_then_get_returns_equal_product() {
        let mut store = store();
        let p = product("A10", "TestName", 300.0, 10);
        assert_eq!(store.add(p.clone()).unwrap(), StockStatus::Ok);
        assert_eq!(store.get("A10").unwrap(), &p);
        assert!(store.exists("A10"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_reports_low_stock() {
        let mut store = store();
        assert_eq!(store.add(product("A10", "TestName", 300.0, 2)).unwrap(), StockStatus::Low);
        assert_eq!(store.add(product("A11", "TestName", 300.0, 3)).unwrap(), StockStatus::Ok);
    }

    #[test]
    fn add_rejects_duplicate_and_keeps_original() {
        let mut store = sample_store();
        let err = store.add(product("A1", "Impostor", 1.0, 1)).unwrap_err();
        assert_eq!(err, DomainError::AlreadyExists("A1".to_string()));
        assert_eq!(store.get("A1").unwrap().name(), "iPhone 18");
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = sample_store();
        assert_eq!(store.get("Z9").unwrap_err(), DomainError::NotFound("Z9".to_string()));
        assert!(!store.exists("Z9"));
    }

    #[test]
    fn update_replaces_only_that_entry() {
        let mut store = sample_store();
        let before_a2 = store.get("A2").unwrap().clone();

        let status = store.update(product("A1", "iPhone 18 Pro", 1099.0, 1)).unwrap();
        assert_eq!(status, StockStatus::Low);

        let a1 = store.get("A1").unwrap();
        assert_eq!(a1.name(), "iPhone 18 Pro");
        assert_eq!(a1.price(), 1099.0);
        assert_eq!(a1.quantity(), 1);
        assert_eq!(store.get("A2").unwrap(), &before_a2);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn update_missing_adds_nothing() {
        let mut store = sample_store();
        let err = store.update(product("Z9", "Ghost", 1.0, 1)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(!store.exists("Z9"));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn delete_removes_entry() {
        let mut store = sample_store();
        let removed = store.delete("A2").unwrap();
        assert_eq!(removed.name(), "Galaxy S30");
        assert!(!store.exists("A2"));
        assert!(matches!(store.delete("A2"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn list_is_ordered_by_id() {
        let store = sample_store();
        assert_eq!(ids(store.list()), ["A1", "A2", "A3", "B1"]);
    }

    #[test]
    fn keyword_search_is_case_insensitive() {
        let store = sample_store();
        assert_eq!(ids(store.search_by_keyword("iphone")), ["A1"]);
        assert_eq!(ids(store.search_by_keyword("IPHONE")), ["A1"]);
    }

    #[test]
    fn keyword_search_checks_every_field() {
        let store = sample_store();
        // id
        assert_eq!(ids(store.search_by_keyword("b1")), ["B1"]);
        // quantity
        assert_eq!(ids(store.search_by_keyword("40")), ["B1"]);
        // price
        assert_eq!(ids(store.search_by_keyword("799.5")), ["A3"]);
        assert_eq!(ids(store.search_by_keyword("899.0")), ["A2"]);
    }

    #[test]
    fn keyword_search_without_matches_is_empty() {
        let store = sample_store();
        assert_eq!(store.search_by_keyword("nokia").count(), 0);
    }

    #[test]
    fn keyword_search_can_restart() {
        let store = sample_store();
        let mut matches = store.search_by_keyword("a");
        let restart = matches.clone();
        assert!(matches.next().is_some());
        assert_eq!(restart.count(), store.search_by_keyword("a").count());
    }

    #[test]
    fn empty_keyword_matches_everything() {
        let store = sample_store();
        assert_eq!(store.search_by_keyword("").count(), store.len());
    }

    #[test]
    fn low_stock_uses_inclusive_threshold() {
        let mut store = store();
        for (id, qty) in [("Q0", 0), ("Q1", 1), ("Q2", 2), ("Q3", 3), ("Q9", 9)] {
            store.add(product(id, "Item", 1.0, qty)).unwrap();
        }
        assert_eq!(ids(store.list_low_stock()), ["Q0", "Q1", "Q2"]);
    }

    #[test]
    fn low_stock_empty_when_none_qualify() {
        let mut store = store();
        store.add(product("A1", "Item", 1.0, 10)).unwrap();
        assert_eq!(store.list_low_stock().count(), 0);
    }

    #[test]
    fn threshold_comes_from_config() {
        let mut store = InventoryStore::new(StoreConfig::default().with_low_alert_threshold(10));
        assert_eq!(store.add(product("A1", "Item", 1.0, 10)).unwrap(), StockStatus::Low);
        assert_eq!(store.list_low_stock().count(), 1);
    }

    #[test]
    fn report_totals() {
        let mut store = store();
        store.add(product("A1", "Widget", 10.0, 3)).unwrap();
        store.add(product("A2", "Gadget", 5.5, 2)).unwrap();

        let report = store.generate_report();
        assert_eq!(report.total_value, 41.0);
        assert_eq!(report.rows.len(), 2);
        assert!(!report.rows[0].status.is_low());
        assert!(report.rows[1].status.is_low());
    }

    #[test]
    fn load_missing_file_leaves_store_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = InventoryStore::open(StoreConfig::new(dir.path().join("missing.json"))).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("inventory.json"));

        let mut original = InventoryStore::new(config.clone());
        original.add(product("A1", "iPhone 18", 999.99, 5)).unwrap();
        original.add(product("A2", "Pixel 11", 0.1, 0)).unwrap();
        original.save().unwrap();

        let reloaded = InventoryStore::open(config).unwrap();
        assert_eq!(reloaded.items, original.items);
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(
            &path,
            r#"{"A1": {"id":"A1","name":"Ok","price":1.0,"quantity":1},
                "A2": {"id":"A2","name":"Bad","price":-1.0,"quantity":1}}"#,
        )
        .unwrap();

        let mut store = sample_store();
        let before = store.items.clone();
        let err = store.load_from(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidRecord { .. }));
        assert_eq!(store.items, before);
    }

    #[test]
    fn load_replaces_current_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, r#"{"C1": {"id":"C1","name":"Case","price":9.5,"quantity":7}}"#).unwrap();

        let mut store = sample_store();
        store.load_from(&path).unwrap();
        assert_eq!(ids(store.list()), ["C1"]);
    }

    #[test]
    fn failed_save_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = sample_store();
        let err = store.save_to(&blocker.join("inventory.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::Write { .. }));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::collection::btree_map;
        use proptest::prelude::*;

        fn arb_products() -> impl Strategy<Value = Vec<Product>> {
            btree_map(
                "[A-Z][A-Z0-9]{0,6}",
                ("[A-Za-z][A-Za-z0-9 ]{0,20}", 0.0f64..10_000.0, 0i64..1_000),
                0..16,
            )
            .prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|(id, (name, price, qty))| Product::new(id, name, price, qty).unwrap())
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: save followed by load into a fresh store reproduces the items.
            #[test]
            fn save_load_round_trip(products in arb_products()) {
                let dir = tempfile::tempdir().unwrap();
                let config = StoreConfig::new(dir.path().join("inventory.json"));

                let mut original = InventoryStore::new(config.clone());
                for p in products {
                    original.add(p).unwrap();
                }
                original.save().unwrap();

                let reloaded = InventoryStore::open(config).unwrap();
                prop_assert_eq!(&reloaded.items, &original.items);
            }

            /// Property: low-stock listing is exactly the products at or below the threshold.
            #[test]
            fn low_stock_matches_threshold(products in arb_products(), threshold in 0u64..10) {
                let mut store = InventoryStore::new(StoreConfig::default().with_low_alert_threshold(threshold));
                for p in products {
                    store.add(p).unwrap();
                }
                let expected: Vec<String> = store
                    .list()
                    .filter(|p| p.quantity() <= threshold)
                    .map(|p| p.id().to_string())
                    .collect();
                prop_assert_eq!(ids(store.list_low_stock()), expected);
            }

            /// Property: report total is the sum of price * quantity.
            #[test]
            fn report_total_is_sum_of_values(products in arb_products()) {
                let mut store = store();
                let mut expected = 0.0f64;
                for p in products {
                    expected += p.stock_value();
                    store.add(p).unwrap();
                }
                // Both sums run in id order, so they agree exactly.
                prop_assert_eq!(store.generate_report().total_value, expected);
            }
        }
    }
}

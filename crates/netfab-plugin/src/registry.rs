//! Registry of driver constructors, keyed by category and selector.
//!
//! Each entry pairs a configuration parser with a driver allocator; the
//! tables are populated once at process start and read-only afterward.
//! Adding a driver implementation is one [`DriverTable::register`] call per
//! category; the factory and the lifecycle coordinator need no changes.

use std::any::Any;
use std::collections::HashMap;

use netfab_common::types::DriverCategory;
use serde::de::DeserializeOwned;

use crate::driver::{ContainerDriver, DriverConfig, EndpointDriver, NetworkDriver, StateDriver};

type ConfigCtor = Box<dyn Fn(&str) -> serde_json::Result<DriverConfig> + Send + Sync>;
type DriverCtor<D> = Box<dyn Fn() -> Box<D> + Send + Sync>;

/// Construction recipe registered for one selector.
pub struct DriverEntry<D: ?Sized> {
    config: ConfigCtor,
    driver: DriverCtor<D>,
}

impl<D: ?Sized> DriverEntry<D> {
    /// Parses the raw plugin document into the registered configuration
    /// shape, ignoring fields the shape does not capture.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error if a captured field is malformed.
    pub fn new_config(&self, raw: &str) -> serde_json::Result<DriverConfig> {
        (self.config)(raw)
    }

    /// Allocates a zero-valued, uninitialized driver instance.
    #[must_use]
    pub fn new_driver(&self) -> Box<D> {
        (self.driver)()
    }
}

/// Selector-to-constructor table for one driver category.
pub struct DriverTable<D: ?Sized> {
    category: DriverCategory,
    entries: HashMap<String, DriverEntry<D>>,
}

impl<D: ?Sized> DriverTable<D> {
    /// Creates an empty table for `category`.
    #[must_use]
    pub fn new(category: DriverCategory) -> Self {
        Self {
            category,
            entries: HashMap::new(),
        }
    }

    /// Registers a driver implementation under `selector`.
    ///
    /// `C` is the configuration shape the driver declares; the raw plugin
    /// document is re-parsed into it whenever the selector is constructed.
    /// `new_driver` allocates the uninitialized instance. Registering the
    /// same selector twice replaces the earlier entry.
    pub fn register<C, F>(&mut self, selector: impl Into<String>, new_driver: F)
    where
        C: DeserializeOwned + Any + Send,
        F: Fn() -> Box<D> + Send + Sync + 'static,
    {
        let entry = DriverEntry {
            config: Box::new(|raw: &str| serde_json::from_str::<C>(raw).map(DriverConfig::new)),
            driver: Box::new(new_driver),
        };
        let _ = self.entries.insert(selector.into(), entry);
    }

    /// Looks up the construction recipe registered for `selector`.
    #[must_use]
    pub fn lookup(&self, selector: &str) -> Option<&DriverEntry<D>> {
        self.entries.get(selector)
    }

    /// The category this table serves.
    #[must_use]
    pub fn category(&self) -> DriverCategory {
        self.category
    }
}

/// The full driver registry: one construction table per category.
pub struct DriverRegistry {
    /// Network driver constructors.
    pub network: DriverTable<dyn NetworkDriver>,
    /// Endpoint driver constructors.
    pub endpoint: DriverTable<dyn EndpointDriver>,
    /// Distributed-state driver constructors.
    pub state: DriverTable<dyn StateDriver>,
    /// Container-runtime driver constructors.
    pub container: DriverTable<dyn ContainerDriver>,
}

impl DriverRegistry {
    /// Creates a registry with all four tables empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            network: DriverTable::new(DriverCategory::Network),
            endpoint: DriverTable::new(DriverCategory::Endpoint),
            state: DriverTable::new(DriverCategory::State),
            container: DriverTable::new(DriverCategory::Container),
        }
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use netfab_common::error::Result;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct NullConfig {}

    #[derive(Default)]
    struct NullState;

    impl StateDriver for NullState {
        fn init(&mut self, _config: DriverConfig) -> Result<()> {
            Ok(())
        }

        fn deinit(&mut self) {}
    }

    #[test]
    fn register_then_lookup_finds_entry() {
        let mut table: DriverTable<dyn StateDriver> = DriverTable::new(DriverCategory::State);
        table.register::<NullConfig, _>("etcd", || Box::new(NullState));
        assert!(table.lookup("etcd").is_some());
    }

    #[test]
    fn lookup_misses_unregistered_selector() {
        let table: DriverTable<dyn StateDriver> = DriverTable::new(DriverCategory::State);
        assert!(table.lookup("consul").is_none());
    }

    #[test]
    fn tables_know_their_category() {
        let registry = DriverRegistry::new();
        assert_eq!(registry.network.category(), DriverCategory::Network);
        assert_eq!(registry.endpoint.category(), DriverCategory::Endpoint);
        assert_eq!(registry.state.category(), DriverCategory::State);
        assert_eq!(registry.container.category(), DriverCategory::Container);
    }

    #[test]
    fn entry_parses_config_ignoring_unknown_fields() {
        let mut table: DriverTable<dyn StateDriver> = DriverTable::new(DriverCategory::State);
        table.register::<NullConfig, _>("etcd", || Box::new(NullState));
        let entry = table.lookup("etcd").expect("registered above");
        assert!(entry.new_config(r#"{"Drivers":{"State":"etcd"}}"#).is_ok());
    }
}

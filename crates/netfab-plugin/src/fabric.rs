//! Lifecycle coordination and dispatch facade over the active drivers.

use netfab_common::config::{DriverSelectors, PluginConfig};
use netfab_common::error::{NetfabError, Result};
use netfab_common::types::{DriverCategory, EndpointContext, EndpointId, NetworkId};

use crate::driver::{ContainerDriver, EndpointDriver, NetworkDriver, StateDriver};
use crate::factory;
use crate::registry::DriverRegistry;

/// Coordinates the pluggable driver stack and dispatches to it.
///
/// A `Fabric` owns the driver registry and, once initialized, exactly one
/// active driver per category. Initialization is all-or-nothing: either all
/// four categories come up, or every stage that did come up is rolled back
/// and the instance is left indistinguishable from a freshly constructed
/// one. The dispatch methods forward to the active drivers and add no
/// behavior of their own.
pub struct Fabric {
    registry: DriverRegistry,
    network: Option<Box<dyn NetworkDriver>>,
    endpoint: Option<Box<dyn EndpointDriver>>,
    state: Option<Box<dyn StateDriver>>,
    container: Option<Box<dyn ContainerDriver>>,
}

impl Fabric {
    /// Creates a coordinator over `registry` with no active drivers.
    #[must_use]
    pub fn new(registry: DriverRegistry) -> Self {
        Self {
            registry,
            network: None,
            endpoint: None,
            state: None,
            container: None,
        }
    }

    /// Brings up all four driver categories from the raw plugin
    /// configuration document.
    ///
    /// Stages run in dependency order: state first, then network and
    /// endpoint (each handed the initialized state driver), then
    /// container. If any stage fails, every previously committed stage is
    /// torn down in reverse commit order before the error is returned; the
    /// failing stage's driver is dropped without teardown, since it never
    /// initialized.
    ///
    /// Calling `init` again without an intervening [`Fabric::deinit`]
    /// replaces the active drivers without tearing them down; callers must
    /// serialize the lifecycle and not do this.
    ///
    /// # Errors
    ///
    /// Returns [`NetfabError::EmptyConfig`] for an empty document,
    /// [`NetfabError::ConfigParse`] for a malformed one,
    /// [`NetfabError::UnregisteredDriver`] for a selector with no registry
    /// entry, and [`NetfabError::DriverInit`] wrapping the driver's own
    /// error when a stage's initialization fails.
    pub fn init(&mut self, raw: &str) -> Result<()> {
        if raw.is_empty() {
            return Err(NetfabError::EmptyConfig);
        }
        let selectors = PluginConfig::from_json(raw)?.drivers;

        let mut committed = Vec::new();
        if let Err(err) = self.init_stages(&selectors, raw, &mut committed) {
            self.rollback(&committed);
            return Err(err);
        }
        Ok(())
    }

    /// Runs the four stages, recording each success in `committed`.
    fn init_stages(
        &mut self,
        selectors: &DriverSelectors,
        raw: &str,
        committed: &mut Vec<DriverCategory>,
    ) -> Result<()> {
        let (mut state, config) = factory::construct(&self.registry.state, &selectors.state, raw)?;
        state
            .init(config)
            .map_err(|e| driver_init(DriverCategory::State, e))?;
        self.state = Some(state);
        committed.push(DriverCategory::State);
        tracing::info!(selector = %selectors.state, "state driver initialized");

        let (mut network, config) =
            factory::construct(&self.registry.network, &selectors.network, raw)?;
        network
            .init(config, self.state_dep()?)
            .map_err(|e| driver_init(DriverCategory::Network, e))?;
        self.network = Some(network);
        committed.push(DriverCategory::Network);
        tracing::info!(selector = %selectors.network, "network driver initialized");

        let (mut endpoint, config) =
            factory::construct(&self.registry.endpoint, &selectors.endpoint, raw)?;
        endpoint
            .init(config, self.state_dep()?)
            .map_err(|e| driver_init(DriverCategory::Endpoint, e))?;
        self.endpoint = Some(endpoint);
        committed.push(DriverCategory::Endpoint);
        tracing::info!(selector = %selectors.endpoint, "endpoint driver initialized");

        let (mut container, config) =
            factory::construct(&self.registry.container, &selectors.container, raw)?;
        container
            .init(config)
            .map_err(|e| driver_init(DriverCategory::Container, e))?;
        self.container = Some(container);
        committed.push(DriverCategory::Container);
        tracing::info!(selector = %selectors.container, "container driver initialized");

        Ok(())
    }

    /// Tears down the endpoint, network, and state drivers, in that order.
    ///
    /// Skips any category with no active driver, so calling this on a
    /// never-initialized or already-deinitialized coordinator is a no-op.
    /// The container driver is intentionally left installed.
    pub fn deinit(&mut self) {
        self.teardown(DriverCategory::Endpoint);
        self.teardown(DriverCategory::Network);
        self.teardown(DriverCategory::State);
    }

    /// Tears down every committed stage, last-successful-first.
    fn rollback(&mut self, committed: &[DriverCategory]) {
        for &category in committed.iter().rev() {
            tracing::warn!(%category, "rolling back initialized driver");
            self.teardown(category);
        }
    }

    /// Deinitializes and drops the active driver for `category`, if any.
    fn teardown(&mut self, category: DriverCategory) {
        match category {
            DriverCategory::Network => {
                if let Some(mut driver) = self.network.take() {
                    driver.deinit();
                    tracing::debug!(%category, "driver deinitialized");
                }
            }
            DriverCategory::Endpoint => {
                if let Some(mut driver) = self.endpoint.take() {
                    driver.deinit();
                    tracing::debug!(%category, "driver deinitialized");
                }
            }
            DriverCategory::State => {
                if let Some(mut driver) = self.state.take() {
                    driver.deinit();
                    tracing::debug!(%category, "driver deinitialized");
                }
            }
            DriverCategory::Container => {
                if let Some(mut driver) = self.container.take() {
                    driver.deinit();
                    tracing::debug!(%category, "driver deinitialized");
                }
            }
        }
    }

    /// The installed state driver, for injection into dependent stages.
    fn state_dep(&mut self) -> Result<&mut (dyn StateDriver + 'static)> {
        self.state.as_deref_mut().ok_or(NetfabError::NotInitialized {
            category: DriverCategory::State,
        })
    }

    fn network_driver(&self) -> Result<&dyn NetworkDriver> {
        self.network.as_deref().ok_or(NetfabError::NotInitialized {
            category: DriverCategory::Network,
        })
    }

    fn endpoint_driver(&self) -> Result<&dyn EndpointDriver> {
        self.endpoint.as_deref().ok_or(NetfabError::NotInitialized {
            category: DriverCategory::Endpoint,
        })
    }

    fn container_driver(&self) -> Result<&dyn ContainerDriver> {
        self.container
            .as_deref()
            .ok_or(NetfabError::NotInitialized {
                category: DriverCategory::Container,
            })
    }

    /// Provisions a network via the active network driver.
    ///
    /// # Errors
    ///
    /// Returns an error if no network driver is active or the driver fails.
    pub fn create_network(&self, id: &NetworkId) -> Result<()> {
        self.network_driver()?.create_network(id)
    }

    /// Removes a network via the active network driver.
    ///
    /// # Errors
    ///
    /// Returns an error if no network driver is active or the driver fails.
    pub fn delete_network(&self, id: &NetworkId) -> Result<()> {
        self.network_driver()?.delete_network(id)
    }

    /// Fetches the persisted state record for a network.
    ///
    /// Declared for interface completeness; no driver provides it.
    ///
    /// # Errors
    ///
    /// Always returns [`NetfabError::NotImplemented`].
    pub fn fetch_network(&self, _id: &NetworkId) -> Result<serde_json::Value> {
        Err(NetfabError::NotImplemented {
            operation: "fetch_network",
        })
    }

    /// Provisions an endpoint via the active endpoint driver.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint driver is active or the driver
    /// fails.
    pub fn create_endpoint(&self, id: &EndpointId) -> Result<()> {
        self.endpoint_driver()?.create_endpoint(id)
    }

    /// Removes an endpoint via the active endpoint driver.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint driver is active or the driver
    /// fails.
    pub fn delete_endpoint(&self, id: &EndpointId) -> Result<()> {
        self.endpoint_driver()?.delete_endpoint(id)
    }

    /// Returns the container attachment context for an endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint driver is active or the endpoint is
    /// unknown.
    pub fn endpoint_container_context(&self, id: &EndpointId) -> Result<EndpointContext> {
        self.endpoint_driver()?.endpoint_container_context(id)
    }

    /// Returns the attachment contexts of every endpoint belonging to the
    /// named container.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint driver is active or the driver
    /// fails.
    pub fn container_contexts_by_name(
        &self,
        container_name: &str,
    ) -> Result<Vec<EndpointContext>> {
        self.endpoint_driver()?
            .container_contexts_by_name(container_name)
    }

    /// Rebinds an endpoint to a new container identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint driver is active or the update
    /// fails.
    pub fn update_container_id(&self, id: &EndpointId, container_id: &str) -> Result<()> {
        self.endpoint_driver()?.update_container_id(id, container_id)
    }

    /// Fetches the persisted state record for an endpoint.
    ///
    /// Declared for interface completeness; no driver provides it.
    ///
    /// # Errors
    ///
    /// Always returns [`NetfabError::NotImplemented`].
    pub fn fetch_endpoint(&self, _id: &EndpointId) -> Result<serde_json::Value> {
        Err(NetfabError::NotImplemented {
            operation: "fetch_endpoint",
        })
    }

    /// Attaches an endpoint to its container via the active container
    /// driver.
    ///
    /// # Errors
    ///
    /// Returns an error if no container driver is active or the attachment
    /// fails.
    pub fn attach_endpoint(&self, context: &EndpointContext) -> Result<()> {
        self.container_driver()?.attach_endpoint(context)
    }

    /// Detaches an endpoint from its container via the active container
    /// driver.
    ///
    /// # Errors
    ///
    /// Returns an error if no container driver is active or the detachment
    /// fails.
    pub fn detach_endpoint(&self, context: &EndpointContext) -> Result<()> {
        self.container_driver()?.detach_endpoint(context)
    }

    /// Resolves a container name to its runtime identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no container driver is active.
    pub fn container_id(&self, container_name: &str) -> Result<String> {
        Ok(self.container_driver()?.container_id(container_name))
    }

    /// Resolves a runtime identifier to its container name.
    ///
    /// # Errors
    ///
    /// Returns an error if no container driver is active or the identifier
    /// is unknown.
    pub fn container_name(&self, container_id: &str) -> Result<String> {
        self.container_driver()?.container_name(container_id)
    }
}

/// Wraps a stage's initialization failure, preserving the driver's error.
fn driver_init(category: DriverCategory, source: NetfabError) -> NetfabError {
    NetfabError::DriverInit {
        category,
        source: Box::new(source),
    }
}

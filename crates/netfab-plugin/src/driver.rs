//! Driver capability traits and the type-erased category configuration.
//!
//! Implementors handle the backend-specific details of network, endpoint,
//! state, and container-runtime provisioning. The orchestration layer holds
//! them only behind these traits and never depends on a concrete type.

use std::any::Any;
use std::fmt;

use netfab_common::error::{NetfabError, Result};
use netfab_common::types::{EndpointContext, EndpointId, NetworkId};

/// Type-erased, owned configuration for a single driver category.
///
/// The factory parses the raw plugin document into the configuration shape
/// the selected driver registered, then hands ownership here. The driver's
/// `init` consumes the value; the coordinator does not retain it.
pub struct DriverConfig(Box<dyn Any + Send>);

impl DriverConfig {
    /// Wraps a parsed category-specific configuration value.
    #[must_use]
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Recovers the concrete configuration type declared at registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the wrapped value is not a `T`, which means the
    /// driver was registered with a different configuration shape than it
    /// downcasts to.
    pub fn downcast<T: Any>(self) -> Result<T> {
        self.0
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| NetfabError::Config {
                message: format!(
                    "driver configuration is not a {}",
                    std::any::type_name::<T>()
                ),
            })
    }
}

impl fmt::Debug for DriverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverConfig").finish_non_exhaustive()
    }
}

impl fmt::Debug for dyn StateDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn StateDriver")
    }
}

/// Distributed-state backend shared by the network and endpoint drivers.
pub trait StateDriver: Send + Sync {
    /// Initializes the driver, consuming its category configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached or the
    /// configuration is invalid.
    fn init(&mut self, config: DriverConfig) -> Result<()>;

    /// Releases the driver's resources. The instance is not reused.
    fn deinit(&mut self);
}

/// Network provisioning backend.
pub trait NetworkDriver: Send + Sync {
    /// Initializes the driver, consuming its category configuration.
    ///
    /// The already-initialized state driver is borrowed for the duration of
    /// the call so the driver can read or seed its persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be set up.
    fn init(&mut self, config: DriverConfig, state: &mut dyn StateDriver) -> Result<()>;

    /// Releases the driver's resources. The instance is not reused.
    fn deinit(&mut self);

    /// Provisions the network identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the network cannot be created.
    fn create_network(&self, id: &NetworkId) -> Result<()>;

    /// Removes the network identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the network cannot be deleted.
    fn delete_network(&self, id: &NetworkId) -> Result<()>;
}

/// Endpoint provisioning backend.
pub trait EndpointDriver: Send + Sync {
    /// Initializes the driver, consuming its category configuration.
    ///
    /// The already-initialized state driver is borrowed for the duration of
    /// the call so the driver can read or seed its persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be set up.
    fn init(&mut self, config: DriverConfig, state: &mut dyn StateDriver) -> Result<()>;

    /// Releases the driver's resources. The instance is not reused.
    fn deinit(&mut self);

    /// Provisions the endpoint identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be created.
    fn create_endpoint(&self, id: &EndpointId) -> Result<()>;

    /// Removes the endpoint identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be deleted.
    fn delete_endpoint(&self, id: &EndpointId) -> Result<()>;

    /// Returns the container attachment context for an endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is unknown.
    fn endpoint_container_context(&self, id: &EndpointId) -> Result<EndpointContext>;

    /// Returns the attachment contexts of every endpoint belonging to the
    /// named container.
    ///
    /// # Errors
    ///
    /// Returns an error if the contexts cannot be retrieved.
    fn container_contexts_by_name(&self, container_name: &str) -> Result<Vec<EndpointContext>>;

    /// Rebinds an endpoint to a new container identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is unknown or the update fails.
    fn update_container_id(&self, id: &EndpointId, container_id: &str) -> Result<()>;
}

/// Container-runtime integration backend.
pub trait ContainerDriver: Send + Sync {
    /// Initializes the driver, consuming its category configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be reached.
    fn init(&mut self, config: DriverConfig) -> Result<()>;

    /// Releases the driver's resources. The instance is not reused.
    fn deinit(&mut self);

    /// Attaches the endpoint described by `context` to its container.
    ///
    /// # Errors
    ///
    /// Returns an error if the attachment fails.
    fn attach_endpoint(&self, context: &EndpointContext) -> Result<()>;

    /// Detaches the endpoint described by `context` from its container.
    ///
    /// # Errors
    ///
    /// Returns an error if the detachment fails.
    fn detach_endpoint(&self, context: &EndpointContext) -> Result<()>;

    /// Resolves a container name to its runtime identifier.
    ///
    /// Returns an empty string for an unknown name.
    fn container_id(&self, container_name: &str) -> String;

    /// Resolves a runtime identifier to its container name.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is unknown.
    fn container_name(&self, container_id: &str) -> Result<String>;
}

//! Domain primitive types used across the Netfab workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a pluggable driver fills in the networking stack.
///
/// Each category has exactly one active driver instance at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverCategory {
    /// Network provisioning (switch fabric, overlays).
    Network,
    /// Endpoint provisioning (ports, interfaces).
    Endpoint,
    /// Distributed state storage shared by the other drivers.
    State,
    /// Container runtime integration.
    Container,
}

impl fmt::Display for DriverCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Endpoint => write!(f, "endpoint"),
            Self::State => write!(f, "state"),
            Self::Container => write!(f, "container"),
        }
    }
}

/// Unique identifier for a provisioned network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkId(String);

impl NetworkId {
    /// Creates a new network ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a provisioned endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointId(String);

impl EndpointId {
    /// Creates a new endpoint ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attachment record exchanged between the endpoint and container drivers.
///
/// Describes how an endpoint is wired into a container: which container it
/// belongs to and the interface parameters the container runtime applies
/// when attaching or detaching it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointContext {
    /// Endpoint this context describes.
    pub endpoint_id: EndpointId,
    /// Runtime-assigned container identifier.
    pub container_id: String,
    /// Human-readable container name.
    pub container_name: String,
    /// Interface name inside the container.
    pub interface_name: String,
    /// IP address assigned to the interface.
    pub ip_address: String,
    /// Default gateway for the interface.
    pub gateway: String,
}

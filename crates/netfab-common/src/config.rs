//! Plugin configuration model for the Netfab driver stack.
//!
//! The raw configuration document is interpreted twice: once here, loosely,
//! to extract the selector names, and once per category by the driver
//! factory, strictly, into the configuration shape the selected driver
//! registered. Both parses ignore fields they do not capture.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Loose parse of the raw plugin configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginConfig {
    /// Driver selectors, one per category.
    #[serde(default)]
    pub drivers: DriverSelectors,
}

/// The `Drivers` section: which registered implementation fills each
/// category.
///
/// Missing fields default to the empty selector, which no registry entry
/// matches; the failure then surfaces at lookup time with the category and
/// selector attached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DriverSelectors {
    /// Selector for the network driver.
    #[serde(default)]
    pub network: String,
    /// Selector for the endpoint driver.
    #[serde(default)]
    pub endpoint: String,
    /// Selector for the distributed-state driver.
    #[serde(default)]
    pub state: String,
    /// Selector for the container-runtime driver.
    #[serde(default)]
    pub container: String,
}

impl PluginConfig {
    /// Parses the raw configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::NetfabError::ConfigParse`] if `raw` is not
    /// valid JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

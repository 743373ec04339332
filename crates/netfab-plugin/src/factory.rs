//! Generic driver construction from registry entries.

use netfab_common::error::{NetfabError, Result};

use crate::driver::DriverConfig;
use crate::registry::DriverTable;

/// Constructs an uninitialized driver and its parsed configuration.
///
/// Resolution happens in three steps: registry lookup, configuration parse,
/// driver allocation. No driver method is invoked here: construction and
/// initialization are distinct, and initialization belongs to the lifecycle
/// coordinator. The call is deterministic and has no side effects beyond
/// allocation; on the lookup-failure path nothing is allocated at all.
///
/// # Errors
///
/// Returns [`NetfabError::UnregisteredDriver`] if `selector` has no entry
/// in `table`, or [`NetfabError::ConfigParse`] if the raw document cannot
/// be parsed into the registered configuration shape.
pub fn construct<D: ?Sized>(
    table: &DriverTable<D>,
    selector: &str,
    raw: &str,
) -> Result<(Box<D>, DriverConfig)> {
    let entry = table
        .lookup(selector)
        .ok_or_else(|| NetfabError::UnregisteredDriver {
            category: table.category(),
            selector: selector.to_string(),
        })?;
    let config = entry.new_config(raw)?;
    Ok((entry.new_driver(), config))
}

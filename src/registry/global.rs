//! Process-wide registry
//!
//! Installed once during initialization, read-only afterwards.

use std::sync::OnceLock;
use tracing::debug;
use super::error::RegistryError;
use super::registry::Registry;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry. Fails if one is already installed.
pub fn install_global(registry: Registry) -> Result<&'static Registry, RegistryError> {
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    debug!("registry.global.installed");
    GLOBAL.get().ok_or(RegistryError::AlreadyInstalled)
}

/// The process-wide registry, if installed
pub fn global() -> Option<&'static Registry> {
    GLOBAL.get()
}

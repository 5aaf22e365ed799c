//! Boundary to the external trading engine
//!
//! The engine owns gateways, apps, orders and market data. The launcher only
//! registers resolved plugins with it, so the seam is a two-method trait.

use super::plugin::PluginHandle;
use crate::error::{LauncherError, Result};

/// Registration surface of the trading engine
pub trait Engine {
    fn add_gateway(&mut self, handle: PluginHandle) -> Result<()>;
    fn add_app(&mut self, handle: PluginHandle) -> Result<()>;
}

/// In-process registry of everything handed to the engine
#[derive(Debug, Default)]
pub struct MainEngine {
    gateways: Vec<PluginHandle>,
    apps: Vec<PluginHandle>,
}

impl MainEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gateways(&self) -> &[PluginHandle] {
        &self.gateways
    }

    pub fn apps(&self) -> &[PluginHandle] {
        &self.apps
    }
}

fn register(list: &mut Vec<PluginHandle>, handle: PluginHandle) -> Result<()> {
    if list.iter().any(|h| h.class == handle.class) {
        return Err(LauncherError::Plugin(format!(
            "{} is already registered",
            handle.class
        )));
    }
    tracing::debug!("Registered {}.{}", handle.module, handle.class);
    list.push(handle);
    Ok(())
}

impl Engine for MainEngine {
    fn add_gateway(&mut self, handle: PluginHandle) -> Result<()> {
        register(&mut self.gateways, handle)
    }

    fn add_app(&mut self, handle: PluginHandle) -> Result<()> {
        register(&mut self.apps, handle)
    }
}

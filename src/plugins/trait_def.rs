//! Plugin trait definitions

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::entities::InboundEvent;

/// Core plugin trait that all plugins must implement
#[async_trait]
pub trait Plugin: Send {
    /// Unique identifier for the plugin
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    fn version(&self) -> &str;

    /// Handle one event; the returned text is sent back to the event's origin
    async fn handle_event(&mut self, event: &InboundEvent) -> Option<String>;

    /// Optional: Cleanup when the plugin is unloaded
    async fn terminate(&mut self) {}

    /// Optional: Get plugin metadata
    fn metadata(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

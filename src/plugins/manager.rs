//! Plugin manager - handles plugin lifecycle and event fan-out

use crate::domain::entities::InboundEvent;
use crate::domain::traits::{Bot, EventSource};
use crate::plugins::trait_def::Plugin;
use std::collections::HashMap;
use tracing::{error, info};

/// Manages all plugins for the bot
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> Result<(), String> {
        let name = plugin.name().to_string();

        if self.has_plugin(&name) {
            return Err(format!("Plugin '{}' already registered", name));
        }

        info!("Registering plugin: {} v{}", name, plugin.version());
        self.plugins.push(Box::new(plugin));
        Ok(())
    }

    /// Hand the event to every plugin in registration order and collect replies
    pub async fn dispatch(&mut self, event: &InboundEvent) -> Vec<String> {
        let mut replies = Vec::new();
        for plugin in self.plugins.iter_mut() {
            if let Some(reply) = plugin.handle_event(event).await {
                replies.push(reply);
            }
        }
        replies
    }

    /// Pull events until the source is exhausted, sending each reply to the
    /// event's origin. Events are handled strictly one at a time.
    pub async fn run(&mut self, source: &mut dyn EventSource, bot: &dyn Bot) {
        while let Some(event) = source.next_event().await {
            for reply in self.dispatch(&event).await {
                if let Err(e) = bot.send_message(event.origin(), &reply).await {
                    error!("Failed to send reply to {}: {}", event.origin(), e);
                }
            }
        }
        info!("Event source closed");
    }

    /// Terminate and drop all plugins
    pub async fn shutdown(&mut self) {
        for mut plugin in self.plugins.drain(..) {
            plugin.terminate().await;
            info!("Unregistered plugin: {}", plugin.name());
        }
    }

    /// List all registered plugins
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(|plugin| {
            PluginInfo {
                name: plugin.name().to_string(),
                description: plugin.description().to_string(),
                metadata: plugin.metadata(),
            }
        }).collect()
    }

    /// Check if a plugin exists
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }
}

/// Plugin information for listing
#[derive(Debug, Clone, serde::Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub description: String,
    pub metadata: HashMap<String, String>,
}

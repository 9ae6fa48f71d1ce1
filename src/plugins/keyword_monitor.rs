//! Keyword monitor plugin
//!
//! Watches whitelisted group chats for keywords and alerts the admin in a
//! private chat. The admin manages keywords, the whitelist and the admin id
//! through a single prefixed command.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::services::{AlertDispatcher, AlertOutcome, CommandService, MonitorService};
use crate::domain::entities::{InboundEvent, MonitorState};
use crate::domain::traits::{Bot, ConfigStore};
use super::trait_def::Plugin;

pub struct KeywordMonitorPlugin {
    state: MonitorState,
    store: Box<dyn ConfigStore>,
    commands: CommandService,
    monitor: MonitorService,
}

impl KeywordMonitorPlugin {
    pub fn new(
        store: Box<dyn ConfigStore>,
        bot: Arc<dyn Bot>,
        prefix: impl Into<String>,
        platform: impl Into<String>,
    ) -> Result<Self, BotError> {
        let mut commands = CommandService::new(prefix);
        commands.register_defaults()?;

        let state = store.load();
        tracing::info!(
            "Keyword monitor plugin loaded: {} keywords, {} groups",
            state.keywords.len(),
            state.white_list.len()
        );

        Ok(Self {
            state,
            store,
            commands,
            monitor: MonitorService::new(AlertDispatcher::new(bot, platform)),
        })
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run the group message pipeline and report what happened
    pub async fn inspect(&self, event: &InboundEvent) -> AlertOutcome {
        self.monitor.process(&self.state, event).await
    }
}

#[async_trait]
impl Plugin for KeywordMonitorPlugin {
    fn name(&self) -> &str {
        "keyword_monitor"
    }

    fn description(&self) -> &str {
        "Monitors group chats for keywords and alerts the admin"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    async fn handle_event(&mut self, event: &InboundEvent) -> Option<String> {
        match event {
            InboundEvent::GroupMessage { .. } => {
                let outcome = self.inspect(event).await;
                tracing::debug!("Group message outcome: {:?}", outcome);
                None
            }
            InboundEvent::Command { sender_id, verb, args, .. } => {
                // state is mutated and saved synchronously, before any await
                let reply = self.commands.handle(
                    &mut self.state,
                    self.store.as_ref(),
                    sender_id,
                    verb.as_deref(),
                    args.as_deref(),
                );
                Some(reply)
            }
        }
    }

    async fn terminate(&mut self) {
        tracing::info!("Keyword monitor plugin unloaded");
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            ("keywords".to_string(), self.state.keywords.len().to_string()),
            ("groups".to_string(), self.state.white_list.len().to_string()),
            ("admin".to_string(), self.state.admin_qq.to_string()),
        ])
    }
}

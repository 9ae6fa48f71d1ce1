//! Group message pipeline: whitelist gate, keyword scan, alert

use crate::application::services::alert_service::{AlertDispatcher, AlertTrigger};
use crate::application::services::{keyword_scanner, whitelist_gate};
use crate::domain::entities::{InboundEvent, MonitorState};

/// What happened to one group message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Not a group message, or the group is not whitelisted
    Skipped,
    NoMatch,
    Delivered { keyword: String },
    Failed { keyword: String },
}

/// Service for inspecting group messages
pub struct MonitorService {
    dispatcher: AlertDispatcher,
}

impl MonitorService {
    pub fn new(dispatcher: AlertDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Process an incoming event. Never produces a reply for the group.
    pub async fn process(&self, state: &MonitorState, event: &InboundEvent) -> AlertOutcome {
        let InboundEvent::GroupMessage { group_id, sender, text, received_at, .. } = event else {
            return AlertOutcome::Skipped;
        };

        if !whitelist_gate::is_allowed(&state.white_list, group_id) {
            return AlertOutcome::Skipped;
        }

        let Some(keyword) = keyword_scanner::scan(text, &state.keywords) else {
            return AlertOutcome::NoMatch;
        };

        let trigger = AlertTrigger {
            keyword: keyword.to_string(),
            group_id: group_id.clone(),
            sender: sender.clone(),
            text: text.clone(),
            received_at: *received_at,
        };

        tracing::warn!(
            "Keyword '{}' detected in group {} from {} at {}",
            keyword,
            group_id,
            sender.id,
            received_at.to_rfc3339()
        );

        match self.dispatcher.dispatch(&state.admin_qq, &trigger).await {
            Ok(()) => AlertOutcome::Delivered { keyword: trigger.keyword },
            Err(_) => AlertOutcome::Failed { keyword: trigger.keyword },
        }
    }
}

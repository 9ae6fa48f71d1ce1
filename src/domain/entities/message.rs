use super::{SessionId, User};
use chrono::{DateTime, Utc};

/// Event delivered by the host to the plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A plain message posted in a group chat
    GroupMessage {
        group_id: String,
        sender: User,
        text: String,
        origin: SessionId,
        received_at: DateTime<Utc>,
    },
    /// An invocation of the admin command prefix
    Command {
        sender_id: String,
        verb: Option<String>,
        args: Option<String>,
        origin: SessionId,
    },
}

impl InboundEvent {
    pub fn group_message(
        platform: &str,
        group_id: impl Into<String>,
        sender: User,
        text: impl Into<String>,
    ) -> Self {
        let group_id = group_id.into();
        InboundEvent::GroupMessage {
            origin: SessionId::group(platform, group_id.clone()),
            group_id,
            sender,
            text: text.into(),
            received_at: Utc::now(),
        }
    }

    pub fn command(
        origin: SessionId,
        sender_id: impl Into<String>,
        verb: Option<String>,
        args: Option<String>,
    ) -> Self {
        InboundEvent::Command {
            sender_id: sender_id.into(),
            verb,
            args,
            origin,
        }
    }

    /// Where replies to this event go
    pub fn origin(&self) -> &SessionId {
        match self {
            InboundEvent::GroupMessage { origin, .. } => origin,
            InboundEvent::Command { origin, .. } => origin,
        }
    }

    pub fn sender_id(&self) -> &str {
        match self {
            InboundEvent::GroupMessage { sender, .. } => &sender.id,
            InboundEvent::Command { sender_id, .. } => sender_id,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, InboundEvent::Command { .. })
    }
}

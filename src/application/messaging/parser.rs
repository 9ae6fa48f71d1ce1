//! Message parser - Parses raw chat lines into inbound events

use crate::domain::entities::{InboundEvent, SessionId, User};

/// Parses incoming text into structured [`InboundEvent`]s
pub struct MessageParser {
    command_prefix: String,
    platform: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
            platform: platform.into(),
        }
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Parse a message posted in a group
    pub fn parse_group(&self, group_id: impl Into<String>, sender: User, text: impl Into<String>) -> InboundEvent {
        let group_id = group_id.into();
        let text = text.into();

        if let Some((verb, args)) = self.split_command(&text) {
            let origin = SessionId::group(&self.platform, group_id);
            return InboundEvent::command(origin, sender.id, verb, args);
        }

        InboundEvent::group_message(&self.platform, group_id, sender, text)
    }

    /// Parse a private message; only command invocations are of interest
    pub fn parse_private(&self, sender_id: impl Into<String>, text: &str) -> Option<InboundEvent> {
        let sender_id = sender_id.into();
        let (verb, args) = self.split_command(text)?;
        let origin = SessionId::private(&self.platform, sender_id.clone());
        Some(InboundEvent::command(origin, sender_id, verb, args))
    }

    /// Split `<prefix> [verb [args...]]`; the args are everything after the verb
    fn split_command(&self, text: &str) -> Option<(Option<String>, Option<String>)> {
        let rest = text.trim_start().strip_prefix(&self.command_prefix)?;
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            // "/km_adminx" is not our command
            return None;
        }

        let rest = rest.trim();
        if rest.is_empty() {
            return Some((None, None));
        }

        let (verb, args) = match rest.split_once(char::is_whitespace) {
            Some((verb, args)) => (verb, Some(args.trim())),
            None => (rest, None),
        };
        let args = args.filter(|a| !a.is_empty()).map(str::to_string);
        Some((Some(verb.to_string()), args))
    }
}

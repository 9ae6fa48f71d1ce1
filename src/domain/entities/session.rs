use std::fmt;
use std::str::FromStr;

use crate::application::errors::ParseError;

/// Kind of conversation a session points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    FriendMessage,
    GroupMessage,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::FriendMessage => "FRIEND_MESSAGE",
            MessageKind::GroupMessage => "GROUP_MESSAGE",
        }
    }
}

impl FromStr for MessageKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FRIEND_MESSAGE" => Ok(MessageKind::FriendMessage),
            "GROUP_MESSAGE" => Ok(MessageKind::GroupMessage),
            other => Err(ParseError::MessageType(other.to_string())),
        }
    }
}

/// Destination of an outgoing message, rendered as `<platform>:<kind>:<target>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId {
    pub platform: String,
    pub kind: MessageKind,
    pub target: String,
}

impl SessionId {
    pub fn new(platform: impl Into<String>, kind: MessageKind, target: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            kind,
            target: target.into(),
        }
    }

    pub fn private(platform: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::new(platform, MessageKind::FriendMessage, user_id)
    }

    pub fn group(platform: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self::new(platform, MessageKind::GroupMessage, group_id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.platform, self.kind.as_str(), self.target)
    }
}

impl FromStr for SessionId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(platform), Some(kind), Some(target)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::SessionId(s.to_string()));
        };

        if platform.is_empty() || target.is_empty() {
            return Err(ParseError::SessionId(s.to_string()));
        }

        Ok(Self::new(platform, kind.parse()?, target))
    }
}

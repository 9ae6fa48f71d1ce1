//! OneBot v11 adapter
//!
//! Delivery goes through the implementation's HTTP API (`send_private_msg`,
//! `send_group_msg`). Events are read as OneBot JSON event lines, e.g. piped in
//! from a forward websocket bridge.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::application::errors::{BotError, ParseError};
use crate::application::messaging::MessageParser;
use crate::domain::entities::{InboundEvent, MessageKind, SessionId, User};
use crate::domain::traits::{Bot, BotInfo, EventSource};
use crate::infrastructure::config::OneBotConfig;

/// OneBot event envelope; only message events are modelled
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Event {
    pub post_type: String,
    pub message_type: Option<String>,
    pub group_id: Option<i64>,
    pub user_id: Option<i64>,
    pub raw_message: Option<String>,
    pub sender: Option<Sender>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Sender {
    pub user_id: Option<i64>,
    pub nickname: Option<String>,
    pub card: Option<String>,
}

impl Event {
    /// Convert to an [`InboundEvent`]; non-message events yield `Ok(None)`
    pub fn into_inbound(self, parser: &MessageParser) -> Result<Option<InboundEvent>, ParseError> {
        if self.post_type != "message" {
            return Ok(None);
        }

        let user_id = self
            .user_id
            .ok_or_else(|| ParseError::Event("message event without user_id".to_string()))?
            .to_string();
        let text = self.raw_message.unwrap_or_default();

        match self.message_type.as_deref() {
            Some("group") => {
                let group_id = self
                    .group_id
                    .ok_or_else(|| ParseError::Event("group message without group_id".to_string()))?;
                let sender = self.sender.unwrap_or_default();
                let mut user = User::new(user_id);
                if let Some(nickname) = sender.nickname {
                    user = user.with_nickname(nickname);
                }
                if let Some(card) = sender.card {
                    user = user.with_card(card);
                }
                Ok(Some(parser.parse_group(group_id.to_string(), user, text)))
            }
            Some("private") => Ok(parser.parse_private(user_id, &text)),
            other => Err(ParseError::MessageType(other.unwrap_or("<none>").to_string())),
        }
    }
}

/// OneBot HTTP API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    retcode: i64,
    #[serde(default)]
    message: Option<String>,
}

/// OneBot bot adapter
pub struct OneBotAdapter {
    api_base: String,
    access_token: Option<String>,
    client: Client,
    info: BotInfo,
}

impl OneBotAdapter {
    pub fn new(config: &OneBotConfig, platform: impl Into<String>) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            client: Client::new(),
            info: BotInfo {
                id: "onebot".to_string(),
                name: "keyword-monitor".to_string(),
                platform: platform.into(),
            },
        }
    }

    /// Get the API URL for an action
    fn api_url(&self, action: &str) -> String {
        format!("{}/{}", self.api_base, action)
    }

    async fn call(&self, action: &str, body: &serde_json::Value) -> Result<(), BotError> {
        let mut request = self.client.post(self.api_url(action)).json(body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!("{} returned {}", action, response.status())));
        }

        let data: ApiResponse = response
            .json()
            .await
            .map_err(|e| BotError::Network(format!("invalid response: {}", e)))?;

        if data.status == "failed" || data.retcode != 0 {
            return Err(BotError::Rejected(format!(
                "{} retcode {}: {}",
                action,
                data.retcode,
                data.message.unwrap_or_default()
            )));
        }
        Ok(())
    }
}

/// Numeric target id required by the OneBot API
fn numeric_target(destination: &SessionId) -> Result<i64, BotError> {
    destination
        .target
        .parse()
        .map_err(|_| BotError::UnsupportedDestination(destination.to_string()))
}

#[async_trait]
impl Bot for OneBotAdapter {
    async fn send_message(&self, destination: &SessionId, text: &str) -> Result<(), BotError> {
        if destination.platform != self.info.platform {
            return Err(BotError::UnsupportedDestination(destination.to_string()));
        }

        let target = numeric_target(destination)?;
        match destination.kind {
            MessageKind::FriendMessage => {
                self.call(
                    "send_private_msg",
                    &serde_json::json!({ "user_id": target, "message": text, "auto_escape": true }),
                )
                .await
            }
            MessageKind::GroupMessage => {
                self.call(
                    "send_group_msg",
                    &serde_json::json!({ "group_id": target, "message": text, "auto_escape": true }),
                )
                .await
            }
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Reads OneBot event JSON, one object per line
pub struct OneBotEventSource<R> {
    lines: Lines<R>,
    parser: MessageParser,
}

impl OneBotEventSource<BufReader<Stdin>> {
    pub fn stdin(parser: MessageParser) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), parser)
    }
}

impl<R: AsyncBufRead + Unpin + Send> OneBotEventSource<R> {
    pub fn new(reader: R, parser: MessageParser) -> Self {
        Self {
            lines: reader.lines(),
            parser,
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> EventSource for OneBotEventSource<R> {
    async fn next_event(&mut self) -> Option<InboundEvent> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    tracing::error!("Failed to read OneBot events: {}", e);
                    return None;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            let event: Event = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Skipping malformed OneBot event: {}", e);
                    continue;
                }
            };

            match event.into_inbound(&self.parser) {
                Ok(Some(event)) => return Some(event),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping OneBot event: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> MessageParser {
        MessageParser::new("/km_admin", "aiocqhttp")
    }

    #[test]
    fn test_group_event_conversion() {
        let event: Event = serde_json::from_str(
            r#"{"post_type":"message","message_type":"group","group_id":100,"user_id":20001,
                "raw_message":"紧急 情况","sender":{"user_id":20001,"nickname":"alice","card":""}}"#,
        )
        .unwrap();

        match event.into_inbound(&parser()).unwrap() {
            Some(InboundEvent::GroupMessage { group_id, sender, text, .. }) => {
                assert_eq!(group_id, "100");
                assert_eq!(sender.display_name(), "alice");
                assert_eq!(text, "紧急 情况");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_message_events_are_ignored() {
        let event: Event = serde_json::from_str(r#"{"post_type":"meta_event"}"#).unwrap();
        assert_eq!(event.into_inbound(&parser()), Ok(None));
    }

    #[test]
    fn test_numeric_target() {
        assert_eq!(numeric_target(&SessionId::private("aiocqhttp", "123456789")).unwrap(), 123456789);
        assert!(numeric_target(&SessionId::private("aiocqhttp", "admin")).is_err());
    }

    #[tokio::test]
    async fn test_event_source_skips_garbage() {
        let input: &[u8] = b"not json\n{\"post_type\":\"notice\"}\n\
            {\"post_type\":\"message\",\"message_type\":\"private\",\"user_id\":123456789,\"raw_message\":\"/km_admin list_keys\"}\n";
        let mut source = OneBotEventSource::new(input, parser());

        let event = source.next_event().await.unwrap();
        assert!(event.is_command());
        assert!(source.next_event().await.is_none());
    }
}

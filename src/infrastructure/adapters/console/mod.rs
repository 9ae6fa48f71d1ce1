//! Console adapter for development/testing
//!
//! Outgoing messages are printed; incoming events are read one per line:
//!
//! ```text
//! group <group_id> <sender_id> <nickname> <text...>
//! private <sender_id> <text...>
//! ```

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use crate::application::errors::{BotError, ParseError};
use crate::application::messaging::MessageParser;
use crate::domain::entities::{InboundEvent, SessionId, User};
use crate::domain::traits::{Bot, BotInfo, EventSource};

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    sender: Option<mpsc::Sender<(SessionId, String)>>,
}

impl ConsoleAdapter {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "keyword-monitor".to_string(),
                platform: platform.into(),
            },
            sender: None,
        }
    }

    /// Also forward every outgoing message to `sender`
    pub fn with_sender(mut self, sender: mpsc::Sender<(SessionId, String)>) -> Self {
        self.sender = Some(sender);
        self
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, destination: &SessionId, text: &str) -> Result<(), BotError> {
        println!("[BOT -> {}] {}", destination, text);
        if let Some(sender) = &self.sender {
            sender
                .send((destination.clone(), text.to_string()))
                .await
                .map_err(|e| BotError::Network(format!("console receiver dropped: {}", e)))?;
        }
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Reads events from line-oriented text input
pub struct ConsoleEventSource<R> {
    lines: Lines<R>,
    parser: MessageParser,
}

impl ConsoleEventSource<BufReader<Stdin>> {
    pub fn stdin(parser: MessageParser) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), parser)
    }
}

impl<R: AsyncBufRead + Unpin + Send> ConsoleEventSource<R> {
    pub fn new(reader: R, parser: MessageParser) -> Self {
        Self {
            lines: reader.lines(),
            parser,
        }
    }

    fn parse_line(&self, line: &str) -> Result<Option<InboundEvent>, ParseError> {
        let malformed = || ParseError::Event(line.to_string());
        let (kind, rest) = line.split_once(' ').ok_or_else(malformed)?;

        match kind {
            "group" => {
                let mut parts = rest.splitn(4, ' ');
                let (Some(group_id), Some(sender_id), Some(nickname), Some(text)) =
                    (parts.next(), parts.next(), parts.next(), parts.next())
                else {
                    return Err(malformed());
                };
                let sender = User::new(sender_id).with_nickname(nickname);
                Ok(Some(self.parser.parse_group(group_id, sender, text)))
            }
            "private" => {
                let (sender_id, text) = rest.split_once(' ').unwrap_or((rest, ""));
                Ok(self.parser.parse_private(sender_id, text))
            }
            _ => Err(malformed()),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> EventSource for ConsoleEventSource<R> {
    async fn next_event(&mut self) -> Option<InboundEvent> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    tracing::error!("Failed to read console input: {}", e);
                    return None;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.parse_line(line) {
                Ok(Some(event)) => return Some(event),
                Ok(None) => tracing::debug!("Ignoring private message without command"),
                Err(e) => tracing::warn!("{}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(input: &'static str) -> ConsoleEventSource<&'static [u8]> {
        ConsoleEventSource::new(input.as_bytes(), MessageParser::new("/km_admin", "aiocqhttp"))
    }

    #[tokio::test]
    async fn test_reads_group_and_private_lines() {
        let mut source = source(
            "group 100 20001 alice this is urgent\n\
             \n\
             bogus line\n\
             private 20001 just chatting\n\
             private 123456789 /km_admin list_keys\n",
        );

        let first = source.next_event().await.unwrap();
        match first {
            InboundEvent::GroupMessage { group_id, sender, text, .. } => {
                assert_eq!(group_id, "100");
                assert_eq!(sender.display_name(), "alice");
                assert_eq!(text, "this is urgent");
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let second = source.next_event().await.unwrap();
        assert!(second.is_command());
        assert_eq!(second.sender_id(), "123456789");

        assert!(source.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_forwards_outgoing_messages() {
        let (tx, mut rx) = mpsc::channel(4);
        let bot = ConsoleAdapter::new("aiocqhttp").with_sender(tx);
        let dest = SessionId::private("aiocqhttp", "123456789");

        bot.send_message(&dest, "hi").await.unwrap();
        assert_eq!(rx.recv().await, Some((dest, "hi".to_string())));
    }
}

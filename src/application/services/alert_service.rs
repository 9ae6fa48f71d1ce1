//! Alert dispatcher - sends keyword alerts to the admin's private chat

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::errors::DeliveryError;
use crate::domain::entities::{AdminIdentity, SessionId, User};
use crate::domain::traits::Bot;

/// Characters of the original message quoted in an alert
pub const PREVIEW_CHARS: usize = 50;
const TRUNCATION_MARKER: &str = "...";

/// Everything an alert reports about the triggering message
#[derive(Debug, Clone)]
pub struct AlertTrigger {
    pub keyword: String,
    pub group_id: String,
    pub sender: User,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

/// First [`PREVIEW_CHARS`] characters, marked only when something was cut off
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let mut head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        head.push_str(TRUNCATION_MARKER);
    }
    head
}

pub fn format_alert(trigger: &AlertTrigger) -> String {
    format!(
        "⚠️ Keyword alert ⚠️\n\
         Keyword: {}\n\
         Group: {}\n\
         Sender: {}({})\n\
         Message: {}",
        trigger.keyword,
        trigger.group_id,
        trigger.sender.display_name(),
        trigger.sender.id,
        preview(&trigger.text),
    )
}

/// Delivers alerts through the host's [`Bot`]
pub struct AlertDispatcher {
    bot: Arc<dyn Bot>,
    platform: String,
}

impl AlertDispatcher {
    pub fn new(bot: Arc<dyn Bot>, platform: impl Into<String>) -> Self {
        Self {
            bot,
            platform: platform.into(),
        }
    }

    pub fn destination(&self, admin: &AdminIdentity) -> Result<SessionId, DeliveryError> {
        if !admin.is_set() {
            return Err(DeliveryError::AdminUnset);
        }
        if !admin.is_well_formed() {
            return Err(DeliveryError::MalformedAdmin(admin.to_string()));
        }
        Ok(SessionId::private(&self.platform, admin.as_str()))
    }

    /// Send one alert. Failures are logged here and returned for the caller's
    /// bookkeeping; nothing is retried.
    pub async fn dispatch(&self, admin: &AdminIdentity, trigger: &AlertTrigger) -> Result<(), DeliveryError> {
        let destination = match self.destination(admin) {
            Ok(destination) => destination,
            Err(e) => {
                tracing::error!("Not sending alert for keyword '{}': {}", trigger.keyword, e);
                return Err(e);
            }
        };

        let text = format_alert(trigger);
        match self.bot.send_message(&destination, &text).await {
            Ok(()) => {
                tracing::info!("Alert sent to admin {}", admin);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to send alert to {}: {}", destination, e);
                Err(DeliveryError::Send(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::BotError;
    use crate::domain::traits::BotInfo;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingBot {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn send_message(&self, destination: &SessionId, text: &str) -> Result<(), BotError> {
            if self.fail {
                return Err(BotError::Network("unreachable".to_string()));
            }
            self.sent.lock().unwrap().push((destination.to_string(), text.to_string()));
            Ok(())
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo {
                id: "test".to_string(),
                name: "test".to_string(),
                platform: "aiocqhttp".to_string(),
            }
        }
    }

    fn trigger(text: &str) -> AlertTrigger {
        AlertTrigger {
            keyword: "urgent".to_string(),
            group_id: "100".to_string(),
            sender: User::new("20001").with_nickname("alice"),
            text: text.to_string(),
            received_at: Utc::now(),
        }
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "a".repeat(80);
        assert_eq!(preview(&text), format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_preview_keeps_short_text() {
        let text = "b".repeat(50);
        assert_eq!(preview(&text), text);
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        let text = "紧".repeat(51);
        let out = preview(&text);
        assert_eq!(out.chars().filter(|c| *c == '紧').count(), 50);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_format_alert_fields() {
        let alert = format_alert(&trigger("this is urgent"));
        assert!(alert.contains("Keyword: urgent"));
        assert!(alert.contains("Group: 100"));
        assert!(alert.contains("Sender: alice(20001)"));
        assert!(alert.ends_with("Message: this is urgent"));
    }

    #[tokio::test]
    async fn test_dispatch_to_private_session() {
        let bot = Arc::new(RecordingBot::default());
        let dispatcher = AlertDispatcher::new(bot.clone(), "aiocqhttp");

        dispatcher
            .dispatch(&AdminIdentity::new("123456789"), &trigger("urgent"))
            .await
            .unwrap();

        let sent = bot.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "aiocqhttp:FRIEND_MESSAGE:123456789");
    }

    #[tokio::test]
    async fn test_dispatch_fails_fast_on_bad_admin() {
        let bot = Arc::new(RecordingBot::default());
        let dispatcher = AlertDispatcher::new(bot.clone(), "aiocqhttp");

        let unset = dispatcher.dispatch(&AdminIdentity::default(), &trigger("urgent")).await;
        assert!(matches!(unset, Err(DeliveryError::AdminUnset)));

        let malformed = dispatcher.dispatch(&AdminIdentity::new("admin"), &trigger("urgent")).await;
        assert!(matches!(malformed, Err(DeliveryError::MalformedAdmin(_))));

        assert!(bot.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_reports_send_failure() {
        let bot = Arc::new(RecordingBot {
            fail: true,
            ..Default::default()
        });
        let dispatcher = AlertDispatcher::new(bot, "aiocqhttp");

        let result = dispatcher.dispatch(&AdminIdentity::new("123456789"), &trigger("urgent")).await;
        assert!(matches!(result, Err(DeliveryError::Send(_))));
    }
}

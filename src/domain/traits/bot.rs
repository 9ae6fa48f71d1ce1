use async_trait::async_trait;
use crate::domain::entities::SessionId;
use crate::application::errors::BotError;

/// Bot trait - abstraction for the host's message delivery
#[async_trait]
pub trait Bot: Send + Sync {
    /// Deliver a plain-text message to a session
    async fn send_message(&self, destination: &SessionId, text: &str) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub platform: String,
}

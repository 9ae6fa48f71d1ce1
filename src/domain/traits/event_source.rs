use async_trait::async_trait;
use crate::domain::entities::InboundEvent;

/// Stream of events delivered by the host, one at a time
#[async_trait]
pub trait EventSource: Send {
    /// `None` once the source is exhausted
    async fn next_event(&mut self) -> Option<InboundEvent>;
}

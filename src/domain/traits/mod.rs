//! Domain traits - Abstractions for infrastructure implementations

pub mod auth;
pub mod bot;
pub mod event_source;
pub mod store;

pub use auth::{AdminIdentityCheck, Authorizer};
pub use bot::{Bot, BotInfo};
pub use event_source::EventSource;
pub use store::ConfigStore;

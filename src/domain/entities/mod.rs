//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod session;
pub mod message;
pub mod monitor;
pub mod command;

pub use user::User;
pub use session::{MessageKind, SessionId};
pub use message::InboundEvent;
pub use monitor::{AdminIdentity, KeywordSet, MonitorState, WhitelistSet, WHITELIST_ALL};
pub use command::{AdminCommand, Command, CommandRegistry, Verb};

//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (User, InboundEvent, MonitorState, AdminCommand)
//! - Traits: Abstractions for infrastructure (Bot, ConfigStore, EventSource, Authorizer)

pub mod entities;
pub mod traits;

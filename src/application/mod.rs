//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: whitelist gate, keyword scanner, alert dispatch, admin commands
//! - Errors: Domain-specific errors
//! - Messaging: Raw input parsing

pub mod errors;
pub mod services;
pub mod messaging;

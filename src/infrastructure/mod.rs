//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Monitor state persistence
//! - Adapters: Platform integrations (console, OneBot)

pub mod config;
pub mod storage;
pub mod adapters;

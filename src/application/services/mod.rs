//! Application services - Business logic orchestration

pub mod alert_service;
pub mod command_service;
pub mod keyword_scanner;
pub mod monitor_service;
pub mod whitelist_gate;

pub use alert_service::{AlertDispatcher, AlertTrigger};
pub use command_service::CommandService;
pub use monitor_service::{AlertOutcome, MonitorService};

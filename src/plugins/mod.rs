//! Plugin system for keyword-monitor
//! 
//! Plugins receive every inbound event and may answer it

pub mod keyword_monitor;
pub mod manager;
pub mod trait_def;

pub use keyword_monitor::KeywordMonitorPlugin;
pub use manager::PluginManager;
pub use trait_def::Plugin;

//! Keyword monitor: watches whitelisted group chats for keywords and alerts a
//! single admin by private message. The admin manages keywords, the group
//! whitelist and the admin id through one prefixed command.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod plugins;

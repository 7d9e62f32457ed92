pub mod chat;
pub mod commands;
pub mod config;
pub mod definitions;
pub mod dispatch;
pub mod format;
pub mod rounds;
pub mod sessions;

//! REST adapter for the platform API

pub mod client;
pub mod env;
pub mod logs;
pub mod port;
pub mod processes;
pub mod projects;
pub mod search;
pub mod services;

//! Platform domain values

pub mod activity;
pub mod env;
pub mod import;
pub mod logs;
pub mod process;
pub mod project;
pub mod service;

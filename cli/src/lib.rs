//! zaia
//!
//! Command-line front end for a Zerops project. Every invocation prints exactly one JSON
//! envelope on stdout and exits with a code derived from the error taxonomy.

pub mod app;
pub mod authn;
pub mod cli;
pub mod commands;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod output;
pub mod platform;
pub mod process;
pub mod services;
pub mod storage;
pub mod timeline;
pub mod utils;

//! Identity: resolving stored credentials and logging in

pub mod login;
pub mod resolver;

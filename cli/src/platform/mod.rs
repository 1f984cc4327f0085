//! Boundary to the cloud platform

pub mod classify;
pub mod memory;
pub mod port;

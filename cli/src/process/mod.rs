//! Process status normalization and idempotent outcomes

pub mod idempotency;
pub mod lifecycle;

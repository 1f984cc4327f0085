//! Process status vocabulary

pub const PENDING: &str = "PENDING";
pub const RUNNING: &str = "RUNNING";
pub const FINISHED: &str = "FINISHED";
pub const FAILED: &str = "FAILED";
pub const CANCELED: &str = "CANCELED";

/// Translate a platform-native status into the public vocabulary.
///
/// Only `DONE` and `CANCELLED` are renamed; anything else passes through unchanged so new
/// platform statuses never break callers.
pub fn map_status(native: &str) -> String {
    match native {
        "DONE" => FINISHED.to_string(),
        "CANCELLED" => CANCELED.to_string(),
        other => other.to_string(),
    }
}

/// Whether a public status admits no further transition
pub fn is_terminal(public: &str) -> bool {
    matches!(public, FINISHED | FAILED | CANCELED)
}

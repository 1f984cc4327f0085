//! Absorbing "already in that state" failures of toggle operations

use crate::errors::CliError;

/// Desired state of a toggled feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Enable,
    Disable,
}

impl Toggle {
    /// Verb used in responses
    pub fn action(&self) -> &'static str {
        match self {
            Toggle::Enable => "enable",
            Toggle::Disable => "disable",
        }
    }

    /// Status reported when the feature was already in the desired state
    pub fn already_status(&self) -> &'static str {
        match self {
            Toggle::Enable => "already_enabled",
            Toggle::Disable => "already_disabled",
        }
    }

    fn spellings(&self) -> [&'static str; 2] {
        match self {
            Toggle::Enable => ["alreadyenabled", "already enabled"],
            Toggle::Disable => ["alreadydisabled", "already disabled"],
        }
    }
}

/// Whether a failed toggle means the feature was already in the desired state.
///
/// Matches case-insensitively on the platform error code (`SubdomainAccessAlreadyEnabled`,
/// `subdomainAccessAlreadyEnabled`) and on the message text (`already enabled`).
pub fn is_already_in_state(err: &CliError, toggle: Toggle) -> bool {
    let haystacks = [Some(err.message.as_str()), err.platform_code.as_deref()];
    haystacks.into_iter().flatten().any(|text| {
        let text = text.to_lowercase();
        toggle.spellings().iter().any(|needle| text.contains(needle))
    })
}

use crate::output::envelope::Envelope;
use crate::utils::version_info;

/// Build information; needs no credentials
pub fn version() -> Envelope {
    Envelope::sync(version_info())
}

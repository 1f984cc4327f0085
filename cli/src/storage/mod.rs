pub mod credentials;
pub mod layout;

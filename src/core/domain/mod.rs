//! Domain types.

mod credentials;
mod record;

pub use credentials::Credentials;
pub use record::{Attribute, Record, SecretAttribute};

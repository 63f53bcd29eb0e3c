//! Credentials type.
//!
//! A secret and its NT hash as handed back to callers after issuance.

use zeroize::Zeroizing;

/// An issued secret/hash pair.
///
/// The secret is absent when the caller supplied only a precomputed hash.
/// It is wiped from memory on drop.
#[derive(Clone)]
pub struct Credentials {
    secret: Option<Zeroizing<String>>,
    hash: String,
}

impl Credentials {
    /// Pair a cleartext secret with its hash
    pub fn new(secret: String, hash: String) -> Self {
        Self {
            secret: Some(Zeroizing::new(secret)),
            hash,
        }
    }

    /// Credentials for an imported hash with no known secret
    pub fn hash_only(hash: String) -> Self {
        Self { secret: None, hash }
    }

    /// Cleartext secret, if known
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().map(String::as_str)
    }

    /// Upper-case hex hash written to the file
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("hash", &self.hash)
            .finish()
    }
}

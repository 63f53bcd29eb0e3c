//! Credential generation.
//!
//! Random secrets are drawn from `OsRng`. The stored form is the NT hash:
//! MD4 over the UTF-16LE encoding of the secret, as upper-case hex. MD4 is
//! what MSCHAPv2 peers expect, not a choice made for strength.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{HASH_MASK_KEEP, MIN_SECRET_LENGTH, SECRET_MASK_KEEP};
use crate::core::domain::Credentials;
use crate::core::mask::mask_secret;
use crate::error::{CredentialError, Result};

/// Symbols a generated secret may contain.
pub const SYMBOLS: &str = "!@#$%^&*";

/// Characters never emitted because they are easily misread.
pub const AMBIGUOUS: &str = "0O1lI";

/// Source of issued credentials.
///
/// The record store only needs a way to mint a fresh secret/hash pair and a
/// way to hash a caller-chosen secret.
pub trait CredentialSource: Send + Sync {
    /// Check that hashing is possible at all.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::HashBackendUnavailable` if no digest
    /// implementation is compiled in.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Generate a random secret of `length` characters and its hash.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if `length` is too short or hashing fails.
    fn generate(&self, length: usize) -> Result<Credentials>;

    /// Hash a caller-supplied secret.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if hashing fails.
    fn derive(&self, secret: &str) -> Result<Credentials>;
}

/// NT-Password credentials backed by [`generate_secret`] and [`derive_hash`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NtCredentials {
    reveal_secrets: bool,
}

impl NtCredentials {
    /// Create a source; `reveal_secrets` unmasks values in debug logs.
    pub fn new(reveal_secrets: bool) -> Self {
        Self { reveal_secrets }
    }
}

impl CredentialSource for NtCredentials {
    fn ensure_available(&self) -> Result<()> {
        if hash_backend_available() {
            Ok(())
        } else {
            Err(CredentialError::HashBackendUnavailable.into())
        }
    }

    fn generate(&self, length: usize) -> Result<Credentials> {
        let secret = generate_secret(length)?;
        let hash = derive_hash(&secret)?;
        debug!(
            secret = %mask_secret(&secret, SECRET_MASK_KEEP, self.reveal_secrets),
            hash = %mask_secret(&hash, HASH_MASK_KEEP, self.reveal_secrets),
            "credentials generated"
        );
        Ok(Credentials::new(secret.to_string(), hash))
    }

    fn derive(&self, secret: &str) -> Result<Credentials> {
        let hash = derive_hash(secret)?;
        debug!(
            hash = %mask_secret(&hash, HASH_MASK_KEEP, self.reveal_secrets),
            "hash derived"
        );
        Ok(Credentials::new(secret.to_string(), hash))
    }
}

/// Generate a random secret of exactly `length` characters.
///
/// The result holds at least one lowercase letter, one uppercase letter,
/// one digit, and one of [`SYMBOLS`], never contains a character from
/// [`AMBIGUOUS`], and is shuffled so class positions are unpredictable.
///
/// # Errors
///
/// Returns `CredentialError::SecretTooShort` if `length` is below 4.
pub fn generate_secret(length: usize) -> Result<Zeroizing<String>> {
    if length < MIN_SECRET_LENGTH {
        return Err(CredentialError::SecretTooShort {
            length,
            minimum: MIN_SECRET_LENGTH,
        }
        .into());
    }

    let lower = pool('a'..='z');
    let upper = pool('A'..='Z');
    let digits = pool('0'..='9');
    let symbols = pool(SYMBOLS.chars());
    let charset: Vec<char> = [&lower, &upper, &digits, &symbols]
        .into_iter()
        .flatten()
        .copied()
        .collect();

    let mut rng = OsRng;
    let mut chars: Zeroizing<Vec<char>> = Zeroizing::new(Vec::with_capacity(length));
    for class in [&lower, &upper, &digits, &symbols] {
        chars.push(pick(class, &mut rng));
    }
    for _ in MIN_SECRET_LENGTH..length {
        chars.push(pick(&charset, &mut rng));
    }
    chars.shuffle(&mut rng);

    Ok(Zeroizing::new(chars.iter().collect()))
}

/// Compute the NT hash of `secret` as upper-case hex.
///
/// # Errors
///
/// Returns `CredentialError::HashBackendUnavailable` when built without the
/// `nt-hash` feature.
#[cfg(feature = "nt-hash")]
pub fn derive_hash(secret: &str) -> Result<String> {
    use md4::{Digest, Md4};

    let utf16le: Zeroizing<Vec<u8>> =
        Zeroizing::new(secret.encode_utf16().flat_map(u16::to_le_bytes).collect());
    let digest = Md4::digest(utf16le.as_slice());

    Ok(digest.iter().map(|b| format!("{:02X}", b)).collect())
}

/// Compute the NT hash of `secret` as upper-case hex.
///
/// # Errors
///
/// Always returns `CredentialError::HashBackendUnavailable`: this build has
/// no MD4 implementation.
#[cfg(not(feature = "nt-hash"))]
pub fn derive_hash(_secret: &str) -> Result<String> {
    Err(CredentialError::HashBackendUnavailable.into())
}

/// Whether [`derive_hash`] can succeed in this build.
pub fn hash_backend_available() -> bool {
    cfg!(feature = "nt-hash")
}

/// Generate a secret of `length` characters together with its NT hash.
///
/// # Errors
///
/// See [`generate_secret`] and [`derive_hash`].
pub fn generate_user_credentials(length: usize) -> Result<Credentials> {
    NtCredentials::default().generate(length)
}

fn pool(chars: impl IntoIterator<Item = char>) -> Vec<char> {
    chars.into_iter().filter(|c| !AMBIGUOUS.contains(*c)).collect()
}

fn pick(pool: &[char], rng: &mut impl Rng) -> char {
    pool[rng.gen_range(0..pool.len())]
}

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;
use std::fmt;

/// Random bytes behind a participant auth token
pub const AUTH_TOKEN_BYTES: usize = 18;
/// Random bytes behind a round ticket
pub const ROUND_TICKET_BYTES: usize = 16;
/// Random bytes behind a watch token
pub const WATCH_TOKEN_BYTES: usize = 12;
/// Length of the symmetric key issued per membership (AES-256)
pub const AES_KEY_BYTES: usize = 32;

/// Source of cryptographically secure random bytes.
pub trait SecretSource: fmt::Debug + Send + Sync {
    /// Fill `buf` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the entropy source is unavailable.
    fn fill(&self, buf: &mut [u8]) -> Result<(), rand::Error>;
}

/// Operating system entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecretSource;

impl SecretSource for OsSecretSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(buf)
    }
}

/// Generate a URL-safe text token from `len` random bytes.
///
/// # Errors
///
/// Propagates failures from the secret source.
pub fn generate_token(source: &dyn SecretSource, len: usize) -> Result<String, rand::Error> {
    let mut buf = vec![0u8; len];
    source.fill(&mut buf)?;
    Ok(URL_SAFE_NO_PAD.encode(buf))
}

/// Generate a raw symmetric key of [`AES_KEY_BYTES`] bytes.
///
/// # Errors
///
/// Propagates failures from the secret source.
pub fn generate_key(source: &dyn SecretSource) -> Result<Vec<u8>, rand::Error> {
    let mut key = vec![0u8; AES_KEY_BYTES];
    source.fill(&mut key)?;
    Ok(key)
}

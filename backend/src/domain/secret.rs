//! Random identifier and bearer secret generation.
//!
//! Identifiers carry 128 bits and secrets 64 bits drawn from the operating
//! system CSPRNG, rendered as lowercase hex.

use rand::RngCore;
use rand::rngs::OsRng;

/// Bytes of entropy in a user or complaint identifier.
pub const IDENTIFIER_BYTES: usize = 16;
/// Bytes of entropy in a user secret.
pub const SECRET_BYTES: usize = 8;

/// The operating system refused to supply random bytes.
#[derive(Debug, thiserror::Error)]
#[error("random source unavailable: {0}")]
pub struct EntropyError(#[from] rand::Error);

/// Draw `N` random bytes and hex encode them.
fn random_hex<const N: usize>() -> Result<String, EntropyError> {
    let mut bytes = [0_u8; N];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(hex::encode(bytes))
}

/// Fresh 32-character identifier.
pub fn random_identifier() -> Result<String, EntropyError> {
    random_hex::<IDENTIFIER_BYTES>()
}

/// Fresh 16-character bearer secret.
pub fn random_secret() -> Result<String, EntropyError> {
    random_hex::<SECRET_BYTES>()
}

//! Short identifier generation.
//!
//! Identifiers are 8 characters drawn uniformly from the base62 alphabet,
//! giving 62^8 (about 2.2 × 10^14) possible values. Uniqueness is enforced
//! by the store; see [`crate::application::services::MappingService`] for
//! the retry loop.

use rand::Rng;

/// Length of every generated short id.
pub const SHORT_ID_LENGTH: usize = 8;

/// Identifier-safe alphabet: ASCII letters and digits.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random short id from the thread-local CSPRNG.
pub fn generate_short_id() -> String {
    generate_short_id_with(&mut rand::rng())
}

/// Generates a short id from the given RNG.
pub fn generate_short_id_with<R: Rng>(rng: &mut R) -> String {
    (0..SHORT_ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `candidate` has the shape of a generated short id.
pub fn is_well_formed_short_id(candidate: &str) -> bool {
    candidate.len() == SHORT_ID_LENGTH && candidate.bytes().all(|b| CHARSET.contains(&b))
}

//! Random identifier generation.
//!
//! # Design Decisions
//! - Uniform sampling over uppercase letters and digits
//! - `generate_id` uses the thread-local generator, safe for concurrent
//!   callers; `generate_id_with` takes an injected generator so tests can
//!   seed one
//! - Not cryptographically secure; identifiers are labels, not secrets

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random identifier of `length` characters.
pub fn generate_id(length: usize) -> String {
    generate_id_with(&mut rand::thread_rng(), length)
}

/// Generate a random identifier using the supplied generator.
pub fn generate_id_with<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

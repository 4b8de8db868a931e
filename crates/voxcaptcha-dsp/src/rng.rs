//! Seeded RNG using PCG32 with BLAKE3 stream derivation.
//!
//! Every stage that draws randomness takes a generic `R: Rng`, so callers may
//! inject any source. The helpers here build the reproducible default: one
//! base seed per request, split into independent per-stage streams.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Derives a seed for a named stage from the base seed.
///
/// Hashes the base seed (little-endian) followed by the UTF-8 key with BLAKE3
/// and keeps the first 8 bytes.
///
/// # Arguments
/// * `base_seed` - The request's base seed
/// * `key` - Stage identifier (e.g. "text", "voice", "noise")
pub fn derive_stage_seed(base_seed: u64, key: &str) -> u64 {
    let mut input = Vec::with_capacity(8 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Creates an RNG for a named stage.
pub fn create_stage_rng(base_seed: u64, key: &str) -> Pcg32 {
    create_rng(derive_stage_seed(base_seed, key))
}

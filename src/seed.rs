// Deterministic per-block seeding
// seed = int(sha256(identifier), big-endian) mod 4294967295
// The identifier is the first ncRNA name of a block, so a block's randomness is
// self-contained and replays identically across runs and platforms.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

pub const SEED_MODULUS: u64 = 4_294_967_295;

pub fn block_seed(identifier: &str) -> u64 {
    let digest = Sha256::digest(identifier.as_bytes());
    // Horner reduction of the 256-bit digest; acc stays below 2^32 so acc * 256 fits
    digest
        .iter()
        .fold(0u64, |acc, &byte| (acc * 256 + u64::from(byte)) % SEED_MODULUS)
}

/// Fresh RNG for one step of a block's processing.
pub fn block_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

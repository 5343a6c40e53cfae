//! Deterministic linear congruential generator.
//!
//! `hash(s) = (a * s + c) mod m` with the classic ANSI C constants. The whole
//! piece sequence of a game is a pure function of the seed it started from.

/// Multiplier
pub const LCG_A: u64 = 1_103_515_245;
/// Increment
pub const LCG_C: u64 = 12_345;
/// Modulus (2^31)
pub const LCG_M: u64 = 1 << 31;

/// Advance the generator one step.
///
/// `m` is a power of two dividing 2^64, so the low 31 bits of the wrapping
/// product are exactly `(a * seed + c) mod m`, even for seeds wider than 31 bits.
pub fn hash(seed: u64) -> u64 {
    seed.wrapping_mul(LCG_A).wrapping_add(LCG_C) & (LCG_M - 1)
}

/// Normalize a hash into `[0, 1)`.
pub fn scale(hash: u64) -> f64 {
    (hash % LCG_M) as f64 / LCG_M as f64
}

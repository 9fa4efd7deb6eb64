//! Deterministic Hashing
//!
//! The 31-multiplier rolling hash and the sine-based metric transform that
//! every stable number in a result is derived from. Both must reproduce
//! 32-bit signed wraparound exactly, otherwise stored scores drift between
//! builds.

/// Rolling `hash * 31 + code_unit` over the UTF-16 code units of `input`,
/// wrapped to `i32`, returned as its absolute value.
pub fn name_hash(input: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Map a seed into `[0, 100]` via `floor(frac(sin(seed) * 10000) * 101)`.
pub fn seeded_percent(seed: u32) -> u8 {
    let x = f64::from(seed).sin() * 10_000.0;
    let frac = x - x.floor();
    let value = (frac * 101.0).floor();
    value.clamp(0.0, 100.0) as u8
}

/// Derive one metric for a pair key and tag.
pub fn seeded_metric(pair_key: &str, tag: &str) -> u8 {
    seeded_percent(name_hash(&format!("{pair_key}|{tag}")))
}

//! Small helpers over the runtime RNG. Map generation does not use these;
//! it derives everything from seed streams so layouts stay reproducible
//! independently of RNG call order.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

pub(crate) fn range(rng: &mut ChaCha8Rng, bound: u32) -> u32 {
    debug_assert!(bound > 0);
    (rng.next_u64() % u64::from(bound)) as u32
}

/// Uniform signed offset in `-radius..=radius`.
pub(crate) fn offset(rng: &mut ChaCha8Rng, radius: u32) -> i32 {
    range(rng, 2 * radius + 1) as i32 - radius as i32
}

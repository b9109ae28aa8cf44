/// Toggles both bit positions of every pair in `pairs`, in order.
///
/// Each pair is two independent XOR toggles, not a swap of the two bit
/// values, so no information moves between positions and the result is the
/// input XOR a fixed mask. Running the same sequence twice restores the
/// input. Not a cryptographic transform.
#[must_use]
pub const fn shuffle_bits(raw: u64, pairs: &[(u32, u32)]) -> u64 {
    let mut out = raw;
    let mut i = 0;
    while i < pairs.len() {
        let (p1, p2) = pairs[i];
        out ^= 1 << p1;
        out ^= 1 << p2;
        i += 1;
    }
    out
}

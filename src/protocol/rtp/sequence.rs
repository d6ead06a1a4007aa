//! 16-bit RTP sequence number arithmetic
//!
//! Sequence numbers wrap at 2^16 and the stream runs indefinitely, so two
//! sequence numbers are only ever compared through their modular difference.

/// Distance from `a` forward to `b`, modulo 2^16
#[must_use]
pub fn seq_diff(a: u16, b: u16) -> u16 {
    b.wrapping_sub(a)
}

/// Whether `a` comes before `b`
///
/// `a` precedes `b` when `b` lies within the half of the sequence space
/// that follows `a`.
#[must_use]
pub fn seq_order(a: u16, b: u16) -> bool {
    #[allow(
        clippy::cast_possible_wrap,
        reason = "signed reinterpretation is the point of the comparison"
    )]
    let delta = seq_diff(a, b) as i16;
    delta > 0
}

/// `a` advanced by `n`, modulo 2^16
#[must_use]
pub fn seq_sum(a: u16, n: u16) -> u16 {
    a.wrapping_add(n)
}

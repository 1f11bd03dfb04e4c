/// `round(100 * part / whole)` clamped to `0..=100`. A `whole` of zero yields 0.
pub fn rounded_percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    // integer form of round-half-up, avoids float rounding at .5 boundaries
    ((part * 200 + whole) / (whole * 2)) as u8
}

/// Position number for the `index`-th entry of a list, saturating at
/// `u32::MAX` instead of wrapping.
pub fn sequence_number(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

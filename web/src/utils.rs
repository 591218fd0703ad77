/// Seed drawn from JavaScript's Math.random, two 32-bit halves at a time
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let half = || (random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

/// Reads a whole number out of an `<input type="number">`, `None` while the field is empty or malformed.
pub(crate) fn parse_number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Render a byte count with binary (1024) scaling: `512 B`, `3.0 KB`, `2.9 GB`.
pub fn human_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / UNIT as f64;
    let mut exp = 0;
    // Scale on the rounded value so 1_048_575 renders as `1.0 MB`, not `1024.0 KB`.
    while (value * 10.0).round() / 10.0 >= UNIT as f64 && exp < 5 {
        value /= UNIT as f64;
        exp += 1;
    }

    let suffix = "KMGTPE".chars().nth(exp).unwrap_or('E');
    format!("{value:.1} {suffix}B")
}

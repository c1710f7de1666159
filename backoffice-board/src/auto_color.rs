//! Deterministic color assignment for columns.
//!
//! A column created without an explicit color gets one picked from a small
//! palette by hashing its lowercased name, so "Done" renders the same on every
//! board.

/// Column header colors (6-char hex without `#`).
const PALETTE: &[&str] = &[
    "5e6c84", // slate
    "0079bf", // blue
    "61bd4f", // green
    "f2d600", // yellow
    "ff9f1a", // orange
    "eb5a46", // red
    "c377e0", // purple
    "00c2e0", // sky
    "51e898", // lime
    "ff78cb", // pink
    "344563", // navy
    "b3bac5", // grey
];

/// Return a deterministic color for a column name.
pub fn auto_color(name: &str) -> &'static str {
    let idx = (fnv1a(name) as usize) % PALETTE.len();
    PALETTE[idx]
}

/// Whether `value` is a 6-digit hex color without a leading `#`.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Accept `#rrggbb` or `rrggbb`, returning the lowercase bare form.
pub fn normalize_color(value: &str) -> Option<String> {
    let bare = value.trim().trim_start_matches('#');
    is_hex_color(bare).then(|| bare.to_ascii_lowercase())
}

/// FNV-1a hash (32-bit)
fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in s.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Color used when a slot has no class name to hash.
pub const FALLBACK_COLOR: &str = "hsl(0, 0%, 80%)";

/// Deterministic display color for a class name.
///
/// Hashes the UTF-16 code units with a wrapping 32-bit `h * 31 + c` roll so the
/// same class always gets the same hue, across sessions and exported backups.
pub fn color_for_class(class_name: &str) -> String {
    if class_name.is_empty() {
        return FALLBACK_COLOR.to_string();
    }

    let hash = class_name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    let hue = i64::from(hash).abs() % 360;

    format!("hsl({hue}, 70%, 60%)")
}

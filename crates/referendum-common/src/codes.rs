//! Identifier normalization for administrative codes.
//!
//! Department codes arrive inconsistently padded across sources (`"1"` in the
//! referendum export, `"01"` in the reference table). Every join on a
//! department code goes through [`pad_department_code`] on both sides.

/// Fixed width of a normalized department code.
pub const DEPARTMENT_CODE_WIDTH: usize = 2;

/// Left-pads `value` with `'0'` up to `width` characters.
///
/// Surrounding whitespace is trimmed first. Values already at or beyond
/// `width` are returned unchanged (after trimming), so overseas codes such as
/// `"971"` and Corsican codes such as `"2A"` keep their form.
///
/// # Examples
///
/// ```
/// use referendum_common::pad_code;
///
/// assert_eq!(pad_code("1", 2), "01");
/// assert_eq!(pad_code(" 7 ", 3), "007");
/// assert_eq!(pad_code("971", 2), "971");
/// ```
pub fn pad_code(value: &str, width: usize) -> String {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len >= width {
        return trimmed.to_string();
    }
    let mut padded = String::with_capacity(width);
    padded.extend(std::iter::repeat_n('0', width - len));
    padded.push_str(trimmed);
    padded
}

/// Normalizes a department code to its width-2 zero-padded form.
///
/// Idempotent: `pad_department_code(&pad_department_code(d)) == pad_department_code(d)`.
pub fn pad_department_code(value: &str) -> String {
    pad_code(value, DEPARTMENT_CODE_WIDTH)
}

//! Display masking for credential values.

/// Character substituted for hidden characters.
pub const MASK_CHAR: char = '*';

/// Number of trailing characters left visible.
pub const VISIBLE_SUFFIX: usize = 3;

/// Mask all but the last [`VISIBLE_SUFFIX`] characters of `value`.
///
/// The result has the same number of characters as the input. Values of
/// [`VISIBLE_SUFFIX`] characters or fewer are masked entirely.
pub fn mask_value(value: &str) -> String {
    let len = value.chars().count();
    if len <= VISIBLE_SUFFIX {
        return MASK_CHAR.to_string().repeat(len);
    }

    let hidden = len - VISIBLE_SUFFIX;
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < hidden { MASK_CHAR } else { c })
        .collect()
}

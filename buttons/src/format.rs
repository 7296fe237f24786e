use crate::{Button, ParseError};

/// `TUXSUXCUX` style rendering.
pub fn format_letters(sequence: &[Button]) -> String {
    sequence.iter().map(|b| b.letter()).collect()
}

/// `TRIANGLE, UP, X` style rendering.
pub fn format_names(sequence: &[Button]) -> String {
    sequence
        .iter()
        .map(|b| b.name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_hex_list(values: impl IntoIterator<Item = u32>) -> String {
    values
        .into_iter()
        .map(|v| format!("0x{v:08x}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a letter sequence such as `tuxsuxcux`. Whitespace is ignored.
pub fn parse_letters(input: &str) -> Result<Vec<Button>, ParseError> {
    let sequence = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Button::from_letter(c).ok_or(ParseError::UnknownButton(c)))
        .collect::<Result<Vec<_>, _>>()?;
    if sequence.is_empty() {
        return Err(ParseError::EmptySequence);
    }
    Ok(sequence)
}

/// Parses a 32-bit hex value, with or without a `0x` prefix.
pub fn parse_hex_u32(input: &str) -> Result<u32, ParseError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u32::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidHex(input.to_string()))
}

use super::ColorError;

const fn hex_digit(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

const fn from_hex_byte(s: &[u8], i: usize) -> u8 {
    (hex_digit(s[i]) << 4) | hex_digit(s[i + 1])
}

const fn prefix_len(bytes: &[u8]) -> usize {
    if !bytes.is_empty() && bytes[0] == b'#' {
        1
    } else if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
        2
    } else {
        0
    }
}

/// Parses `#RRGGBB` or `#AARRGGBB` at compile time. Six digits are opaque.
pub const fn parse_hex_color(s: &str) -> (u8, u8, u8, u8) {
    let bytes = s.as_bytes();
    let i = prefix_len(bytes);

    match bytes.len() - i {
        6 => (
            0xFF,
            from_hex_byte(bytes, i),
            from_hex_byte(bytes, i + 2),
            from_hex_byte(bytes, i + 4),
        ),
        8 => (
            from_hex_byte(bytes, i),
            from_hex_byte(bytes, i + 2),
            from_hex_byte(bytes, i + 4),
            from_hex_byte(bytes, i + 6),
        ),
        _ => panic!("expected 6 or 8 hex digits"),
    }
}

const fn parse_runtime_hex_digit(b: u8, index: usize) -> Result<u8, ColorError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        _ => Err(ColorError::InvalidDigit(index)),
    }
}

fn parse_runtime_hex_byte(bytes: &[u8], index: usize) -> Result<u8, ColorError> {
    let hi = parse_runtime_hex_digit(bytes[index], index)?;
    let lo = parse_runtime_hex_digit(bytes[index + 1], index + 1)?;
    Ok((hi << 4) | lo)
}

pub fn parse_hex_color_runtime(s: &str) -> Result<(u8, u8, u8, u8), ColorError> {
    let bytes = s.trim().as_bytes();
    let offset = prefix_len(bytes);

    match bytes.len().saturating_sub(offset) {
        6 => Ok((
            0xFF,
            parse_runtime_hex_byte(bytes, offset)?,
            parse_runtime_hex_byte(bytes, offset + 2)?,
            parse_runtime_hex_byte(bytes, offset + 4)?,
        )),
        8 => Ok((
            parse_runtime_hex_byte(bytes, offset)?,
            parse_runtime_hex_byte(bytes, offset + 2)?,
            parse_runtime_hex_byte(bytes, offset + 4)?,
            parse_runtime_hex_byte(bytes, offset + 6)?,
        )),
        _ => Err(ColorError::InvalidLength),
    }
}

use crate::{Error, Result};

/// Percent-encodes `src` as a single URI component.
///
/// Every UTF-8 byte is written as `%XX` with upper-case hex digits, except
/// ASCII alphanumerics and `- _ . ! ~ * ' ( )`. Path and query delimiters
/// such as `/`, `?`, `#` and `&` are always escaped.
pub fn encode_uri_component(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for b in src.as_bytes() {
        if is_unescaped_component_byte(*b) {
            out.push(*b as char);
        } else {
            out.push('%');
            out.push(to_hex_upper((*b >> 4) & 0x0F));
            out.push(to_hex_upper(*b & 0x0F));
        }
    }
    out
}

/// Reverses [`encode_uri_component`]. Every `%XX` sequence is decoded, and
/// escapes must form valid UTF-8.
pub fn decode_uri_component(src: &str) -> Result<String> {
    let bytes = src.as_bytes();
    let mut out = String::with_capacity(src.len());
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            let ch = src[i..]
                .chars()
                .next()
                .ok_or_else(|| malformed(src))?;
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }

        let first = parse_percent_byte(src, i)?;
        if first < 0x80 {
            out.push(first as char);
            i += 3;
            continue;
        }

        let len = utf8_sequence_len(first).ok_or_else(|| malformed(src))?;
        let mut raw_end = i + 3;
        let mut chunk = Vec::with_capacity(len);
        chunk.push(first);
        for _ in 1..len {
            chunk.push(parse_percent_byte(src, raw_end)?);
            raw_end += 3;
        }
        let decoded = std::str::from_utf8(&chunk).map_err(|_| malformed(src))?;
        out.push_str(decoded);
        i = raw_end;
    }

    Ok(out)
}

fn malformed(src: &str) -> Error {
    Error::MalformedUri(src.to_string())
}

fn parse_percent_byte(src: &str, offset: usize) -> Result<u8> {
    let bytes = src.as_bytes();
    if offset + 2 >= bytes.len() || bytes[offset] != b'%' {
        return Err(malformed(src));
    }
    let hi = from_hex_digit(bytes[offset + 1]).ok_or_else(|| malformed(src))?;
    let lo = from_hex_digit(bytes[offset + 2]).ok_or_else(|| malformed(src))?;
    Ok((hi << 4) | lo)
}

fn is_unescaped_component_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')'
        )
}

fn utf8_sequence_len(first: u8) -> Option<usize> {
    match first {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn from_hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn to_hex_upper(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        10..=15 => (b'A' + (nibble - 10)) as char,
        _ => '?',
    }
}

//! Conversions between legacy fixed-width encodings and UTF-8.
//!
//! Header strings in ROM formats are stored as fixed-width fields padded
//! with NULs or spaces. Every decoder here stops at the first NUL; trailing
//! space padding is left for the caller to trim.

use encoding_rs::{EncoderResult, Encoding, SHIFT_JIS, WINDOWS_1252};

/// Slice `buf` up to (not including) the first NUL byte.
fn until_nul(buf: &[u8]) -> &[u8] {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    &buf[..end]
}

/// Decode Windows-1252.
pub fn cp1252_to_utf8(buf: &[u8]) -> String {
    let (cow, _) = WINDOWS_1252.decode_without_bom_handling(until_nul(buf));
    cow.into_owned()
}

/// Decode ISO-8859-1, mapping each byte to the code point of the same value.
///
/// Distinct from cp1252 in the 0x80-0x9F range.
pub fn latin1_to_utf8(buf: &[u8]) -> String {
    until_nul(buf).iter().map(|&b| b as char).collect()
}

/// Decode Shift-JIS. Returns `None` if the bytes are not valid Shift-JIS.
pub fn sjis_to_utf8(buf: &[u8]) -> Option<String> {
    SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(until_nul(buf))
        .map(|cow| cow.into_owned())
}

/// Decode text that may be either Shift-JIS or cp1252.
///
/// Pure ASCII is decoded as cp1252. Otherwise Shift-JIS is tried first,
/// falling back to cp1252 when the bytes are not valid Shift-JIS.
pub fn cp1252_sjis_to_utf8(buf: &[u8]) -> String {
    let bytes = until_nul(buf);
    if bytes.is_ascii() {
        return cp1252_to_utf8(bytes);
    }
    sjis_to_utf8(bytes).unwrap_or_else(|| cp1252_to_utf8(bytes))
}

fn utf16_to_utf8(units: impl Iterator<Item = u16>) -> String {
    char::decode_utf16(units.take_while(|&u| u != 0))
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Decode little-endian UTF-16. A trailing odd byte is ignored.
pub fn utf16le_to_utf8(buf: &[u8]) -> String {
    utf16_to_utf8(
        buf.chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
    )
}

/// Decode big-endian UTF-16. A trailing odd byte is ignored.
pub fn utf16be_to_utf8(buf: &[u8]) -> String {
    utf16_to_utf8(
        buf.chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]])),
    )
}

/// Encode to little-endian UTF-16 (no BOM, no terminator).
pub fn utf8_to_utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// Encode with `?` substituted for unmappable characters.
fn encode_lossy(encoding: &'static Encoding, s: &str) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(s.len() + 16);
    let mut src = s;
    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(src.len())
            .unwrap_or(src.len() * 4 + 16);
        out.reserve(needed);
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(src, &mut out, true);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }
    out
}

/// Encode to Windows-1252; unmappable characters become `?`.
pub fn utf8_to_cp1252(s: &str) -> Vec<u8> {
    encode_lossy(WINDOWS_1252, s)
}

/// Encode to Shift-JIS; unmappable characters become `?`.
pub fn utf8_to_sjis(s: &str) -> Vec<u8> {
    encode_lossy(SHIFT_JIS, s)
}

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod tests;

//! Bounds-checked little-endian integer reads shared by the cfb and doc layers.

/// Reads a little-endian `u16` at `offset`. Returns `None` if out of bounds.
pub fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    data.get(offset..offset + 2)
        .map(|s| u16::from_le_bytes([s[0], s[1]]))
}

/// Reads a little-endian `u32` at `offset`. Returns `None` if out of bounds.
pub fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    data.get(offset..offset + 4)
        .map(|s| u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
}

/// Reads a little-endian `u64` at `offset`. Returns `None` if out of bounds.
pub fn read_u64_le(data: &[u8], offset: usize) -> Option<u64> {
    data.get(offset..offset + 8)
        .map(|s| u64::from_le_bytes(s.try_into().unwrap()))
}

/// Decodes a UTF-16LE byte slice, stripping a single trailing NUL pair if present.
pub fn decode_utf16le_trim(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    let trimmed = match units.last() {
        Some(0) => &units[..units.len() - 1],
        _ => &units[..],
    };
    String::from_utf16_lossy(trimmed)
}

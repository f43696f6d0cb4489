//! Text assembly: slice each piece out of `WordDocument`, decode per its
//! encoding, concatenate, and normalize control characters.

use super::piece_table::{Encoding, PieceSegment};

/// Decodes and concatenates every segment's text, then normalizes it.
pub fn assemble(word_document: &[u8], segments: &[PieceSegment]) -> String {
    let mut out = String::new();
    for seg in segments {
        let start = seg.file_offset as usize;
        let end = start.saturating_add(seg.byte_length as usize);
        let end = end.min(word_document.len());
        let slice = if start < word_document.len() {
            &word_document[start..end]
        } else {
            &[]
        };
        out.push_str(&decode_segment(slice, seg.encoding));
    }
    normalize(&out)
}

/// The five byte values the Windows-1252 *codepage* (as opposed to the
/// WHATWG `windows-1252` encoding `encoding_rs` implements) leaves undefined.
/// `encoding_rs::WINDOWS_1252` is a total mapping that assigns these to C1
/// control code points, which would silently retain bytes that the codepage
/// itself cannot decode. Stripped before decoding so they are dropped, not
/// substituted.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Decodes raw bytes under the segment's encoding. Unmappable/invalid
/// sequences are dropped, not replaced: undefined CP1252 bytes are stripped
/// before decoding (see `CP1252_UNDEFINED`); UTF-16LE drops any code unit
/// that does not form a valid scalar value (lone surrogates, truncated
/// pairs) instead of substituting a replacement character, since
/// `encoding_rs`'s own UTF-16 decoder only offers lossy substitution.
fn decode_segment(bytes: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Cp1252 => {
            let filtered: Vec<u8> = bytes
                .iter()
                .copied()
                .filter(|b| !CP1252_UNDEFINED.contains(b))
                .collect();
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&filtered);
            text.into_owned()
        }
        Encoding::Utf16Le => {
            let units = bytes
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]));
            char::decode_utf16(units).filter_map(Result::ok).collect()
        }
    }
}

/// Applies the required control-character normalization, in order:
/// CR/LF and lone CR become LF, form feed becomes LF, cell mark becomes tab,
/// and field delimiters are removed. Order matters: CR/LF collapsing must
/// precede the rest so a literal `\r\n` never becomes two newlines.
pub fn normalize(text: &str) -> String {
    let step1 = text.replace("\r\n", "\n").replace('\r', "\n");
    let step2 = step1.replace('\x0C', "\n").replace('\x07', "\t");
    step2
        .chars()
        .filter(|&c| c != '\x13' && c != '\x14' && c != '\x15')
        .collect()
}

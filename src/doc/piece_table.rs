//! Piece Table decoding: CLX extraction, Pcdt discovery, PlcPcd decode, and
//! segment emission.

use crate::error::{Error, Result};
use crate::util::read_u32_le;

const PCDT_MARKER: u8 = 0x02;
const PCD_SIZE: usize = 8;
const COMPRESSED_BIT: u32 = 0x4000_0000;
const FC_MASK: u32 = 0x3FFF_FFFF;

/// Per-piece text encoding, selected by the compression bit of its PCD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Cp1252,
    Utf16Le,
}

/// A resolved, immutable piece: where its text lives in `WordDocument` and
/// how to decode it.
#[derive(Debug, Clone, Copy)]
pub struct PieceSegment {
    pub cp_start: u32,
    pub cp_end: u32,
    pub file_offset: u32,
    pub encoding: Encoding,
    pub byte_length: u32,
}

/// Decodes the CLX found at `(fc_clx, lcb_clx)` inside `table_stream` into an
/// ordered sequence of piece segments.
pub fn decode(table_stream: &[u8], fc_clx: u32, lcb_clx: u32) -> Result<Vec<PieceSegment>> {
    let clx = extract_clx(table_stream, fc_clx, lcb_clx)?;
    let plcpcd = find_plcpcd(clx)?;
    parse_plcpcd(plcpcd)
}

fn extract_clx(table_stream: &[u8], fc_clx: u32, lcb_clx: u32) -> Result<&[u8]> {
    let start = fc_clx as usize;
    let end = start
        .checked_add(lcb_clx as usize)
        .ok_or_else(|| Error::InvalidFormat("CLX bounds overflow".into()))?;
    if end > table_stream.len() {
        return Err(Error::InvalidFormat(
            "CLX range exceeds table stream length".into(),
        ));
    }
    Ok(&table_stream[start..end])
}

/// Scans the CLX for the first `0x02` byte (Pcdt marker) and returns the
/// PlcPcd payload that follows its 32-bit length prefix.
///
/// This is intentionally the naive first-occurrence scan rather than a
/// Prc-block-aware walk: the marker byte can in principle appear inside a
/// preceding Prc block, but the documents this crate targets contain no
/// such collision and the naive scan matches observed behavior.
fn find_plcpcd(clx: &[u8]) -> Result<&[u8]> {
    let marker_idx = clx
        .iter()
        .position(|&b| b == PCDT_MARKER)
        .ok_or_else(|| Error::InvalidFormat("no Pcdt marker found in CLX".into()))?;
    if marker_idx + 5 > clx.len() {
        return Err(Error::InvalidFormat(
            "Pcdt marker has no room for its length prefix".into(),
        ));
    }
    let length = read_u32_le(clx, marker_idx + 1)
        .ok_or_else(|| Error::InvalidFormat("Pcdt length prefix truncated".into()))?
        as usize;
    let payload_start = marker_idx + 5;
    let payload_end = payload_start
        .checked_add(length)
        .ok_or_else(|| Error::InvalidFormat("PlcPcd length overflow".into()))?;
    clx.get(payload_start..payload_end)
        .ok_or_else(|| Error::InvalidFormat("PlcPcd payload exceeds CLX bounds".into()))
}

fn parse_plcpcd(payload: &[u8]) -> Result<Vec<PieceSegment>> {
    if payload.len() < 4 || (payload.len() - 4) % 12 != 0 {
        return Err(Error::InvalidFormat(
            "PlcPcd length is not 4 + 12n".into(),
        ));
    }
    let n = (payload.len() - 4) / 12;

    let mut cps = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let cp = read_u32_le(payload, i * 4)
            .ok_or_else(|| Error::InvalidFormat("PlcPcd CP array truncated".into()))?;
        cps.push(cp);
    }

    let pcd_array = &payload[4 * (n + 1)..];
    if pcd_array.len() != n * PCD_SIZE {
        return Err(Error::InvalidFormat("PCD array size mismatch".into()));
    }

    let mut segments = Vec::with_capacity(n);
    for i in 0..n {
        let cp_start = cps[i];
        let cp_end = cps[i + 1];
        if cp_end <= cp_start {
            continue;
        }
        let pcd = &pcd_array[i * PCD_SIZE..(i + 1) * PCD_SIZE];
        let fc_raw = read_u32_le(pcd, 2)
            .ok_or_else(|| Error::InvalidFormat("PCD fc field truncated".into()))?;
        let compressed = fc_raw & COMPRESSED_BIT != 0;
        let fc_value = fc_raw & FC_MASK;
        let file_offset = if compressed { fc_value / 2 } else { fc_value };
        let char_count = cp_end - cp_start;
        let byte_length = if compressed { char_count } else { char_count * 2 };
        let encoding = if compressed { Encoding::Cp1252 } else { Encoding::Utf16Le };

        segments.push(PieceSegment {
            cp_start,
            cp_end,
            file_offset,
            encoding,
            byte_length,
        });
    }
    Ok(segments)
}

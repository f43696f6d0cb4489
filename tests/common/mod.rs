//! Shared helpers for building minimal synthetic CFBF `.doc` containers in
//! integration tests, mirroring the literal byte layouts in the end-to-end
//! scenarios this crate is specified against.

pub const SECTOR_SIZE: usize = 512;
pub const FREESECT: u32 = 0xFFFF_FFFF;
pub const ENDOFCHAIN: u32 = 0xFFFF_FFFE;
pub const FATSECT: u32 = 0xFFFF_FFFD;
pub const DIRENTRY_SIZE: usize = 128;
pub const MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

pub fn header(dir_start: u32, fat_sectors: &[u32]) -> Vec<u8> {
    let mut h = vec![0u8; SECTOR_SIZE];
    h[0..8].copy_from_slice(&MAGIC);
    h[0x1E..0x20].copy_from_slice(&9u16.to_le_bytes());
    h[0x20..0x22].copy_from_slice(&6u16.to_le_bytes());
    h[0x30..0x34].copy_from_slice(&dir_start.to_le_bytes());
    h[0x38..0x3C].copy_from_slice(&4096u32.to_le_bytes());
    h[0x3C..0x40].copy_from_slice(&FREESECT.to_le_bytes());
    h[0x44..0x48].copy_from_slice(&FREESECT.to_le_bytes());
    for (i, slot) in h[0x4C..0x4C + 109 * 4].chunks_exact_mut(4).enumerate() {
        let v = fat_sectors.get(i).copied().unwrap_or(FREESECT);
        slot.copy_from_slice(&v.to_le_bytes());
    }
    h
}

pub fn dir_entry(name: &str, object_type: u8, start_sector: u32, size: u64) -> Vec<u8> {
    let mut e = vec![0u8; DIRENTRY_SIZE];
    let utf16: Vec<u16> = name.encode_utf16().collect();
    for (i, u) in utf16.iter().enumerate() {
        e[i * 2..i * 2 + 2].copy_from_slice(&u.to_le_bytes());
    }
    let name_len_bytes = (utf16.len() + 1) * 2;
    e[0x40..0x42].copy_from_slice(&(name_len_bytes as u16).to_le_bytes());
    e[0x42] = object_type;
    e[0x74..0x78].copy_from_slice(&start_sector.to_le_bytes());
    e[0x78..0x80].copy_from_slice(&size.to_le_bytes());
    e
}

/// Assembles a single-FAT-sector container: header, FAT sector, directory
/// sector (Root Entry + `WordDocument` + a table stream), then the two
/// stream sectors. Object type constants: 5 = root storage, 2 = stream.
pub fn build_container(
    table_stream_name: &str,
    word_document: Vec<u8>,
    table_stream: Vec<u8>,
) -> Vec<u8> {
    const STGTY_STREAM: u8 = 2;
    const STGTY_ROOT: u8 = 5;

    let fat_idx = 0u32;
    let dir_idx = 1u32;
    let word_doc_idx = 2u32;
    let table_idx = 3u32;

    let hdr = header(dir_idx, &[fat_idx]);

    let mut fat_sector = vec![0u8; SECTOR_SIZE];
    let mut fat_entries = vec![FREESECT; SECTOR_SIZE / 4];
    fat_entries[fat_idx as usize] = FATSECT;
    fat_entries[dir_idx as usize] = ENDOFCHAIN;
    fat_entries[word_doc_idx as usize] = ENDOFCHAIN;
    fat_entries[table_idx as usize] = ENDOFCHAIN;
    for (i, v) in fat_entries.iter().enumerate() {
        fat_sector[i * 4..i * 4 + 4].copy_from_slice(&v.to_le_bytes());
    }

    let mut dir_sector = vec![0u8; SECTOR_SIZE];
    let root = dir_entry("Root Entry", STGTY_ROOT, FREESECT, 0);
    let word_entry = dir_entry(
        "WordDocument",
        STGTY_STREAM,
        word_doc_idx,
        word_document.len() as u64,
    );
    let table_entry = dir_entry(
        table_stream_name,
        STGTY_STREAM,
        table_idx,
        table_stream.len() as u64,
    );
    dir_sector[0..DIRENTRY_SIZE].copy_from_slice(&root);
    dir_sector[DIRENTRY_SIZE..DIRENTRY_SIZE * 2].copy_from_slice(&word_entry);
    dir_sector[DIRENTRY_SIZE * 2..DIRENTRY_SIZE * 3].copy_from_slice(&table_entry);

    let mut word_document = word_document;
    word_document.resize(SECTOR_SIZE, 0);
    let mut table_stream = table_stream;
    table_stream.resize(SECTOR_SIZE, 0);

    let mut out = hdr;
    out.extend_from_slice(&fat_sector);
    out.extend_from_slice(&dir_sector);
    out.extend_from_slice(&word_document);
    out.extend_from_slice(&table_stream);
    out
}

/// Builds a `WordDocument` stream prefix with the FIB fields set, long
/// enough to satisfy `FIB_MIN_SIZE`. Extra bytes up to `len` are zeroed and
/// may be overwritten by the caller (e.g. to place a compressed piece).
pub fn fib_bytes(len: usize, flags: u16, fc_clx: u32, lcb_clx: u32) -> Vec<u8> {
    let mut data = vec![0u8; len];
    data[0x0002..0x0004].copy_from_slice(&0x00C1u16.to_le_bytes());
    data[0x000A..0x000C].copy_from_slice(&flags.to_le_bytes());
    data[0x01A2..0x01A6].copy_from_slice(&fc_clx.to_le_bytes());
    data[0x01A6..0x01AA].copy_from_slice(&lcb_clx.to_le_bytes());
    data
}

/// Builds a CLX byte buffer: Pcdt marker, length prefix, CP array, PCD array.
pub fn clx_bytes(cps: &[u32], pcds: &[[u8; 8]]) -> Vec<u8> {
    let mut plc = Vec::new();
    for cp in cps {
        plc.extend_from_slice(&cp.to_le_bytes());
    }
    for pcd in pcds {
        plc.extend_from_slice(pcd);
    }
    let mut clx = vec![0x02u8];
    clx.extend_from_slice(&(plc.len() as u32).to_le_bytes());
    clx.extend_from_slice(&plc);
    clx
}

/// Builds a single PCD record with the given raw `fc` field (bytes 2..6).
pub fn pcd(fc_raw: u32) -> [u8; 8] {
    let mut b = [0u8; 8];
    b[2..6].copy_from_slice(&fc_raw.to_le_bytes());
    b
}

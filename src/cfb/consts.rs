//! Constants from the Compound File Binary Format (MS-CFB) header layout.

/// First 8 bytes of any CFBF container.
pub const MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Minimum number of bytes needed to read and validate the header.
pub const HEADER_SIZE: usize = 512;

/// Size in bytes of a single directory entry record.
pub const DIRENTRY_SIZE: usize = 128;

/// Number of DIFAT entries embedded directly in the header.
pub const HEADER_DIFAT_COUNT: usize = 109;

/// Offset of the embedded DIFAT entries within the header.
pub const HEADER_DIFAT_OFFSET: usize = 0x4C;

// Special sector index values (MS-CFB 2.1).
pub const MAXREGSECT: u32 = 0xFFFF_FFFA;
pub const DIFSECT: u32 = 0xFFFF_FFFC;
pub const FATSECT: u32 = 0xFFFF_FFFD;
pub const ENDOFCHAIN: u32 = 0xFFFF_FFFE;
pub const FREESECT: u32 = 0xFFFF_FFFF;

/// Sentinel for "no stream"/root-less link fields in a directory entry.
pub const NOSTREAM: u32 = 0xFFFF_FFFF;

// Directory entry object types (offset 0x42 within the entry).
pub const STGTY_EMPTY: u8 = 0;
pub const STGTY_STORAGE: u8 = 1;
pub const STGTY_STREAM: u8 = 2;
pub const STGTY_ROOT: u8 = 5;

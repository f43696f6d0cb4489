//! CFBF (OLE2) container access: header, FAT/mini-FAT, directory, streams.

pub mod consts;
mod reader;

pub use reader::{CfbReader, DirEntry};

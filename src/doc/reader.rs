//! Top-level facade composing the container reader, FIB parser, piece table
//! decoder and text assembler into a single `open` / `read_text` API.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::cfb::CfbReader;
use crate::error::{Error, Result};

use super::fib::Fib;
use super::piece_table;
use super::text;

const WORD_DOCUMENT_STREAM: &str = "WordDocument";

/// Reads plain text out of a legacy Word 97-2003 (`.doc`) binary document.
pub struct DocReader<R> {
    cfb: CfbReader<R>,
}

impl DocReader<File> {
    /// Opens a `.doc` file from a filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(DocReader {
            cfb: CfbReader::open(path)?,
        })
    }
}

impl DocReader<Cursor<Vec<u8>>> {
    /// Opens a `.doc` document from an owned in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Ok(DocReader {
            cfb: CfbReader::from_bytes(bytes)?,
        })
    }
}

impl<R: Read + Seek> DocReader<R> {
    /// Opens a `.doc` document from any seekable byte source.
    pub fn new(reader: R) -> Result<Self> {
        Ok(DocReader {
            cfb: CfbReader::new(reader)?,
        })
    }

    /// Returns the normalized, concatenated plain text of the document.
    ///
    /// Fails with [`Error::DocFormat`] mentioning encryption if the FIB's
    /// encryption flag is set, and with [`Error::MissingStream`] if
    /// `WordDocument` or the selected table stream is absent.
    pub fn read_text(&mut self) -> Result<String> {
        let word_document = self.cfb.open_stream(WORD_DOCUMENT_STREAM)?;
        let fib = Fib::parse(&word_document)?;

        if fib.is_encrypted {
            return Err(Error::DocFormat(
                "encrypted documents are not supported".into(),
            ));
        }

        let table_stream = self.cfb.open_stream(fib.table_stream_name())?;
        let segments = piece_table::decode(&table_stream, fib.fc_clx, fib.lcb_clx)?;
        Ok(text::assemble(&word_document, &segments))
    }

    /// Releases any resources this reader owns. A no-op beyond `Drop` today;
    /// kept as an explicit call so callers have a place to hang cleanup on.
    pub fn close(self) {}
}

//! Plain-text extraction from legacy Word 97-2003 binary (`.doc`) documents.
//!
//! The core is a three-layer binary decoder over a CFBF (OLE2) container:
//! a container reader that exposes named byte streams, a FIB parser that
//! locates the piece table, and a piece table decoder that resolves each
//! piece to a byte range and encoding in the main document stream. A thin
//! text assembler concatenates and normalizes the decoded pieces.
//!
//! ```no_run
//! use doctext::doc::DocReader;
//!
//! let mut reader = DocReader::open("report.doc")?;
//! let text = reader.read_text()?;
//! println!("{text}");
//! # Ok::<(), doctext::Error>(())
//! ```

pub mod cfb;
pub mod doc;
mod error;
mod util;

pub use error::{Error, Result};

//! Word 97-2003 (`.doc`) binary document parsing: FIB, piece table, and
//! text assembly layered on top of [`crate::cfb`].
//!
//! A `.doc` file is a CFBF container with (at least) a `WordDocument` stream
//! holding the FIB and main text bytes, and a sibling `0Table` or `1Table`
//! stream (selected by a FIB flag) holding the CLX/PlcPcd piece table.

pub mod fib;
pub mod piece_table;
pub mod text;
mod reader;

pub use fib::Fib;
pub use piece_table::{Encoding, PieceSegment};
pub use reader::DocReader;

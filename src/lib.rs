//! A decompressor for single-member gzip streams whose DEFLATE payload
//! uses dynamic Huffman blocks (BTYPE=2).
//!
//! ```no_run
//! use std::fs::File;
//!
//! let file = File::open("path/to/file.gz").unwrap();
//! let decoded = gzrs::gzip::decompress(file).unwrap();
//! println!("{:?}: {} bytes", decoded.header.file_name, decoded.data.len());
//! ```
//!
//! Stored and fixed-Huffman blocks, multi-member streams, and CRC/ISIZE
//! verification are deliberately out of scope; see `DESIGN.md` for why.

pub mod bitreader;
pub mod block;
pub mod canonical;
pub mod decoder;
pub mod error;
pub mod gzip;
pub mod header;
pub mod huffman;
pub mod lengths;

pub use error::{Error, Result};
pub use gzip::{decompress, Decoded};

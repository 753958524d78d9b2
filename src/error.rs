//! Error type shared by every stage of the gzip/DEFLATE decoder.

use thiserror::Error;

/// Everything that can go wrong while decoding a single gzip member.
///
/// Every variant is fatal for the member being decoded: the source format
/// does not define a recovery path for a corrupt bitstream, so there is no
/// "warn and continue" case here.
#[derive(Debug, Error)]
pub enum Error {
    /// The two magic bytes at the start of the stream were not `1f 8b`.
    #[error("bad gzip signature")]
    BadSignature,

    /// The header's compression method (CM) was not 8 (DEFLATE).
    #[error("unsupported compression method {0}, only CM=8 (deflate) is supported")]
    UnsupportedCompression(u8),

    /// A block's BTYPE was not 2 (dynamic Huffman).
    ///
    /// `block` is the zero-based index of the offending block.
    #[error("block {block}: unsupported block type {btype} (only dynamic Huffman blocks are decoded)")]
    UnsupportedBlockType {
        /// Index of the block that carried the bad BTYPE.
        block: usize,
        /// The BTYPE value that was read (0, 1 or 3).
        btype: u16,
    },

    /// The code-length alphabet decoder produced a length vector that
    /// didn't line up with HLIT/HDIST, or a canonical code table could not
    /// be built from the lengths it was given.
    #[error("block {block}: corrupt code-length table ({reason})")]
    CorruptLengths {
        /// Index of the block being decoded.
        block: usize,
        /// Human-readable detail, e.g. "code 16 with no previous length".
        reason: &'static str,
    },

    /// A bit-by-bit Huffman walk fell off the trie: the accumulated bits
    /// do not form a prefix of any code in the table.
    #[error("block {block}: invalid Huffman code")]
    InvalidHuffmanCode {
        /// Index of the block being decoded.
        block: usize,
    },

    /// A back-reference's distance exceeded the amount of output produced
    /// so far.
    #[error("block {block}: back-reference distance {distance} exceeds {available} available output bytes")]
    BadBackReference {
        /// Index of the block being decoded.
        block: usize,
        /// The distance that was requested.
        distance: usize,
        /// The number of output bytes actually available to copy from.
        available: usize,
    },

    /// The bit reader ran out of input before it could satisfy a read.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// Any underlying I/O failure (opening the file, seeking, writing
    /// output, ...).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! The per-block driver. Reads BFINAL/BTYPE, dispatches to the
//! dynamic-Huffman path (the only block type this core supports), and
//! loops until BFINAL.
//!
//! Stored (BTYPE=0) and fixed-Huffman (BTYPE=1) blocks are rejected
//! rather than implemented; they are a deliberate non-goal of this core.

use std::io::Read;

use crate::bitreader::BitReader;
use crate::error::{Error, Result};
use crate::huffman::HuffmanTree;
use crate::lengths::{read_code_lengths, read_meta_tree};

const BTYPE_DYNAMIC: u16 = 2;

/// Decodes every DEFLATE block from `bits` into `output`, stopping after
/// the block whose BFINAL bit is set.
///
/// Only BTYPE = 2 (dynamic Huffman) blocks are accepted; BTYPE 0 (stored)
/// and 1 (fixed Huffman) are out of scope for this core and are reported
/// as [`Error::UnsupportedBlockType`], identifying which block rejected
/// them, same as BTYPE 3 (reserved, always invalid).
pub fn decode_blocks<R: Read>(bits: &mut BitReader<R>, output: &mut Vec<u8>) -> Result<usize> {
    let mut block = 0usize;
    loop {
        let bfinal = bits.read_bits(1, false)?;
        let btype = bits.read_bits(2, false)?;
        if btype != BTYPE_DYNAMIC {
            return Err(Error::UnsupportedBlockType { block, btype });
        }

        decode_dynamic_block(bits, output, block)?;

        block += 1;
        if bfinal == 1 {
            return Ok(block);
        }
    }
}

fn decode_dynamic_block<R: Read>(
    bits: &mut BitReader<R>,
    output: &mut Vec<u8>,
    block: usize,
) -> Result<()> {
    let (mut meta, counts) = read_meta_tree(bits, block)?;
    let total = counts.hlit as usize + counts.hdist as usize;
    let lengths = read_code_lengths(bits, &mut meta, total, block)?;

    let lit_lengths = &lengths[..counts.hlit as usize];
    let dist_lengths = &lengths[counts.hlit as usize..];

    let lit_codes = crate::canonical::build_codes(lit_lengths, block)?;
    let dist_codes = crate::canonical::build_codes(dist_lengths, block)?;
    let mut litlen = HuffmanTree::from_codes(&lit_codes, block)?;
    let mut dist = HuffmanTree::from_codes(&dist_codes, block)?;

    crate::block::decode_block(bits, &mut litlen, &mut dist, output, block)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn rejects_stored_block() {
        // BFINAL=1, BTYPE=00 (stored)
        let mut bits = BitReader::new(Cursor::new(vec![0b0000_0001u8]));
        let mut out = Vec::new();
        let err = decode_blocks(&mut bits, &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedBlockType { block: 0, btype: 0 }
        ));
    }

    #[test]
    fn rejects_fixed_huffman_block() {
        // BFINAL=1, BTYPE=01 (fixed Huffman)
        let mut bits = BitReader::new(Cursor::new(vec![0b0000_0011u8]));
        let mut out = Vec::new();
        let err = decode_blocks(&mut bits, &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedBlockType { block: 0, btype: 1 }
        ));
    }

    /// Two back-to-back dynamic blocks, BFINAL=0 then BFINAL=1, each using
    /// a trivial literal/length alphabet (only one literal symbol and the
    /// end-of-block symbol carry a length, both length 1) and a
    /// single-symbol distance alphabet that goes unused. The first block
    /// emits 'A', the second emits 'B'; decoding should walk both blocks
    /// and stop as soon as the second's BFINAL bit is consumed.
    const TWO_BLOCKS_AB: [u8; 84] = [
        4, 224, 1, 4, 0, 0, 0, 0, 16, 0, 0, 0, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 108, 1, 120, 0, 1, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0,
        0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 11,
    ];

    #[test]
    fn decodes_both_blocks_of_a_two_block_stream() {
        let mut bits = BitReader::new(Cursor::new(TWO_BLOCKS_AB.to_vec()));
        let mut out = Vec::new();
        let blocks = decode_blocks(&mut bits, &mut out).unwrap();
        assert_eq!(blocks, 2);
        assert_eq!(out, b"AB");
    }
}

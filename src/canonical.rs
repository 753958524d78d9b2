//! Canonical Huffman code assignment from a vector of code lengths,
//! following RFC 1951 §3.2.2.
//!
//! Computes the `bl_count`/`next_code` tables described there and hands
//! back `(symbol, length, code)` triples for [`crate::huffman`] to insert
//! into a trie, one bit-at-a-time walk per code.

use crate::error::{Error, Result};

const MAX_BITS: usize = 15;

/// One symbol's canonical assignment: its code length and the numeric
/// code itself (not yet left-justified to any particular width).
pub struct Code {
    /// Alphabet index.
    pub symbol: u16,
    /// Code length in bits, 1..=15.
    pub length: u8,
    /// The code value, `length` bits wide.
    pub code: u16,
}

/// Assigns canonical codes to every symbol with a non-zero length in
/// `lens` (indexed by symbol).
///
/// Implements RFC 1951's three-step algorithm:
/// 1. count codes of each length,
/// 2. compute the first code at each length,
/// 3. walk symbols in ascending order, assigning and incrementing.
///
/// `block` and `reason` become diagnostic context for
/// [`Error::CorruptLengths`] if `lens` does not describe a valid prefix
/// code (the Kraft inequality is violated).
pub fn build_codes(lens: &[u16], block: usize) -> Result<Vec<Code>> {
    let mut bl_count = [0u16; MAX_BITS + 1];
    for &len in lens {
        if len as usize > MAX_BITS {
            return Err(Error::CorruptLengths {
                block,
                reason: "code length exceeds 15 bits",
            });
        }
        bl_count[len as usize] += 1;
    }

    // Symbols of length 0 are unused; don't let them block the
    // left-over-code check below.
    let mut next_code = [0u32; MAX_BITS + 2];
    let mut code = 0u32;
    bl_count[0] = 0;
    for len in 1..=MAX_BITS {
        code = (code + bl_count[len - 1] as u32) << 1;
        next_code[len] = code;
        // `code` is the first code at this length; if it and the count of
        // codes at this length overflow past what `len` bits can hold,
        // the length vector does not describe a valid Kraft-admissible
        // prefix code.
        if code + bl_count[len] as u32 > (1u32 << len) {
            return Err(Error::CorruptLengths {
                block,
                reason: "canonical code construction overflowed its bit width",
            });
        }
    }

    let mut codes = Vec::with_capacity(lens.len());
    for (symbol, &len) in lens.iter().enumerate() {
        if len == 0 {
            continue;
        }
        let len = len as usize;
        let assigned = next_code[len];
        next_code[len] += 1;
        codes.push(Code {
            symbol: symbol as u16,
            length: len as u8,
            code: assigned as u16,
        });
    }
    Ok(codes)
}

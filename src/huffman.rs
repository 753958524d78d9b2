//! An arena-indexed Huffman decoder trie.
//!
//! Nodes live in a flat `Vec` addressed by index rather than linked
//! pointers, so a block's three trees (meta, literal/length, distance)
//! tear down for free when the block's `Vec<Node>` is dropped.

use crate::canonical::Code;
use crate::error::{Error, Result};

struct Node {
    /// Child for bit 0, or `None` if this edge hasn't been inserted yet.
    left: Option<u32>,
    /// Child for bit 1.
    right: Option<u32>,
    /// Symbol carried by this node if it is a leaf.
    symbol: Option<u16>,
}

impl Node {
    fn empty() -> Node {
        Node {
            left: None,
            right: None,
            symbol: None,
        }
    }
}

/// Outcome of feeding one more bit into the trie walk.
pub enum Step {
    /// The path so far is an internal node; more bits are needed.
    Descending,
    /// The path so far terminates at a leaf carrying this symbol.
    Leaf(u16),
}

/// A binary trie over canonical Huffman codes, walked one bit at a time.
///
/// Bit `0` steps to the left child, bit `1` to the right child, matching
/// the canonical-code convention that codes are conceptually MSB-first:
/// the first bit drawn from the (LSB-first) bit reader selects the edge
/// one level deeper into the trie.
pub struct HuffmanTree {
    nodes: Vec<Node>,
    cursor: u32,
}

impl HuffmanTree {
    /// An empty trie with just a root node.
    pub fn new() -> HuffmanTree {
        HuffmanTree {
            nodes: vec![Node::empty()],
            cursor: 0,
        }
    }

    /// Builds a trie from a set of canonical codes in one call, the usual
    /// entry point: [`crate::canonical::build_codes`] followed by
    /// `insert` for each resulting code.
    pub fn from_codes(codes: &[Code], block: usize) -> Result<HuffmanTree> {
        let mut tree = HuffmanTree::new();
        for c in codes {
            tree.insert(c.code, c.length, c.symbol, block)?;
        }
        Ok(tree)
    }

    /// Inserts `symbol` at the path described by the low `length` bits of
    /// `code_bits`, read MSB-first (bit `length - 1` chosen first).
    ///
    /// Fails if the path runs into an existing leaf before exhausting
    /// `length` bits (that leaf's code would be a prefix of this one, an
    /// invalid prefix code), or if the final node already carries a
    /// symbol or already has children (this code would collide with a
    /// shorter one already occupying the same leaf, or would itself be a
    /// prefix of one already inserted).
    pub fn insert(&mut self, code_bits: u16, length: u8, symbol: u16, block: usize) -> Result<()> {
        let mut node = 0u32;
        for level in (0..length).rev() {
            let bit = (code_bits >> level) & 1;
            if self.nodes[node as usize].symbol.is_some() {
                return Err(Error::CorruptLengths {
                    block,
                    reason: "Huffman code is not prefix-free",
                });
            }
            let child = if bit == 0 {
                &mut self.nodes[node as usize].left
            } else {
                &mut self.nodes[node as usize].right
            };
            node = match *child {
                Some(idx) => idx,
                None => {
                    let idx = self.nodes.len() as u32;
                    self.nodes.push(Node::empty());
                    *child = Some(idx);
                    idx
                }
            };
        }
        let leaf = &mut self.nodes[node as usize];
        if leaf.symbol.is_some() || leaf.left.is_some() || leaf.right.is_some() {
            return Err(Error::CorruptLengths {
                block,
                reason: "Huffman code is not prefix-free",
            });
        }
        leaf.symbol = Some(symbol);
        Ok(())
    }

    /// Feeds one more bit to the cursor, advancing it one level deeper.
    pub fn step(&mut self, bit: u8, block: usize) -> Result<Step> {
        let current = &self.nodes[self.cursor as usize];
        let next = if bit == 0 { current.left } else { current.right };
        let next = next.ok_or(Error::InvalidHuffmanCode { block })?;
        self.cursor = next;
        match self.nodes[next as usize].symbol {
            Some(s) => {
                self.reset();
                Ok(Step::Leaf(s))
            }
            None => Ok(Step::Descending),
        }
    }

    /// Moves the cursor back to the root, starting a fresh symbol walk.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Reads bits from `bits` until a leaf is reached and returns its
    /// symbol. Convenience wrapper around repeated [`HuffmanTree::step`]
    /// used by every block-level decode loop.
    pub fn decode<R: std::io::Read>(
        &mut self,
        bits: &mut crate::bitreader::BitReader<R>,
        block: usize,
    ) -> Result<u16> {
        loop {
            let bit = bits.read_bit()?;
            if let Step::Leaf(symbol) = self.step(bit, block)? {
                return Ok(symbol);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitreader::BitReader;
    use crate::canonical::build_codes;
    use std::io::Cursor;

    #[test]
    fn single_symbol_walk() {
        let lens = vec![3, 3, 3, 3, 3, 2, 4, 4];
        let codes = build_codes(&lens, 0).unwrap();
        let mut tree = HuffmanTree::from_codes(&codes, 0).unwrap();
        // symbol 5 has code 00 (length 2): feed bits 0,0
        assert!(matches!(tree.step(0, 0).unwrap(), Step::Descending));
        assert!(matches!(tree.step(0, 0).unwrap(), Step::Leaf(5)));
    }

    #[test]
    fn decode_drives_bit_reader() {
        let lens = vec![3, 3, 3, 3, 3, 2, 4, 4];
        let codes = build_codes(&lens, 0).unwrap();
        let mut tree = HuffmanTree::from_codes(&codes, 0).unwrap();
        // code for symbol 5 is "00" (MSB-first); the LSB-first bit reader
        // must deliver bit 0 then bit 0 from a zero byte.
        let mut bits = BitReader::new(Cursor::new(vec![0b0000_0000u8]));
        assert_eq!(tree.decode(&mut bits, 0).unwrap(), 5);
    }

    #[test]
    fn colliding_code_is_rejected() {
        let mut tree = HuffmanTree::new();
        tree.insert(0b0, 1, 1, 0).unwrap();
        // a 2-bit code starting with the same bit as an existing 1-bit
        // leaf would make that leaf's code a prefix of this one.
        assert!(tree.insert(0b00, 2, 2, 0).is_err());
    }

    #[test]
    fn invalid_edge_is_reported() {
        let mut tree = HuffmanTree::new();
        tree.insert(0b1, 1, 1, 0).unwrap();
        assert!(tree.step(0, 0).is_err());
    }
}

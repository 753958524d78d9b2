//! The meta (code-length) alphabet and the RLE expansion it drives for
//! the literal/length and distance alphabets, per RFC 1951 §3.2.7.
//!
//! Reading a dynamic block's tables is two passes: first the HLIT/HDIST/
//! HCLEN header and the 19-slot `ORDER` permutation build the meta
//! alphabet itself, then that alphabet's tree is used to decode the
//! actual literal/length and distance code lengths, with codes 16/17/18
//! expanding runs instead of each length being sent individually.

use std::io::Read;

use crate::bitreader::BitReader;
use crate::canonical::build_codes;
use crate::error::{Error, Result};
use crate::huffman::HuffmanTree;

/// Number of symbols in the code-length (meta) alphabet.
pub const META_ALPHABET_SIZE: usize = 19;

/// Fixed permutation mapping the i-th 3-bit field read from the stream to
/// its position in the 19-slot code-length vector. This exact ordering is
/// part of the DEFLATE standard; swapping any two entries breaks decoding
/// of every real stream.
pub const ORDER: [usize; META_ALPHABET_SIZE] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Header counts for one dynamic block: HLIT, HDIST, HCLEN already
/// adjusted by their respective offsets (+257, +1, +4).
pub struct BlockCounts {
    pub hlit: u16,
    pub hdist: u16,
}

/// Reads HLIT/HDIST/HCLEN, then the HCLEN+4 three-bit code lengths for the
/// meta alphabet, and builds the meta Huffman tree from them.
pub fn read_meta_tree<R: Read>(
    bits: &mut BitReader<R>,
    block: usize,
) -> Result<(HuffmanTree, BlockCounts)> {
    let hlit = bits.read_bits(5, false)? + 257;
    let hdist = bits.read_bits(5, false)? + 1;
    let hclen = bits.read_bits(4, false)? + 4;

    let mut lengths = [0u16; META_ALPHABET_SIZE];
    for i in 0..hclen as usize {
        lengths[ORDER[i]] = bits.read_bits(3, false)?;
    }

    let codes = build_codes(&lengths, block)?;
    let tree = HuffmanTree::from_codes(&codes, block)?;
    Ok((tree, BlockCounts { hlit, hdist }))
}

/// Uses the meta tree to decode `total` code lengths, applying the RLE
/// codes 16 (repeat previous), 17 (repeat zero, 3 extra bits) and 18
/// (repeat zero, 7 extra bits).
pub fn read_code_lengths<R: Read>(
    bits: &mut BitReader<R>,
    meta: &mut HuffmanTree,
    total: usize,
    block: usize,
) -> Result<Vec<u16>> {
    let mut lengths = Vec::with_capacity(total);
    while lengths.len() < total {
        let symbol = meta.decode(bits, block)?;
        match symbol {
            0..=15 => lengths.push(symbol),
            16 => {
                let prev = *lengths.last().ok_or(Error::CorruptLengths {
                    block,
                    reason: "code 16 (repeat previous) with no previous length",
                })?;
                let repeat = bits.read_bits(2, false)? + 3;
                for _ in 0..repeat {
                    if lengths.len() >= total {
                        return Err(Error::CorruptLengths {
                            block,
                            reason: "code-length run overran HLIT+HDIST",
                        });
                    }
                    lengths.push(prev);
                }
            }
            17 => {
                let repeat = bits.read_bits(3, false)? + 3;
                for _ in 0..repeat {
                    if lengths.len() >= total {
                        return Err(Error::CorruptLengths {
                            block,
                            reason: "code-length run overran HLIT+HDIST",
                        });
                    }
                    lengths.push(0);
                }
            }
            18 => {
                let repeat = bits.read_bits(7, false)? + 11;
                for _ in 0..repeat {
                    if lengths.len() >= total {
                        return Err(Error::CorruptLengths {
                            block,
                            reason: "code-length run overran HLIT+HDIST",
                        });
                    }
                    lengths.push(0);
                }
            }
            _ => {
                return Err(Error::CorruptLengths {
                    block,
                    reason: "meta alphabet decoded a symbol outside 0..=18",
                })
            }
        }
    }
    if lengths.len() != total {
        return Err(Error::CorruptLengths {
            block,
            reason: "code-length run did not land exactly on HLIT+HDIST",
        });
    }
    Ok(lengths)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn code_length_order_matches_rfc1951() {
        assert_eq!(
            ORDER,
            [16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15]
        );
    }

    #[test]
    fn code_16_with_no_prior_length_is_corrupt() {
        // meta tree containing only symbol 16, at length 1.
        let mut lens = vec![0u16; META_ALPHABET_SIZE];
        lens[16] = 1;
        let codes = build_codes(&lens, 0).unwrap();
        let mut tree = HuffmanTree::from_codes(&codes, 0).unwrap();
        let mut bits = BitReader::new(Cursor::new(vec![0u8]));
        let result = read_code_lengths(&mut bits, &mut tree, 5, 0);
        assert!(matches!(result, Err(Error::CorruptLengths { .. })));
    }
}

//! The public entry point: decode one single-member gzip stream.
//!
//! Framing is header first, then blocks until BFINAL, then the trailing
//! CRC32/ISIZE footer. The footer is read for diagnostics but deliberately
//! not validated against the decoded output (RFC 1952 doesn't require a
//! decoder to reject a stream whose footer lies, and this core's job ends
//! at producing the bytes the bitstream actually encodes).

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info};

use crate::bitreader::BitReader;
use crate::decoder::decode_blocks;
use crate::error::Result;
use crate::header::Header;

/// Result of decoding one gzip member: the recovered header (carrying the
/// original file name, if any) and the decompressed bytes.
pub struct Decoded {
    /// The member's parsed header.
    pub header: Header,
    /// The decompressed payload.
    pub data: Vec<u8>,
    /// The trailing ISIZE field: original size modulo 2^32, informational
    /// only (not used to bound allocation or verified against `data`).
    pub isize: u32,
}

/// Decompresses a single-member gzip stream read from `r`.
///
/// `r` must support [`Seek`] so the trailer's ISIZE field (the final 4
/// bytes) can be read up front for diagnostics; decoding itself is purely
/// sequential afterwards.
pub fn decompress<R: Read + Seek>(mut r: R) -> Result<Decoded> {
    let isize = read_trailer_isize(&mut r)?;
    debug!("gzip trailer reports original size {isize}");

    let header = Header::read(&mut r)?;
    if let Some(name) = &header.file_name {
        debug!("recovered original file name {name:?}");
    }

    let mut bits = BitReader::new(r);
    let mut data = Vec::new();
    let blocks = decode_blocks(&mut bits, &mut data)?;
    info!("decoded {} block(s), {} bytes", blocks, data.len());

    Ok(Decoded {
        header,
        data,
        isize,
    })
}

fn read_trailer_isize<R: Read + Seek>(r: &mut R) -> Result<u32> {
    let pos = r.stream_position()?;
    let len = r.seek(SeekFrom::End(0))?;
    let isize = if len >= 4 {
        r.seek(SeekFrom::End(-4))?;
        r.read_u32::<LittleEndian>()?
    } else {
        0
    };
    r.seek(SeekFrom::Start(pos))?;
    Ok(isize)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    /// A minimal gzip member (no optional header fields) whose DEFLATE
    /// payload is a single dynamic block: HLIT=258 (literal/length
    /// alphabet covers symbols 0..257), HDIST=1, HCLEN=19, code lengths
    /// assigning length 2 to symbols 65 ('A'), 256 (end-of-block) and 257
    /// (length base 3) and length 1 to distance symbol 0 (base 1). The
    /// block emits literal 'A' followed by a length-3/distance-1
    /// back-reference, i.e. exactly "AAAA". These bytes were derived by
    /// hand-driving the same bit-packing and canonical-code algorithm
    /// this crate implements.
    const DEFLATE_AAAA: [u8; 15] = [
        13, 224, 1, 1, 0, 0, 0, 128, 16, 108, 235, 255, 169, 66, 4,
    ];

    fn minimal_gzip_aaaa() -> Vec<u8> {
        let mut v = vec![0x1fu8, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0xff];
        v.extend_from_slice(&DEFLATE_AAAA);
        v.extend_from_slice(&[0u8; 4]); // placeholder CRC32, not validated
        v.extend_from_slice(&4u32.to_le_bytes()); // ISIZE = 4
        v
    }

    #[test]
    fn decodes_single_dynamic_block_to_aaaa() {
        let c = Cursor::new(minimal_gzip_aaaa());
        let decoded = decompress(c).unwrap();
        assert_eq!(decoded.data, b"AAAA");
        assert_eq!(decoded.isize, 4);
        assert_eq!(decoded.data.len() as u32, decoded.isize);
    }

    #[test]
    fn trailer_isize_is_read_without_disturbing_position() {
        let data = minimal_gzip_aaaa();
        let mut c = Cursor::new(data);
        let isize = read_trailer_isize(&mut c).unwrap();
        assert_eq!(isize, 4);
        assert_eq!(c.stream_position().unwrap(), 0);
    }

    #[test]
    fn bad_signature_short_circuits_before_any_block_is_read() {
        let mut data = minimal_gzip_aaaa();
        data[0] = 0x00;
        let c = Cursor::new(data);
        assert!(matches!(
            decompress(c),
            Err(crate::error::Error::BadSignature)
        ));
    }
}

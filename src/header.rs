//! The fixed gzip member header and its optional trailers.
//!
//! Field order: ID1, ID2, CM, FLG, MTIME, XFL, OS, then FEXTRA/FNAME/
//! FCOMMENT/FHCRC gated by the FLG bits in that order (RFC 1952 §2.3).
//! XLEN is read as `(hi << 8) | lo`.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

const ID1: u8 = 0x1f;
const ID2: u8 = 0x8b;
const CM_DEFLATE: u8 = 8;

const FLG_FTEXT: u8 = 0x01;
const FLG_FHCRC: u8 = 0x02;
const FLG_FEXTRA: u8 = 0x04;
const FLG_FNAME: u8 = 0x08;
const FLG_FCOMMENT: u8 = 0x10;

/// The fixed and optional fields of one gzip member header.
///
/// Built once by [`Header::read`] and then read-only; `file_name` is the
/// only field the decoder's external sink consumes, the rest are carried
/// for completeness and diagnostics.
#[derive(Debug, Default)]
pub struct Header {
    /// Compression flags byte (XFL), e.g. best-speed/best-compression hints.
    pub xfl: u8,
    /// Originating OS identifier byte.
    pub os: u8,
    /// Modification time, seconds since the Unix epoch (0 if unknown).
    pub mtime: u32,
    /// Whether FTEXT was set (the payload is probably ASCII/Latin-1 text).
    pub is_text: bool,
    /// Original file name, Latin-1 decoded, if FNAME was set.
    pub file_name: Option<String>,
    /// Free-form comment, Latin-1 decoded, if FCOMMENT was set.
    pub comment: Option<String>,
}

impl Header {
    /// Parses the fixed prefix and every optional section gated by FLG,
    /// leaving `r` positioned at the first byte of the DEFLATE stream.
    pub fn read<R: Read>(r: &mut R) -> Result<Header> {
        let id1 = read_u8(r)?;
        let id2 = read_u8(r)?;
        if id1 != ID1 || id2 != ID2 {
            return Err(Error::BadSignature);
        }

        let cm = read_u8(r)?;
        if cm != CM_DEFLATE {
            return Err(Error::UnsupportedCompression(cm));
        }

        let flg = read_u8(r)?;
        let mtime = r.read_u32::<LittleEndian>()?;
        let xfl = read_u8(r)?;
        let os = read_u8(r)?;

        if flg & FLG_FEXTRA != 0 {
            let lo = read_u8(r)? as u16;
            let hi = read_u8(r)? as u16;
            let xlen = (hi << 8) | lo;
            let mut extra = vec![0u8; xlen as usize];
            r.read_exact(&mut extra)?;
        }

        let file_name = if flg & FLG_FNAME != 0 {
            Some(read_cstring(r)?)
        } else {
            None
        };

        let comment = if flg & FLG_FCOMMENT != 0 {
            Some(read_cstring(r)?)
        } else {
            None
        };

        if flg & FLG_FHCRC != 0 {
            let mut crc = [0u8; 2];
            r.read_exact(&mut crc)?;
        }

        Ok(Header {
            xfl,
            os,
            mtime,
            is_text: flg & FLG_FTEXT != 0,
            file_name,
            comment,
        })
    }
}

fn read_u8<R: Read>(r: &mut R) -> Result<u8> {
    let mut b = [0u8; 1];
    r.read_exact(&mut b)?;
    Ok(b[0])
}

/// Reads bytes until a NUL terminator, decoding them as Latin-1 (every
/// byte value maps 1:1 to the Unicode scalar of the same ordinal, which is
/// how gzip file names and comments are defined to be encoded).
fn read_cstring<R: Read>(r: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    loop {
        let b = read_u8(r)?;
        if b == 0 {
            break;
        }
        bytes.push(b);
    }
    Ok(bytes.into_iter().map(|b| b as char).collect())
}

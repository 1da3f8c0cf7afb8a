use log::debug;
use thiserror::Error;

use crate::constants::{MEMORY_SIZE, ROM_HEADER_SIZE, ROM_MAGIC};

/// Why a ROM image was rejected. Checked in declaration order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("ROM is {0} bytes, shorter than the 16 byte header")]
    HeaderTooShort(usize),
    #[error("bad magic {0:02X?}, expected \"CH16\"")]
    BadMagic([u8; 4]),
    #[error("ROM body of {0} bytes does not fit in memory")]
    TooLarge(usize),
    #[error("header declares {declared} body bytes but only {actual} follow")]
    Truncated { declared: usize, actual: usize },
    #[error("checksum {actual:08X} does not match header checksum {expected:08X}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

/// # ROM
/// A validated `.c16` image.
///
/// Header layout (16 bytes, little endian):
/// ```text
/// 0x0  "CH16"
/// 0x4  reserved
/// 0x5  version, major.minor as nibbles
/// 0x6  body size (u32)
/// 0xA  start address (u16)
/// 0xC  CRC-32 of the body (u32)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    pub version: u8,
    pub start: u16,
    pub body: Vec<u8>,
}

impl Rom {
    /// Validates a headered image
    pub fn parse(bytes: &[u8]) -> Result<Rom, LoadError> {
        if bytes.len() < ROM_HEADER_SIZE {
            return Err(LoadError::HeaderTooShort(bytes.len()));
        }
        let (header, rest) = bytes.split_at(ROM_HEADER_SIZE);

        let magic = le_array::<4>(&header[0x0..0x4]);
        if magic != ROM_MAGIC {
            return Err(LoadError::BadMagic(magic));
        }
        let version = header[0x5];
        let declared = u32::from_le_bytes(le_array(&header[0x6..0xA])) as usize;
        let start = u16::from_le_bytes(le_array(&header[0xA..0xC]));
        let expected = u32::from_le_bytes(le_array(&header[0xC..0x10]));

        if declared > MEMORY_SIZE {
            return Err(LoadError::TooLarge(declared));
        }
        if rest.len() < declared {
            return Err(LoadError::Truncated {
                declared,
                actual: rest.len(),
            });
        }
        if rest.len() > declared {
            debug!("ignoring {} bytes past the ROM body", rest.len() - declared);
        }
        let body = &rest[..declared];
        let actual = crc32(body);
        if actual != expected {
            return Err(LoadError::ChecksumMismatch { expected, actual });
        }

        Ok(Rom {
            version,
            start,
            body: body.to_vec(),
        })
    }

    /// Wraps a headerless image that starts executing at address 0
    pub fn raw(bytes: &[u8]) -> Result<Rom, LoadError> {
        if bytes.len() > MEMORY_SIZE {
            return Err(LoadError::TooLarge(bytes.len()));
        }
        Ok(Rom {
            version: 0,
            start: 0,
            body: bytes.to_vec(),
        })
    }

    /// Builds a well formed image around `body`
    pub fn encode(version: u8, start: u16, body: &[u8]) -> Vec<u8> {
        let mut image = Vec::with_capacity(ROM_HEADER_SIZE + body.len());
        image.extend_from_slice(&ROM_MAGIC);
        image.push(0);
        image.push(version);
        image.extend_from_slice(&(body.len() as u32).to_le_bytes());
        image.extend_from_slice(&start.to_le_bytes());
        image.extend_from_slice(&crc32(body).to_le_bytes());
        image.extend_from_slice(body);
        image
    }
}

fn le_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    // callers always slice exactly N bytes out of the fixed size header
    bytes.try_into().unwrap_or([0; N])
}

/// CRC-32 (IEEE 802.3, reflected, polynomial 0xEDB88320)
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

//! Reads generated cartridges back and checks them against the bank-tag layout.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{CartridgeError, CartridgeResult};
use crate::header::{HeaderCodes, ResolvedHeader};
use crate::memory_map::{
    bank_tag, CARTRIDGE_TYPE_ADDR, PATCHED_HEADER_ADDRS, RAM_SIZE_ADDR, ROM_BANK_SIZE,
    ROM_SIZE_ADDR,
};

/// First difference found between an image and the layout it should have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutMismatch {
    WrongSize { expected: usize, actual: usize },
    HeaderByte { offset: usize, expected: u8, actual: u8 },
    BankByte { offset: usize, expected: u8, actual: u8 },
}

impl fmt::Display for LayoutMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMismatch::WrongSize { expected, actual } => {
                write!(f, "expected {} bytes, found {}", expected, actual)
            }
            LayoutMismatch::HeaderByte {
                offset,
                expected,
                actual,
            } => write!(
                f,
                "header byte {:#06x} is {:#04x}, expected {:#04x}",
                offset, actual, expected
            ),
            LayoutMismatch::BankByte {
                offset,
                expected,
                actual,
            } => write!(
                f,
                "byte {:#x} is {:#04x}, expected bank tag {:#04x}",
                offset, actual, expected
            ),
        }
    }
}

/// Recovers the three header codes from an image, if it is long enough to have them.
pub fn read_header(image: &[u8]) -> Option<HeaderCodes> {
    if image.len() <= RAM_SIZE_ADDR {
        return None;
    }
    Some(HeaderCodes::new(
        image[CARTRIDGE_TYPE_ADDR],
        image[ROM_SIZE_ADDR],
        image[RAM_SIZE_ADDR],
    ))
}

/// Checks size, header bytes and the bank fill of `image`.
pub fn check_image(image: &[u8], header: &ResolvedHeader) -> Result<(), LayoutMismatch> {
    if image.len() != header.rom_bytes {
        return Err(LayoutMismatch::WrongSize {
            expected: header.rom_bytes,
            actual: image.len(),
        });
    }

    for (offset, expected) in PATCHED_HEADER_ADDRS.iter().zip(header.codes.bytes()) {
        let actual = image[*offset];
        if actual != expected {
            return Err(LayoutMismatch::HeaderByte {
                offset: *offset,
                expected,
                actual,
            });
        }
    }

    for (bank, chunk) in image.chunks(ROM_BANK_SIZE).enumerate() {
        let base = bank * ROM_BANK_SIZE;
        let tag = bank_tag(base);
        let bad = chunk
            .iter()
            .enumerate()
            .map(|(i, &byte)| (base + i, byte))
            .find(|&(offset, byte)| byte != tag && !PATCHED_HEADER_ADDRS.contains(&offset));
        if let Some((offset, actual)) = bad {
            return Err(LayoutMismatch::BankByte {
                offset,
                expected: tag,
                actual,
            });
        }
    }
    Ok(())
}

/// Reads the file at `path` and checks it was generated from `codes`.
pub fn verify_file(path: &Path, codes: HeaderCodes) -> CartridgeResult<()> {
    let header = codes.resolve()?;
    let image = fs::read(path).map_err(|e| CartridgeError::io(path, e))?;
    check_image(&image, &header).map_err(|mismatch| CartridgeError::Verification {
        path: path.to_path_buf(),
        mismatch,
    })?;
    log::debug!("Verified {}", path.display());
    Ok(())
}

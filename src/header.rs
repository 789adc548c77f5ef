//! Cartridge header codes and the size tables they map to.

use lazy_static::lazy_static;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CartridgeError, CartridgeResult};
use crate::mbc;
use crate::memory_map::{KIB, ROM_BANK_SIZE};

lazy_static! {
    /// Header 0x0148: ROM size code to ROM size in bytes.
    pub static ref ROM_SIZES: BTreeMap<u8, usize> = {
        let mut m = BTreeMap::new();
        m.insert(0x00, 32 * KIB); //   2 banks
        m.insert(0x01, 64 * KIB); //   4 banks
        m.insert(0x02, 128 * KIB); //  8 banks
        m.insert(0x03, 256 * KIB); //  16 banks
        m.insert(0x04, 512 * KIB); //  32 banks
        m.insert(0x05, 1024 * KIB); // 64 banks
        m.insert(0x06, 2048 * KIB); // 128 banks
        m.insert(0x07, 4096 * KIB); // 256 banks
        m.insert(0x52, 1152 * KIB); // 72 banks
        m.insert(0x53, 1280 * KIB); // 80 banks
        m.insert(0x54, 1536 * KIB); // 96 banks
        m
    };

    /// Header 0x0149: RAM size code to external RAM size in bytes.
    /// Codes 0x04 and up are not supported.
    pub static ref RAM_SIZES: BTreeMap<u8, usize> = {
        let mut m = BTreeMap::new();
        m.insert(0x00, 0);
        m.insert(0x01, 2 * KIB);
        m.insert(0x02, 8 * KIB);
        m.insert(0x03, 32 * KIB);
        m
    };
}

/// The three header codes describing one cartridge (one worklist entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderCodes {
    pub mbc_type: u8, // 0x0147
    pub rom_size: u8, // 0x0148
    pub ram_size: u8, // 0x0149
}

impl HeaderCodes {
    pub const fn new(mbc_type: u8, rom_size: u8, ram_size: u8) -> Self {
        HeaderCodes {
            mbc_type,
            rom_size,
            ram_size,
        }
    }

    /// Bytes in header order (0x0147, 0x0148, 0x0149).
    pub const fn bytes(&self) -> [u8; 3] {
        [self.mbc_type, self.rom_size, self.ram_size]
    }

    /// Looks the codes up in all three tables.
    ///
    /// The MBC type is checked first, then ROM size, then RAM size. The ROM size must
    /// also divide evenly into 16 KiB banks.
    pub fn resolve(&self) -> CartridgeResult<ResolvedHeader> {
        let label = mbc::mbc_label(self.mbc_type)
            .ok_or(CartridgeError::UnknownMbcType(self.mbc_type))?;
        let rom_bytes = *ROM_SIZES
            .get(&self.rom_size)
            .ok_or(CartridgeError::UnknownRomSize(self.rom_size))?;
        let ram_bytes = *RAM_SIZES
            .get(&self.ram_size)
            .ok_or(CartridgeError::UnknownRamSize(self.ram_size))?;

        if rom_bytes == 0 || rom_bytes % ROM_BANK_SIZE != 0 {
            return Err(CartridgeError::InvalidBanking {
                rom_size: rom_bytes,
            });
        }

        Ok(ResolvedHeader {
            codes: *self,
            label,
            rom_bytes,
            ram_bytes,
        })
    }
}

impl fmt::Display for HeaderCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:#04x}, {:#04x}, {:#04x})",
            self.mbc_type, self.rom_size, self.ram_size
        )
    }
}

/// Header codes together with what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
    pub codes: HeaderCodes,
    pub label: &'static str,
    pub rom_bytes: usize,
    pub ram_bytes: usize,
}

impl ResolvedHeader {
    pub fn bank_count(&self) -> usize {
        self.rom_bytes / ROM_BANK_SIZE
    }

    /// `<label>+0x<ROM KiB>KB_ROM+0x<RAM KiB>KB_RAM.gb`, sizes as 4 lowercase hex digits.
    pub fn filename(&self) -> String {
        format!(
            "{}+{:#06x}KB_ROM+{:#06x}KB_RAM.gb",
            self.label,
            self.rom_bytes / KIB,
            self.ram_bytes / KIB
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_map::MAX_TAGGED_BANKS;

    #[test]
    fn resolve_mbc1_256k() {
        let header = HeaderCodes::new(0x01, 0x03, 0x02).resolve().unwrap();
        assert_eq!(header.label, "MBC1");
        assert_eq!(header.rom_bytes, 262_144);
        assert_eq!(header.ram_bytes, 8 * 1024);
        assert_eq!(header.bank_count(), 16);
        assert_eq!(header.filename(), "MBC1+0x0100KB_ROM+0x0008KB_RAM.gb");
    }

    #[test]
    fn filename_rom_only() {
        let header = HeaderCodes::new(0x00, 0x00, 0x00).resolve().unwrap();
        assert_eq!(header.filename(), "ROM_ONLY+0x0020KB_ROM+0x0000KB_RAM.gb");
    }

    #[test]
    fn filename_uses_lowercase_hex() {
        let header = HeaderCodes::new(0x13, 0x54, 0x03).resolve().unwrap();
        assert_eq!(header.filename(), "MBC3+RAM+BATTERY+0x0600KB_ROM+0x0020KB_RAM.gb");
        let header = HeaderCodes::new(0x19, 0x07, 0x01).resolve().unwrap();
        assert_eq!(header.filename(), "MBC5+0x1000KB_ROM+0x0002KB_RAM.gb");
    }

    #[test]
    fn unknown_codes_name_the_first_bad_table() {
        assert!(matches!(
            HeaderCodes::new(0xFF, 0xFF, 0xFF).resolve(),
            Err(CartridgeError::UnknownMbcType(0xFF))
        ));
        assert!(matches!(
            HeaderCodes::new(0x01, 0x08, 0xFF).resolve(),
            Err(CartridgeError::UnknownRomSize(0x08))
        ));
        assert!(matches!(
            HeaderCodes::new(0x01, 0x00, 0x04).resolve(),
            Err(CartridgeError::UnknownRamSize(0x04))
        ));
    }

    #[test]
    fn extended_rom_sizes() {
        let kib = |code: u8| ROM_SIZES[&code] / KIB;
        assert_eq!(kib(0x52), 1152);
        assert_eq!(kib(0x53), 1280);
        assert_eq!(kib(0x54), 1536);
        assert_eq!(ROM_SIZES.len(), 11);
        assert_eq!(RAM_SIZES.len(), 4);
    }

    #[test]
    fn every_rom_size_banks_cleanly_without_tag_aliasing() {
        for (&code, &bytes) in ROM_SIZES.iter() {
            assert_eq!(bytes % ROM_BANK_SIZE, 0, "ROM code {:#04x}", code);
            assert!(bytes / ROM_BANK_SIZE <= MAX_TAGGED_BANKS, "ROM code {:#04x}", code);
        }
    }

    #[test]
    fn filenames_are_unique_per_triple() {
        let mut names = std::collections::HashSet::new();
        for &mbc_type in mbc::MBC_TYPES.keys() {
            for &rom_size in ROM_SIZES.keys() {
                for &ram_size in RAM_SIZES.keys() {
                    let header = HeaderCodes::new(mbc_type, rom_size, ram_size)
                        .resolve()
                        .unwrap();
                    assert!(names.insert(header.filename()));
                }
            }
        }
    }
}

// src/mbc.rs

use lazy_static::lazy_static;
use std::collections::BTreeMap;

lazy_static! {
    /// Cartridge type codes (header 0x0147) the generator can emit, with their labels.
    ///
    /// Only the controllers the emulator test suite targets are listed. MMM01 (0x0B-0x0D),
    /// MBC4 (0x15-0x17), Pocket Camera (0xFC), Bandai TAMA5 (0xFD), HuC3 (0xFE) and
    /// HuC1 (0xFF) are deliberately absent.
    pub static ref MBC_TYPES: BTreeMap<u8, &'static str> = {
        let mut m = BTreeMap::new();
        m.insert(0x00, "ROM_ONLY");
        m.insert(0x01, "MBC1");
        m.insert(0x02, "MBC1+RAM");
        m.insert(0x03, "MBC1+RAM+BATTERY");
        m.insert(0x05, "MBC2");
        m.insert(0x06, "MBC2+BATTERY");
        m.insert(0x08, "ROM+RAM");
        m.insert(0x09, "ROM+RAM+BATTERY");
        m.insert(0x0F, "MBC3+TIMER+BATTERY");
        m.insert(0x10, "MBC3+TIMER+RAM+BATTERY");
        m.insert(0x11, "MBC3");
        m.insert(0x12, "MBC3+RAM");
        m.insert(0x13, "MBC3+RAM+BATTERY");
        m.insert(0x19, "MBC5");
        m.insert(0x1A, "MBC5+RAM");
        m.insert(0x1B, "MBC5+RAM+BATTERY");
        m.insert(0x1C, "MBC5+RUMBLE");
        m.insert(0x1D, "MBC5+RUMBLE+RAM");
        m.insert(0x1E, "MBC5+RUMBLE+RAM+BATTERY");
        m
    };
}

/// Looks up the label for a cartridge type code.
pub fn mbc_label(code: u8) -> Option<&'static str> {
    MBC_TYPES.get(&code).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels() {
        assert_eq!(mbc_label(0x00), Some("ROM_ONLY"));
        assert_eq!(mbc_label(0x01), Some("MBC1"));
        assert_eq!(mbc_label(0x13), Some("MBC3+RAM+BATTERY"));
        assert_eq!(mbc_label(0x1E), Some("MBC5+RUMBLE+RAM+BATTERY"));
    }

    #[test]
    fn unsupported_types_are_absent() {
        for code in [0x04, 0x07, 0x0B, 0x0C, 0x0D, 0x15, 0x16, 0x17, 0xFC, 0xFD, 0xFE, 0xFF] {
            assert_eq!(mbc_label(code), None, "code {:#04X} should be unsupported", code);
        }
        assert_eq!(MBC_TYPES.len(), 19);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = MBC_TYPES.values().collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), MBC_TYPES.len());
    }
}

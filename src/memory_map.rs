// --- Sizes ---
pub const KIB: usize = 0x400;

/// Switchable ROM banks are always 16 KiB on the Game Boy.
pub const ROM_BANK_SIZE: usize = 16 * KIB; // 0x4000

/// Bank tags are a single byte, so at most 256 banks can be told apart.
pub const MAX_TAGGED_BANKS: usize = 0x100;

// --- Cartridge Header (bank 0) ---
// Range: 0x0100 - 0x014F
pub const HEADER_START: usize = 0x0100;
pub const CARTRIDGE_TYPE_ADDR: usize = 0x0147; // MBC type code
pub const ROM_SIZE_ADDR: usize = 0x0148; // ROM size code
pub const RAM_SIZE_ADDR: usize = 0x0149; // RAM size code
pub const HEADER_END: usize = 0x014F;

/// Offsets of the bytes the generator patches, in write order.
pub const PATCHED_HEADER_ADDRS: [usize; 3] = [CARTRIDGE_TYPE_ADDR, ROM_SIZE_ADDR, RAM_SIZE_ADDR];

/// Returns the bank an absolute ROM offset falls into.
pub const fn bank_of(offset: usize) -> usize {
    offset / ROM_BANK_SIZE
}

/// The fill byte expected at an absolute ROM offset (bank index mod 256).
pub const fn bank_tag(offset: usize) -> u8 {
    bank_of(offset) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bytes_live_in_bank_0() {
        for addr in PATCHED_HEADER_ADDRS {
            assert!(addr >= HEADER_START && addr <= HEADER_END);
            assert_eq!(bank_of(addr), 0);
        }
    }

    #[test]
    fn bank_tag_wraps_at_256() {
        assert_eq!(bank_tag(0), 0);
        assert_eq!(bank_tag(ROM_BANK_SIZE), 1);
        assert_eq!(bank_tag(ROM_BANK_SIZE * 2 - 1), 1);
        assert_eq!(bank_tag(ROM_BANK_SIZE * 255), 0xFF);
        assert_eq!(bank_tag(ROM_BANK_SIZE * 256), 0x00);
    }
}

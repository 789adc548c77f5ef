use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::verify::LayoutMismatch;

/// Everything that can go wrong while producing one cartridge image.
#[derive(Debug)]
pub enum CartridgeError {
    /// Header 0x0147 code missing from the MBC type table.
    UnknownMbcType(u8),
    /// Header 0x0148 code missing from the ROM size table.
    UnknownRomSize(u8),
    /// Header 0x0149 code missing from the RAM size table.
    UnknownRamSize(u8),
    /// ROM size is not a whole number of 16 KiB banks.
    InvalidBanking { rom_size: usize },
    Io { path: PathBuf, source: io::Error },
    /// A written image did not read back with the expected layout.
    Verification { path: PathBuf, mismatch: LayoutMismatch },
}

pub type CartridgeResult<T> = Result<T, CartridgeError>;

impl CartridgeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CartridgeError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised before any file was touched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CartridgeError::UnknownMbcType(_)
                | CartridgeError::UnknownRomSize(_)
                | CartridgeError::UnknownRamSize(_)
                | CartridgeError::InvalidBanking { .. }
        )
    }
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::UnknownMbcType(code) => write!(f, "unknown MBC type: {:#04x}", code),
            CartridgeError::UnknownRomSize(code) => write!(f, "unknown ROM size: {:#04x}", code),
            CartridgeError::UnknownRamSize(code) => write!(f, "unknown RAM size: {:#04x}", code),
            CartridgeError::InvalidBanking { rom_size } => write!(
                f,
                "invalid ROM size for banking: {} bytes is not a multiple of the bank size",
                rom_size
            ),
            CartridgeError::Io { path, source } => {
                write!(f, "failed to write '{}': {}", path.display(), source)
            }
            CartridgeError::Verification { path, mismatch } => {
                write!(f, "'{}' failed verification: {}", path.display(), mismatch)
            }
        }
    }
}

impl std::error::Error for CartridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CartridgeError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_table() {
        assert_eq!(
            CartridgeError::UnknownMbcType(0xFF).to_string(),
            "unknown MBC type: 0xff"
        );
        assert_eq!(
            CartridgeError::UnknownRomSize(0x08).to_string(),
            "unknown ROM size: 0x08"
        );
        assert_eq!(
            CartridgeError::UnknownRamSize(0x04).to_string(),
            "unknown RAM size: 0x04"
        );
        assert!(CartridgeError::InvalidBanking { rom_size: 100 }
            .to_string()
            .starts_with("invalid ROM size for banking"));
    }

    #[test]
    fn io_errors_expose_their_source() {
        use std::error::Error;
        let err = CartridgeError::io("x.gb", io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(err.source().is_some());
        assert!(!err.is_input_error());
        assert!(CartridgeError::UnknownRamSize(9).is_input_error());
    }
}

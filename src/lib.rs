//! Synthetic Game Boy cartridge images for testing MBC detection and bank switching.
//!
//! Each generated image is filled with the index of the ROM bank every byte belongs to,
//! and carries the requested cartridge type, ROM size and RAM size codes in its header.

pub mod driver;
pub mod error;
pub mod generator;
pub mod header;
pub mod mbc;
pub mod memory_map;
pub mod verify;
pub mod worklist;

pub use error::{CartridgeError, CartridgeResult};
pub use generator::{generate, generate_in};
pub use header::{HeaderCodes, ResolvedHeader};

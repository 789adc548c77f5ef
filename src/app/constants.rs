// --- Output ---
/// Empty means the current working directory; filenames are printed bare.
pub const DEFAULT_OUT_DIR: &str = "";

// --- Logging ---
// Overridable through RUST_LOG.
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const VERBOSE_LOG_FILTER: &str = "debug";

// --- Help Text ---
pub const DESCRIPTION: &str = "Generate bank-tagged Game Boy cartridge images for MBC tests. \
     Every byte holds its ROM bank number; 0x0147-0x0149 hold the given header codes.";

//! Writes bank-tagged cartridge images.
//!
//! Every byte of a generated image holds the index (mod 256) of the 16 KiB ROM bank it
//! sits in, so a test reading through a bank-switched window can tell which bank the MBC
//! mapped. The only exceptions are the cartridge type, ROM size and RAM size header bytes,
//! which hold the codes the image was generated from.

use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{CartridgeError, CartridgeResult};
use crate::header::{HeaderCodes, ResolvedHeader};
use crate::memory_map::{PATCHED_HEADER_ADDRS, ROM_BANK_SIZE};

/// Generates one cartridge in the current working directory.
///
/// Returns the (relative) path of the file written, which is exactly the cartridge's
/// filename. Unknown codes fail before anything touches the disk.
pub fn generate(mbc_type: u8, rom_size: u8, ram_size: u8) -> CartridgeResult<PathBuf> {
    generate_in(Path::new(""), HeaderCodes::new(mbc_type, rom_size, ram_size))
}

/// Generates one cartridge inside `dir`, overwriting any file with the same name.
///
/// If writing fails after the file was created, the partial file is removed before the
/// error is returned.
pub fn generate_in(dir: &Path, codes: HeaderCodes) -> CartridgeResult<PathBuf> {
    generate_with(dir, codes, BufWriter::new)
}

/// Destination for one image file. `finish` must leave the data durably on disk.
trait ImageSink: Write + Seek {
    fn finish(self) -> io::Result<()>;
}

impl ImageSink for BufWriter<File> {
    fn finish(self) -> io::Result<()> {
        let file = self.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}

fn generate_with<S: ImageSink>(
    dir: &Path,
    codes: HeaderCodes,
    open: impl FnOnce(File) -> S,
) -> CartridgeResult<PathBuf> {
    let header = codes.resolve()?;
    let path = dir.join(header.filename());

    log::debug!(
        "{}: {} ROM banks, {} bytes RAM declared",
        codes,
        header.bank_count(),
        header.ram_bytes
    );

    let file = File::create(&path).map_err(|e| CartridgeError::io(&path, e))?;
    let mut sink = open(file);
    // The sink is dropped (closing the file) before cleanup either way.
    let written = write_image(&mut sink, &header).and_then(|()| sink.finish());
    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(&path) {
            log::warn!(
                "Could not remove partial cartridge '{}': {}",
                path.display(),
                remove_err
            );
        }
        return Err(CartridgeError::io(&path, e));
    }

    log::info!(
        "Generated {} ({} bytes, {} banks)",
        path.display(),
        header.rom_bytes,
        header.bank_count()
    );
    Ok(path)
}

/// Builds a cartridge image in memory.
pub fn build_image(codes: HeaderCodes) -> CartridgeResult<Vec<u8>> {
    let header = codes.resolve()?;
    let mut cursor = Cursor::new(Vec::with_capacity(header.rom_bytes));
    // Writing into a Vec cannot fail.
    write_image(&mut cursor, &header).map_err(|e| CartridgeError::io("<memory>", e))?;
    Ok(cursor.into_inner())
}

/// Streams the image for `header` into `out`: banks in ascending order, then the three
/// header bytes patched in place.
pub fn write_image<W: Write + Seek>(out: &mut W, header: &ResolvedHeader) -> io::Result<()> {
    let mut bank = vec![0u8; ROM_BANK_SIZE];
    for index in 0..header.bank_count() {
        bank.fill(index as u8);
        out.write_all(&bank)?;
    }

    for (addr, code) in PATCHED_HEADER_ADDRS.iter().zip(header.codes.bytes()) {
        out.seek(SeekFrom::Start(*addr as u64))?;
        out.write_all(&[code])?;
    }
    out.seek(SeekFrom::End(0))?;
    out.flush()
}

//! Streaming SHA-1 of staged files.
//!
//! Immich deduplicates by this digest (`x-immich-checksum`). Files are read
//! in fixed chunks so large videos never sit in memory as a whole.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use relay_core::constants::CHECKSUM_CHUNK_SIZE;
use sha1::{Digest, Sha1};

/// Lowercase hex SHA-1 of the file, read in 64 KiB chunks.
pub fn sha1_hex(path: &Path) -> io::Result<String> {
    sha1_hex_chunked(path, CHECKSUM_CHUNK_SIZE)
}

/// Same digest as [`sha1_hex`] with an explicit chunk size (minimum 1 byte).
pub fn sha1_hex_chunked(path: &Path, chunk_size: usize) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

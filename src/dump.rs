//! Program dump files: a raw binary form and a human-readable ASCII-decimal
//! form, for saving and reloading ROM contents through the debugger.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::LoadError;
use crate::memory::MemoryAccess;

/// Writes `mem` out byte-for-byte until the first out-of-range read.
pub fn write_binary(path: impl AsRef<Path>, mem: &dyn MemoryAccess) -> Result<(), LoadError> {
    let mut file = fs::File::create(path)?;
    let mut address: u16 = 0;
    loop {
        match mem.get_byte(address) {
            Ok(byte) => {
                file.write_all(&[byte])?;
                match address.checked_add(1) {
                    Some(next) => address = next,
                    None => break,
                }
            }
            Err(_) => break,
        }
    }
    Ok(())
}

pub fn read_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    Ok(fs::read(path)?)
}

/// Writes bytes as space-separated decimal integers.
pub fn write_ascii(path: impl AsRef<Path>, mem: &dyn MemoryAccess) -> Result<(), LoadError> {
    let mut bytes = Vec::new();
    let mut address: u16 = 0;
    loop {
        match mem.get_byte(address) {
            Ok(byte) => {
                bytes.push(byte.to_string());
                match address.checked_add(1) {
                    Some(next) => address = next,
                    None => break,
                }
            }
            Err(_) => break,
        }
    }
    fs::write(path, bytes.join(" "))?;
    Ok(())
}

/// Loads bytes written by [`write_ascii`]: splits on whitespace, parses
/// each token as a decimal byte.
pub fn read_ascii(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let text = fs::read_to_string(path)?;
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<u8>()
                .map_err(|_| LoadError::Parse(format!("not a byte: {token:?}")))
        })
        .collect()
}

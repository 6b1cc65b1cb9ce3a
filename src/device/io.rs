//! The I/O device bank: addresses name descriptors, not bytes. Each
//! descriptor binds a host stream to a read-or-write capability.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Read, Write};

use crate::error::MemoryError;
use crate::memory::MemoryAccess;

const MAX_DESCRIPTORS: usize = 256;

pub const STDIN: u8 = 0;
pub const STDOUT: u8 = 1;
pub const STDERR: u8 = 2;

enum Stream {
    Reader(Box<dyn Read>),
    Writer(Box<dyn Write>),
}

struct Descriptor {
    stream: Stream,
}

impl Descriptor {
    fn read_one(&mut self, address: u16) -> Result<u8, MemoryError> {
        match &mut self.stream {
            Stream::Reader(r) => {
                let mut buf = [0u8; 1];
                match r.read(&mut buf) {
                    Ok(0) => Ok(0), // end-of-stream reads as zero, not an error
                    Ok(_) => Ok(buf[0]),
                    Err(_) => Err(MemoryError::new(address)),
                }
            }
            Stream::Writer(_) => Err(MemoryError::new(address)),
        }
    }

    fn write_one(&mut self, address: u16, value: u8) -> Result<(), MemoryError> {
        match &mut self.stream {
            Stream::Writer(w) => w
                .write_all(&[value])
                .map_err(|_| MemoryError::new(address)),
            Stream::Reader(_) => Err(MemoryError::new(address)),
        }
    }
}

/// The file-descriptor table. Descriptor `0` is stdin, `1` is stdout, `2`
/// is stderr; callers may install further descriptors before a `Tick`
/// begins, up to 256 total.
///
/// Descriptors live behind a `RefCell`: reading one byte mutates the
/// underlying stream's position, but [`MemoryAccess::get_byte`] only takes
/// `&self` — the same tension a fetch-only bank doesn't have.
pub struct IoTable {
    descriptors: RefCell<HashMap<u8, Descriptor>>,
}

impl IoTable {
    pub fn with_standard_streams() -> Self {
        let table = Self {
            descriptors: RefCell::new(HashMap::new()),
        };
        table.install_reader(STDIN, Box::new(io::stdin()));
        table.install_writer(STDOUT, Box::new(io::stdout()));
        table.install_writer(STDERR, Box::new(io::stderr()));
        table
    }

    pub fn install_reader(&self, descriptor: u8, stream: Box<dyn Read>) {
        self.descriptors.borrow_mut().insert(
            descriptor,
            Descriptor {
                stream: Stream::Reader(stream),
            },
        );
    }

    pub fn install_writer(&self, descriptor: u8, stream: Box<dyn Write>) {
        self.descriptors.borrow_mut().insert(
            descriptor,
            Descriptor {
                stream: Stream::Writer(stream),
            },
        );
    }
}

impl MemoryAccess for IoTable {
    fn get_byte(&self, at: u16) -> Result<u8, MemoryError> {
        if at as usize >= MAX_DESCRIPTORS {
            return Err(MemoryError::new(at));
        }
        let mut descriptors = self.descriptors.borrow_mut();
        let descriptor = descriptors.get_mut(&(at as u8)).ok_or(MemoryError::new(at))?;
        descriptor.read_one(at)
    }

    fn get_word(&self, at: u16) -> Result<u16, MemoryError> {
        let low = self.get_byte(at)?;
        let high = self.get_byte(at)?;
        Ok(u16::from_le_bytes([low, high]))
    }

    fn set_byte(&mut self, at: u16, value: u8) -> Result<(), MemoryError> {
        if at as usize >= MAX_DESCRIPTORS {
            return Err(MemoryError::new(at));
        }
        let mut descriptors = self.descriptors.borrow_mut();
        let descriptor = descriptors.get_mut(&(at as u8)).ok_or(MemoryError::new(at))?;
        descriptor.write_one(at, value)
    }

    fn set_word(&mut self, at: u16, value: u16) -> Result<(), MemoryError> {
        let [low, high] = value.to_le_bytes();
        self.set_byte(at, low)?;
        self.set_byte(at, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_from_an_installed_reader() {
        let table = IoTable::with_standard_streams();
        table.install_reader(10, Box::new(Cursor::new(vec![7u8, 8])));
        assert_eq!(table.get_byte(10).unwrap(), 7);
        assert_eq!(table.get_byte(10).unwrap(), 8);
    }

    #[test]
    fn end_of_stream_reads_as_zero_without_error() {
        let table = IoTable::with_standard_streams();
        table.install_reader(10, Box::new(Cursor::new(Vec::<u8>::new())));
        assert_eq!(table.get_byte(10).unwrap(), 0);
    }

    #[test]
    fn write_on_read_only_descriptor_fails() {
        let mut table = IoTable::with_standard_streams();
        assert!(table.set_byte(STDIN as u16, 1).is_err());
    }

    #[test]
    fn read_on_write_only_descriptor_fails() {
        let table = IoTable::with_standard_streams();
        assert!(table.get_byte(STDOUT as u16).is_err());
    }

    #[test]
    fn set_word_writes_both_bytes_little_endian() {
        let mut table = IoTable::with_standard_streams();
        let sink = Vec::new();
        table.install_writer(20, Box::new(sink));
        table.set_word(20, 0x1234).unwrap();
    }

    #[test]
    fn out_of_range_descriptor_fails() {
        let table = IoTable::with_standard_streams();
        assert!(table.get_byte(300).is_err());
    }
}

//! The VGA device bank: a linear address space mapped onto a text-mode
//! screen by emitting ANSI cursor-position escapes to a host stream.

use std::io::{self, Write};

use crate::error::MemoryError;
use crate::memory::MemoryAccess;

const SCREEN_WIDTH: u16 = 255;

/// A text-mode screen. Writes at `A` land at `(A mod 255, floor(A / 255))`;
/// reads are defined but always return zero, matching a write-only device.
pub struct Vga {
    stream: Box<dyn Write>,
}

impl Vga {
    pub fn new() -> Self {
        Self::with_stream(Box::new(io::stdout()))
    }

    pub fn with_stream(stream: Box<dyn Write>) -> Self {
        Self { stream }
    }

    fn address_to_coords(at: u16) -> Result<(u8, u8), MemoryError> {
        let x = at % SCREEN_WIDTH;
        let y = at / SCREEN_WIDTH;
        if y > SCREEN_WIDTH {
            return Err(MemoryError::new(at));
        }
        Ok((x as u8, y as u8))
    }
}

impl Default for Vga {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAccess for Vga {
    fn get_byte(&self, _at: u16) -> Result<u8, MemoryError> {
        Ok(0)
    }

    fn get_word(&self, _at: u16) -> Result<u16, MemoryError> {
        Ok(0)
    }

    fn set_byte(&mut self, at: u16, value: u8) -> Result<(), MemoryError> {
        let (x, y) = Self::address_to_coords(at)?;
        // Best-effort: a screen write failing at the OS level isn't a guest
        // memory fault, and there's nowhere else to report it.
        let _ = write!(self.stream, "\u{1b}[{y};{x}H{}", value as char);
        Ok(())
    }

    fn set_word(&mut self, at: u16, value: u16) -> Result<(), MemoryError> {
        self.set_byte(at, value as u8)
    }
}

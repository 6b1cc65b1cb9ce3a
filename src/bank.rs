//! The memory-bank map: RAM, ROM, and the two device banks behind one
//! polymorphic handle so the CPU can address all four uniformly.

use crate::device::io::IoTable;
use crate::device::video::Vga;
use crate::memory::{FlatMemory, MemoryAccess};

/// Which bank the `Bnk` register selects, or which bank a fetch always
/// targets (ROM, unconditionally).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankId {
    Ram,
    Rom,
    Vga,
    Io,
}

impl BankId {
    /// Decodes the low two bits of `Bnk`'s value into a bank selector.
    /// Any value outside `0..3` cannot occur since only the low bits are
    /// consulted, so this never fails.
    pub fn from_register_value(value: u16) -> BankId {
        match value & 0b11 {
            0 => BankId::Ram,
            1 => BankId::Rom,
            2 => BankId::Vga,
            _ => BankId::Io,
        }
    }
}

/// The fixed four-entry map from bank tag to bank. Every machine has
/// exactly these four; there is no dynamic insertion.
pub struct BankMap {
    pub ram: FlatMemory,
    pub rom: FlatMemory,
    pub vga: Vga,
    pub io: IoTable,
}

impl BankMap {
    pub fn new(ram_capacity: usize, rom_capacity: usize) -> Self {
        Self {
            ram: FlatMemory::new(ram_capacity),
            rom: FlatMemory::new(rom_capacity),
            vga: Vga::new(),
            io: IoTable::with_standard_streams(),
        }
    }

    pub fn selected_mut(&mut self, id: BankId) -> &mut dyn MemoryAccess {
        match id {
            BankId::Ram => &mut self.ram,
            BankId::Rom => &mut self.rom,
            BankId::Vga => &mut self.vga,
            BankId::Io => &mut self.io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_id_decodes_from_the_low_two_bits() {
        assert_eq!(BankId::from_register_value(0), BankId::Ram);
        assert_eq!(BankId::from_register_value(1), BankId::Rom);
        assert_eq!(BankId::from_register_value(2), BankId::Vga);
        assert_eq!(BankId::from_register_value(3), BankId::Io);
        assert_eq!(BankId::from_register_value(4), BankId::Ram);
    }

    #[test]
    fn selected_mut_picks_the_matching_bank() {
        let mut map = BankMap::new(16, 16);
        map.selected_mut(BankId::Ram).set_byte(0, 7).unwrap();
        assert_eq!(map.ram.get_byte(0).unwrap(), 7);
    }
}

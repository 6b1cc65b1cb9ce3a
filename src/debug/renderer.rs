//! Turns machine state into the text blocks the debugger prints: the
//! register file, a window of memory, and a disassembly of ROM.

use crate::cpu::Cpu;
use crate::instruction::{decode, unpack2, Opcode};
use crate::memory::MemoryAccess;
use crate::register::Register;

use super::formatter::{Formatter, Resolution};

pub struct Renderer {
    pub formatter: Formatter,
}

impl Renderer {
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }

    pub fn registers(&self, cpu: &Cpu, registers: &[Register]) -> String {
        let values: Vec<String> = registers
            .iter()
            .map(|r| self.formatter.format_word(cpu.get_register(*r)))
            .collect();
        let labels: Vec<String> = registers
            .iter()
            .zip(&values)
            .map(|(r, v)| Formatter::align_label(r.name(), v))
            .collect();
        self.formatter.stitch(&labels, &[values])
    }

    /// Renders `output_len` consecutive addresses from `start_at`. In word
    /// resolution, odd addresses render blank so the same word isn't shown
    /// twice under both of its byte addresses.
    pub fn memory(&self, source: &dyn MemoryAccess, start_at: u16, output_len: u16) -> String {
        let mut positions = Vec::with_capacity(output_len as usize);
        let mut values = Vec::with_capacity(output_len as usize);
        for i in 0..output_len {
            let at = start_at.wrapping_add(i);
            positions.push(self.formatter.format_position(at));
            values.push(self.value_at(source, at));
        }
        self.formatter.stitch(&positions, &[values])
    }

    fn value_at(&self, source: &dyn MemoryAccess, at: u16) -> String {
        match self.formatter.output_as {
            Resolution::Byte => source
                .get_byte(at)
                .map(|b| self.formatter.format_byte(b))
                .unwrap_or_else(|_| " ".repeat(self.formatter.position_width())),
            Resolution::Word => {
                if at % 2 != 0 {
                    " ".repeat(self.formatter.position_width())
                } else {
                    source
                        .get_word(at)
                        .map(|w| self.formatter.format_word(w))
                        .unwrap_or_else(|_| " ".repeat(self.formatter.position_width()))
                }
            }
        }
    }

    /// Renders `output_len` addresses from `start_at` as a disassembly:
    /// position, raw word, and decoded instruction, one triple per even
    /// address. Always renders at word resolution regardless of the
    /// formatter's configured resolution.
    pub fn disassembly(&self, source: &dyn MemoryAccess, start_at: u16, output_len: u16) -> String {
        let word_formatter = Formatter::new(self.formatter.numbers, Resolution::Word, self.formatter.rendering);
        let mut positions = Vec::with_capacity(output_len as usize);
        let mut values = Vec::with_capacity(output_len as usize);
        let mut instructions = Vec::with_capacity(output_len as usize);
        for i in 0..output_len {
            let at = start_at.wrapping_add(i);
            positions.push(word_formatter.format_position(at));
            let value = Renderer { formatter: word_formatter }.value_at(source, at);
            let blank = " ".repeat(value.len().max(1));
            if i % 2 == 0 {
                instructions.push(
                    source
                        .get_word(at)
                        .map(Self::decode_instruction)
                        .unwrap_or_else(|_| blank.clone()),
                );
            } else {
                instructions.push(blank.clone());
            }
            values.push(value);
        }
        word_formatter.stitch(&positions, &[values, instructions])
    }

    fn decode_instruction(word: u16) -> String {
        let (raw_opcode, payload) = decode(word);
        match Opcode::from_u8(raw_opcode) {
            Ok(opcode) => {
                let (a, b) = unpack2(payload);
                format!("{opcode:?} :: {word:#06x} (a={a} b={b} payload={payload:#05x})")
            }
            Err(_) => format!("??? :: {word:#06x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::formatter::{Representation, RenderingDirection};
    use crate::instruction::pack2;
    use crate::memory::FlatMemory;

    #[test]
    fn registers_render_name_and_value_pairs() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::Ip, 10);
        cpu.set_register(Register::Ac, 20);
        let renderer = Renderer::new(Formatter::new(
            Representation::Decimal,
            Resolution::Word,
            RenderingDirection::Horizontal,
        ));
        let out = renderer.registers(&cpu, &[Register::Ip, Register::Ac]);
        assert!(out.contains("00010"));
        assert!(out.contains("00020"));
    }

    #[test]
    fn memory_blanks_odd_addresses_in_word_mode() {
        let mut mem = FlatMemory::new(8);
        mem.set_word(0, 0xABCD).unwrap();
        let renderer = Renderer::new(Formatter::new(
            Representation::Hex,
            Resolution::Word,
            RenderingDirection::Horizontal,
        ));
        let out = renderer.memory(&mem, 0, 2);
        let rows: Vec<&str> = out.split('\n').collect();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn disassembly_decodes_at_even_positions() {
        let mut mem = FlatMemory::new(8);
        let word = pack2(Opcode::AddRegLit.to_u8(), 0, 3);
        mem.set_word(0, word).unwrap();
        let renderer = Renderer::new(Formatter::new(
            Representation::Hex,
            Resolution::Word,
            RenderingDirection::Horizontal,
        ));
        let out = renderer.disassembly(&mem, 0, 2);
        assert!(out.contains("AddRegLit"));
    }
}

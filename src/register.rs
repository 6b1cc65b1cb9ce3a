//! The CPU's register enumeration and its two independent encodings: the
//! 4-bit micro-field used by two-operand instruction forms, and the wider
//! byte tag used by the debugger and by instructions that need to name a
//! control register.

use std::fmt;

/// One of the sixteen-bit registers a CPU exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Ip,
    Ac,
    Sp,
    Fp,
    Bnk,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
}

impl Register {
    /// All general-purpose registers, in micro-field order.
    pub const GENERAL: [Register; 8] = [
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::R5,
        Register::R6,
        Register::R7,
        Register::R8,
    ];

    /// All control registers, in debugger display order.
    pub const CONTROL: [Register; 5] = [
        Register::Ip,
        Register::Ac,
        Register::Sp,
        Register::Fp,
        Register::Bnk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Register::Ip => "Ip",
            Register::Ac => "Ac",
            Register::Sp => "Sp",
            Register::Fp => "Fp",
            Register::Bnk => "Bnk",
            Register::R1 => "R1",
            Register::R2 => "R2",
            Register::R3 => "R3",
            Register::R4 => "R4",
            Register::R5 => "R5",
            Register::R6 => "R6",
            Register::R7 => "R7",
            Register::R8 => "R8",
        }
    }

    /// Decodes a 4-bit instruction micro-field into a general-purpose
    /// register. Only `R1..R8` (encoding values `0..7`) are reachable this
    /// way; control registers have no micro-field encoding.
    pub fn from_micro_field(value: u8) -> Option<Register> {
        Register::GENERAL.get(value as usize).copied()
    }

    /// The 4-bit micro-field encoding for a general-purpose register.
    /// Returns `None` for control registers, which cannot appear in a
    /// two-operand register form.
    pub fn to_micro_field(self) -> Option<u8> {
        Register::GENERAL.iter().position(|r| *r == self).map(|i| i as u8)
    }

    /// Decodes the wider byte tag used outside instruction payloads (the
    /// debugger's register lookups, and anywhere a control register needs
    /// to be named). General registers keep their micro-field value as
    /// their tag; control registers use tags `0x10..0x14`, which cannot
    /// collide with a general register's `0..7`.
    pub fn from_byte_tag(value: u8) -> Option<Register> {
        match value {
            0x10 => Some(Register::Ip),
            0x11 => Some(Register::Ac),
            0x12 => Some(Register::Sp),
            0x13 => Some(Register::Fp),
            0x14 => Some(Register::Bnk),
            0..=7 => Register::from_micro_field(value),
            _ => None,
        }
    }

    pub fn to_byte_tag(self) -> u8 {
        match self {
            Register::Ip => 0x10,
            Register::Ac => 0x11,
            Register::Sp => 0x12,
            Register::Fp => 0x13,
            Register::Bnk => 0x14,
            _ => self.to_micro_field().expect("general register has a micro-field"),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_registers_round_trip_the_micro_field() {
        for (i, reg) in Register::GENERAL.iter().enumerate() {
            assert_eq!(reg.to_micro_field(), Some(i as u8));
            assert_eq!(Register::from_micro_field(i as u8), Some(*reg));
        }
    }

    #[test]
    fn control_registers_have_no_micro_field() {
        for reg in Register::CONTROL {
            assert_eq!(reg.to_micro_field(), None);
        }
    }

    #[test]
    fn byte_tags_round_trip_for_every_register() {
        for reg in Register::CONTROL.into_iter().chain(Register::GENERAL) {
            assert_eq!(Register::from_byte_tag(reg.to_byte_tag()), Some(reg));
        }
    }

    #[test]
    fn unknown_encodings_are_rejected() {
        assert_eq!(Register::from_micro_field(8), None);
        assert_eq!(Register::from_byte_tag(0xFF), None);
    }
}

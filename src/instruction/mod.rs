//! Instruction word encoding: the 6-bit opcode / 10-bit payload split, and
//! the further 4-bit/4-bit split used by two-operand register forms.

pub mod execution;

use crate::error::InstructionError;
use crate::register::Register;

/// Packs an opcode and a raw 10-bit payload into a little-endian instruction
/// word. Bits `15..10` are the opcode, bits `9..0` are the payload.
pub fn pack(opcode: u8, payload: u16) -> u16 {
    (payload & 0x03FF) | ((opcode as u16) << 10)
}

/// Packs an opcode with two 4-bit operands, `a` in payload bits `7..4`, `b`
/// in bits `3..0`. Payload bits `9..8` are left zero.
pub fn pack2(opcode: u8, a: u8, b: u8) -> u16 {
    let payload = (((a as u16) << 12) | ((b as u16) << 8)) >> 8;
    pack(opcode, payload)
}

/// Splits a word into its opcode and raw payload.
pub fn decode(word: u16) -> (u8, u16) {
    let opcode = ((word >> 10) & 0x3F) as u8;
    let payload = word & 0x03FF;
    (opcode, payload)
}

/// Splits a 10-bit payload into the two 4-bit fields used by two-operand
/// register forms.
pub fn unpack2(payload: u16) -> (u8, u8) {
    let a = ((payload >> 4) & 0x0F) as u8;
    let b = (payload & 0x0F) as u8;
    (a, b)
}

/// Reads a payload's 4-bit field as a general-purpose register, rejecting
/// the eight micro-field values (`8..15`) no register is assigned to.
pub fn register_field(field: u8) -> Result<Register, InstructionError> {
    Register::from_micro_field(field).ok_or(InstructionError::InvalidRegisterField(field))
}

/// Packs an opcode with two 5-bit byte-tag operands, `a` in payload bits
/// `9..5`, `b` in bits `4..0`. Used by `MOV_REG_REG`, the one two-operand
/// form that must be able to name a control register (`Ac`, `Sp`, `Fp`,
/// `Bnk`, `Ip`) as well as a general one.
pub fn pack_tags(opcode: u8, a: u8, b: u8) -> u16 {
    let payload = ((a as u16) << 5) | (b as u16 & 0x1F);
    pack(opcode, payload)
}

/// Splits a 10-bit payload into the two 5-bit byte-tag fields `MOV_REG_REG`
/// uses.
pub fn unpack_tags(payload: u16) -> (u8, u8) {
    let a = ((payload >> 5) & 0x1F) as u8;
    let b = (payload & 0x1F) as u8;
    (a, b)
}

/// Reads a 5-bit byte-tag field as any register, general or control.
pub fn register_tag(tag: u8) -> Result<Register, InstructionError> {
    Register::from_byte_tag(tag).ok_or(InstructionError::InvalidRegisterField(tag))
}

/// Every opcode the engine understands, in the exact order their numeric
/// values must stay fixed at — a saved program's bytes depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Nop = 0,
    PushReg = 1,
    PushLit = 2,
    PopReg = 3,
    MovLitR1 = 4,
    MovLitR2 = 5,
    MovLitR3 = 6,
    MovLitR4 = 7,
    MovLitR5 = 8,
    MovLitR6 = 9,
    MovLitR7 = 10,
    MovLitR8 = 11,
    MovLitAc = 12,
    MovLitBnk = 13,
    MovRegReg = 14,
    MovRegMem = 15,
    MovLitMem = 16,
    MovMemReg = 17,
    AddRegReg = 18,
    AddRegLit = 19,
    AddStack = 20,
    SubRegReg = 21,
    SubRegLit = 22,
    SubStack = 23,
    MulRegReg = 24,
    MulRegLit = 25,
    MulStack = 26,
    DivRegReg = 27,
    DivRegLit = 28,
    DivStack = 29,
    ModRegReg = 30,
    ModRegLit = 31,
    ShlRegLit = 32,
    ShrRegLit = 33,
    AndRegLit = 34,
    AndRegReg = 35,
    OrRegLit = 36,
    OrRegReg = 37,
    XorRegLit = 38,
    XorRegReg = 39,
    Jne = 40,
    Jeq = 41,
    Jgt = 42,
    Jge = 43,
    Jlt = 44,
    Jle = 45,
    Call = 46,
    Ret = 47,
    Halt = 48,
}

impl Opcode {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Decodes an opcode byte. A zero instruction word decodes to `Nop`, not
    /// `Halt` — `Halt` is its own distinct terminal opcode.
    pub fn from_u8(value: u8) -> Result<Opcode, InstructionError> {
        use Opcode::*;
        Ok(match value {
            0 => Nop,
            1 => PushReg,
            2 => PushLit,
            3 => PopReg,
            4 => MovLitR1,
            5 => MovLitR2,
            6 => MovLitR3,
            7 => MovLitR4,
            8 => MovLitR5,
            9 => MovLitR6,
            10 => MovLitR7,
            11 => MovLitR8,
            12 => MovLitAc,
            13 => MovLitBnk,
            14 => MovRegReg,
            15 => MovRegMem,
            16 => MovLitMem,
            17 => MovMemReg,
            18 => AddRegReg,
            19 => AddRegLit,
            20 => AddStack,
            21 => SubRegReg,
            22 => SubRegLit,
            23 => SubStack,
            24 => MulRegReg,
            25 => MulRegLit,
            26 => MulStack,
            27 => DivRegReg,
            28 => DivRegLit,
            29 => DivStack,
            30 => ModRegReg,
            31 => ModRegLit,
            32 => ShlRegLit,
            33 => ShrRegLit,
            34 => AndRegLit,
            35 => AndRegReg,
            36 => OrRegLit,
            37 => OrRegReg,
            38 => XorRegLit,
            39 => XorRegReg,
            40 => Jne,
            41 => Jeq,
            42 => Jgt,
            43 => Jge,
            44 => Jlt,
            45 => Jle,
            46 => Call,
            47 => Ret,
            48 => Halt,
            other => return Err(InstructionError::UnknownOpcode(other)),
        })
    }

    /// The register a `MovLitR*`/`MovLitAc`/`MovLitBnk` opcode targets.
    pub fn mov_lit_destination(self) -> Option<Register> {
        use Opcode::*;
        Some(match self {
            MovLitR1 => Register::R1,
            MovLitR2 => Register::R2,
            MovLitR3 => Register::R3,
            MovLitR4 => Register::R4,
            MovLitR5 => Register::R5,
            MovLitR6 => Register::R6,
            MovLitR7 => Register::R7,
            MovLitR8 => Register::R8,
            MovLitAc => Register::Ac,
            MovLitBnk => Register::Bnk,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_then_decode_is_identity() {
        let word = pack(Opcode::AddRegLit.to_u8(), 777);
        let (opcode, payload) = decode(word);
        assert_eq!(opcode, Opcode::AddRegLit.to_u8());
        assert_eq!(payload, 777);
    }

    #[test]
    fn pack2_then_unpack2_round_trips_both_fields() {
        for a in 0..16u8 {
            for b in 0..16u8 {
                let word = pack2(Opcode::MovRegReg.to_u8(), a, b);
                let (opcode, payload) = decode(word);
                assert_eq!(opcode, Opcode::MovRegReg.to_u8());
                assert_eq!(unpack2(payload), (a, b));
            }
        }
    }

    #[test]
    fn zero_word_decodes_to_nop_not_halt() {
        let (opcode, payload) = decode(0);
        assert_eq!(Opcode::from_u8(opcode).unwrap(), Opcode::Nop);
        assert_eq!(payload, 0);
    }

    #[test]
    fn opcode_values_follow_the_fixed_order() {
        assert_eq!(Opcode::Nop.to_u8(), 0);
        assert_eq!(Opcode::Call.to_u8(), 46);
        assert_eq!(Opcode::Ret.to_u8(), 47);
        assert_eq!(Opcode::Halt.to_u8(), 48);
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        assert_eq!(Opcode::from_u8(63), Err(InstructionError::UnknownOpcode(63)));
    }

    #[test]
    fn register_field_rejects_out_of_range_micro_fields() {
        assert!(register_field(7).is_ok());
        assert_eq!(
            register_field(9),
            Err(InstructionError::InvalidRegisterField(9))
        );
    }

    #[test]
    fn pack_tags_then_unpack_tags_round_trips_control_and_general_registers() {
        let word = pack_tags(Opcode::MovRegReg.to_u8(), Register::Ac.to_byte_tag(), Register::R1.to_byte_tag());
        let (opcode, payload) = decode(word);
        assert_eq!(opcode, Opcode::MovRegReg.to_u8());
        let (a, b) = unpack_tags(payload);
        assert_eq!(register_tag(a).unwrap(), Register::Ac);
        assert_eq!(register_tag(b).unwrap(), Register::R1);
    }
}

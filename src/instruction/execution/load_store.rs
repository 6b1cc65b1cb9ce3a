use crate::cpu::Cpu;
use crate::error::MachineError;
use crate::instruction::{register_field, register_tag, unpack2, unpack_tags, Opcode};
use crate::memory::MemoryAccess;
use crate::register::Register;

pub fn mov_lit_reg(opcode: Opcode, payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let dest = opcode
        .mov_lit_destination()
        .expect("dispatch only routes MOV_LIT_* opcodes here");
    cpu.set_register(dest, payload);
    Ok(())
}

/// Unlike the other two-operand register forms, `MOV_REG_REG` must be able
/// to name a control register (most commonly `Ac`, to read out an
/// arithmetic result), so it addresses both operands by byte tag rather
/// than by the 4-bit general-only micro-field.
pub fn mov_reg_reg(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (src, dst) = unpack_tags(payload);
    let src = register_tag(src)?;
    let dst = register_tag(dst)?;
    let value = cpu.get_register(src);
    cpu.set_register(dst, value);
    Ok(())
}

pub fn mov_reg_mem(
    payload: u16,
    cpu: &mut Cpu,
    bank: &mut dyn MemoryAccess,
) -> Result<(), MachineError> {
    let src = register_field(unpack2(payload).1)?;
    let address = cpu.get_register(Register::Ac);
    let value = cpu.get_register(src);
    bank.set_word(address, value)?;
    Ok(())
}

pub fn mov_lit_mem(
    payload: u16,
    cpu: &Cpu,
    bank: &mut dyn MemoryAccess,
) -> Result<(), MachineError> {
    let address = cpu.get_register(Register::Ac);
    bank.set_word(address, payload)?;
    Ok(())
}

pub fn mov_mem_reg(
    payload: u16,
    cpu: &mut Cpu,
    bank: &mut dyn MemoryAccess,
) -> Result<(), MachineError> {
    let (addr_reg, dst) = unpack2(payload);
    let addr_reg = register_field(addr_reg)?;
    let dst = register_field(dst)?;
    let address = cpu.get_register(addr_reg);
    let value = bank.get_word(address)?;
    cpu.set_register(dst, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FlatMemory;

    #[test]
    fn mov_lit_reg_stores_the_immediate() {
        let mut cpu = Cpu::new();
        mov_lit_reg(Opcode::MovLitR5, 777, &mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::R5), 777);
    }

    #[test]
    fn mov_reg_reg_moves_a_control_register_into_a_general_one() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::Ac, 13);
        let payload =
            crate::instruction::pack_tags(0, Register::Ac.to_byte_tag(), Register::R1.to_byte_tag());
        let (_, payload) = crate::instruction::decode(payload);
        mov_reg_reg(payload, &mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::R1), 13);
    }

    #[test]
    fn mov_reg_mem_writes_at_the_address_held_in_ac() {
        let mut cpu = Cpu::new();
        let mut ram = FlatMemory::new(64);
        cpu.set_register(Register::Ac, 10);
        cpu.set_register(Register::R2, 0xABCD);
        let payload = crate::instruction::pack2(0, 0, Register::R2.to_micro_field().unwrap());
        let (_, payload) = crate::instruction::decode(payload);
        mov_reg_mem(payload, &mut cpu, &mut ram).unwrap();
        assert_eq!(ram.get_word(10).unwrap(), 0xABCD);
    }

    #[test]
    fn mov_mem_reg_reads_the_word_at_the_address_register() {
        let mut cpu = Cpu::new();
        let mut ram = FlatMemory::new(64);
        ram.set_word(20, 4321).unwrap();
        cpu.set_register(Register::R1, 20);
        let payload = crate::instruction::pack2(
            0,
            Register::R1.to_micro_field().unwrap(),
            Register::R3.to_micro_field().unwrap(),
        );
        let (_, payload) = crate::instruction::decode(payload);
        mov_mem_reg(payload, &mut cpu, &mut ram).unwrap();
        assert_eq!(cpu.get_register(Register::R3), 4321);
    }
}

use crate::cpu::Cpu;
use crate::error::MachineError;
use crate::instruction::{register_field, unpack2};
use crate::register::Register;

fn register_and_literal(payload: u16) -> Result<(Register, u32), MachineError> {
    let (reg, lit) = unpack2(payload);
    Ok((register_field(reg)?, lit as u32))
}

fn registers(payload: u16) -> Result<(Register, Register), MachineError> {
    let (a, b) = unpack2(payload);
    Ok((register_field(a)?, register_field(b)?))
}

pub fn shl_reg_lit(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (reg, lit) = register_and_literal(payload)?;
    let value = cpu.get_register(reg);
    let result = if lit >= 16 { 0 } else { value << lit };
    cpu.set_register(Register::Ac, result);
    Ok(())
}

pub fn shr_reg_lit(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (reg, lit) = register_and_literal(payload)?;
    let value = cpu.get_register(reg);
    let result = if lit >= 16 { 0 } else { value >> lit };
    cpu.set_register(Register::Ac, result);
    Ok(())
}

pub fn and_reg_lit(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (reg, lit) = register_and_literal(payload)?;
    let result = cpu.get_register(reg) & lit as u16;
    cpu.set_register(Register::Ac, result);
    Ok(())
}

pub fn and_reg_reg(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (a, b) = registers(payload)?;
    let result = cpu.get_register(a) & cpu.get_register(b);
    cpu.set_register(Register::Ac, result);
    Ok(())
}

pub fn or_reg_lit(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (reg, lit) = register_and_literal(payload)?;
    let result = cpu.get_register(reg) | lit as u16;
    cpu.set_register(Register::Ac, result);
    Ok(())
}

pub fn or_reg_reg(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (a, b) = registers(payload)?;
    let result = cpu.get_register(a) | cpu.get_register(b);
    cpu.set_register(Register::Ac, result);
    Ok(())
}

pub fn xor_reg_lit(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (reg, lit) = register_and_literal(payload)?;
    let result = cpu.get_register(reg) ^ lit as u16;
    cpu.set_register(Register::Ac, result);
    Ok(())
}

pub fn xor_reg_reg(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let (a, b) = registers(payload)?;
    let result = cpu.get_register(a) ^ cpu.get_register(b);
    cpu.set_register(Register::Ac, result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::pack2;

    fn payload_reg_lit(reg: Register, lit: u8) -> u16 {
        crate::instruction::decode(pack2(0, reg.to_micro_field().unwrap(), lit)).1
    }

    #[test]
    fn shift_by_sixteen_or_more_yields_zero() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::R1, 0xFFFF);
        shl_reg_lit(payload_reg_lit(Register::R1, 15), &mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::Ac), 0x8000);
    }

    #[test]
    fn bitwise_and_masks_bits() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::R1, 0b1010);
        and_reg_lit(payload_reg_lit(Register::R1, 0b0110), &mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::Ac), 0b0010);
    }
}

use crate::cpu::Cpu;
use crate::error::MachineError;
use crate::instruction::{register_field, unpack2};

/// Single-register-operand forms carry their register in the payload's
/// low 4 bits; the high bits are unused.
fn single_register(payload: u16) -> u8 {
    unpack2(payload).1
}

pub fn push_reg(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let reg = register_field(single_register(payload))?;
    let value = cpu.get_register(reg);
    cpu.push(value)?;
    Ok(())
}

pub fn push_lit(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    cpu.push(payload)?;
    Ok(())
}

pub fn pop_reg(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let reg = register_field(single_register(payload))?;
    let value = cpu.pop()?;
    cpu.set_register(reg, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::Register;

    #[test]
    fn push_reg_then_pop_reg_round_trips() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::R3, 0xBEEF);
        push_reg(Register::R3.to_micro_field().unwrap() as u16, &mut cpu).unwrap();
        pop_reg(Register::R1.to_micro_field().unwrap() as u16, &mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::R1), 0xBEEF);
    }

    #[test]
    fn push_lit_pushes_the_raw_payload() {
        let mut cpu = Cpu::new();
        push_lit(42, &mut cpu).unwrap();
        assert_eq!(cpu.pop().unwrap(), 42);
    }
}

use crate::cpu::Cpu;
use crate::error::MachineError;
use crate::instruction::{register_field, unpack2};
use crate::register::Register;

/// Every conditional jump reads `Rc`/`Rt` from the same payload shape and
/// differs only in the comparison against `Ac`.
fn compare_and_maybe_jump(
    payload: u16,
    cpu: &mut Cpu,
    holds: impl Fn(u16, u16) -> bool,
) -> Result<(), MachineError> {
    let (rc, rt) = unpack2(payload);
    let rc = register_field(rc)?;
    let rt = register_field(rt)?;

    let ac = cpu.get_register(Register::Ac);
    let compare_against = cpu.get_register(rc);

    if holds(ac, compare_against) {
        cpu.set_register(Register::Ip, cpu.get_register(rt));
    }
    Ok(())
}

pub fn jne(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    compare_and_maybe_jump(payload, cpu, |ac, rc| ac != rc)
}

pub fn jeq(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    compare_and_maybe_jump(payload, cpu, |ac, rc| ac == rc)
}

pub fn jgt(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    compare_and_maybe_jump(payload, cpu, |ac, rc| ac > rc)
}

pub fn jge(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    compare_and_maybe_jump(payload, cpu, |ac, rc| ac >= rc)
}

pub fn jlt(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    compare_and_maybe_jump(payload, cpu, |ac, rc| ac < rc)
}

pub fn jle(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    compare_and_maybe_jump(payload, cpu, |ac, rc| ac <= rc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::pack2;

    fn payload(rc: Register, rt: Register) -> u16 {
        crate::instruction::decode(pack2(
            0,
            rc.to_micro_field().unwrap(),
            rt.to_micro_field().unwrap(),
        ))
        .1
    }

    #[test]
    fn jgt_compares_ac_strictly_greater_than_rc() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::Ac, 5);
        cpu.set_register(Register::R1, 3);
        cpu.set_register(Register::R2, 999);
        jgt(payload(Register::R1, Register::R2), &mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::Ip), 999);
    }

    #[test]
    fn jne_falls_through_when_equal() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::Ac, 13);
        cpu.set_register(Register::R2, 13);
        cpu.set_register(Register::R3, 999);
        cpu.set_register(Register::Ip, 10);
        jne(payload(Register::R2, Register::R3), &mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::Ip), 10);
    }
}

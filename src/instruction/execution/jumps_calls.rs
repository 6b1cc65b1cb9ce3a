use crate::cpu::Cpu;
use crate::error::MachineError;
use crate::instruction::{register_field, unpack2};
use crate::register::Register;

pub fn call(payload: u16, cpu: &mut Cpu) -> Result<(), MachineError> {
    let target = register_field(unpack2(payload).1)?;
    let target = cpu.get_register(target);
    cpu.store_frame()?;
    cpu.set_register(Register::Ip, target);
    Ok(())
}

pub fn ret(cpu: &mut Cpu) -> Result<(), MachineError> {
    cpu.restore_frame()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_then_ret_restores_caller_registers_and_resumes() {
        let mut cpu = Cpu::new();
        cpu.set_register(Register::R1, 13);
        cpu.set_register(Register::R2, 12);
        cpu.set_register(Register::R5, 225);
        cpu.set_register(Register::Ip, 6);

        let target_payload = crate::instruction::decode(crate::instruction::pack2(
            0,
            0,
            Register::R5.to_micro_field().unwrap(),
        ))
        .1;
        call(target_payload, &mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::Ip), 225);

        cpu.set_register(Register::R1, 3);
        cpu.set_register(Register::R2, 2);

        ret(&mut cpu).unwrap();
        assert_eq!(cpu.get_register(Register::R1), 13);
        assert_eq!(cpu.get_register(Register::R2), 12);
        assert_eq!(cpu.get_register(Register::Ip), 6);
    }
}

//! One executor per opcode, grouped into the same categories the ISA
//! itself falls into.

mod arithmetic;
mod branches;
mod jumps_calls;
mod load_store;
mod shifts;
mod stack;

use crate::cpu::Cpu;
use crate::error::MachineError;
use crate::instruction::Opcode;
use crate::memory::MemoryAccess;

/// Runs a single decoded instruction against `cpu` and the currently
/// selected data bank. Conditional jumps and `CALL` overwrite `Ip` directly;
/// everything else leaves it at whatever the fetch already advanced it to.
pub fn execute(
    opcode: Opcode,
    payload: u16,
    cpu: &mut Cpu,
    bank: &mut dyn MemoryAccess,
) -> Result<(), MachineError> {
    use Opcode::*;
    match opcode {
        Nop => Ok(()),
        PushReg => stack::push_reg(payload, cpu),
        PushLit => stack::push_lit(payload, cpu),
        PopReg => stack::pop_reg(payload, cpu),
        MovLitR1 | MovLitR2 | MovLitR3 | MovLitR4 | MovLitR5 | MovLitR6 | MovLitR7 | MovLitR8
        | MovLitAc | MovLitBnk => load_store::mov_lit_reg(opcode, payload, cpu),
        MovRegReg => load_store::mov_reg_reg(payload, cpu),
        MovRegMem => load_store::mov_reg_mem(payload, cpu, bank),
        MovLitMem => load_store::mov_lit_mem(payload, cpu, bank),
        MovMemReg => load_store::mov_mem_reg(payload, cpu, bank),
        AddRegReg => arithmetic::add_reg_reg(payload, cpu),
        AddRegLit => arithmetic::add_reg_lit(payload, cpu),
        AddStack => arithmetic::add_stack(cpu),
        SubRegReg => arithmetic::sub_reg_reg(payload, cpu),
        SubRegLit => arithmetic::sub_reg_lit(payload, cpu),
        SubStack => arithmetic::sub_stack(cpu),
        MulRegReg => arithmetic::mul_reg_reg(payload, cpu),
        MulRegLit => arithmetic::mul_reg_lit(payload, cpu),
        MulStack => arithmetic::mul_stack(cpu),
        DivRegReg => arithmetic::div_reg_reg(payload, cpu),
        DivRegLit => arithmetic::div_reg_lit(payload, cpu),
        DivStack => arithmetic::div_stack(cpu),
        ModRegReg => arithmetic::mod_reg_reg(payload, cpu),
        ModRegLit => arithmetic::mod_reg_lit(payload, cpu),
        ShlRegLit => shifts::shl_reg_lit(payload, cpu),
        ShrRegLit => shifts::shr_reg_lit(payload, cpu),
        AndRegLit => shifts::and_reg_lit(payload, cpu),
        AndRegReg => shifts::and_reg_reg(payload, cpu),
        OrRegLit => shifts::or_reg_lit(payload, cpu),
        OrRegReg => shifts::or_reg_reg(payload, cpu),
        XorRegLit => shifts::xor_reg_lit(payload, cpu),
        XorRegReg => shifts::xor_reg_reg(payload, cpu),
        Jne => branches::jne(payload, cpu),
        Jeq => branches::jeq(payload, cpu),
        Jgt => branches::jgt(payload, cpu),
        Jge => branches::jge(payload, cpu),
        Jlt => branches::jlt(payload, cpu),
        Jle => branches::jle(payload, cpu),
        Call => jumps_calls::call(payload, cpu),
        Ret => jumps_calls::ret(cpu),
        Halt => Ok(()), // handled by the machine loop before dispatch
    }
}

//! The top-level fetch/decode/execute loop.

use crate::bank::{BankId, BankMap};
use crate::cpu::Cpu;
use crate::error::{ExceededError, MachineError, Phase, RuntimeError};
use crate::instruction::execution::execute;
use crate::instruction::{decode, Opcode};
use crate::memory::MemoryAccess;
use crate::register::Register;

/// Default RAM capacity: the full 16-bit address space.
pub const DEFAULT_RAM_CAPACITY: usize = 0x10000;
/// Default ROM capacity: the full 16-bit address space.
pub const DEFAULT_ROM_CAPACITY: usize = 0x10000;
/// Default step limit the outer runner aborts at if the guest never halts.
pub const DEFAULT_STEP_LIMIT: usize = 65_535;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Loaded,
    Running,
    Done,
    Error,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Done | Status::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Idle,
    Fetch,
    Decode,
    Execute,
}

/// The whole machine: CPU, the four memory banks, and the status/cycle
/// bookkeeping the debugger inspects between ticks.
pub struct Machine {
    pub cpu: Cpu,
    pub banks: BankMap,
    pub status: Status,
    pub cycle: Cycle,
    ticks: usize,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            banks: BankMap::new(DEFAULT_RAM_CAPACITY, DEFAULT_ROM_CAPACITY),
            status: Status::Ready,
            cycle: Cycle::Idle,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Writes `bytes` into ROM starting at `start_address`. Overlapping
    /// loads are allowed; later writes overwrite earlier ones.
    pub fn load_program(&mut self, start_address: u16, bytes: &[u8]) -> Result<(), MachineError> {
        for (offset, byte) in bytes.iter().enumerate() {
            let address = start_address.wrapping_add(offset as u16);
            self.banks.rom.set_byte(address, *byte)?;
        }
        self.status = Status::Loaded;
        Ok(())
    }

    /// Zeroes the CPU and returns the machine to `Ready`. Memory banks are
    /// left untouched — only `LoadProgram` and direct writes mutate them.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.status = Status::Ready;
        self.cycle = Cycle::Idle;
        self.ticks = 0;
    }

    /// Runs one fetch/decode/execute cycle. A no-op once status is terminal.
    pub fn tick(&mut self) -> Result<(), MachineError> {
        if self.status.is_terminal() {
            return Ok(());
        }

        self.status = Status::Running;
        self.cycle = Cycle::Fetch;
        let ip = self.cpu.get_register(Register::Ip);
        let word = match self.banks.rom.get_word(ip) {
            Ok(w) => w,
            Err(e) => {
                self.status = Status::Error;
                return Err(MachineError::from(e).at(Phase::Fetch, format!("fetch at {ip}")));
            }
        };
        self.cpu.set_register(Register::Ip, ip.wrapping_add(2));

        self.cycle = Cycle::Decode;
        let (raw_opcode, payload) = decode(word);
        let opcode = match Opcode::from_u8(raw_opcode) {
            Ok(op) => op,
            Err(e) => {
                self.status = Status::Error;
                return Err(MachineError::from(e).at(Phase::Decode, format!("decode at {ip}")));
            }
        };

        if opcode == Opcode::Halt {
            self.status = Status::Done;
            self.cycle = Cycle::Idle;
            self.ticks += 1;
            return Ok(());
        }

        self.cycle = Cycle::Execute;
        let bank_id = BankId::from_register_value(self.cpu.get_register(Register::Bnk));
        let bank = self.banks.selected_mut(bank_id);
        if let Err(e) = execute(opcode, payload, &mut self.cpu, bank) {
            self.status = Status::Error;
            return Err(e.at(Phase::Execute, format!("execute opcode {raw_opcode:#04x} at {ip}")));
        }

        self.cycle = Cycle::Idle;
        self.ticks += 1;
        Ok(())
    }

    /// Ticks until the guest halts, errors, or `max_ticks` is exceeded.
    pub fn run_to_completion(&mut self, max_ticks: usize) -> Result<(), RuntimeError> {
        for tick_index in 0..max_ticks {
            self.tick().map_err(|e| RuntimeError::at_tick(tick_index, e))?;
            if self.status.is_terminal() {
                return Ok(());
            }
        }
        Err(RuntimeError::from(ExceededError { ticks: max_ticks }))
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

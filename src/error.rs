//! Error taxonomy for the virtual machine.
//!
//! Each subsystem gets its own small error enum; [`MachineError`] wraps
//! whichever one fired and, for errors raised during [`crate::machine::Machine::tick`],
//! the [`Phase`] the fault happened in. Every variant implements
//! [`std::error::Error::source`] so the original cause is still reachable
//! after wrapping.

use std::fmt;
use std::io;

/// Which part of a `Tick` an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetch,
    Decode,
    Execute,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Fetch => "fetch",
            Phase::Decode => "decode",
            Phase::Execute => "execute",
        };
        write!(f, "{name}")
    }
}

/// Out-of-range access against a memory-like object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryError {
    pub address: u16,
}

impl MemoryError {
    pub fn new(address: u16) -> Self {
        Self { address }
    }
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid memory access at {}", self.address)
    }
}

impl std::error::Error for MemoryError {}

/// Faults raised by the CPU's register file and stack, as opposed to
/// faults in guest-addressable memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    StackOverflow,
    StackUnderflow,
    UnknownRegister(u8),
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::StackOverflow => write!(f, "stack overflow"),
            CpuError::StackUnderflow => write!(f, "stack underflow"),
            CpuError::UnknownRegister(b) => write!(f, "unknown register byte {b:#04x}"),
        }
    }
}

impl std::error::Error for CpuError {}

/// Faults raised while decoding or executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionError {
    UnknownOpcode(u8),
    DivisionByZero,
    /// A 4-bit micro-field decoded to a value with no corresponding
    /// general-purpose register (only `0..7` are assigned).
    InvalidRegisterField(u8),
}

impl fmt::Display for InstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionError::UnknownOpcode(op) => write!(f, "unknown opcode {op:#04x}"),
            InstructionError::DivisionByZero => write!(f, "division by zero"),
            InstructionError::InvalidRegisterField(field) => {
                write!(f, "instruction payload names an unknown register field {field:#x}")
            }
        }
    }
}

impl std::error::Error for InstructionError {}

/// Faults raised while loading or dumping a program from the host filesystem.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Parse(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
            LoadError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// An unparseable line of debugger input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceError {
    pub input: String,
}

impl fmt::Display for InterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to parse command: {:?}", self.input)
    }
}

impl std::error::Error for InterfaceError {}

/// The top-level error type returned by the machine and its collaborators.
#[derive(Debug)]
pub enum MachineError {
    Memory(MemoryError),
    Cpu(CpuError),
    Instruction(InstructionError),
    Load(LoadError),
    Interface(InterfaceError),
    /// A `Memory`/`Cpu`/`Instruction` error that occurred during a specific
    /// tick phase, with the offending instruction context attached.
    Runtime {
        phase: Phase,
        context: String,
        cause: Box<MachineError>,
    },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineError::Memory(e) => write!(f, "{e}"),
            MachineError::Cpu(e) => write!(f, "{e}"),
            MachineError::Instruction(e) => write!(f, "{e}"),
            MachineError::Load(e) => write!(f, "{e}"),
            MachineError::Interface(e) => write!(f, "{e}"),
            MachineError::Runtime {
                phase,
                context,
                cause,
            } => write!(f, "{context} (during {phase}): {cause}"),
        }
    }
}

impl std::error::Error for MachineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MachineError::Memory(e) => Some(e),
            MachineError::Cpu(e) => Some(e),
            MachineError::Instruction(e) => Some(e),
            MachineError::Load(e) => Some(e),
            MachineError::Interface(e) => Some(e),
            MachineError::Runtime { cause, .. } => Some(cause.as_ref()),
        }
    }
}

impl MachineError {
    pub fn at(self, phase: Phase, context: impl Into<String>) -> MachineError {
        MachineError::Runtime {
            phase,
            context: context.into(),
            cause: Box::new(self),
        }
    }
}

impl From<MemoryError> for MachineError {
    fn from(e: MemoryError) -> Self {
        MachineError::Memory(e)
    }
}

impl From<CpuError> for MachineError {
    fn from(e: CpuError) -> Self {
        MachineError::Cpu(e)
    }
}

impl From<InstructionError> for MachineError {
    fn from(e: InstructionError) -> Self {
        MachineError::Instruction(e)
    }
}

impl From<LoadError> for MachineError {
    fn from(e: LoadError) -> Self {
        MachineError::Load(e)
    }
}

impl From<InterfaceError> for MachineError {
    fn from(e: InterfaceError) -> Self {
        MachineError::Interface(e)
    }
}

/// Raised by [`crate::machine::run_to_completion`] when the step limit is hit
/// without the guest program reaching `HALT`.
#[derive(Debug)]
pub struct ExceededError {
    pub ticks: usize,
}

impl fmt::Display for ExceededError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exceeded step limit of {} ticks without halting", self.ticks)
    }
}

impl std::error::Error for ExceededError {}

/// What [`crate::machine::Machine::run_to_completion`] returns: either a
/// guest-program fault (tagged with the tick it happened on), or the runner
/// giving up after its step limit.
#[derive(Debug)]
pub enum RuntimeError {
    Machine { tick: usize, cause: MachineError },
    Exceeded(ExceededError),
}

impl RuntimeError {
    /// Wraps a [`MachineError`] raised by the tick loop with the index of
    /// the tick that raised it.
    pub fn at_tick(tick: usize, cause: MachineError) -> Self {
        RuntimeError::Machine { tick, cause }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Machine { tick, cause } => write!(f, "at tick {tick}: {cause}"),
            RuntimeError::Exceeded(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Machine { cause, .. } => Some(cause),
            RuntimeError::Exceeded(e) => Some(e),
        }
    }
}

impl From<ExceededError> for RuntimeError {
    fn from(e: ExceededError) -> Self {
        RuntimeError::Exceeded(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_keeps_cause_chain_walkable() {
        let mem_err = MemoryError::new(60000);
        let wrapped: MachineError = mem_err.into();
        let runtime = wrapped.at(Phase::Execute, "error executing 0x05");

        assert!(runtime.to_string().contains("during execute"));
        let source = std::error::Error::source(&runtime).expect("cause preserved");
        assert!(source.to_string().contains("60000"));
    }

    #[test]
    fn display_messages_are_human_readable() {
        assert_eq!(CpuError::StackOverflow.to_string(), "stack overflow");
        assert_eq!(
            InstructionError::UnknownOpcode(0x3f).to_string(),
            "unknown opcode 0x3f"
        );
    }
}

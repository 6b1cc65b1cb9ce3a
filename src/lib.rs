//! A 16-bit register machine: memory, registers, instruction encoding and
//! execution, banked I/O, the fetch/decode/execute loop, and a debugger.

pub mod bank;
pub mod cpu;
pub mod debug;
pub mod device;
pub mod dump;
pub mod error;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod register;

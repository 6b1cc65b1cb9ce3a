//! Parses a line of debugger input into a [`Command`].

use crate::error::InterfaceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Empty input: run one fetch/decode/execute cycle.
    Tick,
    Next,
    Inspect,
    PeekRam(u16),
    PeekRom(u16),
    Registers,
    Disassemble(u16),
    Stack,
    Dump,
    Load,
    Reset,
    Quit,
}

/// Parses one line of debugger input. `current_ip` supplies the default
/// address for `p`/`d` when none is given.
pub fn parse_command(input: &str, current_ip: u16) -> Result<Command, InterfaceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Command::Tick);
    }

    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap();
    let addr = parts.next().and_then(|token| token.parse::<u16>().ok());

    match head {
        "q" | "quit" => Ok(Command::Quit),
        "n" | "next" => Ok(Command::Next),
        "i" | "inspect" => Ok(Command::Inspect),
        "m" | "ram" => Ok(Command::PeekRam(addr.unwrap_or(0))),
        "p" | "rom" => Ok(Command::PeekRom(addr.unwrap_or(current_ip))),
        "s" | "stack" => Ok(Command::Stack),
        "dump" => Ok(Command::Dump),
        "d" | "disassemble" => Ok(Command::Disassemble(addr.unwrap_or(current_ip))),
        "reset" => Ok(Command::Reset),
        "r" | "registers" => Ok(Command::Registers),
        "l" | "load" => Ok(Command::Load),
        _ => Err(InterfaceError {
            input: trimmed.to_string(),
        }),
    }
}

pub fn prompt(ticks: usize, ip: u16) -> String {
    format!("[tick: {ticks}|ip: {ip}] > ")
}

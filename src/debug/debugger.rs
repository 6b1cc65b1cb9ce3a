//! The command loop a user drives interactively: print the current view,
//! prompt, parse one line, dispatch.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::dump;
use crate::machine::Machine;
use crate::register::Register;

use super::formatter::{Formatter, RenderingDirection, Representation, Resolution};
use super::interface::{parse_command, prompt, Command};
use super::renderer::Renderer;

/// All registers in the order the debugger's `Registers`/`Inspect` views
/// show them: control registers first, then the eight general-purpose ones.
fn all_registers() -> Vec<Register> {
    Register::CONTROL.into_iter().chain(Register::GENERAL).collect()
}

pub struct Debugger<R, W> {
    machine: Machine,
    renderer: Renderer,
    dump_path: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Debugger<R, W> {
    pub fn new(machine: Machine, dump_path: impl Into<PathBuf>, input: R, output: W) -> Self {
        let formatter = Formatter::new(Representation::Decimal, Resolution::Word, RenderingDirection::Horizontal);
        Self {
            machine,
            renderer: Renderer::new(formatter),
            dump_path: dump_path.into(),
            input,
            output,
        }
    }

    /// Runs until the user quits or input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_view()?;
            let ip = self.machine.cpu.get_register(Register::Ip);
            write!(self.output, "{}", prompt(self.machine.ticks(), ip))?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            match parse_command(&line, ip) {
                Ok(Command::Quit) => return Ok(()),
                Ok(command) => self.dispatch(command)?,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Tick | Command::Next => {
                if let Err(e) = self.machine.tick() {
                    writeln!(self.output, "{e}")?;
                }
            }
            Command::Inspect => self.print_view()?,
            Command::PeekRam(at) => {
                let text = self.renderer.memory(&self.machine.banks.ram, at, 8);
                writeln!(self.output, "{text}")?;
            }
            Command::PeekRom(at) => {
                let text = self.renderer.memory(&self.machine.banks.rom, at, 8);
                writeln!(self.output, "{text}")?;
            }
            Command::Registers => {
                let text = self.renderer.registers(&self.machine.cpu, &all_registers());
                writeln!(self.output, "{text}")?;
            }
            Command::Disassemble(at) => {
                let text = self.renderer.disassembly(&self.machine.banks.rom, at, 8);
                writeln!(self.output, "{text}")?;
            }
            Command::Stack => {
                let bytes: Vec<String> = self
                    .machine
                    .cpu
                    .stack_contents()
                    .iter()
                    .map(|b| b.to_string())
                    .collect();
                writeln!(self.output, "{}", bytes.join(" "))?;
            }
            Command::Dump => {
                if let Err(e) = dump::write_binary(&self.dump_path, &self.machine.banks.rom) {
                    writeln!(self.output, "{e}")?;
                }
            }
            Command::Load => match dump::read_binary(&self.dump_path) {
                Ok(bytes) => {
                    self.machine.reset();
                    if let Err(e) = self.machine.load_program(0, &bytes) {
                        writeln!(self.output, "{e}")?;
                    }
                }
                Err(e) => writeln!(self.output, "{e}")?,
            },
            Command::Reset => self.machine.reset(),
            Command::Quit => unreachable!("handled by the caller"),
        }
        Ok(())
    }

    fn print_view(&mut self) -> io::Result<()> {
        let ip = self.machine.cpu.get_register(Register::Ip);
        let ram = self.renderer.memory(&self.machine.banks.ram, 0, 8);
        let code = self.renderer.disassembly(&self.machine.banks.rom, ip, 8);
        let registers = self.renderer.registers(&self.machine.cpu, &all_registers());
        writeln!(self.output, "{ram}\n{code}\n{registers}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{pack, Opcode};
    use std::io::Cursor;

    #[test]
    fn quit_ends_the_loop_immediately() {
        let mut machine = Machine::new();
        let bytes = pack(Opcode::Halt.to_u8(), 0).to_le_bytes();
        machine.load_program(0, &bytes).unwrap();

        let input = Cursor::new(b"q\n".to_vec());
        let mut output = Vec::new();
        let mut debugger = Debugger::new(machine, "/tmp/regvm16_debugger_test.bin", input, &mut output);
        debugger.run().unwrap();

        assert!(String::from_utf8(output).unwrap().contains("[tick: 0|ip: 0]"));
    }

    #[test]
    fn empty_line_ticks_the_machine_once() {
        let mut machine = Machine::new();
        let bytes = pack(Opcode::Halt.to_u8(), 0).to_le_bytes();
        machine.load_program(0, &bytes).unwrap();

        let input = Cursor::new(b"\nq\n".to_vec());
        let mut output = Vec::new();
        let mut debugger = Debugger::new(machine, "/tmp/regvm16_debugger_test2.bin", input, &mut output);
        debugger.run().unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("[tick: 1|ip: 0]"));
    }

    #[test]
    fn unrecognized_command_prints_an_error_and_keeps_going() {
        let machine = Machine::new();
        let input = Cursor::new(b"zzz\nq\n".to_vec());
        let mut output = Vec::new();
        let mut debugger = Debugger::new(machine, "/tmp/regvm16_debugger_test3.bin", input, &mut output);
        debugger.run().unwrap();

        assert!(String::from_utf8(output).unwrap().contains("unable to parse command"));
    }
}

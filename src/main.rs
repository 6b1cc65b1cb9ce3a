use std::env;
use std::io::{self, BufReader};
use std::process::ExitCode;

use regvm16::debug::Debugger;
use regvm16::dump;
use regvm16::machine::{Machine, DEFAULT_STEP_LIMIT};

const DEFAULT_DUMP_PATH: &str = "regvm16.bin";

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let path = args.next();

    let mut machine = Machine::new();

    match path {
        Some(path) => {
            let bytes = match dump::read_binary(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("failed to read {path}: {e}");
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = machine.load_program(0, &bytes) {
                eprintln!("failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
            match machine.run_to_completion(DEFAULT_STEP_LIMIT) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            let stdin = BufReader::new(io::stdin());
            let stdout = io::stdout();
            let mut debugger = Debugger::new(machine, DEFAULT_DUMP_PATH, stdin, stdout);
            match debugger.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

//! The interactive stepping debugger: formatting, rendering, command
//! parsing, and the loop that ties them to a [`crate::machine::Machine`].

pub mod debugger;
pub mod formatter;
pub mod interface;
pub mod renderer;

pub use debugger::Debugger;

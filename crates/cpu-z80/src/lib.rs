//! Instruction-level Z80 CPU emulator.
//!
//! Each call to [`execute_one`] fetches, decodes and executes exactly one
//! instruction against a [`Registers`] file and a flat 64K [`Memory`], and
//! returns the instruction's documented T-state cost. [`run`] drives the
//! fetch-decode-execute loop for a bounded number of instructions and keeps
//! the interrupt counter topped up.
//!
//! The implemented opcode set is partial: the 8-bit and 16-bit load families
//! (including the DD/FD indexed forms), register-pair increment/decrement,
//! accumulator add, 16-bit pair add, rotate-left and the exchange
//! instructions. Unknown opcodes fail decode with [`InvalidOpcode`] rather
//! than being silently skipped.

mod cpu;
mod dispatch;
pub mod flags;
mod memory;
pub mod ops;
mod registers;

pub use cpu::{INTERRUPT_PERIOD, RunError, run};
pub use dispatch::{InvalidOpcode, execute_one};
pub use memory::{MEMSIZE, Memory};
pub use registers::{ByteOrder, Pair, Reg8, Registers};

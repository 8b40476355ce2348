//! Bounded fetch-decode-execute loop.

use std::error::Error;
use std::fmt;

use crate::dispatch::{self, InvalidOpcode};
use crate::memory::Memory;
use crate::registers::Registers;

/// T-states between interrupt opportunities.
pub const INTERRUPT_PERIOD: i32 = 10240;

/// A decode fault raised partway through a run, with the number of
/// instructions that completed before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunError {
    pub executed: u64,
    pub fault: InvalidOpcode,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} after {} instructions", self.fault, self.executed)
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.fault)
    }
}

/// Execute up to `budget` instructions, returning the number executed.
///
/// Each completed instruction charges its T-state cost against the interrupt
/// counter; when the counter runs out it is topped up by [`INTERRUPT_PERIOD`]
/// so the overshoot carries into the next period. Interrupt service itself
/// is not modelled, so the boundary is pure bookkeeping.
pub fn run(regs: &mut Registers, mem: &mut Memory, budget: u64) -> Result<u64, RunError> {
    let mut executed = 0;
    while executed < budget {
        let t_states = dispatch::execute_one(regs, mem)
            .map_err(|fault| RunError { executed, fault })?;
        executed += 1;
        regs.counter -= t_states as i32;
        if regs.counter <= 0 {
            regs.counter += INTERRUPT_PERIOD;
        }
    }
    Ok(executed)
}

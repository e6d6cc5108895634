//! Alternate-function selection
//!
//! Each physical location may be shared between plain GPIO and one
//! peripheral role. The choice is a single bit in a function-select group;
//! for "inverted" entries a set bit means GPIO.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use wakemux_hal::{Reg, RegisterBank};

use crate::tables::{AltEntry, AltSelect};

/// Requested function of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AltFunc {
    /// Plain I/O
    Gpio,
    /// Peripheral role; the number is informational, each location has one
    Peripheral(u8),
}

impl AltFunc {
    pub const fn is_gpio(self) -> bool {
        matches!(self, AltFunc::Gpio)
    }
}

/// Program one function-select bit
pub fn apply<R: RegisterBank>(regs: &R, sel: AltSelect, func: AltFunc) {
    let reg = Reg::DevAlt(sel.group);
    // Clear when GPIO is wanted on a normal entry or the peripheral on an
    // inverted one
    if func.is_gpio() ^ sel.inverted {
        regs.clear_bits(reg, sel.mask());
    } else {
        regs.set_bits(reg, sel.mask());
    }
}

/// Select the function of `port`/`bit`
///
/// Returns `false` when the location has no entry in `table`; that is not
/// an error, many pins have no alternate function.
pub fn select<R: RegisterBank>(
    regs: &R,
    table: &[AltEntry],
    port: u8,
    bit: u8,
    func: AltFunc,
) -> bool {
    match table.iter().find(|e| e.gpio.matches(port, 1 << bit)) {
        Some(entry) => {
            apply(regs, entry.alt, func);
            true
        }
        None => false,
    }
}

/// Select the function of every pin in `mask`, returning how many had an
/// entry
pub fn select_by_mask<R: RegisterBank>(
    regs: &R,
    table: &[AltEntry],
    port: u8,
    mask: u8,
    func: AltFunc,
) -> u8 {
    let mut found = 0;
    for bit in 0..8 {
        if mask & (1 << bit) != 0 && select(regs, table, port, bit, func) {
            found += 1;
        }
    }
    found
}

//! Register coordinates and access
//!
//! Every register this layer touches is 8 bits wide and is identified by a
//! [`Reg`] coordinate rather than an address. Chip crates translate the
//! coordinate into their own memory map.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Registers repeated once per GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PortReg {
    /// Output data latch
    DataOut,
    /// Pad input level (read-only)
    DataIn,
    /// Direction, 1 = output
    Direction,
    /// Pull resistor enable
    PullEnable,
    /// Pull resistor select, 0 = up, 1 = down
    PullSelect,
    /// Output type, 1 = open-drain
    DriveType,
}

/// Registers repeated once per wake-unit (table, group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WakeReg {
    /// Edge direction / level polarity, 1 = falling or low
    Edge,
    /// Any-edge enable
    AnyEdge,
    /// Detection mode, 1 = level
    Mode,
    /// Latched pending events (read-only)
    Pending,
    /// Write 1 to clear the matching pending bit
    PendingClear,
    /// Interrupt enable
    Enable,
    /// Wake input enable
    InputEnable,
}

/// Coordinate of one 8-bit register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Reg {
    /// Per-port GPIO register
    Port { port: u8, reg: PortReg },
    /// Per-group wake-unit register
    Wake { table: u8, group: u8, reg: WakeReg },
    /// Alternate-function select group
    DevAlt(u8),
    /// Low-voltage (1.8V) select block
    LowVoltage(u8),
}

impl Reg {
    /// Shorthand for a port register
    pub const fn port(port: u8, reg: PortReg) -> Self {
        Reg::Port { port, reg }
    }

    /// Shorthand for a wake-unit register
    pub const fn wake(table: u8, group: u8, reg: WakeReg) -> Self {
        Reg::Wake { table, group, reg }
    }
}

/// Access to the 8-bit registers of the I/O subsystem
///
/// Methods take `&self` because the underlying registers are shared
/// hardware state touched from both thread and interrupt context.
/// Read-modify-write sequences are not atomic; callers must mask the
/// affected interrupt line while reconfiguring a wake source.
pub trait RegisterBank {
    /// Read a register
    fn read(&self, reg: Reg) -> u8;

    /// Write a register
    fn write(&self, reg: Reg, value: u8);

    /// Read, transform and write back a register
    fn modify<F: FnOnce(u8) -> u8>(&self, reg: Reg, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// Set the bits in `mask`
    fn set_bits(&self, reg: Reg, mask: u8) {
        self.modify(reg, |v| v | mask);
    }

    /// Clear the bits in `mask`
    fn clear_bits(&self, reg: Reg, mask: u8) {
        self.modify(reg, |v| v & !mask);
    }

    /// Set or clear the bits in `mask`
    fn assign_bits(&self, reg: Reg, mask: u8, set: bool) {
        if set {
            self.set_bits(reg, mask);
        } else {
            self.clear_bits(reg, mask);
        }
    }
}

impl<T: RegisterBank + ?Sized> RegisterBank for &T {
    fn read(&self, reg: Reg) -> u8 {
        (**self).read(reg)
    }

    fn write(&self, reg: Reg, value: u8) {
        (**self).write(reg, value)
    }
}

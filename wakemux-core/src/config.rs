//! Table validation
//!
//! Lookups are first-match and never fail at runtime, so mistakes in the
//! static tables show up as pins that silently do nothing. [`validate`]
//! catches them; run it from a unit test of the board crate or once at
//! start-up.

use core::fmt;

use heapless::FnvIndexSet;

use crate::gpio::GpioError;
use crate::tables::{BoardTables, ChipTables, GpioLocation, Module, Signal};

/// Upper bound on table rows checked for duplicates
pub const MAX_CHECKED_ENTRIES: usize = 256;

/// Problems found in a set of tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two alternate-function rows for the same location
    DuplicateAltLocation { port: u8, bit: u8 },
    /// Two low-voltage rows for the same location
    DuplicateLowVoltageLocation { port: u8, bit: u8 },
    /// More interrupt rows than declared signals
    TooManyInterrupts { interrupts: usize, signals: usize },
    /// Interrupt-capable signal without a pin
    InvalidWakeSource(Signal),
    /// Signal on a port the chip does not have
    InvalidPort(Signal),
    /// Default flags that `configure` would reject
    ConflictingFlags(Signal, GpioError),
    /// Name already used by an earlier signal
    DuplicateName(Signal),
    /// Module row on a port the chip does not have
    InvalidModulePort(Module),
    /// Module row flags that `configure_module` would reject
    ConflictingModuleFlags(Module, GpioError),
    /// More rows than [`MAX_CHECKED_ENTRIES`]
    TableTooLarge,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateAltLocation { port, bit } => {
                write!(f, "duplicate alternate function for {:X}.{}", port, bit)
            }
            ConfigError::DuplicateLowVoltageLocation { port, bit } => {
                write!(f, "duplicate low-voltage control for {:X}.{}", port, bit)
            }
            ConfigError::TooManyInterrupts {
                interrupts,
                signals,
            } => write!(f, "{} interrupt rows for {} signals", interrupts, signals),
            ConfigError::InvalidWakeSource(s) => write!(f, "signal {} has no pin to wake on", s),
            ConfigError::InvalidPort(s) => write!(f, "signal {} is on a missing port", s),
            ConfigError::ConflictingFlags(s, e) => write!(f, "signal {}: {}", s, e),
            ConfigError::DuplicateName(s) => write!(f, "signal {} reuses a name", s),
            ConfigError::InvalidModulePort(m) => write!(f, "module {} is on a missing port", m.0),
            ConfigError::ConflictingModuleFlags(m, e) => write!(f, "module {}: {}", m.0, e),
            ConfigError::TableTooLarge => f.write_str("table too large to check"),
        }
    }
}

fn location_key(loc: &GpioLocation) -> u16 {
    (u16::from(loc.port) << 3) | u16::from(loc.bit)
}

/// Check chip and board tables for consistency
///
/// Returns the first problem found.
pub fn validate(chip: &ChipTables, board: &BoardTables) -> Result<(), ConfigError> {
    let mut seen: FnvIndexSet<u16, MAX_CHECKED_ENTRIES> = FnvIndexSet::new();
    for entry in chip.alt.iter().filter(|e| e.gpio.valid) {
        let fresh = seen
            .insert(location_key(&entry.gpio))
            .map_err(|_| ConfigError::TableTooLarge)?;
        if !fresh {
            return Err(ConfigError::DuplicateAltLocation {
                port: entry.gpio.port,
                bit: entry.gpio.bit,
            });
        }
    }

    seen.clear();
    for loc in chip.low_voltage.iter().flatten().filter(|l| l.valid) {
        let fresh = seen
            .insert(location_key(loc))
            .map_err(|_| ConfigError::TableTooLarge)?;
        if !fresh {
            return Err(ConfigError::DuplicateLowVoltageLocation {
                port: loc.port,
                bit: loc.bit,
            });
        }
    }

    if board.interrupt_count() > board.signals.len() {
        return Err(ConfigError::TooManyInterrupts {
            interrupts: board.interrupt_count(),
            signals: board.signals.len(),
        });
    }

    let mut names: FnvIndexSet<&str, MAX_CHECKED_ENTRIES> = FnvIndexSet::new();
    for (index, info) in board.signals.iter().enumerate() {
        let signal = Signal(index);

        let fresh = names
            .insert(info.name)
            .map_err(|_| ConfigError::TableTooLarge)?;
        if !fresh {
            return Err(ConfigError::DuplicateName(signal));
        }

        if index < board.interrupt_count() && info.mask == 0 {
            return Err(ConfigError::InvalidWakeSource(signal));
        }

        if info.mask != 0 && info.port >= chip.port_count {
            return Err(ConfigError::InvalidPort(signal));
        }

        info.flags
            .check()
            .map_err(|e| ConfigError::ConflictingFlags(signal, e))?;
    }

    for row in board.modules {
        if row.port >= chip.port_count {
            return Err(ConfigError::InvalidModulePort(row.module));
        }
        row.flags
            .check()
            .map_err(|e| ConfigError::ConflictingModuleFlags(row.module, e))?;
    }

    Ok(())
}

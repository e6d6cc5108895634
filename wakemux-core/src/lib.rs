//! Chip-independent pin multiplexing and wake-interrupt routing
//!
//! This crate maps named board signals onto physical port/bit locations and
//! programs them through a [`wakemux_hal::RegisterBank`]:
//!
//! - Alternate-function selection (GPIO vs peripheral role)
//! - Electrical configuration (direction, drive, pull, 1.8V level)
//! - Wake-unit trigger setup and interrupt enable
//! - Dispatch of latched wake events to per-signal handlers
//! - Consistency checks for the static tables
//!
//! All tables are `&'static` data supplied by the chip crate
//! ([`ChipTables`]) and the board ([`BoardTables`]); nothing allocates.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to the other modules
mod fmt;

pub mod alt;
pub mod config;
pub mod dispatch;
pub mod flags;
pub mod gpio;
pub mod lvol;
pub mod tables;
pub mod wui;

#[cfg(test)]
mod testing;

pub use alt::AltFunc;
pub use config::{validate, ConfigError};
pub use dispatch::{Dispatch, Priority, SideAction, SideEvent, SideSource, Vector};
pub use flags::{PinFlags, Trigger};
pub use gpio::{Gpio, GpioError, ResetKind, SignalPin};
pub use tables::{
    AltEntry, AltSelect, BoardTables, ChipTables, GpioInfo, GpioInterrupt, GpioLocation,
    IrqHandler, LowVoltageRow, Module, ModuleAlt, Signal, WakeGroup, WuiCoord,
};

//! Simulated register bank for host-side testing
//!
//! Models the behaviour the driver depends on:
//!
//! - `PendingClear` is write-1-to-clear and always reads back as zero
//! - `Pending` is only changed by [`SimRegisters::raise`] and `PendingClear`
//! - `DataIn` reflects the output latch on pins configured as outputs and
//!   the externally driven level everywhere else
//! - optionally, setting an `InputEnable` bit latches a spurious pending
//!   event, as real wake units may do
//!
//! Every write is recorded so tests can check ordering.

use std::sync::Mutex;
use std::vec::Vec;

use crate::regs::{PortReg, Reg, RegisterBank, WakeReg};

/// Number of GPIO ports modelled
pub const SIM_PORTS: usize = 16;
/// Number of wake tables modelled
pub const SIM_WAKE_TABLES: usize = 2;
/// Number of groups per wake table
pub const SIM_WAKE_GROUPS: usize = 8;
/// Number of alternate-function groups modelled
pub const SIM_DEVALT_GROUPS: usize = 16;
/// Number of low-voltage blocks modelled
pub const SIM_LOW_VOLTAGE_BLOCKS: usize = 8;

#[derive(Clone, Copy)]
struct PortState {
    data_out: u8,
    pad_in: u8,
    direction: u8,
    pull_enable: u8,
    pull_select: u8,
    drive_type: u8,
}

#[derive(Clone, Copy)]
struct WakeState {
    edge: u8,
    any_edge: u8,
    mode: u8,
    pending: u8,
    enable: u8,
    input_enable: u8,
}

impl PortState {
    const RESET: Self = Self {
        data_out: 0,
        pad_in: 0,
        direction: 0,
        pull_enable: 0,
        pull_select: 0,
        drive_type: 0,
    };
}

impl WakeState {
    const RESET: Self = Self {
        edge: 0,
        any_edge: 0,
        mode: 0,
        pending: 0,
        enable: 0,
        input_enable: 0,
    };
}

struct State {
    ports: [PortState; SIM_PORTS],
    wake: [[WakeState; SIM_WAKE_GROUPS]; SIM_WAKE_TABLES],
    devalt: [u8; SIM_DEVALT_GROUPS],
    low_voltage: [u8; SIM_LOW_VOLTAGE_BLOCKS],
    spurious_pending: bool,
    writes: Vec<(Reg, u8)>,
}

/// In-memory stand-in for the I/O register map
pub struct SimRegisters {
    state: Mutex<State>,
}

impl Default for SimRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRegisters {
    /// Create a bank with every register cleared
    ///
    /// `const` so a bank can live in a `static` next to the controller.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(State {
                ports: [PortState::RESET; SIM_PORTS],
                wake: [[WakeState::RESET; SIM_WAKE_GROUPS]; SIM_WAKE_TABLES],
                devalt: [0; SIM_DEVALT_GROUPS],
                low_voltage: [0; SIM_LOW_VOLTAGE_BLOCKS],
                spurious_pending: false,
                writes: Vec::new(),
            }),
        }
    }

    /// Latch a pending event whenever an `InputEnable` bit goes 0 -> 1
    pub fn set_spurious_pending(&self, enabled: bool) {
        self.lock().spurious_pending = enabled;
    }

    /// Assert pending bits of a wake group, as the hardware would
    pub fn raise(&self, table: u8, group: u8, mask: u8) {
        self.lock().wake[table as usize][group as usize].pending |= mask;
    }

    /// Drive the external level seen on input pins of a port
    pub fn drive_input(&self, port: u8, mask: u8, high: bool) {
        let mut state = self.lock();
        let pad = &mut state.ports[port as usize].pad_in;
        if high {
            *pad |= mask;
        } else {
            *pad &= !mask;
        }
    }

    /// Read a register without recording anything
    pub fn peek(&self, reg: Reg) -> u8 {
        Self::load(&self.lock(), reg)
    }

    /// Overwrite a register without recording the write or applying any
    /// hardware side effect
    pub fn poke(&self, reg: Reg, value: u8) {
        let mut state = self.lock();
        match reg {
            Reg::Port { port, reg } => {
                let p = &mut state.ports[port as usize];
                match reg {
                    PortReg::DataOut => p.data_out = value,
                    PortReg::DataIn => p.pad_in = value,
                    PortReg::Direction => p.direction = value,
                    PortReg::PullEnable => p.pull_enable = value,
                    PortReg::PullSelect => p.pull_select = value,
                    PortReg::DriveType => p.drive_type = value,
                }
            }
            Reg::Wake { table, group, reg } => {
                let w = &mut state.wake[table as usize][group as usize];
                match reg {
                    WakeReg::Edge => w.edge = value,
                    WakeReg::AnyEdge => w.any_edge = value,
                    WakeReg::Mode => w.mode = value,
                    WakeReg::Pending => w.pending = value,
                    WakeReg::PendingClear => {}
                    WakeReg::Enable => w.enable = value,
                    WakeReg::InputEnable => w.input_enable = value,
                }
            }
            Reg::DevAlt(group) => state.devalt[group as usize] = value,
            Reg::LowVoltage(block) => state.low_voltage[block as usize] = value,
        }
    }

    /// All writes performed through [`RegisterBank`] so far, oldest first
    pub fn writes(&self) -> Vec<(Reg, u8)> {
        self.lock().writes.clone()
    }

    /// Forget the recorded writes
    pub fn clear_writes(&self) {
        self.lock().writes.clear();
    }

    /// Index of the last recorded write to `reg`, if any
    pub fn last_write_index(&self, reg: Reg) -> Option<usize> {
        self.lock().writes.iter().rposition(|(r, _)| *r == reg)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panicking test must not poison the bank for the assertions
        // that follow it
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn load(state: &State, reg: Reg) -> u8 {
        match reg {
            Reg::Port { port, reg } => {
                let p = &state.ports[port as usize];
                match reg {
                    PortReg::DataOut => p.data_out,
                    PortReg::DataIn => (p.pad_in & !p.direction) | (p.data_out & p.direction),
                    PortReg::Direction => p.direction,
                    PortReg::PullEnable => p.pull_enable,
                    PortReg::PullSelect => p.pull_select,
                    PortReg::DriveType => p.drive_type,
                }
            }
            Reg::Wake { table, group, reg } => {
                let w = &state.wake[table as usize][group as usize];
                match reg {
                    WakeReg::Edge => w.edge,
                    WakeReg::AnyEdge => w.any_edge,
                    WakeReg::Mode => w.mode,
                    WakeReg::Pending => w.pending,
                    WakeReg::PendingClear => 0,
                    WakeReg::Enable => w.enable,
                    WakeReg::InputEnable => w.input_enable,
                }
            }
            Reg::DevAlt(group) => state.devalt[group as usize],
            Reg::LowVoltage(block) => state.low_voltage[block as usize],
        }
    }
}

impl RegisterBank for SimRegisters {
    fn read(&self, reg: Reg) -> u8 {
        Self::load(&self.lock(), reg)
    }

    fn write(&self, reg: Reg, value: u8) {
        let mut state = self.lock();
        state.writes.push((reg, value));
        let spurious = state.spurious_pending;

        match reg {
            Reg::Port { port, reg } => {
                let p = &mut state.ports[port as usize];
                match reg {
                    PortReg::DataOut => p.data_out = value,
                    // Pad level is not writable
                    PortReg::DataIn => {}
                    PortReg::Direction => p.direction = value,
                    PortReg::PullEnable => p.pull_enable = value,
                    PortReg::PullSelect => p.pull_select = value,
                    PortReg::DriveType => p.drive_type = value,
                }
            }
            Reg::Wake { table, group, reg } => {
                let w = &mut state.wake[table as usize][group as usize];
                match reg {
                    WakeReg::Edge => w.edge = value,
                    WakeReg::AnyEdge => w.any_edge = value,
                    WakeReg::Mode => w.mode = value,
                    WakeReg::Pending => {}
                    WakeReg::PendingClear => w.pending &= !value,
                    WakeReg::Enable => w.enable = value,
                    WakeReg::InputEnable => {
                        if spurious {
                            w.pending |= value & !w.input_enable;
                        }
                        w.input_enable = value;
                    }
                }
            }
            Reg::DevAlt(group) => state.devalt[group as usize] = value,
            Reg::LowVoltage(block) => state.low_voltage[block as usize] = value,
        }
    }
}

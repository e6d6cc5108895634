//! Shared fixtures for unit tests

#![allow(dead_code)]

use core::cell::RefCell;
use std::vec::Vec;

use crate::alt::AltFunc;
use crate::dispatch::SideEvent;
use crate::flags::PinFlags;
use crate::tables::{
    AltEntry, AltSelect, BoardTables, ChipTables, GpioInfo, GpioInterrupt, GpioLocation,
    LowVoltageRow, Module, ModuleAlt, Signal, WuiCoord,
};

std::thread_local! {
    static CALLS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    static EVENTS: RefCell<Vec<SideEvent>> = const { RefCell::new(Vec::new()) };
}

/// Handler that records the signal it was called for
pub fn record(signal: Signal) {
    CALLS.with(|c| c.borrow_mut().push(signal.0));
}

pub fn record_event(event: SideEvent) {
    EVENTS.with(|e| e.borrow_mut().push(event));
}

/// Take the handler calls recorded on this thread
pub fn take_calls() -> Vec<usize> {
    CALLS.with(|c| core::mem::take(&mut *c.borrow_mut()))
}

pub fn take_events() -> Vec<SideEvent> {
    EVENTS.with(|e| core::mem::take(&mut *e.borrow_mut()))
}

pub const LID_OPEN: Signal = Signal(0);
pub const AC_PRESENT: Signal = Signal(1);
pub const POWER_BUTTON: Signal = Signal(2);
pub const WP_L: Signal = Signal(3);
pub const ALIAS_A: Signal = Signal(4);
pub const VOLUME_UP: Signal = Signal(5);
pub const ALIAS_B: Signal = Signal(6);
pub const EN_PP3300: Signal = Signal(7);
pub const ENTERING_RW: Signal = Signal(8);
pub const I2C_SDA: Signal = Signal(9);
pub const SPARE: Signal = Signal(10);

pub static SIGNALS: [GpioInfo; 11] = [
    GpioInfo::new("LID_OPEN", 0xD, 2, PinFlags::INT_BOTH),
    GpioInfo::new("AC_PRESENT", 0xA, 4, PinFlags::INT_RISING),
    GpioInfo::new("POWER_BUTTON", 0, 0, PinFlags::INT_BOTH),
    GpioInfo::new("WP_L", 9, 3, PinFlags::INT_LOW),
    GpioInfo::new("ALIAS_A", 6, 0, PinFlags::INT_FALLING),
    GpioInfo::new("VOLUME_UP", 8, 3, PinFlags::INT_FALLING),
    GpioInfo::new("ALIAS_B", 6, 1, PinFlags::INT_FALLING),
    GpioInfo::new("EN_PP3300", 7, 4, PinFlags::OUT_LOW),
    GpioInfo::new("ENTERING_RW", 7, 5, PinFlags::OUT_HIGH),
    GpioInfo::new(
        "I2C_SDA",
        0xB,
        2,
        PinFlags::ODR_HIGH.union(PinFlags::SEL_1P8V),
    ),
    GpioInfo::new(
        "SPARE",
        0xE,
        7,
        PinFlags::DEFAULT.union(PinFlags::OUT_HIGH),
    ),
];

pub static INTERRUPTS: [GpioInterrupt; 7] = [
    GpioInterrupt::new(WuiCoord::new(1, 0, 2), record),
    GpioInterrupt::new(WuiCoord::new(0, 1, 4), record),
    GpioInterrupt::new(WuiCoord::new(0, 3, 1), record),
    GpioInterrupt::new(WuiCoord::new(1, 2, 3), record),
    GpioInterrupt::new(WuiCoord::new(0, 3, 6), record),
    GpioInterrupt::new(WuiCoord::new(0, 3, 0), record),
    // Same wake bit as ALIAS_A
    GpioInterrupt::new(WuiCoord::new(0, 3, 6), record),
];

pub static MODULES: [ModuleAlt; 3] = [
    ModuleAlt::new(
        Module::I2C,
        0xB,
        0b0000_1100,
        AltFunc::Peripheral(0),
        PinFlags::SEL_1P8V,
    ),
    ModuleAlt::new(
        Module::MCO,
        0xC,
        0b0000_0001,
        AltFunc::Peripheral(1),
        PinFlags::OUT_LOW,
    ),
    // Shares ALIAS_A's pin and wake bit
    ModuleAlt::new(
        Module::TACH,
        6,
        0b0000_0001,
        AltFunc::Peripheral(2),
        PinFlags::INT_BOTH,
    ),
];

const N: GpioLocation = GpioLocation::NONE;

pub static ALT: [AltEntry; 4] = [
    AltEntry::new(GpioLocation::new(0xB, 2), AltSelect::new(2, 1)),
    AltEntry::new(GpioLocation::new(0xB, 3), AltSelect::new(2, 1)),
    AltEntry::new(GpioLocation::new(0xC, 0), AltSelect::new(4, 6)),
    AltEntry::new(GpioLocation::new(0, 0), AltSelect::inverted(7, 0)),
];

pub static LOW_VOLTAGE: [LowVoltageRow; 1] = [[
    GpioLocation::new(0xB, 3),
    GpioLocation::new(0xB, 2),
    N,
    N,
    N,
    N,
    N,
    GpioLocation::new(0, 0),
]];

pub static PRE_INIT_ALT: [AltSelect; 3] = [
    AltSelect::inverted(0, 3),
    AltSelect::inverted(0, 7),
    AltSelect::inverted(1, 4),
];

pub static CHIP: ChipTables = ChipTables {
    port_count: 15,
    alt: &ALT,
    low_voltage: &LOW_VOLTAGE,
    pre_init_alt: &PRE_INIT_ALT,
};

pub static BOARD: BoardTables = BoardTables {
    signals: &SIGNALS,
    interrupts: &INTERRUPTS,
    modules: &MODULES,
    side_event: Some(record_event),
};

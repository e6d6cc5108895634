//! Static location tables
//!
//! Chip crates describe where alternate functions and voltage-domain
//! controls live; boards describe their signals and which of them are wired
//! to the wake unit. Everything here is built with `const fn` constructors
//! into `&'static` slices.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::alt::AltFunc;
use crate::dispatch::SideEvent;
use crate::flags::PinFlags;

/// Bits per port and per register
pub const PINS_PER_PORT: u8 = 8;
/// Wake-unit tables
pub const WAKE_TABLES: u8 = 2;
/// Groups per wake-unit table
pub const WAKE_GROUPS: u8 = 8;

/// Physical pin location
///
/// Invalid locations pad fixed-size rows and never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpioLocation {
    pub port: u8,
    pub bit: u8,
    pub valid: bool,
}

impl GpioLocation {
    /// Padding entry
    pub const NONE: Self = Self {
        port: 0,
        bit: 0,
        valid: false,
    };

    /// Create a valid location
    pub const fn new(port: u8, bit: u8) -> Self {
        assert!(bit < PINS_PER_PORT, "bit out of range");
        Self {
            port,
            bit,
            valid: true,
        }
    }

    /// Single-bit mask of this location
    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }

    /// Whether this is exactly the single pin `mask` of `port`
    pub const fn matches(&self, port: u8, mask: u8) -> bool {
        self.valid && self.port == port && self.mask() == mask
    }
}

/// Function-select bit for one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AltSelect {
    /// Function-select register group
    pub group: u8,
    /// Bit within the group
    pub bit: u8,
    /// Setting the bit selects GPIO rather than the peripheral
    pub inverted: bool,
}

impl AltSelect {
    /// Set bit selects the peripheral
    pub const fn new(group: u8, bit: u8) -> Self {
        assert!(bit < 8, "bit out of range");
        Self {
            group,
            bit,
            inverted: false,
        }
    }

    /// Set bit selects GPIO
    pub const fn inverted(group: u8, bit: u8) -> Self {
        assert!(bit < 8, "bit out of range");
        Self {
            group,
            bit,
            inverted: true,
        }
    }

    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }
}

/// Alternate-function table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AltEntry {
    pub gpio: GpioLocation,
    pub alt: AltSelect,
}

impl AltEntry {
    pub const fn new(gpio: GpioLocation, alt: AltSelect) -> Self {
        Self { gpio, alt }
    }
}

/// One low-voltage control block: position in the row is the bit in the
/// block register
pub type LowVoltageRow = [GpioLocation; 8];

/// Wake-unit coordinate, packed as `table:2 | group:3 | bit:3`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WuiCoord(u8);

impl WuiCoord {
    /// Create a coordinate, rejecting out-of-range parts at compile time
    /// when used in a `const` table
    pub const fn new(table: u8, group: u8, bit: u8) -> Self {
        assert!(table < WAKE_TABLES, "wake table out of range");
        assert!(group < WAKE_GROUPS, "wake group out of range");
        assert!(bit < 8, "wake bit out of range");
        Self((table << 6) | (group << 3) | bit)
    }

    pub const fn table(&self) -> u8 {
        self.0 >> 6
    }

    pub const fn group(&self) -> u8 {
        (self.0 >> 3) & 0x7
    }

    pub const fn bit(&self) -> u8 {
        self.0 & 0x7
    }

    pub const fn mask(&self) -> u8 {
        1 << self.bit()
    }

    /// The (table, group) register pair this coordinate lives in
    pub const fn wake_group(&self) -> WakeGroup {
        WakeGroup {
            table: self.table(),
            group: self.group(),
        }
    }

    /// Raw packed value
    pub const fn raw(&self) -> u8 {
        self.0
    }
}

impl fmt::Debug for WuiCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WUI({}, {}, {})", self.table(), self.group(), self.bit())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WuiCoord {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "WUI({}, {}, {})", self.table(), self.group(), self.bit())
    }
}

/// Wake-unit (table, group) register pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WakeGroup {
    pub table: u8,
    pub group: u8,
}

impl WakeGroup {
    pub const fn new(table: u8, group: u8) -> Self {
        assert!(table < WAKE_TABLES, "wake table out of range");
        assert!(group < WAKE_GROUPS, "wake group out of range");
        Self { table, group }
    }
}

/// Chip-level tables
#[derive(Debug, Clone, Copy)]
pub struct ChipTables {
    /// Number of GPIO ports
    pub port_count: u8,
    /// Alternate-function locations, first match wins
    pub alt: &'static [AltEntry],
    /// Low-voltage control blocks, index is the block register
    pub low_voltage: &'static [LowVoltageRow],
    /// Function-select bits switched to GPIO before any signal is configured
    pub pre_init_alt: &'static [AltSelect],
}

/// Index of a logical signal in [`BoardTables::signals`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signal(pub usize);

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Named logical signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GpioInfo {
    pub name: &'static str,
    pub port: u8,
    /// Pins of the port this signal covers, usually one bit
    pub mask: u8,
    /// Flags applied by pre-init
    pub flags: PinFlags,
}

impl GpioInfo {
    pub const fn new(name: &'static str, port: u8, bit: u8, flags: PinFlags) -> Self {
        assert!(bit < PINS_PER_PORT, "bit out of range");
        Self {
            name,
            port,
            mask: 1 << bit,
            flags,
        }
    }

    /// Placeholder signal that pre-init leaves untouched
    pub const fn unimplemented(name: &'static str) -> Self {
        Self {
            name,
            port: 0,
            mask: 0,
            flags: PinFlags::DEFAULT,
        }
    }
}

/// Interrupt handler bound to a signal
pub type IrqHandler = fn(Signal);

/// Wake-unit wiring of an interrupt-capable signal
#[derive(Debug, Clone, Copy)]
pub struct GpioInterrupt {
    pub wui: WuiCoord,
    pub handler: IrqHandler,
}

impl GpioInterrupt {
    pub const fn new(wui: WuiCoord, handler: IrqHandler) -> Self {
        Self { wui, handler }
    }
}

/// Peripheral module identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Module(pub u8);

impl Module {
    pub const UART: Module = Module(0);
    pub const I2C: Module = Module(1);
    pub const SPI: Module = Module(2);
    pub const ADC: Module = Module(3);
    pub const PWM: Module = Module(4);
    pub const TACH: Module = Module(5);
    pub const KEYBOARD_SCAN: Module = Module(6);
    /// Clock output
    pub const MCO: Module = Module(7);
}

/// Pins a peripheral module needs and how to configure them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleAlt {
    pub module: Module,
    pub port: u8,
    pub mask: u8,
    pub func: AltFunc,
    pub flags: PinFlags,
}

impl ModuleAlt {
    pub const fn new(module: Module, port: u8, mask: u8, func: AltFunc, flags: PinFlags) -> Self {
        Self {
            module,
            port,
            mask,
            func,
            flags,
        }
    }
}

/// Board-level tables
///
/// Interrupt-capable signals are the first `interrupts.len()` entries of
/// `signals`; `interrupts[i]` wires `signals[i]`.
#[derive(Debug, Clone, Copy)]
pub struct BoardTables {
    pub signals: &'static [GpioInfo],
    pub interrupts: &'static [GpioInterrupt],
    pub modules: &'static [ModuleAlt],
    /// Notified when a non-GPIO wake source sharing a vector fires
    pub side_event: Option<fn(SideEvent)>,
}

impl BoardTables {
    /// Number of interrupt-capable signals
    pub const fn interrupt_count(&self) -> usize {
        self.interrupts.len()
    }
}

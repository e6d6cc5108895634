//! Pin configuration flags

use bitflags::bitflags;

use crate::gpio::GpioError;

bitflags! {
    /// Requested configuration of one or more pins
    ///
    /// Flags combine freely; [`PinFlags::check`] rejects the combinations
    /// that cannot be programmed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PinFlags: u32 {
        /// Input direction (also the default when OUTPUT is absent)
        const INPUT = 1 << 0;
        /// Output direction
        const OUTPUT = 1 << 1;
        /// Open-drain output stage
        const OPEN_DRAIN = 1 << 2;
        /// Internal pull-up
        const PULL_UP = 1 << 3;
        /// Internal pull-down
        const PULL_DOWN = 1 << 4;
        /// Initial output level low
        const LOW = 1 << 5;
        /// Initial output level high
        const HIGH = 1 << 6;
        /// Trigger on rising edge
        const INT_F_RISING = 1 << 7;
        /// Trigger on falling edge
        const INT_F_FALLING = 1 << 8;
        /// Trigger while low
        const INT_F_LOW = 1 << 9;
        /// Trigger while high
        const INT_F_HIGH = 1 << 10;
        /// Leave the pin alone during pre-init
        const DEFAULT = 1 << 11;
        /// 1.8V voltage domain
        const SEL_1P8V = 1 << 12;

        const OUT_LOW = Self::OUTPUT.bits() | Self::LOW.bits();
        const OUT_HIGH = Self::OUTPUT.bits() | Self::HIGH.bits();
        const ODR_LOW = Self::OUT_LOW.bits() | Self::OPEN_DRAIN.bits();
        const ODR_HIGH = Self::OUT_HIGH.bits() | Self::OPEN_DRAIN.bits();
        const INPUT_PULL_UP = Self::INPUT.bits() | Self::PULL_UP.bits();
        const INPUT_PULL_DOWN = Self::INPUT.bits() | Self::PULL_DOWN.bits();
        const INT_RISING = Self::INPUT.bits() | Self::INT_F_RISING.bits();
        const INT_FALLING = Self::INPUT.bits() | Self::INT_F_FALLING.bits();
        const INT_BOTH = Self::INT_RISING.bits() | Self::INT_F_FALLING.bits();
        const INT_LOW = Self::INPUT.bits() | Self::INT_F_LOW.bits();
        const INT_HIGH = Self::INPUT.bits() | Self::INT_F_HIGH.bits();

        /// Any edge trigger flag
        const INT_EDGE = Self::INT_F_RISING.bits() | Self::INT_F_FALLING.bits();
        /// Any level trigger flag
        const INT_LEVEL = Self::INT_F_LOW.bits() | Self::INT_F_HIGH.bits();
        /// Any trigger flag
        const INT_ANY = Self::INT_EDGE.bits() | Self::INT_LEVEL.bits();
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PinFlags({=u32:#x})", self.bits())
    }
}

/// Wake-unit trigger selected by a set of flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// No trigger flag set
    None,
    Rising,
    Falling,
    /// Rising and falling together
    AnyEdge,
    High,
    Low,
}

impl Trigger {
    /// Level triggers use level detection mode
    pub const fn is_level(self) -> bool {
        matches!(self, Trigger::High | Trigger::Low)
    }
}

impl PinFlags {
    /// Trigger encoded by these flags
    ///
    /// Level flags take precedence over edge flags, and HIGH over LOW.
    pub const fn trigger(self) -> Trigger {
        if self.contains(Self::INT_F_HIGH) {
            Trigger::High
        } else if self.contains(Self::INT_F_LOW) {
            Trigger::Low
        } else if self.contains(Self::INT_EDGE) {
            Trigger::AnyEdge
        } else if self.contains(Self::INT_F_RISING) {
            Trigger::Rising
        } else if self.contains(Self::INT_F_FALLING) {
            Trigger::Falling
        } else {
            Trigger::None
        }
    }

    /// Whether any trigger flag is set
    pub const fn has_trigger(self) -> bool {
        self.intersects(Self::INT_ANY)
    }

    /// Whether the pin ends up driven
    pub const fn is_output(self) -> bool {
        self.contains(Self::OUTPUT)
    }

    /// Reject flag combinations that have no register encoding
    pub const fn check(self) -> Result<(), GpioError> {
        if self.contains(Self::PULL_UP.union(Self::PULL_DOWN)) {
            return Err(GpioError::ConflictingPull);
        }
        if self.contains(Self::INT_LEVEL) {
            return Err(GpioError::ConflictingLevel);
        }
        Ok(())
    }

    /// Same flags without an initial output level
    ///
    /// Used on warm restart so that lines the rest of the system is still
    /// relying on keep the level they had.
    pub const fn without_level(self) -> Self {
        self.difference(Self::LOW.union(Self::HIGH))
    }
}

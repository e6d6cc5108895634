//! Signal-level pin abstractions
//!
//! A configured logical signal can be handed to a peripheral driver as a
//! plain digital pin. Drivers only see these traits, never the register map
//! or the signal tables behind them.

/// Digital output on one logical signal
///
/// Writes go to the port's output latch. Whether the level reaches the pad
/// depends on the direction and drive type the signal was configured with.
pub trait OutputPin {
    /// Drive the signal high (set the output latch bit)
    fn set_high(&mut self);

    /// Drive the signal low (clear the output latch bit)
    fn set_low(&mut self);

    /// Set the output latch to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Invert the output latch
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Check whether the output latch is set
    fn is_set_high(&self) -> bool;

    /// Check whether the output latch is clear
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input on one logical signal
pub trait InputPin {
    /// Sample the pad level
    fn is_high(&self) -> bool;

    /// Sample the pad level, inverted
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Signal that is both sampled and driven
///
/// Open-drain lines (I2C, wired-OR resets) are read back while they are
/// being driven.
pub trait IoPin: OutputPin + InputPin {}

impl<T: OutputPin + InputPin> IoPin for T {}

//! NPCX support for wakemux
//!
//! Provides the chip half of the pin-mux and wake-interrupt layer:
//!
//! - [`Mmio`] - `RegisterBank` over the GPIO, MIWU and SCFG registers
//! - [`CHIP_TABLES`] - alternate-function, low-voltage and pre-init tables
//! - [`VECTORS`] - the wake-unit interrupt lines and the groups they serve
//! - [`enable_irqs`], [`bind`], [`on_interrupt`] - bring-up and ISR entry
//!
//! # Features
//!
//! - `uart-module2` - UART on port 6 instead of the KSO08/KSO09 pins
//! - `tach-sel2` - tachometer inputs on the second pin set
//! - `lpc` / `espi` - host bus wake and reset share the E-H vector
//! - `shi` - eSPI pins to GPIO, table 1 group F at elevated priority
//! - `host-rtc` - RTC alarm shares the A/D vector
//! - `peci` - keep the PECI pin out of pre-init GPIO selection
//! - `keyscan` - leave the KSI vector to the keyboard scanner
//! - `defmt` - debug formatting and logging
//! - `log` - logging through the `log` facade instead of defmt
//!
//! # Usage
//!
//! ```ignore
//! static GPIO: Gpio<'static, Mmio> = Gpio::new(Mmio, &CHIP_TABLES, &BOARD);
//!
//! GPIO.pre_init(ResetKind::Cold);
//! wakemux_hal_npcx::bind(&GPIO);
//! wakemux_hal_npcx::enable_irqs(&mut Nvic(&mut core_peripherals.NVIC));
//!
//! #[interrupt]
//! fn WKINTA_1() {
//!     wakemux_hal_npcx::on_interrupt(irqn::WKINTA_1);
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to the other modules
mod fmt;

pub mod irq;
pub mod mmio;
pub mod tables;

pub use irq::{bind, enable_irqs, irqn, on_interrupt, IrqControl, Nvic, VECTORS};
pub use mmio::Mmio;
pub use tables::{ALT_TABLE, CHIP_TABLES, LOW_VOLTAGE_TABLE, PORT_COUNT, PRE_INIT_ALT};

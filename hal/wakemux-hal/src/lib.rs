//! wakemux Hardware Abstraction Layer
//!
//! This crate defines the register-level seam between the chip-independent
//! pin-mux/wake-interrupt logic in `wakemux-core` and the chip crates that
//! own the actual register map.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Board integration (static tables)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wakemux-core (configure / dispatch)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wakemux-hal (this crate - registers)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ wakemux-hal-  │       │  sim (host    │
//! │     npcx      │       │   testing)    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`regs::RegisterBank`] - 8-bit register access with read-modify-write helpers
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O on a single signal

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "sim")]
extern crate std;

pub mod gpio;
pub mod regs;
#[cfg(feature = "sim")]
pub mod sim;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use regs::{PortReg, Reg, RegisterBank, WakeReg};

//! Wake-unit interrupt configuration
//!
//! Each interrupt-capable signal owns one bit of one (table, group) in the
//! wake unit. None of these sequences are atomic with respect to the
//! dispatcher; mask the vector while reprogramming a trigger.

use wakemux_hal::{Reg, RegisterBank, WakeReg};

use crate::flags::{PinFlags, Trigger};
use crate::tables::WuiCoord;

fn reg(wui: WuiCoord, reg: WakeReg) -> Reg {
    Reg::wake(wui.table(), wui.group(), reg)
}

/// Program detection mode and polarity for `flags`
///
/// With a trigger the wake input is enabled and any pending event latched
/// while reprogramming is discarded. Without one the source is disabled
/// and its pending bit left alone.
pub fn configure<R: RegisterBank>(regs: &R, wui: WuiCoord, flags: PinFlags) {
    let mask = wui.mask();
    let trigger = flags.trigger();

    match trigger {
        Trigger::None => {
            regs.clear_bits(reg(wui, WakeReg::Enable), mask);
            return;
        }
        Trigger::High | Trigger::Low => {
            regs.set_bits(reg(wui, WakeReg::Mode), mask);
            regs.assign_bits(reg(wui, WakeReg::Edge), mask, trigger == Trigger::Low);
        }
        Trigger::AnyEdge => {
            regs.clear_bits(reg(wui, WakeReg::Mode), mask);
            regs.set_bits(reg(wui, WakeReg::AnyEdge), mask);
        }
        Trigger::Rising | Trigger::Falling => {
            regs.clear_bits(reg(wui, WakeReg::Mode), mask);
            regs.clear_bits(reg(wui, WakeReg::AnyEdge), mask);
            regs.assign_bits(reg(wui, WakeReg::Edge), mask, trigger == Trigger::Falling);
        }
    }

    regs.set_bits(reg(wui, WakeReg::InputEnable), mask);
    // Enabling the input may latch a stale event
    clear_pending(regs, wui);
}

/// Let a pending event raise the interrupt
pub fn enable<R: RegisterBank>(regs: &R, wui: WuiCoord) {
    regs.set_bits(reg(wui, WakeReg::Enable), wui.mask());
}

/// Stop a pending event from raising the interrupt; the event stays latched
pub fn disable<R: RegisterBank>(regs: &R, wui: WuiCoord) {
    regs.clear_bits(reg(wui, WakeReg::Enable), wui.mask());
}

/// Discard a latched event
///
/// The clear register is write-1-to-clear, so only this source's bit is
/// written.
pub fn clear_pending<R: RegisterBank>(regs: &R, wui: WuiCoord) {
    regs.write(reg(wui, WakeReg::PendingClear), wui.mask());
}

/// Whether the source is enabled and has a latched event
pub fn is_active<R: RegisterBank>(regs: &R, wui: WuiCoord) -> bool {
    let active = regs.read(reg(wui, WakeReg::Pending)) & regs.read(reg(wui, WakeReg::Enable));
    active & wui.mask() != 0
}

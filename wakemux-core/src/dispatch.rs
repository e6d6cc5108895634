//! Wake-interrupt dispatch
//!
//! A hardware vector serves one or more (table, group) pairs. Each pass
//! snapshots `pending & enable` for a group, then walks the interrupt-capable
//! signals in declaration order. A matching bit is cleared before its
//! handler runs and dropped from the snapshot afterwards, so a bit declared
//! twice fires once.

use wakemux_hal::{Reg, RegisterBank, WakeReg};

use crate::tables::{BoardTables, Signal, WakeGroup, WuiCoord};
use crate::wui;

/// Interrupt priority tier of a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Priority {
    /// Regular wake sources
    Default,
    /// Latency-sensitive sources (chip select of a host interface)
    Elevated,
}

/// Non-GPIO event sharing a wake group with GPIO sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SideEvent {
    /// Host bus activity woke the chip
    HostWake,
    /// Host bus reset (LRESET or eSPI reset) changed state
    BusReset,
    /// Real-time clock alarm for the host
    RtcAlarm,
}

/// What servicing a side source does to its registers before the board is
/// notified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SideAction {
    /// One-shot source: disable it and discard the event
    DisableAndClear,
    /// Discard the event
    Clear,
    /// Leave the registers to the board handler
    Delegate,
}

/// Non-GPIO source checked before the generic pass of a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SideSource {
    pub wui: WuiCoord,
    pub event: SideEvent,
    pub action: SideAction,
    /// Only pending is checked, not enable
    pub pending_only: bool,
}

impl SideSource {
    /// Source that fires when enabled and pending
    pub const fn new(wui: WuiCoord, event: SideEvent, action: SideAction) -> Self {
        Self {
            wui,
            event,
            action,
            pending_only: false,
        }
    }

    /// Source that fires whenever its pending bit is set
    pub const fn pending_only(self) -> Self {
        Self {
            pending_only: true,
            ..self
        }
    }

    fn is_active<R: RegisterBank>(&self, regs: &R) -> bool {
        if self.pending_only {
            let pending = Reg::wake(self.wui.table(), self.wui.group(), WakeReg::Pending);
            regs.read(pending) & self.wui.mask() != 0
        } else {
            wui::is_active(regs, self.wui)
        }
    }
}

/// Hardware interrupt vector serving wake groups
#[derive(Debug, Clone, Copy)]
pub struct Vector {
    /// Interrupt number
    pub irq: u16,
    pub priority: Priority,
    /// Groups scanned by the generic pass, in order
    pub groups: &'static [WakeGroup],
    /// Checked in order before the generic pass
    pub side: &'static [SideSource],
}

/// Something that can service a wake vector from interrupt context
pub trait Dispatch {
    /// Service `vector`, returning the number of GPIO handlers called
    fn service(&self, vector: &Vector) -> usize;
}

/// One dispatch pass over a wake group
///
/// Returns the number of handlers called. Bits that become pending after
/// the snapshot stay latched and raise the vector again.
pub fn dispatch_group<R: RegisterBank>(regs: &R, board: &BoardTables, group: WakeGroup) -> usize {
    let pending = regs.read(Reg::wake(group.table, group.group, WakeReg::Pending));
    let enabled = regs.read(Reg::wake(group.table, group.group, WakeReg::Enable));
    let mut mask = pending & enabled;
    let mut fired = 0;

    for (index, irq) in board.interrupts.iter().enumerate() {
        if mask == 0 {
            break;
        }
        let bit = irq.wui.mask();
        if irq.wui.wake_group() != group || mask & bit == 0 {
            continue;
        }

        wui::clear_pending(regs, irq.wui);
        trace!("wake source {} fired", Signal(index));
        (irq.handler)(Signal(index));
        mask &= !bit;
        fired += 1;
    }

    fired
}

/// Service a vector
///
/// The first active side source is handled on its own and the generic pass
/// is skipped; GPIO bits still pending re-enter the vector.
pub fn service<R: RegisterBank>(regs: &R, board: &BoardTables, vector: &Vector) -> usize {
    if let Some(source) = vector.side.iter().find(|s| s.is_active(regs)) {
        service_side(regs, board, source);
        return 0;
    }

    vector
        .groups
        .iter()
        .map(|group| dispatch_group(regs, board, *group))
        .sum()
}

fn service_side<R: RegisterBank>(regs: &R, board: &BoardTables, source: &SideSource) {
    match source.action {
        SideAction::DisableAndClear => {
            wui::disable(regs, source.wui);
            wui::clear_pending(regs, source.wui);
        }
        SideAction::Clear => wui::clear_pending(regs, source.wui),
        SideAction::Delegate => {}
    }

    match board.side_event {
        Some(notify) => notify(source.event),
        None if source.action == SideAction::Delegate => {
            // Nobody will clear it, so stop it from re-entering forever
            warn!("unhandled side source {}", source.wui.raw());
            wui::disable(regs, source.wui);
        }
        None => {}
    }
}

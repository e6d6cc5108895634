//! Wake-unit interrupt vectors
//!
//! Sixteen wake groups share twelve NVIC lines. Table 0 groups A and D share
//! a line with the RTC alarm, E-H share one with the host bus wake and reset
//! sources.

use core::cell::Cell;

use critical_section::Mutex;
use wakemux_core::{Dispatch, Priority, SideSource, Vector, WakeGroup};
#[cfg(any(feature = "lpc", feature = "espi", feature = "host-rtc"))]
use wakemux_core::{SideAction, SideEvent, WuiCoord};

/// NVIC line numbers of the wake vectors
pub mod irqn {
    pub const MTC_WKINTAD_0: u16 = 7;
    pub const WKINTEFGH_0: u16 = 11;
    pub const WKINTC_0: u16 = 15;
    pub const TWD_WKINTB_0: u16 = 31;
    pub const WKINTA_1: u16 = 48;
    pub const WKINTB_1: u16 = 49;
    pub const KSI_WKINTC_1: u16 = 50;
    pub const WKINTD_1: u16 = 51;
    pub const WKINTE_1: u16 = 52;
    pub const WKINTF_1: u16 = 53;
    pub const WKINTG_1: u16 = 54;
    pub const WKINTH_1: u16 = 55;
}

/// Priority bits implemented by the NVIC
pub const NVIC_PRIO_BITS: u8 = 3;

/// NVIC priority byte for a tier
pub const fn nvic_priority(priority: Priority) -> u8 {
    let level = match priority {
        Priority::Elevated => 1,
        Priority::Default => 2,
    };
    level << (8 - NVIC_PRIO_BITS)
}

#[cfg(feature = "host-rtc")]
const RTC_SIDE: &[SideSource] = &[SideSource::new(
    WuiCoord::new(0, 3, 7),
    SideEvent::RtcAlarm,
    SideAction::Clear,
)
.pending_only()];
#[cfg(not(feature = "host-rtc"))]
const RTC_SIDE: &[SideSource] = &[];

#[cfg(any(feature = "lpc", feature = "espi"))]
const HOST_WAKE: SideSource = SideSource::new(
    WuiCoord::new(0, 4, 6),
    SideEvent::HostWake,
    SideAction::DisableAndClear,
);

#[cfg(feature = "espi")]
const HOST_SIDE: &[SideSource] = &[
    HOST_WAKE,
    SideSource::new(
        WuiCoord::new(0, 4, 5),
        SideEvent::BusReset,
        SideAction::Delegate,
    ),
];
#[cfg(all(feature = "lpc", not(feature = "espi")))]
const HOST_SIDE: &[SideSource] = &[
    HOST_WAKE,
    SideSource::new(
        WuiCoord::new(0, 4, 7),
        SideEvent::BusReset,
        SideAction::Delegate,
    ),
];
#[cfg(not(any(feature = "lpc", feature = "espi")))]
const HOST_SIDE: &[SideSource] = &[];

#[cfg(feature = "shi")]
const SHI_CS_PRIORITY: Priority = Priority::Elevated;
#[cfg(not(feature = "shi"))]
const SHI_CS_PRIORITY: Priority = Priority::Default;

/// Vector serving one wake group at default priority
macro_rules! single {
    ($irq:expr, $table:literal, $group:literal) => {
        single!($irq, $table, $group, Priority::Default)
    };
    ($irq:expr, $table:literal, $group:literal, $priority:expr) => {
        Vector {
            irq: $irq,
            priority: $priority,
            groups: &[WakeGroup::new($table, $group)],
            side: &[],
        }
    };
}

/// Every wake vector, in the order they are enabled
pub static VECTORS: &[Vector] = &[
    Vector {
        irq: irqn::MTC_WKINTAD_0,
        priority: Priority::Default,
        groups: &[WakeGroup::new(0, 0), WakeGroup::new(0, 3)],
        side: RTC_SIDE,
    },
    Vector {
        irq: irqn::WKINTEFGH_0,
        priority: Priority::Default,
        groups: &[
            WakeGroup::new(0, 4),
            WakeGroup::new(0, 5),
            WakeGroup::new(0, 6),
            WakeGroup::new(0, 7),
        ],
        side: HOST_SIDE,
    },
    single!(irqn::WKINTC_0, 0, 2),
    single!(irqn::TWD_WKINTB_0, 0, 1),
    single!(irqn::WKINTA_1, 1, 0),
    single!(irqn::WKINTB_1, 1, 1),
    // The keyboard scanner services KSI wake-ups itself
    #[cfg(not(feature = "keyscan"))]
    single!(irqn::KSI_WKINTC_1, 1, 2),
    single!(irqn::WKINTD_1, 1, 3),
    single!(irqn::WKINTE_1, 1, 4),
    single!(irqn::WKINTF_1, 1, 5, SHI_CS_PRIORITY),
    single!(irqn::WKINTG_1, 1, 6),
    single!(irqn::WKINTH_1, 1, 7),
];

/// Vector served by NVIC line `irq`
pub fn vector(irq: u16) -> Option<&'static Vector> {
    VECTORS.iter().find(|v| v.irq == irq)
}

/// Interrupt controller operations needed to bring the vectors up
pub trait IrqControl {
    fn set_priority(&mut self, irq: u16, priority: Priority);
    fn unmask(&mut self, irq: u16);
}

#[derive(Clone, Copy)]
struct IrqNumber(u16);

// SAFETY: every number handed out comes from `VECTORS`, which only lists
// lines that exist on the chip
#[allow(unsafe_code)]
unsafe impl cortex_m::interrupt::InterruptNumber for IrqNumber {
    fn number(self) -> u16 {
        self.0
    }
}

/// Cortex-M NVIC
pub struct Nvic<'a>(pub &'a mut cortex_m::peripheral::NVIC);

impl IrqControl for Nvic<'_> {
    #[allow(unsafe_code)]
    fn set_priority(&mut self, irq: u16, priority: Priority) {
        // SAFETY: priorities are only changed during start-up, before the
        // vectors are unmasked, so no priority-based critical section can
        // be broken
        unsafe { self.0.set_priority(IrqNumber(irq), nvic_priority(priority)) }
    }

    #[allow(unsafe_code)]
    fn unmask(&mut self, irq: u16) {
        // SAFETY: pins and wake unit are configured by `pre_init` before
        // this runs
        unsafe { cortex_m::peripheral::NVIC::unmask(IrqNumber(irq)) }
    }
}

/// Prioritise and unmask every wake vector
///
/// Call once after `Gpio::pre_init` and [`bind`].
pub fn enable_irqs<C: IrqControl>(ctl: &mut C) {
    for v in VECTORS {
        ctl.set_priority(v.irq, v.priority);
        ctl.unmask(v.irq);
        debug!("wake vector {} enabled", v.irq);
    }
}

type Bound = Option<&'static (dyn Dispatch + Sync)>;

static BOUND: Mutex<Cell<Bound>> = Mutex::new(Cell::new(None));

/// Install the controller the vectors dispatch to
pub fn bind(dispatch: &'static (dyn Dispatch + Sync)) {
    critical_section::with(|cs| BOUND.borrow(cs).set(Some(dispatch)));
}

/// Common body of every wake vector
///
/// Returns the number of GPIO handlers called. Lines that are not wake
/// vectors, or arrive before [`bind`], do nothing.
pub fn on_interrupt(irq: u16) -> usize {
    let Some(vector) = vector(irq) else {
        return 0;
    };
    let bound = critical_section::with(|cs| BOUND.borrow(cs).get());
    match bound {
        Some(dispatch) => dispatch.service(vector),
        None => {
            warn!("wake vector {} before bind", irq);
            0
        }
    }
}

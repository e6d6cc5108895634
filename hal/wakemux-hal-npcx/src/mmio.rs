//! Memory-mapped register bank
//!
//! Translates [`Reg`] coordinates into NPCX addresses. All registers are
//! byte wide and accessed with single volatile loads and stores.

use wakemux_hal::{PortReg, Reg, RegisterBank, WakeReg};

/// GPIO port 0; port `n` is at `GPIO_BASE + (n << 13)`
pub const GPIO_BASE: usize = 0x4008_1000;
/// Wake unit table 0; table 1 follows at `+ MIWU_STRIDE`
pub const MIWU_BASE: usize = 0x400B_B000;
pub const MIWU_STRIDE: usize = 0x2000;
/// System configuration block holding DEVALT and LV_GPIO_CTL
pub const SCFG_BASE: usize = 0x400C_3000;

const DEVALT_OFFSET: usize = 0x010;
const LV_GPIO_CTL_OFFSET: usize = 0x02A;

/// Offset of a wake register within its table
///
/// Groups F-H (5-7) sit after the A-E block, so each register kind has a
/// split layout.
const fn miwu_offset(group: u8, reg: WakeReg) -> usize {
    let g = group as usize;
    let high = g >= 5;
    match reg {
        WakeReg::Edge => 2 * g + if high { 0x1E } else { 0 },
        WakeReg::AnyEdge => 0x01 + 2 * g + if high { 0x1E } else { 0 },
        WakeReg::Pending => 0x0A + 4 * g + if high { 0x10 } else { 0 },
        WakeReg::PendingClear => 0x0C + 4 * g + if high { 0x10 } else { 0 },
        WakeReg::Enable => 0x1E + 2 * g + if high { 0x12 } else { 0 },
        WakeReg::InputEnable => 0x1F + 2 * g + if high { 0x12 } else { 0 },
        WakeReg::Mode => 0x70 + g,
    }
}

const fn port_offset(reg: PortReg) -> usize {
    match reg {
        PortReg::DataOut => 0,
        PortReg::DataIn => 1,
        PortReg::Direction => 2,
        PortReg::PullEnable => 3,
        PortReg::PullSelect => 4,
        PortReg::DriveType => 6,
    }
}

/// Absolute address of a register
pub const fn address(reg: Reg) -> usize {
    match reg {
        Reg::Port { port, reg } => GPIO_BASE + ((port as usize) << 13) + port_offset(reg),
        Reg::Wake { table, group, reg } => {
            MIWU_BASE + MIWU_STRIDE * table as usize + miwu_offset(group, reg)
        }
        Reg::DevAlt(group) => SCFG_BASE + DEVALT_OFFSET + group as usize,
        Reg::LowVoltage(block) => SCFG_BASE + LV_GPIO_CTL_OFFSET + block as usize,
    }
}

/// The NPCX I/O registers
///
/// Zero-sized; every instance aliases the same hardware. Callers own the
/// usual rule of one controller per chip.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mmio;

impl RegisterBank for Mmio {
    #[allow(unsafe_code)]
    fn read(&self, reg: Reg) -> u8 {
        // SAFETY: `address` only yields byte registers of the GPIO, MIWU and
        // SCFG blocks, which are always mapped and side-effect free to read
        unsafe { core::ptr::read_volatile(address(reg) as *const u8) }
    }

    #[allow(unsafe_code)]
    fn write(&self, reg: Reg, value: u8) {
        // SAFETY: as for `read`; writes to read-only registers are ignored
        // by the hardware
        unsafe { core::ptr::write_volatile(address(reg) as *mut u8, value) }
    }
}

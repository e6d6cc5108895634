//! Low-voltage (1.8V) input level selection

use wakemux_hal::{Reg, RegisterBank};

use crate::tables::LowVoltageRow;

/// Select the 1.8V (`enable`) or 3.3V detection level for one pin
///
/// `mask` must name exactly one pin. Returns `false` and touches nothing
/// when the pin has no low-voltage control.
pub fn select<R: RegisterBank>(
    regs: &R,
    rows: &[LowVoltageRow],
    port: u8,
    mask: u8,
    enable: bool,
) -> bool {
    for (block, row) in rows.iter().enumerate() {
        if let Some(bit) = row.iter().position(|loc| loc.matches(port, mask)) {
            regs.assign_bits(Reg::LowVoltage(block as u8), 1 << bit, enable);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::GpioLocation;
    use wakemux_hal::sim::SimRegisters;

    const N: GpioLocation = GpioLocation::NONE;

    static ROWS: &[LowVoltageRow] = &[
        [
            GpioLocation::new(0xB, 5),
            GpioLocation::new(0xB, 4),
            N,
            N,
            N,
            N,
            N,
            N,
        ],
        [
            GpioLocation::new(9, 2),
            N,
            N,
            GpioLocation::new(0xD, 0),
            N,
            N,
            N,
            N,
        ],
    ];

    #[test]
    fn test_select_sets_block_bit() {
        let regs = SimRegisters::new();
        assert!(select(&regs, ROWS, 0xD, 0x01, true));
        assert_eq!(regs.peek(Reg::LowVoltage(1)), 0b0000_1000);

        assert!(select(&regs, ROWS, 0xD, 0x01, false));
        assert_eq!(regs.peek(Reg::LowVoltage(1)), 0);
    }

    #[test]
    fn test_position_is_register_bit() {
        let regs = SimRegisters::new();
        regs.poke(Reg::LowVoltage(0), 0b1000_0000);
        select(&regs, ROWS, 0xB, 1 << 4, true);
        assert_eq!(regs.peek(Reg::LowVoltage(0)), 0b1000_0010);
    }

    #[test]
    fn test_unlisted_pin_is_noop() {
        let regs = SimRegisters::new();
        assert!(!select(&regs, ROWS, 2, 0x01, true));
        // Padding never matches port 0 bit 0
        assert!(!select(&regs, ROWS, 0, 0x01, true));
        // Multi-pin masks never match
        assert!(!select(&regs, ROWS, 0xB, 0b0011_0000, true));
        assert!(regs.writes().is_empty());
    }
}

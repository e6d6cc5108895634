//! NPCX pin tables
//!
//! Port numbering follows the datasheet: ports 0-9 then A-E as 10-14.

use wakemux_core::{AltEntry, AltSelect, ChipTables, GpioLocation, LowVoltageRow};

pub const PORT_0: u8 = 0x0;
pub const PORT_1: u8 = 0x1;
pub const PORT_2: u8 = 0x2;
pub const PORT_3: u8 = 0x3;
pub const PORT_4: u8 = 0x4;
pub const PORT_5: u8 = 0x5;
pub const PORT_6: u8 = 0x6;
pub const PORT_7: u8 = 0x7;
pub const PORT_8: u8 = 0x8;
pub const PORT_9: u8 = 0x9;
pub const PORT_A: u8 = 0xA;
pub const PORT_B: u8 = 0xB;
pub const PORT_C: u8 = 0xC;
pub const PORT_D: u8 = 0xD;
pub const PORT_E: u8 = 0xE;

pub const PORT_COUNT: u8 = 15;

/// Function-select (DEVALT) bits, grouped by register
///
/// Groups 4 and 7-9 are regular: bit n selects PWMn, KSIn, KSO0n and
/// KSO(08+n) respectively.
pub mod devalt {
    pub mod group0 {
        pub const SPIP_SL: u8 = 0;
        pub const GPIO_NO_SPIP: u8 = 3;
        pub const NO_F_SPI: u8 = 7;
    }
    pub mod group1 {
        pub const NO_PWRGD: u8 = 4;
        pub const NO_LPC_ESPI: u8 = 7;
    }
    pub mod group2 {
        pub const I2C0_0_SL: u8 = 0;
        pub const I2C0_1_SL: u8 = 1;
        pub const I2C1_0_SL: u8 = 2;
        pub const I2C2_0_SL: u8 = 4;
        pub const I2C3_0_SL: u8 = 6;
    }
    pub mod group3 {
        pub const TA1_TACH1_SL1: u8 = 0;
        pub const TB1_TACH2_SL1: u8 = 1;
    }
    pub mod group6 {
        pub const ADC0_SL: u8 = 0;
        pub const ADC1_SL: u8 = 1;
        pub const ADC2_SL: u8 = 2;
        pub const ADC3_SL: u8 = 3;
        pub const ADC4_SL: u8 = 4;
    }
    pub mod group_a {
        pub const NO_KSO16_SL: u8 = 0;
        pub const NO_KSO17_SL: u8 = 1;
        pub const OUT_32K_SL: u8 = 2;
        pub const CLKIN_32K_SL: u8 = 3;
        pub const NO_PECI_EN: u8 = 6;
    }
    pub mod group_c {
        pub const UART_SL2: u8 = 0;
        pub const TA1_TACH1_SL2: u8 = 3;
        pub const TB1_TACH2_SL2: u8 = 4;
    }
}

use devalt::*;

const fn pin(port: u8, bit: u8) -> GpioLocation {
    GpioLocation::new(port, bit)
}

const fn alt(port: u8, bit: u8, group: u8, sel: u8) -> AltEntry {
    AltEntry::new(pin(port, bit), AltSelect::new(group, sel))
}

const fn alt_inv(port: u8, bit: u8, group: u8, sel: u8) -> AltEntry {
    AltEntry::new(pin(port, bit), AltSelect::inverted(group, sel))
}

/// Alternate-function locations
pub static ALT_TABLE: &[AltEntry] = &[
    // I2C
    alt(PORT_B, 2, 0x2, group2::I2C0_1_SL), // SMB0SDA1
    alt(PORT_B, 3, 0x2, group2::I2C0_1_SL), // SMB0SCL1
    alt(PORT_B, 4, 0x2, group2::I2C0_0_SL), // SMB0SDA0
    alt(PORT_B, 5, 0x2, group2::I2C0_0_SL), // SMB0SCL0
    alt(PORT_8, 7, 0x2, group2::I2C1_0_SL), // SMB1SDA
    alt(PORT_9, 0, 0x2, group2::I2C1_0_SL), // SMB1SCL
    alt(PORT_9, 1, 0x2, group2::I2C2_0_SL), // SMB2SDA
    alt(PORT_9, 2, 0x2, group2::I2C2_0_SL), // SMB2SCL
    alt(PORT_D, 0, 0x2, group2::I2C3_0_SL), // SMB3SDA
    alt(PORT_D, 1, 0x2, group2::I2C3_0_SL), // SMB3SCL
    // ADC
    alt(PORT_4, 5, 0x6, group6::ADC0_SL),
    alt(PORT_4, 4, 0x6, group6::ADC1_SL),
    alt(PORT_4, 3, 0x6, group6::ADC2_SL),
    alt(PORT_4, 2, 0x6, group6::ADC3_SL),
    alt(PORT_4, 1, 0x6, group6::ADC4_SL),
    // UART
    #[cfg(feature = "uart-module2")]
    alt(PORT_6, 4, 0xC, group_c::UART_SL2), // CR_SIN
    #[cfg(feature = "uart-module2")]
    alt(PORT_6, 5, 0xC, group_c::UART_SL2), // CR_SOUT
    // Module 1 shares the KSO08/KSO09 pins; selecting the UART sets the
    // keyboard-disable bit, so these rows replace the keyboard rows
    #[cfg(not(feature = "uart-module2"))]
    alt(PORT_1, 0, 0x9, 0), // CR_SIN
    #[cfg(not(feature = "uart-module2"))]
    alt(PORT_1, 1, 0x9, 1), // CR_SOUT
    // SPI
    alt(PORT_9, 5, 0x0, group0::SPIP_SL), // SPIP_MISO
    alt(PORT_A, 5, 0x0, group0::SPIP_SL), // SPIP_CS1
    alt(PORT_A, 3, 0x0, group0::SPIP_SL), // SPIP_MOSI
    alt(PORT_A, 1, 0x0, group0::SPIP_SL), // SPIP_SCLK
    // PWM, bit n is PWMn
    alt(PORT_C, 3, 0x4, 0),
    alt(PORT_C, 2, 0x4, 1),
    alt(PORT_C, 4, 0x4, 2),
    alt(PORT_8, 0, 0x4, 3),
    alt(PORT_B, 6, 0x4, 4),
    alt(PORT_B, 7, 0x4, 5),
    alt(PORT_C, 0, 0x4, 6),
    alt(PORT_6, 0, 0x4, 7),
    // Tachometer
    #[cfg(feature = "tach-sel2")]
    alt(PORT_9, 3, 0xC, group_c::TA1_TACH1_SL2),
    #[cfg(feature = "tach-sel2")]
    alt(PORT_D, 3, 0xC, group_c::TB1_TACH2_SL2),
    #[cfg(not(feature = "tach-sel2"))]
    alt(PORT_4, 0, 0x3, group3::TA1_TACH1_SL1),
    #[cfg(not(feature = "tach-sel2"))]
    alt(PORT_A, 4, 0x3, group3::TB1_TACH2_SL1),
    // Keyboard scan inputs
    alt_inv(PORT_3, 1, 0x7, 0),
    alt_inv(PORT_3, 0, 0x7, 1),
    alt_inv(PORT_2, 7, 0x7, 2),
    alt_inv(PORT_2, 6, 0x7, 3),
    alt_inv(PORT_2, 5, 0x7, 4),
    alt_inv(PORT_2, 4, 0x7, 5),
    alt_inv(PORT_2, 3, 0x7, 6),
    alt_inv(PORT_2, 2, 0x7, 7),
    // Keyboard scan outputs
    alt_inv(PORT_2, 1, 0x8, 0),
    alt_inv(PORT_2, 0, 0x8, 1),
    alt_inv(PORT_1, 7, 0x8, 2),
    alt_inv(PORT_1, 6, 0x8, 3),
    alt_inv(PORT_1, 5, 0x8, 4),
    alt_inv(PORT_1, 4, 0x8, 5),
    alt_inv(PORT_1, 3, 0x8, 6),
    alt_inv(PORT_1, 2, 0x8, 7),
    #[cfg(feature = "uart-module2")]
    alt_inv(PORT_1, 1, 0x9, 0), // KSO08
    #[cfg(feature = "uart-module2")]
    alt_inv(PORT_1, 0, 0x9, 1), // KSO09
    alt_inv(PORT_0, 7, 0x9, 2),
    alt_inv(PORT_0, 6, 0x9, 3),
    alt_inv(PORT_0, 5, 0x9, 4),
    alt_inv(PORT_0, 4, 0x9, 5),
    alt_inv(PORT_8, 2, 0x9, 6),
    alt_inv(PORT_8, 3, 0x9, 7),
    alt_inv(PORT_0, 3, 0xA, group_a::NO_KSO16_SL),
    alt_inv(PORT_B, 1, 0xA, group_a::NO_KSO17_SL),
    // Clocks
    alt(PORT_7, 5, 0xA, group_a::OUT_32K_SL),
    alt(PORT_E, 7, 0xA, group_a::CLKIN_32K_SL),
];

const NONE: GpioLocation = GpioLocation::NONE;

/// Low-voltage control blocks LV_GPIO_CTL0-3
pub static LOW_VOLTAGE_TABLE: &[LowVoltageRow] = &[
    [
        pin(PORT_B, 5),
        pin(PORT_B, 4),
        pin(PORT_B, 3),
        pin(PORT_B, 2),
        pin(PORT_9, 0),
        pin(PORT_8, 7),
        pin(PORT_0, 0),
        pin(PORT_3, 3),
    ],
    [
        pin(PORT_9, 2),
        pin(PORT_9, 1),
        pin(PORT_D, 1),
        pin(PORT_D, 0),
        pin(PORT_3, 6),
        pin(PORT_6, 4),
        pin(PORT_6, 5),
        NONE,
    ],
    [
        pin(PORT_7, 4),
        pin(PORT_8, 4),
        pin(PORT_8, 5),
        pin(PORT_7, 3),
        pin(PORT_C, 1),
        pin(PORT_C, 7),
        pin(PORT_E, 7),
        pin(PORT_3, 4),
    ],
    [
        pin(PORT_C, 6),
        pin(PORT_3, 7),
        pin(PORT_4, 0),
        pin(PORT_7, 1),
        pin(PORT_8, 2),
        pin(PORT_7, 5),
        pin(PORT_8, 0),
        pin(PORT_C, 5),
    ],
];

/// Interfaces switched to GPIO before any signal is configured
pub static PRE_INIT_ALT: &[AltSelect] = &[
    AltSelect::inverted(0x0, group0::GPIO_NO_SPIP),
    AltSelect::inverted(0x0, group0::NO_F_SPI),
    AltSelect::inverted(0x1, group1::NO_PWRGD),
    #[cfg(not(feature = "peci"))]
    AltSelect::inverted(0xA, group_a::NO_PECI_EN),
    #[cfg(feature = "shi")]
    AltSelect::inverted(0x1, group1::NO_LPC_ESPI),
];

/// Everything `wakemux-core` needs to know about the chip
pub static CHIP_TABLES: ChipTables = ChipTables {
    port_count: PORT_COUNT,
    alt: ALT_TABLE,
    low_voltage: LOW_VOLTAGE_TABLE,
    pre_init_alt: PRE_INIT_ALT,
};

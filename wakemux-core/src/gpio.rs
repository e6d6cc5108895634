//! Signal configuration and the public controller
//!
//! [`Gpio`] ties a register bank to the chip and board tables and is the
//! only entry point boards and peripheral drivers use.
//!
//! # Reconfiguring interrupt sources
//!
//! Register updates are plain read-modify-write sequences. Mask the vector
//! serving a signal (or call [`Gpio::disable_interrupt`]) before changing
//! its trigger while interrupts are live.

use core::fmt;

use wakemux_hal::{InputPin, OutputPin, PortReg, Reg, RegisterBank, WakeReg};

use crate::alt::{self, AltFunc};
use crate::dispatch::{self, Dispatch, Vector};
use crate::flags::PinFlags;
use crate::lvol;
use crate::tables::{
    BoardTables, ChipTables, GpioInfo, GpioInterrupt, Module, Signal, WakeGroup, WuiCoord,
    WAKE_GROUPS, WAKE_TABLES,
};
use crate::wui;

/// Errors reported at the public boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Signal not declared, or not interrupt-capable for interrupt operations
    InvalidSignal,
    /// Port beyond the chip's port count
    InvalidPort,
    /// PULL_UP and PULL_DOWN requested together
    ConflictingPull,
    /// INT_F_HIGH and INT_F_LOW requested together
    ConflictingLevel,
    /// No pins are declared for the module
    UnknownModule,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            GpioError::InvalidSignal => "invalid signal",
            GpioError::InvalidPort => "invalid port",
            GpioError::ConflictingPull => "pull-up and pull-down requested together",
            GpioError::ConflictingLevel => "level-high and level-low requested together",
            GpioError::UnknownModule => "no pins declared for module",
        };
        f.write_str(msg)
    }
}

/// How the system came out of reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetKind {
    /// Power-on or full reset, every output is programmed
    Cold,
    /// Core-only restart; output levels are preserved
    Warm,
}

/// Pin-mux and wake-interrupt controller
pub struct Gpio<'a, R: RegisterBank> {
    regs: R,
    chip: &'a ChipTables,
    board: &'a BoardTables,
}

impl<'a, R: RegisterBank> Gpio<'a, R> {
    /// Create a controller; no registers are touched until [`Gpio::pre_init`]
    pub const fn new(regs: R, chip: &'a ChipTables, board: &'a BoardTables) -> Self {
        Self { regs, chip, board }
    }

    /// Static description of a signal
    pub fn info(&self, signal: Signal) -> Result<&'a GpioInfo, GpioError> {
        self.board
            .signals
            .get(signal.0)
            .ok_or(GpioError::InvalidSignal)
    }

    /// Look a signal up by its declared name
    pub fn signal_by_name(&self, name: &str) -> Option<Signal> {
        self.board
            .signals
            .iter()
            .position(|info| info.name == name)
            .map(Signal)
    }

    /// Wake-unit coordinate of an interrupt-capable signal
    pub fn wake_source(&self, signal: Signal) -> Result<WuiCoord, GpioError> {
        self.interrupt(signal).map(|irq| irq.wui)
    }

    fn interrupt(&self, signal: Signal) -> Result<&'a GpioInterrupt, GpioError> {
        self.board
            .interrupts
            .get(signal.0)
            .ok_or(GpioError::InvalidSignal)
    }

    fn check_port(&self, port: u8) -> Result<(), GpioError> {
        if port < self.chip.port_count {
            Ok(())
        } else {
            Err(GpioError::InvalidPort)
        }
    }

    /// Configure a declared signal
    pub fn configure(&self, signal: Signal, flags: PinFlags) -> Result<(), GpioError> {
        let info = self.info(signal)?;
        self.configure_by_mask(info.port, info.mask, flags)
    }

    /// Configure every pin in `mask` of `port`
    ///
    /// Requests carrying [`PinFlags::DEFAULT`] are ignored.
    pub fn configure_by_mask(&self, port: u8, mask: u8, flags: PinFlags) -> Result<(), GpioError> {
        self.check_port(port)?;
        if let Err(e) = flags.check() {
            warn!("rejected flags on port {}: {}", port, e);
            return Err(e);
        }
        if flags.contains(PinFlags::DEFAULT) {
            return Ok(());
        }
        self.apply_flags(port, mask, flags);
        Ok(())
    }

    fn apply_flags(&self, port: u8, mask: u8, flags: PinFlags) {
        let regs = &self.regs;
        let reg = |r| Reg::port(port, r);

        // Direction goes to output only once everything else is in place
        if !flags.is_output() {
            regs.clear_bits(reg(PortReg::Direction), mask);
        }

        regs.assign_bits(
            reg(PortReg::DriveType),
            mask,
            flags.contains(PinFlags::OPEN_DRAIN),
        );

        if flags.contains(PinFlags::PULL_UP) {
            regs.clear_bits(reg(PortReg::PullSelect), mask);
            regs.set_bits(reg(PortReg::PullEnable), mask);
        } else if flags.contains(PinFlags::PULL_DOWN) {
            regs.set_bits(reg(PortReg::PullSelect), mask);
            regs.set_bits(reg(PortReg::PullEnable), mask);
        } else {
            regs.clear_bits(reg(PortReg::PullEnable), mask);
        }

        if flags.contains(PinFlags::SEL_1P8V) {
            // Pad must be open-drain with no pull before the level changes
            regs.set_bits(reg(PortReg::DriveType), mask);
            regs.clear_bits(reg(PortReg::PullEnable), mask);
            lvol::select(regs, self.chip.low_voltage, port, mask, true);
        } else {
            lvol::select(regs, self.chip.low_voltage, port, mask, false);
        }

        if flags.has_trigger() {
            let sources = self.board.signals.iter().zip(self.board.interrupts);
            for (info, irq) in sources {
                if info.port == port && info.mask & mask != 0 {
                    wui::configure(regs, irq.wui, flags);
                }
            }
        }

        if flags.contains(PinFlags::HIGH) {
            regs.set_bits(reg(PortReg::DataOut), mask);
        } else if flags.contains(PinFlags::LOW) {
            regs.clear_bits(reg(PortReg::DataOut), mask);
        }

        if flags.is_output() {
            regs.set_bits(reg(PortReg::Direction), mask);
        }
    }

    /// Static description of a signal on a port the chip has
    fn located(&self, signal: Signal) -> Result<&'a GpioInfo, GpioError> {
        let info = self.info(signal)?;
        self.check_port(info.port)?;
        Ok(info)
    }

    /// Sample the pad level of a signal
    pub fn read(&self, signal: Signal) -> Result<bool, GpioError> {
        let info = self.located(signal)?;
        Ok(self.regs.read(Reg::port(info.port, PortReg::DataIn)) & info.mask != 0)
    }

    /// Set the output latch of a signal
    pub fn write(&self, signal: Signal, level: bool) -> Result<(), GpioError> {
        let info = self.located(signal)?;
        self.regs
            .assign_bits(Reg::port(info.port, PortReg::DataOut), info.mask, level);
        Ok(())
    }

    /// Route every pin in `mask` of `port` to GPIO or its peripheral
    ///
    /// Pins without an alternate function are skipped.
    pub fn select_alternate_function(
        &self,
        port: u8,
        mask: u8,
        func: AltFunc,
    ) -> Result<(), GpioError> {
        self.check_port(port)?;
        alt::select_by_mask(&self.regs, self.chip.alt, port, mask, func);
        Ok(())
    }

    pub fn enable_interrupt(&self, signal: Signal) -> Result<(), GpioError> {
        wui::enable(&self.regs, self.wake_source(signal)?);
        Ok(())
    }

    /// Mask a signal's interrupt; a latched event stays pending
    pub fn disable_interrupt(&self, signal: Signal) -> Result<(), GpioError> {
        wui::disable(&self.regs, self.wake_source(signal)?);
        Ok(())
    }

    pub fn clear_pending(&self, signal: Signal) -> Result<(), GpioError> {
        wui::clear_pending(&self.regs, self.wake_source(signal)?);
        Ok(())
    }

    /// Bring every declared signal to its default configuration
    ///
    /// Runs once, before interrupts are enabled.
    pub fn pre_init(&self, reset: ResetKind) {
        for sel in self.chip.pre_init_alt {
            alt::apply(&self.regs, *sel, AltFunc::Gpio);
        }

        for table in 0..WAKE_TABLES {
            for group in 0..WAKE_GROUPS {
                self.regs
                    .write(Reg::wake(table, group, WakeReg::PendingClear), 0xFF);
                self.regs.write(Reg::wake(table, group, WakeReg::Enable), 0);
            }
        }

        if reset == ResetKind::Warm {
            info!("warm restart, keeping output levels");
        }

        for info in self.board.signals {
            if info.flags.contains(PinFlags::DEFAULT) {
                continue;
            }
            let flags = match reset {
                ResetKind::Cold => info.flags,
                ResetKind::Warm => info.flags.without_level(),
            };

            debug!("pre-init {} port {} mask {}", info.name, info.port, info.mask);
            if self.configure_by_mask(info.port, info.mask, flags).is_err() {
                warn!("{} left unconfigured", info.name);
            }

            // A declared signal is always a GPIO, whatever the reset default
            alt::select_by_mask(&self.regs, self.chip.alt, info.port, info.mask, AltFunc::Gpio);
        }
    }

    /// Enable or disable the pins of a peripheral module
    ///
    /// Enabling applies the module's flags and routes the pins to the
    /// peripheral. Disabling returns them to GPIO with the same flags minus
    /// any trigger.
    pub fn configure_module(&self, module: Module, enable: bool) -> Result<(), GpioError> {
        let mut found = false;
        for row in self.board.modules.iter().filter(|row| row.module == module) {
            found = true;
            if enable {
                self.configure_by_mask(row.port, row.mask, row.flags)?;
                self.select_alternate_function(row.port, row.mask, row.func)?;
            } else {
                let flags = row.flags.difference(PinFlags::INT_ANY);
                self.configure_by_mask(row.port, row.mask, flags)?;
                self.select_alternate_function(row.port, row.mask, AltFunc::Gpio)?;
            }
        }
        if found {
            Ok(())
        } else {
            Err(GpioError::UnknownModule)
        }
    }

    /// Run one dispatch pass over a wake group, returning the number of
    /// handlers called
    pub fn dispatch(&self, group: WakeGroup) -> usize {
        dispatch::dispatch_group(&self.regs, self.board, group)
    }

    /// Service a hardware vector, returning the number of GPIO handlers
    /// called
    pub fn service(&self, vector: &Vector) -> usize {
        dispatch::service(&self.regs, self.board, vector)
    }

    /// Digital pin view of a declared signal
    pub fn pin(&self, signal: Signal) -> Result<SignalPin<'_, 'a, R>, GpioError> {
        let info = self.located(signal)?;
        Ok(SignalPin { gpio: self, info })
    }
}

impl<R: RegisterBank> Dispatch for Gpio<'_, R> {
    fn service(&self, vector: &Vector) -> usize {
        Gpio::service(self, vector)
    }
}

/// One declared signal seen as a digital pin
pub struct SignalPin<'g, 'a, R: RegisterBank> {
    gpio: &'g Gpio<'a, R>,
    info: &'a GpioInfo,
}

impl<R: RegisterBank> SignalPin<'_, '_, R> {
    pub fn name(&self) -> &'static str {
        self.info.name
    }

    fn reg(&self, reg: PortReg) -> Reg {
        Reg::port(self.info.port, reg)
    }
}

impl<R: RegisterBank> OutputPin for SignalPin<'_, '_, R> {
    fn set_high(&mut self) {
        self.gpio.regs.set_bits(self.reg(PortReg::DataOut), self.info.mask);
    }

    fn set_low(&mut self) {
        self.gpio.regs.clear_bits(self.reg(PortReg::DataOut), self.info.mask);
    }

    fn is_set_high(&self) -> bool {
        self.gpio.regs.read(self.reg(PortReg::DataOut)) & self.info.mask != 0
    }
}

impl<R: RegisterBank> InputPin for SignalPin<'_, '_, R> {
    fn is_high(&self) -> bool {
        self.gpio.regs.read(self.reg(PortReg::DataIn)) & self.info.mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use proptest::prelude::*;
    use wakemux_hal::sim::SimRegisters;
    use wakemux_hal::gpio::IoPin;

    fn gpio(sim: &SimRegisters) -> Gpio<'static, &SimRegisters> {
        Gpio::new(sim, &CHIP, &BOARD)
    }

    fn port(sim: &SimRegisters, port: u8, reg: PortReg) -> u8 {
        sim.peek(Reg::port(port, reg))
    }

    #[test]
    fn test_direction_switched_to_output_last() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        gpio.configure(EN_PP3300, PinFlags::OUT_HIGH | PinFlags::PULL_UP)
            .unwrap();

        let writes = sim.writes();
        let (last_reg, _) = writes.last().copied().unwrap();
        assert_eq!(last_reg, Reg::port(7, PortReg::Direction));
        // The only direction write is the final one
        let dir_writes = writes
            .iter()
            .filter(|(r, _)| *r == Reg::port(7, PortReg::Direction))
            .count();
        assert_eq!(dir_writes, 1);

        assert_eq!(port(&sim, 7, PortReg::DataOut), 1 << 4);
        assert_eq!(port(&sim, 7, PortReg::PullEnable), 1 << 4);
        assert_eq!(port(&sim, 7, PortReg::PullSelect), 0);
    }

    #[test]
    fn test_input_forced_first() {
        let sim = SimRegisters::new();
        sim.poke(Reg::port(7, PortReg::Direction), 0xFF);
        let gpio = gpio(&sim);
        gpio.configure(EN_PP3300, PinFlags::INPUT_PULL_DOWN).unwrap();

        let (first_reg, _) = sim.writes()[0];
        assert_eq!(first_reg, Reg::port(7, PortReg::Direction));
        assert_eq!(port(&sim, 7, PortReg::Direction), 0xFF & !(1 << 4));
        assert_eq!(port(&sim, 7, PortReg::PullSelect), 1 << 4);
        assert_eq!(port(&sim, 7, PortReg::PullEnable), 1 << 4);
    }

    #[test]
    fn test_low_voltage_forces_open_drain_without_pull() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        gpio.configure(I2C_SDA, PinFlags::INPUT_PULL_UP | PinFlags::SEL_1P8V)
            .unwrap();

        assert_eq!(port(&sim, 0xB, PortReg::DriveType), 1 << 2);
        assert_eq!(port(&sim, 0xB, PortReg::PullEnable), 0);
        assert_eq!(sim.peek(Reg::LowVoltage(0)), 1 << 1);

        gpio.configure(I2C_SDA, PinFlags::INPUT).unwrap();
        assert_eq!(sim.peek(Reg::LowVoltage(0)), 0);
        assert_eq!(port(&sim, 0xB, PortReg::DriveType), 0);
    }

    #[test]
    fn test_low_voltage_off_table() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        // Port 7 has no low-voltage control
        gpio.configure(EN_PP3300, PinFlags::INPUT_PULL_UP | PinFlags::SEL_1P8V)
            .unwrap();

        assert_eq!(port(&sim, 7, PortReg::DriveType), 1 << 4);
        assert_eq!(port(&sim, 7, PortReg::PullEnable), 0);
        assert!(sim
            .writes()
            .iter()
            .all(|(r, _)| !matches!(r, Reg::LowVoltage(_))));
    }

    #[test]
    fn test_trigger_configures_matching_sources() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        // Port 6 mask 0b11 covers both aliased sources
        gpio.configure_by_mask(6, 0b0000_0011, PinFlags::INT_BOTH)
            .unwrap();
        let any_edge = sim.peek(Reg::wake(0, 3, WakeReg::AnyEdge));
        assert_eq!(any_edge, 1 << 6);
        assert_eq!(sim.peek(Reg::wake(0, 3, WakeReg::InputEnable)), 1 << 6);
    }

    #[test]
    fn test_trigger_without_source_is_noop() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        gpio.configure(EN_PP3300, PinFlags::INT_RISING).unwrap();
        assert!(sim
            .writes()
            .iter()
            .all(|(r, _)| !matches!(r, Reg::Wake { .. })));
    }

    #[test]
    fn test_default_flag_is_skipped() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        gpio.configure(EN_PP3300, PinFlags::DEFAULT | PinFlags::OUTPUT)
            .unwrap();
        assert!(sim.writes().is_empty());
    }

    #[test]
    fn test_boundary_errors() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        assert_eq!(
            gpio.configure(EN_PP3300, PinFlags::PULL_UP | PinFlags::PULL_DOWN),
            Err(GpioError::ConflictingPull)
        );
        assert_eq!(
            gpio.configure(WP_L, PinFlags::INT_F_HIGH | PinFlags::INT_F_LOW),
            Err(GpioError::ConflictingLevel)
        );
        assert_eq!(
            gpio.configure_by_mask(15, 0x01, PinFlags::INPUT),
            Err(GpioError::InvalidPort)
        );
        assert_eq!(
            gpio.configure(Signal(11), PinFlags::INPUT),
            Err(GpioError::InvalidSignal)
        );
        assert!(sim.writes().is_empty());
    }

    #[test]
    fn test_interrupt_ops_reject_non_interrupt_signals() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        assert_eq!(gpio.enable_interrupt(EN_PP3300), Err(GpioError::InvalidSignal));
        assert_eq!(gpio.disable_interrupt(Signal(7)), Err(GpioError::InvalidSignal));
        assert_eq!(gpio.clear_pending(Signal(100)), Err(GpioError::InvalidSignal));
        assert!(sim.writes().is_empty());
    }

    #[test]
    fn test_interrupt_lifecycle() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        let wui = gpio.wake_source(WP_L).unwrap();
        let pending = Reg::wake(wui.table(), wui.group(), WakeReg::Pending);
        let enable = Reg::wake(wui.table(), wui.group(), WakeReg::Enable);

        gpio.configure(WP_L, PinFlags::INT_LOW).unwrap();
        gpio.enable_interrupt(WP_L).unwrap();
        assert_eq!(sim.peek(enable), wui.mask());

        sim.raise(wui.table(), wui.group(), wui.mask());
        gpio.disable_interrupt(WP_L).unwrap();
        assert_eq!(sim.peek(enable), 0);
        assert_eq!(sim.peek(pending), wui.mask());

        gpio.clear_pending(WP_L).unwrap();
        assert_eq!(sim.peek(pending), 0);
    }

    #[test]
    fn test_read_write() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        gpio.configure(EN_PP3300, PinFlags::OUT_LOW).unwrap();
        assert!(!gpio.read(EN_PP3300).unwrap());

        gpio.write(EN_PP3300, true).unwrap();
        assert!(gpio.read(EN_PP3300).unwrap());

        // Inputs follow the pad
        sim.drive_input(0xD, 1 << 2, true);
        assert!(gpio.read(LID_OPEN).unwrap());
        assert_eq!(gpio.read(Signal(42)), Err(GpioError::InvalidSignal));
    }

    #[test]
    fn test_off_chip_signal_is_rejected() {
        static SIGNALS: [GpioInfo; 1] = [GpioInfo::new("OFF_CHIP", 15, 0, PinFlags::OUT_LOW)];
        static OFF_CHIP: BoardTables = BoardTables {
            signals: &SIGNALS,
            interrupts: &[],
            modules: &[],
            side_event: None,
        };
        let sim = SimRegisters::new();
        let gpio = Gpio::new(&sim, &CHIP, &OFF_CHIP);
        let signal = Signal(0);

        assert_eq!(gpio.configure(signal, PinFlags::OUT_LOW), Err(GpioError::InvalidPort));
        assert_eq!(gpio.read(signal), Err(GpioError::InvalidPort));
        assert_eq!(gpio.write(signal, true), Err(GpioError::InvalidPort));
        assert!(matches!(gpio.pin(signal), Err(GpioError::InvalidPort)));
        assert!(sim.writes().is_empty());
    }

    #[test]
    fn test_signal_pin() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        gpio.configure(I2C_SDA, PinFlags::ODR_HIGH).unwrap();

        fn pulse(pin: &mut impl IoPin) -> bool {
            pin.set_low();
            let low = pin.is_low();
            pin.toggle();
            low && pin.is_high()
        }

        let mut pin = gpio.pin(I2C_SDA).unwrap();
        assert_eq!(pin.name(), "I2C_SDA");
        assert!(pin.is_set_high());
        assert!(pulse(&mut pin));
    }

    #[test]
    fn test_signal_by_name() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        assert_eq!(gpio.signal_by_name("WP_L"), Some(WP_L));
        assert_eq!(gpio.signal_by_name("NOPE"), None);
    }

    #[test]
    fn test_select_alternate_function() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        gpio.select_alternate_function(0xB, 0b0000_1100, AltFunc::Peripheral(0))
            .unwrap();
        assert_eq!(sim.peek(Reg::DevAlt(2)), 0x02);
        assert_eq!(
            gpio.select_alternate_function(0x10, 0x01, AltFunc::Gpio),
            Err(GpioError::InvalidPort)
        );
    }

    #[test]
    fn test_pre_init_clears_wake_unit() {
        let sim = SimRegisters::new();
        for table in 0..2 {
            for group in 0..8 {
                sim.raise(table, group, 0xFF);
                sim.poke(Reg::wake(table, group, WakeReg::Enable), 0xFF);
            }
        }
        let gpio = gpio(&sim);
        gpio.pre_init(ResetKind::Cold);

        for table in 0..2 {
            for group in 0..8 {
                assert_eq!(sim.peek(Reg::wake(table, group, WakeReg::Pending)), 0);
                assert_eq!(sim.peek(Reg::wake(table, group, WakeReg::Enable)), 0);
            }
        }
    }

    #[test]
    fn test_pre_init_pin_mux() {
        let sim = SimRegisters::new();
        // Reset default routes I2C_SDA to its peripheral
        sim.poke(Reg::DevAlt(2), 0x02);
        // and POWER_BUTTON to its inverted peripheral role
        sim.poke(Reg::DevAlt(7), 0x00);
        let gpio = gpio(&sim);
        gpio.pre_init(ResetKind::Cold);

        assert_eq!(sim.peek(Reg::DevAlt(0)), 0b1000_1000);
        assert_eq!(sim.peek(Reg::DevAlt(1)), 0b0001_0000);
        assert_eq!(sim.peek(Reg::DevAlt(2)), 0x00);
        assert_eq!(sim.peek(Reg::DevAlt(7)), 0x01);
    }

    #[test]
    fn test_pre_init_programs_triggers() {
        let sim = SimRegisters::new();
        sim.set_spurious_pending(true);
        let gpio = gpio(&sim);
        gpio.pre_init(ResetKind::Cold);

        // LID_OPEN is any-edge on (1, 0, 2)
        assert_eq!(sim.peek(Reg::wake(1, 0, WakeReg::AnyEdge)), 1 << 2);
        // WP_L is level-low on (1, 2, 3)
        assert_eq!(sim.peek(Reg::wake(1, 2, WakeReg::Mode)), 1 << 3);
        assert_eq!(sim.peek(Reg::wake(1, 2, WakeReg::Edge)), 1 << 3);
        // Nothing left pending and nothing enabled
        assert_eq!(sim.peek(Reg::wake(1, 0, WakeReg::Pending)), 0);
        assert_eq!(sim.peek(Reg::wake(1, 0, WakeReg::Enable)), 0);
    }

    #[test]
    fn test_pre_init_skips_default_signals() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);
        gpio.pre_init(ResetKind::Cold);
        // SPARE is DEFAULT on port E
        assert_eq!(gpio.info(SPARE).unwrap().port, 0xE);
        assert!(sim
            .writes()
            .iter()
            .all(|(r, _)| !matches!(r, Reg::Port { port: 0xE, .. })));
    }

    #[test]
    fn test_configure_module() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);

        gpio.configure_module(Module::I2C, true).unwrap();
        assert_eq!(sim.peek(Reg::DevAlt(2)), 0x02);
        // Multi-pin masks have no single low-voltage location
        assert_eq!(port(&sim, 0xB, PortReg::DriveType), 0b0000_1100);

        gpio.configure_module(Module::I2C, false).unwrap();
        assert_eq!(sim.peek(Reg::DevAlt(2)), 0x00);

        gpio.configure_module(Module::MCO, true).unwrap();
        assert_eq!(sim.peek(Reg::DevAlt(4)), 1 << 6);
        assert_eq!(port(&sim, 0xC, PortReg::Direction), 0x01);

        assert_eq!(
            gpio.configure_module(Module::PWM, true),
            Err(GpioError::UnknownModule)
        );
    }

    #[test]
    fn test_module_disable_drops_trigger() {
        let sim = SimRegisters::new();
        let gpio = gpio(&sim);

        gpio.configure_module(Module::TACH, true).unwrap();
        let wake = |r| sim.peek(Reg::wake(0, 3, r));
        assert_eq!(wake(WakeReg::AnyEdge), 1 << 6);
        assert_eq!(wake(WakeReg::InputEnable), 1 << 6);
        let (input_enable, mode, any_edge) =
            (wake(WakeReg::InputEnable), wake(WakeReg::Mode), wake(WakeReg::AnyEdge));

        sim.clear_writes();
        gpio.configure_module(Module::TACH, false).unwrap();
        assert!(sim
            .writes()
            .iter()
            .all(|(r, _)| !matches!(r, Reg::Wake { .. })));
        assert_eq!(wake(WakeReg::InputEnable), input_enable);
        assert_eq!(wake(WakeReg::Mode), mode);
        assert_eq!(wake(WakeReg::AnyEdge), any_edge);
        // Pin is left a plain input
        assert_eq!(port(&sim, 6, PortReg::Direction) & 0x01, 0);
    }

    proptest! {
        #[test]
        fn prop_warm_restart_keeps_output(initial in any::<bool>()) {
            let sim = SimRegisters::new();
            let out = Reg::port(7, PortReg::DataOut);
            sim.poke(out, if initial { 1 << 5 } else { 0 });

            gpio(&sim).pre_init(ResetKind::Warm);
            // ENTERING_RW is OUT_HIGH but a warm restart leaves the latch
            prop_assert_eq!(sim.peek(out) & (1 << 5) != 0, initial);
            prop_assert_eq!(port(&sim, 7, PortReg::Direction) & (1 << 5), 1 << 5);

            let cold = SimRegisters::new();
            cold.poke(out, if initial { 1 << 5 } else { 0 });
            gpio(&cold).pre_init(ResetKind::Cold);
            prop_assert_eq!(cold.peek(out) & (1 << 5), 1 << 5);
        }

        #[test]
        fn prop_configure_only_touches_mask(
            mask in 1u8..,
            initial in any::<u8>(),
            pull_up in any::<bool>(),
            open_drain in any::<bool>(),
            output in any::<bool>(),
        ) {
            let sim = SimRegisters::new();
            for r in [PortReg::DataOut, PortReg::Direction, PortReg::PullEnable,
                      PortReg::PullSelect, PortReg::DriveType] {
                sim.poke(Reg::port(5, r), initial);
            }
            let mut flags = if output { PinFlags::OUT_HIGH } else { PinFlags::INPUT };
            flags.set(PinFlags::PULL_UP, pull_up);
            flags.set(PinFlags::OPEN_DRAIN, open_drain);
            gpio(&sim).configure_by_mask(5, mask, flags).unwrap();

            for r in [PortReg::DataOut, PortReg::Direction, PortReg::PullEnable,
                      PortReg::PullSelect, PortReg::DriveType] {
                prop_assert_eq!(port(&sim, 5, r) & !mask, initial & !mask);
            }
            let dir = port(&sim, 5, PortReg::Direction) & mask;
            prop_assert_eq!(dir, if output { mask } else { 0 });
        }
    }
}

//! System clock controller.
//!
//! Selects the system clock source (startup RC oscillator, standby
//! clock, or the RF-derived 48 MHz crystal path) and programs the
//! per-domain clock dividers. Divider programming never exceeds the
//! requested target frequency: inexact divisions round the divider up.
//!
//! Flash wait states are forced to the safe maximum before any clock
//! switch and recomputed for the real frequency afterwards, so flash
//! reads stay coherent through the transition.

use crate::pac;
use crate::time::Hertz;
use crate::Variant;

#[cfg(test)]
mod tests;

/// Fixed divider targets.
const SLOWCLK_TARGET: Hertz = Hertz::mhz(1);
const BBCLK_TARGET: Hertz = Hertz::mhz(8);
const DCCLK_TARGET: Hertz = Hertz::mhz(4);

/// Charge-pump clock prescaler for 166 kHz from SLOWCLK.
const CPCLK_PRESCALE_6: u8 = 5;

/// Crystal oscillator frequency ahead of the digital prescaler.
pub const XTAL_FREQUENCY: Hertz = Hertz::mhz(48);

/// Legal crystal prescaler range; out-of-range requests saturate.
const XTAL_PRESCALE_MIN: u8 = 1;
const XTAL_PRESCALE_MAX: u8 = 6;

/// VDDPA trim applied while the PA rail is parked on the VDDRF switch.
const VDDPA_PARKED_TRIM: u8 = 0x50;

/// System clock source select.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SysClkSource {
    RcClk,
    StandbyClk,
    RfClk,
}

impl SysClkSource {
    const fn bits(self) -> u8 {
        match self {
            SysClkSource::RcClk => 0,
            SysClkSource::StandbyClk => 1,
            SysClkSource::RfClk => 2,
        }
    }
}

/// Startup RC oscillator frequency points, one per calibration record.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RcFrequency {
    Mhz3,
    Mhz12,
    Mhz24,
    Mhz48,
}

impl RcFrequency {
    pub const fn hertz(self) -> Hertz {
        match self {
            RcFrequency::Mhz3 => Hertz::mhz(3),
            RcFrequency::Mhz12 => Hertz::mhz(12),
            RcFrequency::Mhz24 => Hertz::mhz(24),
            RcFrequency::Mhz48 => Hertz::mhz(48),
        }
    }

    const fn fsel(self) -> u8 {
        match self {
            RcFrequency::Mhz3 => 0,
            RcFrequency::Mhz12 => 1,
            RcFrequency::Mhz24 => 2,
            RcFrequency::Mhz48 => 3,
        }
    }
}

/// Divider targets for one [`ClockController::configure_dividers`] pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub uartclk: Hertz,
    pub sensorclk: Hertz,
    pub userclk: Hertz,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            uartclk: Hertz::mhz(1),
            sensorclk: Hertz::khz(250),
            userclk: Hertz::mhz(1),
        }
    }
}

/// Compute a prescaler for `target` from `core`, never exceeding the
/// target. The hardware divides by N+1, so exact divisions drop one.
pub fn divider_for(core: Hertz, target: Hertz) -> u32 {
    let mut div = core.0 / target.0;
    if core.0 % target.0 == 0 {
        div -= 1;
    }
    div
}

/// Clock tree driver.
pub struct ClockController {
    clk: pac::Clk,
    acs: pac::Acs,
    rf: pac::Rf,
    flash: pac::Flash,
    sysctrl: pac::Sysctrl,
    variant: Variant,
    core_clock: Hertz,
}

impl ClockController {
    /// `core_clock` is the frequency of the currently active system
    /// clock; out of reset this is the 3 MHz startup RC oscillator.
    pub fn new(
        clk: pac::Clk,
        acs: pac::Acs,
        rf: pac::Rf,
        flash: pac::Flash,
        sysctrl: pac::Sysctrl,
        variant: Variant,
        core_clock: Hertz,
    ) -> Self {
        Self {
            clk,
            acs,
            rf,
            flash,
            sysctrl,
            variant,
            core_clock,
        }
    }

    pub fn core_clock(&self) -> Hertz {
        self.core_clock
    }

    /// Frequency of the RF-derived digital clock, after the prescaler.
    fn rf_clock(&self) -> Hertz {
        let div = self.rf.ck_div().read().ck_div().max(1) as u32;
        XTAL_FREQUENCY / div
    }

    /// Program the per-domain clock dividers.
    ///
    /// SLOWCLK, BBCLK and DCCLK run at fixed targets; UART, sensor and
    /// user clocks follow the config. The DC clock output only runs in
    /// BUCK mode. USERCLK is sourced from the RF clock when the request
    /// exceeds the system clock and the crystal path is up, otherwise
    /// from the system clock.
    pub fn configure_dividers(&mut self, config: &ClockConfig) {
        let core = self.core_clock;

        let slowclk_div = divider_for(core, SLOWCLK_TARGET);
        let bbclk_div = divider_for(core, BBCLK_TARGET);
        let uartclk_div = divider_for(core, config.uartclk);

        self.clk.div_cfg0().write(|w| {
            w.set_slowclk_prescale(slowclk_div as u8);
            w.set_bbclk_prescale(bbclk_div as u8);
            w.set_uartclk_prescale(uartclk_div as u8);
        });

        let dcclk_div = divider_for(core, DCCLK_TARGET);
        let sensorclk_div = self.sensorclk_divider(config.sensorclk);
        let buck = self.acs.vcc_ctrl().read().buck_enable();

        self.clk.div_cfg1().write(|w| {
            w.set_dcclk_prescale(dcclk_div as u8);
            w.set_cpclk_prescale(CPCLK_PRESCALE_6);
            w.set_sensorclk_prescale(sensorclk_div as u8);
            w.set_dcclk_enable(buck);
        });

        let rf_ready = self.rf.analog_info().read().clk_dig_ready();
        if config.userclk > core && rf_ready {
            let userclk_div = self.rf_clock().0 / config.userclk.0;
            let userclk_div = if core.0 % config.userclk.0 == 0 {
                userclk_div - 1
            } else {
                userclk_div
            };
            self.clk.div_cfg2().write(|w| {
                w.set_userclk_prescale(userclk_div as u8);
                w.set_userclk_src(1);
            });
        } else {
            let userclk_div = divider_for(core, config.userclk);
            self.clk.div_cfg2().write(|w| {
                w.set_userclk_prescale(userclk_div as u8);
                w.set_userclk_src(0);
            });
        }
    }

    /// Sensor clock divider derivation differs per variant: RSL15
    /// divides the system clock directly, while Montana derives the
    /// sensor clock from the 1 MHz SLOWCLK with a power-of-two divider
    /// (the prescaler holds the log2, rounded up for inexact requests).
    fn sensorclk_divider(&self, target: Hertz) -> u32 {
        match self.variant {
            Variant::Rsl15 => divider_for(self.core_clock, target),
            Variant::Montana => {
                let mut ratio = SLOWCLK_TARGET.0 / target.0;
                let mut div = 0;
                let mut set_bits = 0;
                while ratio != 0 {
                    div += 1;
                    if ratio & 1 != 0 {
                        set_bits += 1;
                    }
                    ratio >>= 1;
                }
                if set_bits == 1 {
                    div -= 1;
                }
                div
            }
        }
    }

    /// Switch the RC oscillator to `freq` and source the system clock
    /// from it.
    pub fn rc_clock_init(&mut self, freq: RcFrequency) {
        self.flash_delay_safe_max();
        self.acs.rcosc_ctrl().modify(|w| w.set_rc_fsel(freq.fsel()));
        self.clk
            .sys_cfg()
            .write(|w| w.set_sysclk_src(SysClkSource::RcClk.bits()));
        self.core_clock_update();
    }

    /// Power up the crystal oscillator path and start it.
    ///
    /// Sequences the supplies before touching the oscillator: VDDRF up
    /// and out of high-impedance, busy-wait for regulator ready, park
    /// the PA rail on the VDDRF switch, ungate RF power and bus access,
    /// then start the oscillator and wait for its digital clock output.
    /// Does not switch the system clock; follow with
    /// [`ClockController::system_clock_config`].
    pub fn xtal_clock_init(&mut self, prescaler: u8) {
        let prescaler = prescaler.clamp(XTAL_PRESCALE_MIN, XTAL_PRESCALE_MAX);

        self.acs.vddrf_ctrl().modify(|w| {
            w.set_enable(true);
            w.set_disable_hiz(true);
        });
        while !self.acs.vddrf_ctrl().read().ready() {}

        self.acs.vddpa_ctrl().write(|w| {
            w.set_vtrim(VDDPA_PARKED_TRIM);
            w.set_sw_vddrf(true);
            w.set_enable(false);
            w.set_isense_enable(false);
        });

        crate::power::rf_enable(self.sysctrl, self.variant);

        self.rf.xtal_ctrl().modify(|w| {
            w.set_disable(false);
            w.set_reg_value_sel_internal(true);
        });
        self.rf.ck_div().modify(|w| w.set_ck_div(prescaler));

        while !self.rf.analog_info().read().clk_dig_ready() {}
    }

    /// Switch the system clock source. Flash wait states go to the
    /// safe maximum first and are recomputed once the new core clock
    /// is known.
    pub fn system_clock_config(&mut self, source: SysClkSource) {
        self.flash_delay_safe_max();
        self.clk.sys_cfg().write(|w| w.set_sysclk_src(source.bits()));
        self.core_clock_update();
    }

    /// Re-derive the core clock from the hardware state and set the
    /// matching flash wait states.
    pub fn core_clock_update(&mut self) {
        let source = self.clk.sys_cfg().read().sysclk_src();
        self.core_clock = match source {
            1 => Hertz(32_768),
            2 => self.rf_clock(),
            _ => match self.acs.rcosc_ctrl().read().rc_fsel() {
                0 => Hertz::mhz(3),
                1 => Hertz::mhz(12),
                2 => Hertz::mhz(24),
                _ => Hertz::mhz(48),
            },
        };
        let wait_states = flash_wait_states(self.core_clock);
        self.flash
            .delay_ctrl()
            .modify(|w| w.set_wait_states(wait_states));
        debug!("core clock now {} Hz", self.core_clock.0);
    }

    fn flash_delay_safe_max(&self) {
        self.flash
            .delay_ctrl()
            .modify(|w| w.set_wait_states(flash_wait_states(XTAL_FREQUENCY)));
    }
}

fn flash_wait_states(core: Hertz) -> u8 {
    if core.0 <= 3_000_000 {
        0
    } else if core.0 <= 12_000_000 {
        1
    } else if core.0 <= 24_000_000 {
        2
    } else {
        3
    }
}

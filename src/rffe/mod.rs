//! RF front-end TX power control.
//!
//! Output power is set through two cooperating knobs: the PA power
//! code in the radio (1.5 dBm per step) and the supply rail feeding
//! the amplifier. Targets up to 0 dBm, or up to 2 dBm with the
//! external PA disabled, run from VDDRF alone with the PA rail parked
//! on the VDDRF switch; higher targets hand the rail to the dynamic
//! VDDPA controller. Fractional-step residue is trimmed out on the
//! active rail, 75 mV/dBm on VDDRF and 100 mV/dBm on VDDPA.
//!
//! Rail measurements route the supply to the analog test output and
//! sample it on an LSAD channel, restoring the displaced LSAD and
//! AOUT configuration afterwards.

use embedded_hal_1::delay::DelayNs;

use crate::pac::{self, regs};
use crate::trim::{targets, LsadBand, LsadTrim, TrimRegion};
use crate::Variant;

#[cfg(test)]
mod tests;

pub const RF_MAX_POWER: i8 = 6;
pub const RF_MIN_POWER: i8 = -17;

/// Highest target reachable without the PA rail.
pub const RF_MAX_POWER_NO_PA: i8 = 2;

/// Output power delivered at the 0 dBm PA code with VDDRF nominal.
const RF_NO_PA_TYPICAL_POWER: i8 = 0;

const MAX_LSAD_CHANNEL: u8 = 7;

/// PA power code producing 0 dBm (or 6 dBm on the VDDPA rail).
const PA_PWR_0DBM: u8 = 0x0C;

/// PA bias words for the amplifier on / off states.
const PA_ENABLE_BIAS: u8 = 0xF3;
const PA_DISABLE_BIAS: u8 = 0x73;

/// Headroom the buck keeps between VCC and the highest VDDRF setting.
const VCC_VDDRF_MARGIN_MV: u32 = 50;

/// Rail sensitivity of the radiated power.
const MV_PER_DBM_VDDRF: u32 = 75;
const MV_PER_DBM_VDDPA: u32 = 100;

/// Trim steps per dBm of correction (7.5 mV and 10 mV steps).
const STEPS_PER_DBM_VDDRF: u8 = 6;
const STEPS_PER_DBM_VDDPA: u8 = 10;

/// Switch, ramp-up and disable delays for the dynamic PA controller.
const VDDPA_DELAY_3_CYCLES: u8 = 0x02;

/// Settle time before the first LSAD sample, then sample spacing.
const STABILIZATION_DELAY_US: u32 = 4_800;
const MEASUREMENT_DELAY_US: u32 = 1_600;

/// Status word from the TX power routines.
///
/// When the VDDRF-only path reports insufficient VCC the controller
/// retries on the PA rail and ORs both outcomes together, so a status
/// can carry the fallback cause alongside the retry result.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxPowerStatus(u32);

impl TxPowerStatus {
    pub const OK: Self = Self(0);

    const MARKER: u32 = 0x30;

    pub const NO_TRIMS: Self = Self(Self::MARKER | 0x01);
    pub const MISSING_SETTING: Self = Self(Self::MARKER | 0x02);
    pub const INVALID_SETTING: Self = Self(Self::MARKER | 0x03);
    pub const VCC_INSUFFICIENT: Self = Self(Self::MARKER | 0x04);
    pub const LOW_POWER_WARNING: Self = Self(Self::MARKER | 0x05);
    pub const PA_ENABLED_WARNING: Self = Self(Self::MARKER | 0x06);

    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for TxPowerStatus {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for TxPowerStatus {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// LSAD and AOUT state displaced by a rail measurement.
struct MeasurementBackup {
    input_sel: regs::LsadInputSel,
    aout: regs::AoutCtrl,
    cfg: regs::LsadCfg,
}

/// Median of three samples, rejecting a single outlier.
pub fn median3(mut a: u32, mut b: u32, mut c: u32) -> u32 {
    if a > b {
        core::mem::swap(&mut a, &mut b);
    }
    if b > c {
        core::mem::swap(&mut b, &mut c);
        if a > b {
            core::mem::swap(&mut a, &mut b);
        }
    }
    b
}

/// 14-bit LSAD code to millivolts.
const fn adc_code_to_mv(code: u32) -> u32 {
    (code * 1000) >> 13
}

/// TX power controller.
pub struct Rffe<'a, D> {
    acs: pac::Acs,
    sysctrl: pac::Sysctrl,
    rf: pac::Rf,
    lsad: pac::Lsad,
    trims: TrimRegion<'a>,
    variant: Variant,
    delay: D,
}

impl<'a, D: DelayNs> Rffe<'a, D> {
    pub fn new(
        acs: pac::Acs,
        sysctrl: pac::Sysctrl,
        rf: pac::Rf,
        lsad: pac::Lsad,
        trims: TrimRegion<'a>,
        variant: Variant,
        delay: D,
    ) -> Self {
        Self {
            acs,
            sysctrl,
            rf,
            lsad,
            trims,
            variant,
            delay,
        }
    }

    /// Calibrated VDDPA trim for the 1.60 V point.
    fn vddpa_nominal_trim(&self) -> u8 {
        self.trims.vddpa()[2] as u8
    }

    /// Calibrated VDDRF trim for the 1.07 V point.
    fn vddrf_nominal_trim(&self) -> u8 {
        self.trims.vddrf()[1] as u8
    }

    /// Set the radiated TX power.
    ///
    /// `target_dbm` must lie in [`RF_MIN_POWER`]..=[`RF_MAX_POWER`].
    /// `pa_enabled` forces the PA rail on for targets the VDDRF-only
    /// path could otherwise cover. `lsad_channel` is borrowed for rail
    /// measurements and restored before returning.
    pub fn set_tx_power(
        &mut self,
        target_dbm: i8,
        lsad_channel: u8,
        pa_enabled: bool,
    ) -> TxPowerStatus {
        if lsad_channel > MAX_LSAD_CHANNEL {
            return TxPowerStatus::INVALID_SETTING;
        }
        if target_dbm > RF_MAX_POWER || target_dbm < RF_MIN_POWER {
            return TxPowerStatus::INVALID_SETTING;
        }

        let no_pa_reachable =
            !pa_enabled && target_dbm <= RF_MAX_POWER_NO_PA && target_dbm > 0;
        if no_pa_reachable || target_dbm <= 0 {
            let mut status = self.set_tx_power_no_pa(target_dbm, lsad_channel);
            if status == TxPowerStatus::VCC_INSUFFICIENT {
                // VCC cannot push VDDRF high enough; fall back to the
                // PA rail and report both outcomes.
                warn!("vcc too low for {} dBm over VDDRF, using PA rail", target_dbm);
                status |= self.set_tx_power_pa(target_dbm);
            }
            status
        } else {
            self.set_tx_power_pa(target_dbm)
        }
    }

    /// Read back the currently configured TX power in dBm.
    ///
    /// With the PA rail active its voltage cannot be sampled, so the
    /// rail is reconstructed from the trim setting; otherwise VDDRF is
    /// measured on `lsad_channel`. Rounds half away from zero.
    pub fn get_tx_power(&mut self, lsad_channel: u8) -> i8 {
        let dynamic_on = self.sysctrl.vddpa_cfg0().read().dynamic_ctrl() != 0;
        let vddpa_ctrl = self.acs.vddpa_ctrl().read();
        let pa_pwr = self.rf.pa_pwr().read().pa_pwr() as i32;
        let step_power = (PA_PWR_0DBM as i32 - pa_pwr) as f32 * 1.5;

        let mut power = if dynamic_on || (vddpa_ctrl.enable() && !vddpa_ctrl.sw_vddrf()) {
            let nominal = self.vddpa_nominal_trim() as i32;
            let vddpa_mv = targets::VDDPA_1600 as i32 * 10
                + (vddpa_ctrl.vtrim() as i32 - nominal) * 10;
            let residue = (vddpa_mv - targets::VDDPA_1600 as i32 * 10) as f32
                / MV_PER_DBM_VDDPA as f32;
            RF_MAX_POWER as f32 - step_power + residue
        } else {
            let backup = self.begin_measurement(lsad_channel);
            self.acs
                .aout_ctrl()
                .modify(|w| w.set_aout_sel(regs::AOUT_SEL_VDDRF));
            let vddrf_mv = self.measure_supply(lsad_channel);
            self.end_measurement(lsad_channel, backup);

            let residue = (vddrf_mv as f32 - targets::VDDRF_1070 as f32 * 10.0)
                / MV_PER_DBM_VDDRF as f32;
            RF_NO_PA_TYPICAL_POWER as f32 - step_power + residue
        };

        if power > 0.0 {
            power += 0.5;
        } else if power < 0.0 {
            power -= 0.5;
        }
        power as i8
    }

    /// Measure the supply currently routed to AOUT, in millivolts.
    ///
    /// Takes three spaced samples and corrects the median with the
    /// low-frequency LSAD error trims; a blank trim record degrades to
    /// the uncorrected reading.
    pub fn measure_supply(&mut self, lsad_channel: u8) -> u32 {
        let trim = self
            .trims
            .lsad_trim(LsadBand::LowFrequency)
            .unwrap_or(LsadTrim {
                offset: 0,
                gain: 1 << 16,
            });
        let offset_error = trim.offset as f32 / 32768.0;
        let gain_error = trim.gain as f32 / 65536.0;

        self.delay.delay_us(STABILIZATION_DELAY_US);
        let first = self.lsad.data_trim(lsad_channel as usize).read().0;
        self.delay.delay_us(MEASUREMENT_DELAY_US);
        let second = self.lsad.data_trim(lsad_channel as usize).read().0;
        self.delay.delay_us(MEASUREMENT_DELAY_US);
        let third = self.lsad.data_trim(lsad_channel as usize).read().0;

        let median_v = adc_code_to_mv(median3(first, second, third)) as f32 / 1000.0;
        ((median_v - offset_error) / gain_error * 1000.0) as u32
    }

    /// VDDRF-only path for targets at or below [`RF_MAX_POWER_NO_PA`].
    ///
    /// Targets above 0 dBm overdrive VDDRF, which needs VCC headroom;
    /// if VCC measures too low nothing is changed and
    /// [`TxPowerStatus::VCC_INSUFFICIENT`] comes back. Targets at or
    /// below 0 dBm step the PA code down and trim the sub-step residue
    /// into VDDRF.
    fn set_tx_power_no_pa(&mut self, target_dbm: i8, lsad_channel: u8) -> TxPowerStatus {
        let backup = self.begin_measurement(lsad_channel);
        let mut status = TxPowerStatus::OK;
        let mut pa_pwr = None;

        if target_dbm > RF_NO_PA_TYPICAL_POWER {
            self.acs
                .aout_ctrl()
                .modify(|w| w.set_aout_sel(regs::AOUT_SEL_VCC));
            let vcc_mv = self.measure_supply(lsad_channel);

            let vddrf_max = vcc_mv.saturating_sub(VCC_VDDRF_MARGIN_MV);
            let required = targets::VDDRF_1070 as u32 * 10
                + target_dbm as u32 * MV_PER_DBM_VDDRF;
            if vddrf_max < required {
                status = TxPowerStatus::VCC_INSUFFICIENT;
            } else {
                self.park_pa_rail();
                let vtrim = self
                    .vddrf_nominal_trim()
                    .wrapping_add(target_dbm as u8 * STEPS_PER_DBM_VDDRF);
                self.acs.vddrf_ctrl().modify(|w| w.set_vtrim(vtrim));
                pa_pwr = Some(PA_PWR_0DBM);
                self.rf.pa_bias().modify(|w| w.set_iq_rxtx(PA_DISABLE_BIAS));
            }
        } else {
            self.park_pa_rail();
            let nominal = self.vddrf_nominal_trim();
            self.acs.vddrf_ctrl().modify(|w| w.set_vtrim(nominal));

            // The PA code moves in 1.5 dBm steps. Prefer a code within
            // 0.5 dBm of the target and trim the residue into VDDRF;
            // multiples of 1.5 dBm need no correction.
            let upper = target_dbm as i32 * 2 + 1;
            let lower = target_dbm as i32 * 2 - 1;
            let code = if upper % 3 == 0 {
                Some(PA_PWR_0DBM as i32 + upper / 3)
            } else if lower % 3 == 0 {
                Some(PA_PWR_0DBM as i32 + lower / 3)
            } else {
                None
            };

            let pa = match code {
                Some(code) => {
                    let power_error = target_dbm as f32
                        - (code - PA_PWR_0DBM as i32) as f32 * 1.5;
                    let adjusted = (nominal as f32
                        + power_error * STEPS_PER_DBM_VDDRF as f32)
                        as u8;
                    self.acs.vddrf_ctrl().modify(|w| w.set_vtrim(adjusted));
                    code
                }
                None => PA_PWR_0DBM as i32 + target_dbm as i32 * 2 / 3,
            };
            pa_pwr = Some(pa as u8);
            self.rf.pa_bias().modify(|w| w.set_iq_rxtx(PA_DISABLE_BIAS));
        }

        self.end_measurement(lsad_channel, backup);

        if let Some(pa) = pa_pwr {
            self.rf.pa_pwr().modify(|w| w.set_pa_pwr(pa));
        }
        status
    }

    /// PA-rail path. Hands the rail to the dynamic controller at its
    /// calibrated 1.60 V point and steps the PA code down from the
    /// 6 dBm maximum, trimming sub-step residue into VDDPA.
    fn set_tx_power_pa(&mut self, target_dbm: i8) -> TxPowerStatus {
        let nominal = self.vddpa_nominal_trim();
        self.acs.vddpa_ctrl().write(|w| {
            w.set_vtrim(nominal);
            w.set_sw_hiz(true);
            w.set_enable(false);
            w.set_isense_enable(false);
        });

        self.sysctrl.vddpa_cfg0().write(|w| {
            w.set_dynamic_ctrl(regs::DYNAMIC_CTRL_ENABLE);
            w.set_sw_ctrl_delay(VDDPA_DELAY_3_CYCLES);
            w.set_rampup_delay(VDDPA_DELAY_3_CYCLES);
            w.set_disable_delay(VDDPA_DELAY_3_CYCLES);
        });

        self.rf.pa_bias().modify(|w| w.set_iq_rxtx(PA_ENABLE_BIAS));

        let pa = PA_PWR_0DBM as i32 + (target_dbm as i32 - RF_MAX_POWER as i32) * 2 / 3;
        if target_dbm % 3 != 0 {
            let power_error = (target_dbm - RF_MAX_POWER) as f32
                - (pa - PA_PWR_0DBM as i32) as f32 * 1.5;
            let vtrim = self.acs.vddpa_ctrl().read().vtrim();
            let adjusted =
                (vtrim as f32 + power_error * STEPS_PER_DBM_VDDPA as f32) as u8;
            self.acs.vddpa_ctrl().modify(|w| w.set_vtrim(adjusted));
        }
        self.rf.pa_pwr().modify(|w| w.set_pa_pwr(pa as u8));

        TxPowerStatus::OK
    }

    /// Take the dynamic controller off the PA rail and park the rail
    /// on the VDDRF switch at its calibrated trim.
    fn park_pa_rail(&mut self) {
        self.sysctrl
            .vddpa_cfg0()
            .modify(|w| w.set_dynamic_ctrl(regs::DYNAMIC_CTRL_DISABLE));
        let nominal = self.vddpa_nominal_trim();
        self.acs.vddpa_ctrl().write(|w| {
            w.set_vtrim(nominal);
            w.set_sw_vddrf(true);
            w.set_enable(false);
            w.set_isense_enable(false);
        });
    }

    /// Point the LSAD channel at the internal analog test output,
    /// saving the state this displaces.
    fn begin_measurement(&mut self, lsad_channel: u8) -> MeasurementBackup {
        let backup = MeasurementBackup {
            input_sel: self.lsad.input_sel(lsad_channel as usize).read(),
            aout: self.acs.aout_ctrl().read(),
            cfg: self.lsad.cfg().read(),
        };

        let variant = self.variant;
        self.lsad.cfg().write(|w| {
            w.set_normal(true);
            w.set_prescale(regs::LSAD_PRESCALE_200);
            // Montana samples VBAT through a divide-by-two.
            w.set_vbat_div2(matches!(variant, Variant::Montana));
        });
        self.lsad.input_sel(lsad_channel as usize).write(|w| {
            w.set_pos_input(regs::LSAD_POS_INPUT_AOUT);
            w.set_neg_input(regs::LSAD_NEG_INPUT_GND);
        });
        self.acs.aout_ctrl().modify(|w| {
            w.set_aout_sel(regs::AOUT_SEL_DISCONNECTED);
            w.set_to_gpio(regs::AOUT_TO_GPIO_INTERNAL);
        });

        backup
    }

    fn end_measurement(&mut self, lsad_channel: u8, backup: MeasurementBackup) {
        self.lsad.cfg().write_value(backup.cfg);
        self.acs.aout_ctrl().write_value(backup.aout);
        self.lsad
            .input_sel(lsad_channel as usize)
            .write_value(backup.input_sel);
    }
}

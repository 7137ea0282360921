use super::*;
use crate::pac;
use crate::trim::TRIM_REGION_WORDS;
use crate::Variant;

struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// LSAD block backing: CFG, 8 input selects, 8 trimmed data channels.
struct Mem {
    acs: [u32; 20],
    sysctrl: [u32; 5],
    rf: [u32; 7],
    lsad: [u32; 17],
}

const VDDPA_TRIM_1600: u8 = 0x50;
const VDDRF_TRIM_1070: u8 = 0x28;

fn trim_words() -> [u32; TRIM_REGION_WORDS] {
    let mut words = [u32::MAX; TRIM_REGION_WORDS];
    // VDDRF and VDDPA calibration points read by the power paths.
    words[21] = (107 << 16) | VDDRF_TRIM_1070 as u32;
    words[26] = (160 << 16) | VDDPA_TRIM_1600 as u32;
    // Unity LSAD gain, zero offset: measurements come back uncorrected.
    words[56] = 0;
    words[57] = 1 << 16;
    words[58] = 1 << 16;
    words
}

/// LSAD code whose trimmed conversion lands on `mv` millivolts.
fn adc_code(mv: u32) -> u32 {
    let code = (mv << 13).div_ceil(1000);
    assert_eq!(adc_code_to_mv(code), mv);
    code
}

impl Mem {
    fn new() -> Self {
        Self {
            acs: [0; 20],
            sysctrl: [0; 5],
            rf: [0; 7],
            lsad: [0; 17],
        }
    }

    fn acs(&mut self) -> pac::Acs {
        unsafe { pac::Acs::from_ptr(self.acs.as_mut_ptr()) }
    }

    fn sysctrl(&mut self) -> pac::Sysctrl {
        unsafe { pac::Sysctrl::from_ptr(self.sysctrl.as_mut_ptr()) }
    }

    fn rf(&mut self) -> pac::Rf {
        unsafe { pac::Rf::from_ptr(self.rf.as_mut_ptr()) }
    }

    fn lsad(&mut self) -> pac::Lsad {
        unsafe { pac::Lsad::from_ptr(self.lsad.as_mut_ptr()) }
    }

    fn rffe<'a>(
        &mut self,
        words: &'a [u32; TRIM_REGION_WORDS],
        variant: Variant,
    ) -> Rffe<'a, NoopDelay> {
        Rffe::new(
            self.acs(),
            self.sysctrl(),
            self.rf(),
            self.lsad(),
            TrimRegion::new(words),
            variant,
            NoopDelay,
        )
    }
}

#[test]
fn median_ignores_sample_order() {
    for (a, b, c) in [
        (10, 20, 30),
        (10, 30, 20),
        (20, 10, 30),
        (20, 30, 10),
        (30, 10, 20),
        (30, 20, 10),
    ] {
        assert_eq!(median3(a, b, c), 20);
    }
}

#[test]
fn median_rejects_single_outlier() {
    assert_eq!(median3(5, 5, 100), 5);
    assert_eq!(median3(100, 5, 5), 5);
    assert_eq!(median3(7, 7, 7), 7);
}

#[test]
fn rejects_bad_channel_and_target_without_touching_hardware() {
    let words = trim_words();
    let mut mem = Mem::new();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    assert_eq!(
        rffe.set_tx_power(0, 8, false),
        TxPowerStatus::INVALID_SETTING
    );
    assert_eq!(
        rffe.set_tx_power(7, 0, false),
        TxPowerStatus::INVALID_SETTING
    );
    assert_eq!(
        rffe.set_tx_power(-18, 0, false),
        TxPowerStatus::INVALID_SETTING
    );

    drop(rffe);
    assert_eq!(mem.acs, [0; 20]);
    assert_eq!(mem.rf, [0; 7]);
}

#[test]
fn zero_dbm_parks_pa_rail_on_vddrf_switch() {
    let words = trim_words();
    let mut mem = Mem::new();
    let acs = mem.acs();
    let sysctrl = mem.sysctrl();
    let rf = mem.rf();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    assert_eq!(rffe.set_tx_power(0, 0, false), TxPowerStatus::OK);

    let vddpa = acs.vddpa_ctrl().read();
    assert!(vddpa.sw_vddrf());
    assert!(!vddpa.enable());
    assert_eq!(vddpa.vtrim(), VDDPA_TRIM_1600);
    assert_eq!(sysctrl.vddpa_cfg0().read().dynamic_ctrl(), 0);

    assert_eq!(acs.vddrf_ctrl().read().vtrim(), VDDRF_TRIM_1070);
    assert_eq!(rf.pa_pwr().read().pa_pwr(), 0x0C);
    assert_eq!(rf.pa_bias().read().iq_rxtx(), 0x73);
}

#[test]
fn overdrive_raises_vddrf_when_vcc_has_headroom() {
    let words = trim_words();
    let mut mem = Mem::new();
    mem.lsad[10] = adc_code(3300); // channel 1 trimmed data
    let acs = mem.acs();
    let rf = mem.rf();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    assert_eq!(rffe.set_tx_power(2, 1, false), TxPowerStatus::OK);

    // 6 trim steps per dBm above the 1.07 V calibration point.
    assert_eq!(acs.vddrf_ctrl().read().vtrim(), VDDRF_TRIM_1070 + 12);
    assert_eq!(rf.pa_pwr().read().pa_pwr(), 0x0C);
    assert_eq!(rf.pa_bias().read().iq_rxtx(), 0x73);
    assert!(acs.vddpa_ctrl().read().sw_vddrf());
}

#[test]
fn low_vcc_falls_back_to_pa_rail() {
    let words = trim_words();
    let mut mem = Mem::new();
    // 1000 mV leaves 950 mV for VDDRF, short of the 1220 mV needed.
    mem.lsad[9] = adc_code(1000);
    let acs = mem.acs();
    let sysctrl = mem.sysctrl();
    let rf = mem.rf();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    let status = rffe.set_tx_power(2, 0, false);
    assert_eq!(status, TxPowerStatus::VCC_INSUFFICIENT);

    // The fallback configured the dynamic PA rail.
    let cfg0 = sysctrl.vddpa_cfg0().read();
    assert_eq!(cfg0.dynamic_ctrl(), regs::DYNAMIC_CTRL_ENABLE);
    assert_eq!(cfg0.sw_ctrl_delay(), 0x02);
    assert_eq!(cfg0.rampup_delay(), 0x02);
    assert_eq!(cfg0.disable_delay(), 0x02);
    assert_eq!(rf.pa_bias().read().iq_rxtx(), 0xF3);

    let vddpa = acs.vddpa_ctrl().read();
    assert!(vddpa.sw_hiz());
    assert!(!vddpa.enable());
    // 2 dBm is 4 dB under max: PA code drops 2 steps (3 dB) and VDDPA
    // drops 10 trim steps (1 dB).
    assert_eq!(rf.pa_pwr().read().pa_pwr(), 0x0A);
    assert_eq!(vddpa.vtrim(), VDDPA_TRIM_1600 - 10);

    // VDDRF was left alone; the insufficient-VCC path must not
    // half-apply its settings.
    assert_eq!(acs.vddrf_ctrl().read().vtrim(), 0);
}

#[test]
fn max_power_needs_no_residue_correction() {
    let words = trim_words();
    let mut mem = Mem::new();
    let acs = mem.acs();
    let sysctrl = mem.sysctrl();
    let rf = mem.rf();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    assert_eq!(rffe.set_tx_power(6, 0, true), TxPowerStatus::OK);

    assert_eq!(rf.pa_pwr().read().pa_pwr(), 0x0C);
    assert_eq!(acs.vddpa_ctrl().read().vtrim(), VDDPA_TRIM_1600);
    assert_eq!(
        sysctrl.vddpa_cfg0().read().dynamic_ctrl(),
        regs::DYNAMIC_CTRL_ENABLE
    );
    assert_eq!(rf.pa_bias().read().iq_rxtx(), 0xF3);
}

#[test]
fn pa_rail_residue_lands_on_vddpa_trim() {
    let words = trim_words();
    let mut mem = Mem::new();
    let acs = mem.acs();
    let rf = mem.rf();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    // 5 dBm: PA code stays at the 6 dBm point, VDDPA drops 1 dB.
    assert_eq!(rffe.set_tx_power(5, 0, true), TxPowerStatus::OK);

    assert_eq!(rf.pa_pwr().read().pa_pwr(), 0x0C);
    assert_eq!(acs.vddpa_ctrl().read().vtrim(), VDDPA_TRIM_1600 - 10);
}

#[test]
fn negative_target_trims_residue_into_vddrf() {
    let words = trim_words();
    let mut mem = Mem::new();
    let acs = mem.acs();
    let rf = mem.rf();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    // -1 dBm: nearest 1.5 dBm step is -1.5, so the PA code drops one
    // and VDDRF makes up the half dB.
    assert_eq!(rffe.set_tx_power(-1, 0, false), TxPowerStatus::OK);

    assert_eq!(rf.pa_pwr().read().pa_pwr(), 0x0B);
    assert_eq!(acs.vddrf_ctrl().read().vtrim(), VDDRF_TRIM_1070 + 3);
}

#[test]
fn step_multiple_target_leaves_vddrf_nominal() {
    let words = trim_words();
    let mut mem = Mem::new();
    let acs = mem.acs();
    let rf = mem.rf();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    assert_eq!(rffe.set_tx_power(-3, 0, false), TxPowerStatus::OK);

    assert_eq!(rf.pa_pwr().read().pa_pwr(), 0x0A);
    assert_eq!(acs.vddrf_ctrl().read().vtrim(), VDDRF_TRIM_1070);
}

#[test]
fn measurement_state_is_restored() {
    let words = trim_words();
    let mut mem = Mem::new();
    mem.lsad[0] = 0xDEAD_0031; // CFG
    mem.lsad[4] = 0x0000_0207; // channel 3 input select
    mem.lsad[12] = adc_code(3300);
    mem.acs[18] = 0x0000_0104; // AOUT routed somewhere external

    let acs = mem.acs();
    let lsad = mem.lsad();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    assert_eq!(rffe.set_tx_power(1, 3, false), TxPowerStatus::OK);

    assert_eq!(lsad.cfg().read().0, 0xDEAD_0031);
    assert_eq!(lsad.input_sel(3).read().0, 0x0000_0207);
    assert_eq!(acs.aout_ctrl().read().0, 0x0000_0104);
}

#[test]
fn montana_measures_with_vbat_divider() {
    let words = trim_words();
    let mut mem = Mem::new();
    mem.lsad[9] = adc_code(3300);
    let lsad = mem.lsad();
    let mut rffe = mem.rffe(&words, Variant::Montana);

    let backup = rffe.begin_measurement(0);
    let cfg = lsad.cfg().read();
    assert!(cfg.normal());
    assert!(cfg.vbat_div2());
    assert_eq!(cfg.prescale(), regs::LSAD_PRESCALE_200);
    rffe.end_measurement(0, backup);
}

#[test]
fn supply_measurement_applies_lsad_error_trims() {
    let mut words = trim_words();
    // +16 mV offset, gain 2% high.
    words[56] = ((0.016 * 32768.0) as u32) << 16;
    words[58] = (1.02 * 65536.0) as u32;

    let mut mem = Mem::new();
    mem.lsad[9] = adc_code(1020);
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    // (1.020 - 0.016) / 1.02 = 0.984 V
    assert_eq!(rffe.measure_supply(0), 984);
}

#[test]
fn readback_reconstructs_power_from_pa_rail_trim() {
    let words = trim_words();
    let mut mem = Mem::new();
    let acs = mem.acs();
    let sysctrl = mem.sysctrl();
    let rf = mem.rf();

    sysctrl
        .vddpa_cfg0()
        .modify(|w| w.set_dynamic_ctrl(regs::DYNAMIC_CTRL_ENABLE));
    acs.vddpa_ctrl()
        .modify(|w| w.set_vtrim(VDDPA_TRIM_1600 - 10));
    rf.pa_pwr().modify(|w| w.set_pa_pwr(0x0A));

    let mut rffe = mem.rffe(&words, Variant::Rsl15);
    // PA code 2 under max costs 3 dB, rail 100 mV low costs 1 dB.
    assert_eq!(rffe.get_tx_power(0), 2);
}

#[test]
fn readback_measures_vddrf_when_pa_rail_is_off() {
    let words = trim_words();
    let mut mem = Mem::new();
    // VDDRF at 1220 mV, 150 mV over nominal: +2 dBm.
    mem.lsad[9] = adc_code(1220);
    let rf = mem.rf();
    rf.pa_pwr().modify(|w| w.set_pa_pwr(0x0C));

    let mut rffe = mem.rffe(&words, Variant::Rsl15);
    assert_eq!(rffe.get_tx_power(0), 2);
}

#[test]
fn readback_round_trips_a_configured_power() {
    let words = trim_words();
    let mut mem = Mem::new();
    let mut rffe = mem.rffe(&words, Variant::Rsl15);

    assert_eq!(rffe.set_tx_power(5, 0, true), TxPowerStatus::OK);
    assert_eq!(rffe.get_tx_power(0), 5);
}

use super::*;
use crate::pac;
use crate::time::Hertz;
use crate::Variant;

struct Mem {
    clk: [u32; 4],
    acs: [u32; 20],
    rf: [u32; 7],
    flash: [u32; 1],
    sysctrl: [u32; 5],
}

impl Mem {
    fn new() -> Self {
        Self {
            clk: [0; 4],
            acs: [0; 20],
            rf: [0; 7],
            flash: [0; 1],
            sysctrl: [0; 5],
        }
    }

    fn clk(&mut self) -> pac::Clk {
        unsafe { pac::Clk::from_ptr(self.clk.as_mut_ptr()) }
    }

    fn acs(&mut self) -> pac::Acs {
        unsafe { pac::Acs::from_ptr(self.acs.as_mut_ptr()) }
    }

    fn rf(&mut self) -> pac::Rf {
        unsafe { pac::Rf::from_ptr(self.rf.as_mut_ptr()) }
    }

    fn flash(&mut self) -> pac::Flash {
        unsafe { pac::Flash::from_ptr(self.flash.as_mut_ptr()) }
    }

    fn sysctrl(&mut self) -> pac::Sysctrl {
        unsafe { pac::Sysctrl::from_ptr(self.sysctrl.as_mut_ptr()) }
    }

    fn controller(&mut self, variant: Variant, core: Hertz) -> ClockController {
        ClockController::new(
            self.clk(),
            self.acs(),
            self.rf(),
            self.flash(),
            self.sysctrl(),
            variant,
            core,
        )
    }
}

#[test]
fn divider_exact_division_drops_one() {
    assert_eq!(divider_for(Hertz::mhz(48), Hertz::mhz(1)), 47);
    assert_eq!(divider_for(Hertz::mhz(48), Hertz::mhz(8)), 5);
}

#[test]
fn divider_inexact_division_rounds_up() {
    // 48 MHz / 54 = 888.9 kHz, just under the 900 kHz request.
    assert_eq!(divider_for(Hertz::mhz(48), Hertz::khz(900)), 53);
}

#[test]
fn configure_dividers_fixed_targets() {
    let mut mem = Mem::new();
    let clk = mem.clk();
    let mut clocks = mem.controller(Variant::Rsl15, Hertz::mhz(48));

    clocks.configure_dividers(&ClockConfig::default());

    let cfg0 = clk.div_cfg0().read();
    assert_eq!(cfg0.slowclk_prescale(), 47);
    assert_eq!(cfg0.bbclk_prescale(), 5);
    assert_eq!(cfg0.uartclk_prescale(), 47);

    let cfg1 = clk.div_cfg1().read();
    assert_eq!(cfg1.dcclk_prescale(), 11);
    assert_eq!(cfg1.cpclk_prescale(), 5);
}

#[test]
fn dcclk_output_gated_on_buck_mode() {
    let mut mem = Mem::new();
    let clk = mem.clk();
    let acs = mem.acs();
    let mut clocks = mem.controller(Variant::Rsl15, Hertz::mhz(48));

    clocks.configure_dividers(&ClockConfig::default());
    assert!(!clk.div_cfg1().read().dcclk_enable());

    acs.vcc_ctrl().modify(|w| w.set_buck_enable(true));
    clocks.configure_dividers(&ClockConfig::default());
    assert!(clk.div_cfg1().read().dcclk_enable());
}

#[test]
fn userclk_sources_rf_clock_when_request_exceeds_core() {
    let mut mem = Mem::new();
    let clk = mem.clk();
    let rf = mem.rf();
    rf.analog_info().modify(|w| w.set_clk_dig_ready(true));
    rf.ck_div().modify(|w| w.set_ck_div(2)); // RF clock at 24 MHz

    let mut clocks = mem.controller(Variant::Rsl15, Hertz::mhz(8));
    clocks.configure_dividers(&ClockConfig {
        userclk: Hertz::mhz(24),
        ..Default::default()
    });

    let cfg2 = clk.div_cfg2().read();
    assert_eq!(cfg2.userclk_src(), 1);
    assert_eq!(cfg2.userclk_prescale(), 1);
}

#[test]
fn userclk_stays_on_sysclk_while_rf_clock_down() {
    let mut mem = Mem::new();
    let clk = mem.clk();

    let mut clocks = mem.controller(Variant::Rsl15, Hertz::mhz(8));
    clocks.configure_dividers(&ClockConfig {
        userclk: Hertz::mhz(24),
        ..Default::default()
    });

    assert_eq!(clk.div_cfg2().read().userclk_src(), 0);
}

#[test]
fn sensor_divider_varies_by_part() {
    let mut mem = Mem::new();
    let clk = mem.clk();

    // RSL15 divides the system clock directly.
    let mut clocks = mem.controller(Variant::Rsl15, Hertz::mhz(48));
    clocks.configure_dividers(&ClockConfig {
        sensorclk: Hertz::khz(250),
        ..Default::default()
    });
    assert_eq!(clk.div_cfg1().read().sensorclk_prescale(), 191);

    // Montana derives from the 1 MHz SLOWCLK with a log2 prescaler.
    let mut clocks = mem.controller(Variant::Montana, Hertz::mhz(48));
    clocks.configure_dividers(&ClockConfig {
        sensorclk: Hertz::khz(250),
        ..Default::default()
    });
    assert_eq!(clk.div_cfg1().read().sensorclk_prescale(), 2);

    // Inexact request rounds the power of two up, staying under target.
    clocks.configure_dividers(&ClockConfig {
        sensorclk: Hertz::khz(300),
        ..Default::default()
    });
    assert_eq!(clk.div_cfg1().read().sensorclk_prescale(), 2);
}

#[test]
fn rc_clock_init_programs_range_and_flash_delay() {
    let mut mem = Mem::new();
    let clk = mem.clk();
    let acs = mem.acs();
    let flash = mem.flash();

    let mut clocks = mem.controller(Variant::Rsl15, Hertz::mhz(3));
    clocks.rc_clock_init(RcFrequency::Mhz12);

    assert_eq!(acs.rcosc_ctrl().read().rc_fsel(), 1);
    assert_eq!(clk.sys_cfg().read().sysclk_src(), 0);
    assert_eq!(clocks.core_clock(), Hertz::mhz(12));
    assert_eq!(flash.delay_ctrl().read().wait_states(), 1);
}

#[test]
fn xtal_init_sequences_supplies_before_oscillator() {
    let mut mem = Mem::new();
    let acs = mem.acs();
    let rf = mem.rf();
    let sysctrl = mem.sysctrl();

    // Regulator and oscillator report ready up front so the polls
    // fall straight through.
    acs.vddrf_ctrl().modify(|w| w.set_ready(true));
    rf.analog_info().modify(|w| w.set_clk_dig_ready(true));
    rf.xtal_ctrl().modify(|w| w.set_disable(true));

    let mut clocks = mem.controller(Variant::Rsl15, Hertz::mhz(3));
    clocks.xtal_clock_init(9); // out of range, saturates to 6

    let vddrf = acs.vddrf_ctrl().read();
    assert!(vddrf.enable());
    assert!(vddrf.disable_hiz());

    let vddpa = acs.vddpa_ctrl().read();
    assert!(vddpa.sw_vddrf());
    assert!(!vddpa.enable());

    let power = sysctrl.rf_power_cfg().read();
    assert!(power.rf_enable());
    assert!(power.bb_startup());
    assert!(power.rf_startup());

    let access = sysctrl.rf_access_cfg().read();
    assert!(access.bb_access());
    assert!(access.rf_access());
    assert!(access.rf_irq_access());

    assert!(!rf.xtal_ctrl().read().disable());
    assert!(rf.xtal_ctrl().read().reg_value_sel_internal());
    assert_eq!(rf.ck_div().read().ck_div(), 6);
}

#[test]
fn rf_system_clock_updates_core_and_flash_delay() {
    let mut mem = Mem::new();
    let rf = mem.rf();
    let flash = mem.flash();
    rf.ck_div().modify(|w| w.set_ck_div(1));

    let mut clocks = mem.controller(Variant::Rsl15, Hertz::mhz(3));
    clocks.system_clock_config(SysClkSource::RfClk);

    assert_eq!(clocks.core_clock(), Hertz::mhz(48));
    assert_eq!(flash.delay_ctrl().read().wait_states(), 3);
}

#[test]
fn montana_rf_enable_skips_startup_dance() {
    let mut mem = Mem::new();
    let sysctrl = mem.sysctrl();

    crate::power::rf_enable(sysctrl, Variant::Montana);

    let power = sysctrl.rf_power_cfg().read();
    assert!(power.bb_enable());
    assert!(power.rf_enable());
    assert!(!power.bb_startup());
    assert!(!power.rf_startup());
}

//! Register value types.

/// A register with no field structure.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct Raw(pub u32);

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct VccCtrl(pub u32);

impl VccCtrl {
    #[inline(always)]
    pub const fn vtrim(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_vtrim(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn buck_enable(&self) -> bool {
        (self.0 >> 8) & 1 != 0
    }
    #[inline(always)]
    pub fn set_buck_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 8)) | ((val as u32) << 8);
    }
    #[inline(always)]
    pub const fn ich_trim(&self) -> u8 {
        ((self.0 >> 12) & 0x0f) as u8
    }
    #[inline(always)]
    pub fn set_ich_trim(&mut self, val: u8) {
        self.0 = (self.0 & !(0x0f << 12)) | (((val as u32) & 0x0f) << 12);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct BgCtrl(pub u32);

impl BgCtrl {
    #[inline(always)]
    pub const fn vtrim(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }
    #[inline(always)]
    pub fn set_vtrim(&mut self, val: u16) {
        self.0 = (self.0 & !0xffff) | (val as u32);
    }
    #[inline(always)]
    pub const fn itrim(&self) -> u16 {
        ((self.0 >> 16) & 0xffff) as u16
    }
    #[inline(always)]
    pub fn set_itrim(&mut self, val: u16) {
        self.0 = (self.0 & !(0xffff << 16)) | ((val as u32) << 16);
    }
}

/// VDDC/VDDM regulator control: run trim plus standby trim.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct VddCtrl(pub u32);

impl VddCtrl {
    #[inline(always)]
    pub const fn vtrim(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_vtrim(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn standby_vtrim(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_standby_vtrim(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct VddrfCtrl(pub u32);

impl VddrfCtrl {
    #[inline(always)]
    pub const fn vtrim(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_vtrim(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn enable(&self) -> bool {
        (self.0 >> 8) & 1 != 0
    }
    #[inline(always)]
    pub fn set_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 8)) | ((val as u32) << 8);
    }
    #[inline(always)]
    pub const fn disable_hiz(&self) -> bool {
        (self.0 >> 9) & 1 != 0
    }
    #[inline(always)]
    pub fn set_disable_hiz(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 9)) | ((val as u32) << 9);
    }
    /// Regulator-ready status.
    #[inline(always)]
    pub const fn ready(&self) -> bool {
        (self.0 >> 16) & 1 != 0
    }
    #[inline(always)]
    pub fn set_ready(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 16)) | ((val as u32) << 16);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct VddpaCtrl(pub u32);

impl VddpaCtrl {
    #[inline(always)]
    pub const fn vtrim(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_vtrim(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn enable(&self) -> bool {
        (self.0 >> 8) & 1 != 0
    }
    #[inline(always)]
    pub fn set_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 8)) | ((val as u32) << 8);
    }
    /// Source the PA rail from the VDDRF switch instead of the regulator.
    #[inline(always)]
    pub const fn sw_vddrf(&self) -> bool {
        (self.0 >> 9) & 1 != 0
    }
    #[inline(always)]
    pub fn set_sw_vddrf(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 9)) | ((val as u32) << 9);
    }
    #[inline(always)]
    pub const fn sw_hiz(&self) -> bool {
        (self.0 >> 10) & 1 != 0
    }
    #[inline(always)]
    pub fn set_sw_hiz(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 10)) | ((val as u32) << 10);
    }
    #[inline(always)]
    pub const fn isense_enable(&self) -> bool {
        (self.0 >> 11) & 1 != 0
    }
    #[inline(always)]
    pub fn set_isense_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 11)) | ((val as u32) << 11);
    }
}

/// Single-trim regulator control (VDDIF, VDDFLASH).
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct VtrimCtrl(pub u32);

impl VtrimCtrl {
    #[inline(always)]
    pub const fn vtrim(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_vtrim(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct VddretCtrl(pub u32);

impl VddretCtrl {
    #[inline(always)]
    pub const fn vddm_ret_trim(&self) -> u8 {
        (self.0 & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_vddm_ret_trim(&mut self, val: u8) {
        self.0 = (self.0 & !0x03) | ((val as u32) & 0x03);
    }
    #[inline(always)]
    pub const fn vddm_ret_enable(&self) -> bool {
        (self.0 >> 2) & 1 != 0
    }
    #[inline(always)]
    pub fn set_vddm_ret_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 2)) | ((val as u32) << 2);
    }
    #[inline(always)]
    pub const fn vddc_ret_trim(&self) -> u8 {
        ((self.0 >> 4) & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_vddc_ret_trim(&mut self, val: u8) {
        self.0 = (self.0 & !(0x03 << 4)) | (((val as u32) & 0x03) << 4);
    }
    #[inline(always)]
    pub const fn vddc_ret_enable(&self) -> bool {
        (self.0 >> 6) & 1 != 0
    }
    #[inline(always)]
    pub fn set_vddc_ret_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 6)) | ((val as u32) << 6);
    }
    #[inline(always)]
    pub const fn vddacs_ret_trim(&self) -> u8 {
        ((self.0 >> 8) & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_vddacs_ret_trim(&mut self, val: u8) {
        self.0 = (self.0 & !(0x03 << 8)) | (((val as u32) & 0x03) << 8);
    }
    #[inline(always)]
    pub const fn vddacs_ret_enable(&self) -> bool {
        (self.0 >> 10) & 1 != 0
    }
    #[inline(always)]
    pub fn set_vddacs_ret_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 10)) | ((val as u32) << 10);
    }
    /// Retention supply for the baseband timer domain.
    #[inline(always)]
    pub const fn vddt_ret_enable(&self) -> bool {
        (self.0 >> 12) & 1 != 0
    }
    #[inline(always)]
    pub fn set_vddt_ret_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 12)) | ((val as u32) << 12);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct RcoscCtrl(pub u32);

impl RcoscCtrl {
    /// 32 kHz RC oscillator frequency trim.
    #[inline(always)]
    pub const fn rc32_ftrim(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_rc32_ftrim(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    /// Startup RC oscillator frequency trim.
    #[inline(always)]
    pub const fn rc_ftrim(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_rc_ftrim(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
    /// Startup RC oscillator range select: 0=3 MHz, 1=12 MHz, 2=24 MHz, 3=48 MHz.
    #[inline(always)]
    pub const fn rc_fsel(&self) -> u8 {
        ((self.0 >> 16) & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_rc_fsel(&mut self, val: u8) {
        self.0 = (self.0 & !(0x03 << 16)) | (((val as u32) & 0x03) << 16);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct PwrModesCtrl(pub u32);

impl PwrModesCtrl {
    /// 0=RUN, 1=SLEEP, 2=STANDBY, 3=DEEP SLEEP.
    #[inline(always)]
    pub const fn mode(&self) -> u8 {
        (self.0 & 0x07) as u8
    }
    #[inline(always)]
    pub fn set_mode(&mut self, val: u8) {
        self.0 = (self.0 & !0x07) | ((val as u32) & 0x07);
    }
}

/// Power mode select values, see [`PwrModesCtrl::set_mode`].
pub const PWR_MODE_RUN: u8 = 0;
pub const PWR_MODE_SLEEP: u8 = 1;
pub const PWR_MODE_STANDBY: u8 = 2;
pub const PWR_MODE_DEEP_SLEEP: u8 = 3;

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct WakeupCtrl(pub u32);

impl WakeupCtrl {
    /// Acknowledge the sticky baseband-timer wake flag.
    #[inline(always)]
    pub const fn bb_timer_clear(&self) -> bool {
        (self.0 >> 24) & 1 != 0
    }
    #[inline(always)]
    pub fn set_bb_timer_clear(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 24)) | ((val as u32) << 24);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct BootCfg(pub u32);

impl BootCfg {
    #[inline(always)]
    pub const fn boot_select(&self) -> u8 {
        (self.0 & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_boot_select(&mut self, val: u8) {
        self.0 = (self.0 & !0x03) | ((val as u32) & 0x03);
    }
    /// Pad retention control byte, see [`PADS_RETENTION_ENABLE`].
    #[inline(always)]
    pub const fn pads_retention(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_pads_retention(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
}

/// Freeze GPIO output state through a power collapse.
pub const PADS_RETENTION_ENABLE: u8 = 0xA5;
/// Release frozen GPIO outputs back to the pad logic.
pub const PADS_RETENTION_DISABLE: u8 = 0x5A;

/// Write-1-to-clear flags in the ACS reset status register.
pub const RESET_POR_CLEAR: u32 = 1 << 0;
pub const RESET_PAD_CLEAR: u32 = 1 << 1;
pub const RESET_BG_VREF_CLEAR: u32 = 1 << 2;
pub const RESET_VDDC_CLEAR: u32 = 1 << 3;
pub const RESET_VDDM_CLEAR: u32 = 1 << 4;
pub const RESET_VDDFLASH_CLEAR: u32 = 1 << 5;
pub const RESET_CLK_DET_CLEAR: u32 = 1 << 6;
pub const RESET_TIMEOUT_CLEAR: u32 = 1 << 7;
pub const RESET_WRONG_STATE_CLEAR: u32 = 1 << 8;
/// RSL15 only.
pub const RESET_CCAO_REBOOT_CLEAR: u32 = 1 << 9;
/// Montana only.
pub const RESET_SOC_WDG_CLEAR: u32 = 1 << 10;

/// Write-1-to-clear flags in the digital reset status register.
pub const DIG_RESET_ACS_CLEAR: u32 = 1 << 0;
pub const DIG_RESET_CM33_SW_CLEAR: u32 = 1 << 1;
pub const DIG_RESET_WATCHDOG_CLEAR: u32 = 1 << 2;
pub const DIG_RESET_LOCKUP_CLEAR: u32 = 1 << 3;
pub const DIG_RESET_DEU_CLEAR: u32 = 1 << 4;

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct ClkDetCtrl(pub u32);

impl ClkDetCtrl {
    #[inline(always)]
    pub const fn enable(&self) -> bool {
        self.0 & 1 != 0
    }
    #[inline(always)]
    pub fn set_enable(&mut self, val: bool) {
        self.0 = (self.0 & !1) | (val as u32);
    }
    /// While set, clock loss does not cause a reset.
    #[inline(always)]
    pub const fn reset_ignore(&self) -> bool {
        (self.0 >> 1) & 1 != 0
    }
    #[inline(always)]
    pub fn set_reset_ignore(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 1)) | ((val as u32) << 1);
    }
    /// Detector status.
    #[inline(always)]
    pub const fn clock_present(&self) -> bool {
        (self.0 >> 2) & 1 != 0
    }
    #[inline(always)]
    pub fn set_clock_present(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 2)) | ((val as u32) << 2);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct AoutCtrl(pub u32);

impl AoutCtrl {
    /// Analog rail routed to the AOUT test bus.
    #[inline(always)]
    pub const fn aout_sel(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_aout_sel(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn to_gpio(&self) -> u8 {
        ((self.0 >> 8) & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_to_gpio(&mut self, val: u8) {
        self.0 = (self.0 & !(0x03 << 8)) | (((val as u32) & 0x03) << 8);
    }
}

/// AOUT source: not connected.
pub const AOUT_SEL_DISCONNECTED: u8 = 0x00;
/// AOUT source: VDDRF rail.
pub const AOUT_SEL_VDDRF: u8 = 0x05;
/// AOUT source: VCC rail.
pub const AOUT_SEL_VCC: u8 = 0x08;
/// Keep AOUT off the package pins, measure internally.
pub const AOUT_TO_GPIO_INTERNAL: u8 = 0x02;

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct TempCurrCfg(pub u32);

impl TempCurrCfg {
    #[inline(always)]
    pub const fn bias_cfg(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_bias_cfg(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    /// Thermistor bias current trim.
    #[inline(always)]
    pub const fn current_trim(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_current_trim(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct RfPowerCfg(pub u32);

impl RfPowerCfg {
    #[inline(always)]
    pub const fn bb_enable(&self) -> bool {
        self.0 & 1 != 0
    }
    #[inline(always)]
    pub fn set_bb_enable(&mut self, val: bool) {
        self.0 = (self.0 & !1) | (val as u32);
    }
    #[inline(always)]
    pub const fn rf_enable(&self) -> bool {
        (self.0 >> 1) & 1 != 0
    }
    #[inline(always)]
    pub fn set_rf_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 1)) | ((val as u32) << 1);
    }
    #[inline(always)]
    pub const fn bb_startup(&self) -> bool {
        (self.0 >> 2) & 1 != 0
    }
    #[inline(always)]
    pub fn set_bb_startup(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 2)) | ((val as u32) << 2);
    }
    #[inline(always)]
    pub const fn rf_startup(&self) -> bool {
        (self.0 >> 3) & 1 != 0
    }
    #[inline(always)]
    pub fn set_rf_startup(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 3)) | ((val as u32) << 3);
    }
    #[inline(always)]
    pub const fn rf_disable(&self) -> bool {
        (self.0 >> 4) & 1 != 0
    }
    #[inline(always)]
    pub fn set_rf_disable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 4)) | ((val as u32) << 4);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct RfAccessCfg(pub u32);

impl RfAccessCfg {
    #[inline(always)]
    pub const fn bb_access(&self) -> bool {
        self.0 & 1 != 0
    }
    #[inline(always)]
    pub fn set_bb_access(&mut self, val: bool) {
        self.0 = (self.0 & !1) | (val as u32);
    }
    #[inline(always)]
    pub const fn rf_access(&self) -> bool {
        (self.0 >> 1) & 1 != 0
    }
    #[inline(always)]
    pub fn set_rf_access(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 1)) | ((val as u32) << 1);
    }
    #[inline(always)]
    pub const fn rf_irq_access(&self) -> bool {
        (self.0 >> 2) & 1 != 0
    }
    #[inline(always)]
    pub fn set_rf_irq_access(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 2)) | ((val as u32) << 2);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct VddpaCfg0(pub u32);

impl VddpaCfg0 {
    /// Dynamic PA-rail switching, see [`DYNAMIC_CTRL_ENABLE`].
    #[inline(always)]
    pub const fn dynamic_ctrl(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_dynamic_ctrl(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn sw_ctrl_delay(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_sw_ctrl_delay(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
    #[inline(always)]
    pub const fn rampup_delay(&self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_rampup_delay(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 16)) | ((val as u32) << 16);
    }
    #[inline(always)]
    pub const fn disable_delay(&self) -> u8 {
        ((self.0 >> 24) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_disable_delay(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 24)) | ((val as u32) << 24);
    }
}

/// `dynamic_ctrl` byte values.
pub const DYNAMIC_CTRL_ENABLE: u8 = 0x01;
pub const DYNAMIC_CTRL_DISABLE: u8 = 0x00;

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct SysCfg(pub u32);

impl SysCfg {
    /// 0=RC clock, 1=standby clock, 2=RF-derived clock.
    #[inline(always)]
    pub const fn sysclk_src(&self) -> u8 {
        (self.0 & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_sysclk_src(&mut self, val: u8) {
        self.0 = (self.0 & !0x03) | ((val as u32) & 0x03);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct DivCfg0(pub u32);

impl DivCfg0 {
    #[inline(always)]
    pub const fn slowclk_prescale(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_slowclk_prescale(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn bbclk_prescale(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_bbclk_prescale(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
    #[inline(always)]
    pub const fn uartclk_prescale(&self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_uartclk_prescale(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 16)) | ((val as u32) << 16);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct DivCfg1(pub u32);

impl DivCfg1 {
    #[inline(always)]
    pub const fn dcclk_prescale(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_dcclk_prescale(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn cpclk_prescale(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_cpclk_prescale(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
    #[inline(always)]
    pub const fn sensorclk_prescale(&self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_sensorclk_prescale(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 16)) | ((val as u32) << 16);
    }
    /// Charge-pump clock output, only driven in BUCK mode.
    #[inline(always)]
    pub const fn dcclk_enable(&self) -> bool {
        (self.0 >> 31) & 1 != 0
    }
    #[inline(always)]
    pub fn set_dcclk_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 31)) | ((val as u32) << 31);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct DivCfg2(pub u32);

impl DivCfg2 {
    #[inline(always)]
    pub const fn userclk_prescale(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_userclk_prescale(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    /// 0 = system clock, 1 = RF-derived clock.
    #[inline(always)]
    pub const fn userclk_src(&self) -> u8 {
        ((self.0 >> 8) & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_userclk_src(&mut self, val: u8) {
        self.0 = (self.0 & !(0x03 << 8)) | (((val as u32) & 0x03) << 8);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct AnalogInfo(pub u32);

impl AnalogInfo {
    /// XTAL digital clock output is stable.
    #[inline(always)]
    pub const fn clk_dig_ready(&self) -> bool {
        self.0 & 1 != 0
    }
    #[inline(always)]
    pub fn set_clk_dig_ready(&mut self, val: bool) {
        self.0 = (self.0 & !1) | (val as u32);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct XtalCtrl(pub u32);

impl XtalCtrl {
    #[inline(always)]
    pub const fn disable(&self) -> bool {
        self.0 & 1 != 0
    }
    #[inline(always)]
    pub fn set_disable(&mut self, val: bool) {
        self.0 = (self.0 & !1) | (val as u32);
    }
    /// Use the internally-regulated oscillator amplitude reference.
    #[inline(always)]
    pub const fn reg_value_sel_internal(&self) -> bool {
        (self.0 >> 1) & 1 != 0
    }
    #[inline(always)]
    pub fn set_reg_value_sel_internal(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 1)) | ((val as u32) << 1);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct BankSelect(pub u32);

impl BankSelect {
    #[inline(always)]
    pub const fn bank(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_bank(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct PaPwr(pub u32);

impl PaPwr {
    #[inline(always)]
    pub const fn pa_pwr(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_pa_pwr(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct PaBias(pub u32);

impl PaBias {
    #[inline(always)]
    pub const fn iq_rxtx(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_iq_rxtx(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct CkDiv(pub u32);

impl CkDiv {
    #[inline(always)]
    pub const fn ck_div(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_ck_div(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct XtalTrim(pub u32);

impl XtalTrim {
    #[inline(always)]
    pub const fn xtal_trim(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_xtal_trim(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    /// Trim applied while the oscillator starts up.
    #[inline(always)]
    pub const fn xtal_trim_init(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_xtal_trim_init(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct BbifCtrl(pub u32);

impl BbifCtrl {
    #[inline(always)]
    pub const fn clk_enable(&self) -> bool {
        self.0 & 1 != 0
    }
    #[inline(always)]
    pub fn set_clk_enable(&mut self, val: bool) {
        self.0 = (self.0 & !1) | (val as u32);
    }
    /// Baseband clock divider, N-1 encoded (7 = divide by 8).
    #[inline(always)]
    pub const fn clk_div(&self) -> u8 {
        ((self.0 >> 1) & 0x07) as u8
    }
    #[inline(always)]
    pub fn set_clk_div(&mut self, val: u8) {
        self.0 = (self.0 & !(0x07 << 1)) | (((val as u32) & 0x07) << 1);
    }
    #[inline(always)]
    pub const fn deep_sleep(&self) -> bool {
        (self.0 >> 4) & 1 != 0
    }
    #[inline(always)]
    pub fn set_deep_sleep(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 4)) | ((val as u32) << 4);
    }
    /// Request the baseband to leave low-power clocking.
    #[inline(always)]
    pub const fn wakeup(&self) -> bool {
        (self.0 >> 5) & 1 != 0
    }
    #[inline(always)]
    pub fn set_wakeup(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 5)) | ((val as u32) << 5);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct BbifStatus(pub u32);

impl BbifStatus {
    /// Active baseband clock source, see [`BB_CLK_SRC_LOW_POWER`].
    #[inline(always)]
    pub const fn clk_source(&self) -> u8 {
        (self.0 & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_clk_source(&mut self, val: u8) {
        self.0 = (self.0 & !0x03) | ((val as u32) & 0x03);
    }
    #[inline(always)]
    pub const fn osc_enabled(&self) -> bool {
        (self.0 >> 4) & 1 != 0
    }
    #[inline(always)]
    pub fn set_osc_enabled(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 4)) | ((val as u32) << 4);
    }
}

pub const BB_CLK_SRC_LOW_POWER: u8 = 0x01;
pub const BB_CLK_SRC_MASTER: u8 = 0x02;

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct FlashDelayCtrl(pub u32);

impl FlashDelayCtrl {
    #[inline(always)]
    pub const fn wait_states(&self) -> u8 {
        (self.0 & 0x07) as u8
    }
    #[inline(always)]
    pub fn set_wait_states(&mut self, val: u8) {
        self.0 = (self.0 & !0x07) | ((val as u32) & 0x07);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct LsadCfg(pub u32);

impl LsadCfg {
    #[inline(always)]
    pub const fn prescale(&self) -> u8 {
        (self.0 & 0x0f) as u8
    }
    #[inline(always)]
    pub fn set_prescale(&mut self, val: u8) {
        self.0 = (self.0 & !0x0f) | ((val as u32) & 0x0f);
    }
    #[inline(always)]
    pub const fn normal(&self) -> bool {
        (self.0 >> 4) & 1 != 0
    }
    #[inline(always)]
    pub fn set_normal(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 4)) | ((val as u32) << 4);
    }
    /// Halve the battery input before conversion.
    #[inline(always)]
    pub const fn vbat_div2(&self) -> bool {
        (self.0 >> 5) & 1 != 0
    }
    #[inline(always)]
    pub fn set_vbat_div2(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 5)) | ((val as u32) << 5);
    }
}

/// LSAD prescale for a 200-sample conversion window.
pub const LSAD_PRESCALE_200: u8 = 0x0a;

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct LsadInputSel(pub u32);

impl LsadInputSel {
    #[inline(always)]
    pub const fn pos_input(&self) -> u8 {
        (self.0 & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_pos_input(&mut self, val: u8) {
        self.0 = (self.0 & !0xff) | (val as u32);
    }
    #[inline(always)]
    pub const fn neg_input(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }
    #[inline(always)]
    pub fn set_neg_input(&mut self, val: u8) {
        self.0 = (self.0 & !(0xff << 8)) | ((val as u32) << 8);
    }
}

/// LSAD positive input: AOUT test bus.
pub const LSAD_POS_INPUT_AOUT: u8 = 0x0e;
/// LSAD negative input: ground.
pub const LSAD_NEG_INPUT_GND: u8 = 0x0f;

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct DmaCtrl(pub u32);

impl DmaCtrl {
    #[inline(always)]
    pub const fn enable(&self) -> bool {
        self.0 & 1 != 0
    }
    #[inline(always)]
    pub fn set_enable(&mut self, val: bool) {
        self.0 = (self.0 & !1) | (val as u32);
    }
    #[inline(always)]
    pub const fn src_inc(&self) -> bool {
        (self.0 >> 1) & 1 != 0
    }
    #[inline(always)]
    pub fn set_src_inc(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 1)) | ((val as u32) << 1);
    }
    #[inline(always)]
    pub const fn dst_inc(&self) -> bool {
        (self.0 >> 2) & 1 != 0
    }
    #[inline(always)]
    pub fn set_dst_inc(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 2)) | ((val as u32) << 2);
    }
    /// Transfer element size, log2 bytes (2 = 32-bit).
    #[inline(always)]
    pub const fn word_size(&self) -> u8 {
        ((self.0 >> 4) & 0x03) as u8
    }
    #[inline(always)]
    pub fn set_word_size(&mut self, val: u8) {
        self.0 = (self.0 & !(0x03 << 4)) | (((val as u32) & 0x03) << 4);
    }
    #[inline(always)]
    pub const fn complete_int_enable(&self) -> bool {
        (self.0 >> 6) & 1 != 0
    }
    #[inline(always)]
    pub fn set_complete_int_enable(&mut self, val: bool) {
        self.0 = (self.0 & !(1 << 6)) | ((val as u32) << 6);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct DmaStatus(pub u32);

impl DmaStatus {
    #[inline(always)]
    pub const fn complete(&self) -> bool {
        self.0 & 1 != 0
    }
    #[inline(always)]
    pub fn set_complete(&mut self, val: bool) {
        self.0 = (self.0 & !1) | (val as u32);
    }
}

#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Default)]
pub struct DmaLen(pub u32);

impl DmaLen {
    #[inline(always)]
    pub const fn words(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }
    #[inline(always)]
    pub fn set_words(&mut self, val: u16) {
        self.0 = (self.0 & !0xffff) | (val as u32);
    }
}

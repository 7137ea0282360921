//! Power-mode controller.
//!
//! Drives the transitions out of RUN: SLEEP with a choice of three
//! retention levels, STANDBY, and DEEP SLEEP. Entry always follows the
//! same shape: drop the system clock to the 3 MHz RC oscillator (the
//! sleep request is only defined at low clock rates), tear the radio
//! domain down, freeze the pads, stage the mode-specific retention
//! regulators, write the mode select and wait for an interrupt. If a
//! wake event or enabled interrupt is already pending the wait falls
//! straight through without a power collapse; the wake sequence runs
//! either way and does not tell the two apart.
//!
//! Memory-retention sleep powers the core off entirely. The wake path
//! then re-enters through [`wakeup_from_ram`] via an 8-word wake block
//! in retained RAM ([`WakeContext`]), finding its configuration
//! through a pointer parked in a retained scratch register.
//!
//! The radio register image ([`RadioSnapshot`]) and the raised
//! VDDC/VCC trims of core retention are single-slot resources: a
//! second capture while one is held is rejected rather than silently
//! overwritten.

use embedded_hal_1::delay::DelayNs;

use crate::clock::{ClockController, RcFrequency, SysClkSource, XTAL_FREQUENCY};
use crate::crc::crc32;
use crate::dma::WordCopy;
use crate::pac::{self, regs};
use crate::time::Hertz;
use crate::trim::{targets, Trim, TrimRegion};
use crate::Variant;


/// Words per bank-switched PHY register image.
const RF_IMAGE_WORDS: usize = 62;

/// Words in the retained-RAM wake block.
pub const WAKE_BLOCK_WORDS: usize = 8;

/// VDDPA trim parked while the radio domain is down (1.60 V point).
const VDDPA_SLEEP_TRIM: u8 = 0x50;

/// Trim codes for the 1.10 V retention floor on VDDC and VCC.
const VDDC_TRIM_1100: u8 = 0x30;
const VCC_TRIM_1100: u8 = 0x30;

/// Baseband clock divider used while pulsing the BB timer awake.
const BBCLK_DIVIDER_8: u8 = 7;

/// Two low-power clock periods at 32.768 kHz.
const BB_WAKE_SETTLE_US: u32 = 61;

/// Power up the RF and baseband domains and lift bus isolation.
pub fn rf_enable(sysctrl: pac::Sysctrl, variant: Variant) {
    match variant {
        Variant::Rsl15 => {
            // Staged startup: raise the startup switches against the
            // disable first, then swap disable for enable.
            sysctrl.rf_power_cfg().modify(|w| {
                w.set_bb_startup(true);
                w.set_rf_startup(true);
                w.set_rf_disable(true);
            });
            sysctrl.rf_power_cfg().modify(|w| {
                w.set_bb_startup(true);
                w.set_rf_startup(true);
                w.set_rf_enable(true);
            });
        }
        Variant::Montana => {
            sysctrl.rf_power_cfg().modify(|w| {
                w.set_bb_enable(true);
                w.set_rf_enable(true);
            });
        }
    }

    sysctrl.rf_access_cfg().modify(|w| {
        w.set_bb_access(true);
        w.set_rf_access(true);
        w.set_rf_irq_access(true);
    });

    // Cycle baseband access once; the RF side does not start cleanly
    // without it.
    sysctrl.rf_access_cfg().modify(|w| w.set_bb_access(false));
    sysctrl.rf_access_cfg().modify(|w| w.set_bb_access(true));
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerError {
    /// The radio snapshot slot already holds an image.
    SnapshotHeld,
    /// No captured radio image to restore.
    SnapshotEmpty,
    /// The core-retention trim backup already holds values.
    BackupHeld,
    /// Memory retention staged without a wake block.
    WakeBlockUnset,
}

/// Boot path taken after a wake that goes through reset.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootMode {
    /// Boot from flash with the crystal oscillator left down.
    FlashXtalDisable,
    FlashXtalDefaultTrim,
    FlashXtalCustomTrim,
    /// Boot through the wake block in retained RAM.
    Custom,
}

impl BootMode {
    const fn bits(self) -> u8 {
        match self {
            BootMode::FlashXtalDisable => 0,
            BootMode::FlashXtalDefaultTrim => 1,
            BootMode::FlashXtalCustomTrim => 2,
            BootMode::Custom => 3,
        }
    }
}

/// Clock tree to re-establish on wake.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeClocks {
    pub system_clock: Hertz,
    pub dividers: crate::clock::ClockConfig,
}

/// Retention regulator trims for SLEEP.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetentionTrims {
    /// VDDM retention trim, 0..=3.
    pub vddm_trim: u8,
    /// VDDC retention trim, 0..=3.
    pub vddc_trim: u8,
    /// VDDACS retention trim, 0..=3.
    pub vddacs_trim: u8,
    /// Keep the baseband timer domain powered.
    pub vddt_enable: bool,
}

/// Standby regulator trims.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StandbyTrims {
    pub vddc_standby: u8,
    pub vddm_standby: u8,
}

/// What SLEEP keeps alive.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Retention {
    /// Nothing retained; wake is a full restart.
    None,
    /// RAM retained, core lost; wake re-enters through the wake block.
    Memory,
    /// Core and RAM retained; execution resumes after the wait.
    Core,
}

/// Saved execution context for a memory-retention wake.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeContext {
    pub stack_pointer: u32,
    pub vector_table: u32,
    pub entry: u32,
}

impl WakeContext {
    /// Serialize into the wake block format the boot flow consumes:
    /// stack pointer, vector table, entry address, four reserved zero
    /// words and a CRC over the first seven.
    pub fn to_block(&self) -> [u32; WAKE_BLOCK_WORDS] {
        let mut block = [
            self.stack_pointer,
            self.vector_table,
            self.entry,
            0,
            0,
            0,
            0,
            0,
        ];
        block[7] = crc32(&block[..7]);
        block
    }

    /// Rebuild a context from a wake block, rejecting a failed CRC
    /// instead of trusting the retained words.
    pub fn from_block(block: &[u32; WAKE_BLOCK_WORDS]) -> Result<Self, WakeBlockError> {
        if crc32(&block[..7]) != block[7] {
            return Err(WakeBlockError);
        }
        Ok(Self {
            stack_pointer: block[0],
            vector_table: block[1],
            entry: block[2],
        })
    }
}

/// The wake block failed its CRC check.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeBlockError;

/// Wake block placement for memory-retention sleep.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MemoryWake {
    context: WakeContext,
    block_addr: usize,
}

impl MemoryWake {
    /// # Safety
    ///
    /// `block_addr` must point to [`WAKE_BLOCK_WORDS`] writable words
    /// of retained RAM reserved for the wake block.
    pub const unsafe fn new(context: WakeContext, block_addr: usize) -> Self {
        Self {
            context,
            block_addr,
        }
    }
}

/// SLEEP mode configuration.
///
/// Lives for the whole sleep cycle: memory-retention wake finds it
/// again through the address parked in the retained scratch register.
pub struct SleepConfig {
    pub variant: Variant,
    /// Wake-source enable mask for the wake configuration register.
    pub wakeup_sources: u32,
    pub boot_mode: BootMode,
    pub clocks: WakeClocks,
    /// Reconfigure GPIO after pad retention drops.
    pub gpio_restore: Option<fn()>,
    /// Snapshot and restore the radio register state.
    pub ble_present: bool,
    /// DMA channel moving the radio images on the cold wake path.
    pub rf_dma_channel: u8,
    pub retention_trims: RetentionTrims,
    /// Required for [`Retention::Memory`].
    pub memory_wake: Option<MemoryWake>,
    /// Application entry on a memory-retention wake. Without it the
    /// wake handler halts under watchdog refresh rather than jumping
    /// anywhere undefined.
    pub resume: Option<fn() -> !>,
}

/// STANDBY mode configuration.
pub struct StandbyConfig {
    pub wakeup_sources: u32,
    pub boot_mode: BootMode,
    pub clocks: WakeClocks,
    pub gpio_restore: Option<fn()>,
    pub ble_present: bool,
    pub standby_trims: StandbyTrims,
}

/// DEEP SLEEP mode configuration. Wake is always a full reset.
pub struct DeepSleepConfig {
    pub wakeup_sources: u32,
    pub boot_mode: BootMode,
    pub clocks: WakeClocks,
    pub gpio_restore: Option<fn()>,
}

/// RAM image of the radio state dropped during SLEEP and STANDBY:
/// both bank-switched PHY register banks plus the baseband block.
///
/// Single-slot: capture marks the slot held and a second capture is
/// rejected until restore releases it.
pub struct RadioSnapshot {
    bb: [u32; pac::BB_WORDS],
    rf_1mbps: [u32; RF_IMAGE_WORDS],
    rf_2mbps: [u32; RF_IMAGE_WORDS],
    held: bool,
}

impl RadioSnapshot {
    pub const fn new() -> Self {
        Self {
            bb: [0; pac::BB_WORDS],
            rf_1mbps: [0; RF_IMAGE_WORDS],
            rf_2mbps: [0; RF_IMAGE_WORDS],
            held: false,
        }
    }

    pub const fn is_held(&self) -> bool {
        self.held
    }

    /// Snapshot both PHY banks and the baseband block.
    ///
    /// Waits for the baseband domain to fall back to the low-power
    /// clock and for its oscillator enables to clear before declaring
    /// the image complete; copying mid-transition tears it. The waits
    /// refresh the watchdog.
    pub fn capture(
        &mut self,
        rf: pac::Rf,
        bb: pac::Bb,
        bbif: pac::Bbif,
        wdog: pac::Wdog,
        copier: &mut impl WordCopy,
    ) -> Result<(), PowerError> {
        if self.held {
            return Err(PowerError::SnapshotHeld);
        }

        rf.bank_select().write(|w| w.set_bank(1));
        unsafe {
            copier.copy(rf.as_ptr(), self.rf_2mbps.as_mut_ptr(), RF_IMAGE_WORDS as u16);
        }
        rf.bank_select().write(|w| w.set_bank(0));
        unsafe {
            copier.copy(rf.as_ptr(), self.rf_1mbps.as_mut_ptr(), RF_IMAGE_WORDS as u16);
        }

        wdog.refresh();
        while bbif.status().read().clk_source() == regs::BB_CLK_SRC_MASTER {}

        unsafe {
            copier.copy(bb.as_ptr(), self.bb.as_mut_ptr(), pac::BB_WORDS as u16);
        }

        // The restored image must not put the baseband straight back
        // into deep sleep: clear the sleep controls in the copy.
        self.bb[pac::BB_DEEPSLCNTL_WORD] = 0;

        wdog.refresh();
        while bbif.status().read().osc_enabled() {}

        self.held = true;
        Ok(())
    }

    /// Write the captured images back and release the slot.
    pub fn restore(
        &mut self,
        rf: pac::Rf,
        bb: pac::Bb,
        copier: &mut impl WordCopy,
    ) -> Result<(), PowerError> {
        if !self.held {
            return Err(PowerError::SnapshotEmpty);
        }

        rf.bank_select().write(|w| w.set_bank(1));
        unsafe {
            copier.copy(self.rf_2mbps.as_ptr(), rf.as_ptr(), RF_IMAGE_WORDS as u16);
        }
        rf.bank_select().write(|w| w.set_bank(0));
        unsafe {
            copier.copy(self.rf_1mbps.as_ptr(), rf.as_ptr(), RF_IMAGE_WORDS as u16);
        }
        unsafe {
            copier.copy(self.bb.as_ptr(), bb.as_ptr(), pac::BB_WORDS as u16);
        }

        self.held = false;
        Ok(())
    }
}

impl Default for RadioSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

// The one snapshot slot, shared by sleep entry and the RAM wake
// handler, which cannot carry driver state across a power collapse.
// Accessed from a single execution context with interrupts masked
// around sleep entry.
static mut RADIO_SNAPSHOT: RadioSnapshot = RadioSnapshot::new();

fn radio_snapshot() -> &'static mut RadioSnapshot {
    unsafe { &mut *core::ptr::addr_of_mut!(RADIO_SNAPSHOT) }
}

/// VDDC/VCC settings raised for core retention, put back on wake.
struct CoreBackup {
    vddc_trim: u8,
    vcc_ctrl: Option<regs::VccCtrl>,
}

/// Power-mode state machine driver.
pub struct PowerModes<'a, W, D> {
    acs: pac::Acs,
    sysctrl: pac::Sysctrl,
    rf: pac::Rf,
    bb: pac::Bb,
    bbif: pac::Bbif,
    reset: pac::Reset,
    wdog: pac::Wdog,
    clocks: ClockController,
    trims: TrimRegion<'a>,
    variant: Variant,
    copier: W,
    delay: D,
    core_backup: Option<CoreBackup>,
}

impl<'a, W: WordCopy, D: DelayNs> PowerModes<'a, W, D> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clocks: ClockController,
        acs: pac::Acs,
        sysctrl: pac::Sysctrl,
        rf: pac::Rf,
        bb: pac::Bb,
        bbif: pac::Bbif,
        reset: pac::Reset,
        wdog: pac::Wdog,
        trims: TrimRegion<'a>,
        variant: Variant,
        copier: W,
        delay: D,
    ) -> Self {
        Self {
            acs,
            sysctrl,
            rf,
            bb,
            bbif,
            reset,
            wdog,
            clocks,
            trims,
            variant,
            copier,
            delay,
            core_backup: None,
        }
    }

    /// Program the wake sources and boot settings for SLEEP.
    pub fn sleep_init(&mut self, cfg: &SleepConfig) {
        self.acs
            .wakeup_cfg()
            .write_value(regs::Raw(cfg.wakeup_sources));
        self.acs
            .boot_cfg()
            .write(|w| w.set_boot_select(cfg.boot_mode.bits()));
    }

    /// Program the wake sources and boot settings for STANDBY.
    pub fn standby_init(&mut self, cfg: &StandbyConfig) {
        self.acs
            .wakeup_cfg()
            .write_value(regs::Raw(cfg.wakeup_sources));
        self.acs
            .boot_cfg()
            .write(|w| w.set_boot_select(cfg.boot_mode.bits()));
    }

    /// Program the wake sources and boot settings for DEEP SLEEP.
    pub fn deep_sleep_init(&mut self, cfg: &DeepSleepConfig) {
        self.acs
            .wakeup_cfg()
            .write_value(regs::Raw(cfg.wakeup_sources));
        self.acs
            .boot_cfg()
            .write(|w| w.set_boot_select(cfg.boot_mode.bits()));
    }

    /// Add wake sources to a saved mask and the live register.
    pub fn wakeup_source_enable(&mut self, sources: u32, saved: &mut u32) {
        *saved |= sources;
        self.acs.wakeup_cfg().write_value(regs::Raw(*saved));
    }

    /// Remove wake sources from a saved mask and the live register.
    pub fn wakeup_source_disable(&mut self, sources: u32, saved: &mut u32) {
        *saved &= !sources;
        self.acs.wakeup_cfg().write_value(regs::Raw(*saved));
    }

    /// Enter SLEEP. Returns once the core is running again, whether
    /// the chip actually slept or the wait fell through on a pending
    /// event; the wake sequence runs either way.
    pub fn enter_sleep(
        &mut self,
        cfg: &'static SleepConfig,
        retention: Retention,
    ) -> Result<(), PowerError> {
        if cfg.ble_present {
            radio_snapshot().capture(self.rf, self.bb, self.bbif, self.wdog, &mut self.copier)?;
        }

        // Let anything already pending be serviced at full speed
        // before the clock drops.
        arch::interrupt_flush();

        self.stage_sleep(cfg, retention)?;
        arch::wait_for_interrupt();

        if matches!(retention, Retention::Core) {
            self.restore_core_trims();
        }
        self.sleep_wakeup_init(cfg)?;
        arch::interrupts_on();
        Ok(())
    }

    /// Enter STANDBY. Same fall-through semantics as
    /// [`PowerModes::enter_sleep`].
    pub fn enter_standby(&mut self, cfg: &StandbyConfig) -> Result<(), PowerError> {
        if cfg.ble_present {
            radio_snapshot().capture(self.rf, self.bb, self.bbif, self.wdog, &mut self.copier)?;
        }

        arch::interrupt_flush();

        self.stage_standby(cfg);
        arch::wait_for_interrupt();

        self.standby_wakeup_init(cfg)?;
        arch::interrupts_on();
        Ok(())
    }

    /// Enter DEEP SLEEP. A real entry wakes through reset; a
    /// fall-through continues here and reinitializes as if reset.
    pub fn enter_deep_sleep(&mut self, cfg: &DeepSleepConfig) {
        arch::interrupt_flush();

        self.stage_deep_sleep(cfg);
        arch::wait_for_interrupt();

        self.wakeup_with_reset(&cfg.clocks, cfg.boot_mode, cfg.gpio_restore);
    }

    /// Everything of SLEEP entry up to the wait: clock drop, radio
    /// teardown, pad freeze, retention staging, mode select.
    ///
    /// For [`Retention::Memory`] the config's address is parked in the
    /// retained scratch register; it must stay live until the wake
    /// handler has consumed it, which [`PowerModes::enter_sleep`]
    /// guarantees by requiring `'static`.
    pub fn stage_sleep(&mut self, cfg: &SleepConfig, retention: Retention) -> Result<(), PowerError> {
        self.stage_radio_down();
        self.pads_retention(true);

        match retention {
            Retention::None => {
                self.write_retention_ctrl(&cfg.retention_trims, false, false);
                self.select_mode(regs::PWR_MODE_SLEEP);
            }
            Retention::Memory => self.stage_memory_retention(cfg)?,
            Retention::Core => self.stage_core_retention(cfg)?,
        }
        trace!("sleep staged, {:?} retention", retention);
        Ok(())
    }

    /// Everything of STANDBY entry up to the wait.
    pub fn stage_standby(&mut self, cfg: &StandbyConfig) {
        self.stage_radio_down();

        self.acs
            .vddc_ctrl()
            .modify(|w| w.set_standby_vtrim(cfg.standby_trims.vddc_standby));
        self.acs
            .vddm_ctrl()
            .modify(|w| w.set_standby_vtrim(cfg.standby_trims.vddm_standby));

        self.pads_retention(true);
        self.acs
            .boot_gp_data()
            .write_value(self.sysctrl.mem_access_cfg().read());
        self.select_mode(regs::PWR_MODE_STANDBY);
    }

    /// Everything of DEEP SLEEP entry up to the wait. The radio domain
    /// is dropped by the power collapse itself.
    pub fn stage_deep_sleep(&mut self, _cfg: &DeepSleepConfig) {
        self.clocks.rc_clock_init(RcFrequency::Mhz3);
        self.pads_retention(true);
        self.select_mode(regs::PWR_MODE_DEEP_SLEEP);
    }

    /// Common wake sequence after SLEEP, plus the baseband timer
    /// wake pulse when its retention domain stayed powered.
    pub fn sleep_wakeup_init(&mut self, cfg: &SleepConfig) -> Result<(), PowerError> {
        self.wake_common(&cfg.clocks, cfg.boot_mode, cfg.gpio_restore, cfg.ble_present)?;

        if self.acs.vddret_ctrl().read().vddt_ret_enable() && cfg.ble_present {
            self.bb_timer_wake_pulse();
        }
        Ok(())
    }

    /// Common wake sequence after STANDBY.
    pub fn standby_wakeup_init(&mut self, cfg: &StandbyConfig) -> Result<(), PowerError> {
        self.wake_common(&cfg.clocks, cfg.boot_mode, cfg.gpio_restore, cfg.ble_present)?;

        if cfg.ble_present {
            self.bb_timer_wake_pulse();
        }
        Ok(())
    }

    /// Wake path for modes that come back through a reset: the
    /// no-retention sleeps and DEEP SLEEP.
    pub fn wakeup_with_reset(
        &mut self,
        clocks: &WakeClocks,
        boot_mode: BootMode,
        gpio_restore: Option<fn()>,
    ) {
        self.wdog.refresh();
        self.clock_detector_enable();

        if let Some(restore) = gpio_restore {
            restore();
        }
        self.pads_retention(false);
        self.clear_reset_flags();
        self.wake_clock_init(clocks, boot_mode);

        // A latched wake flag means the wake interrupt fired while it
        // could not be taken; hand it to the NVIC now.
        if self.acs.wakeup_ctrl().read().0 != 0 && !arch::irq_is_pending(pac::Interrupt::Wakeup) {
            arch::irq_pend(pac::Interrupt::Wakeup);
        }
        arch::irq_enable(pac::Interrupt::Wakeup);
        arch::interrupts_on();
    }

    /// Put back the VDDC/VCC settings raised for core retention.
    /// Runs right after the core resumes, ahead of the common wake
    /// sequence.
    pub fn restore_core_trims(&mut self) {
        if let Some(backup) = self.core_backup.take() {
            if let Some(vcc) = backup.vcc_ctrl {
                self.acs.vcc_ctrl().write_value(vcc);
            }
            self.acs
                .vddc_ctrl()
                .modify(|w| w.set_vtrim(backup.vddc_trim));
        }
    }

    /// Bring the crystal path up and run the system from it, with the
    /// prescaler chosen for the requested system clock.
    pub fn xtal_clock_init(&mut self, clocks: &WakeClocks) {
        let prescaler = (XTAL_FREQUENCY.0 / clocks.system_clock.0) as u8;
        self.clocks.xtal_clock_init(prescaler);
        self.clocks.system_clock_config(SysClkSource::RfClk);
        self.clocks.configure_dividers(&clocks.dividers);
    }

    fn wake_common(
        &mut self,
        clocks: &WakeClocks,
        boot_mode: BootMode,
        gpio_restore: Option<fn()>,
        ble_present: bool,
    ) -> Result<(), PowerError> {
        self.wdog.refresh();
        self.clock_detector_enable();

        if let Some(restore) = gpio_restore {
            restore();
        }
        self.pads_retention(false);
        self.clear_reset_flags();
        self.wake_clock_init(clocks, boot_mode);

        if ble_present {
            radio_snapshot().restore(self.rf, self.bb, &mut self.copier)?;
        }
        Ok(())
    }

    /// Shut the radio domain down for a power transition: clock to
    /// 3 MHz RC, oscillator off, bus access and power gated, PA rail
    /// parked, VDDRF off.
    fn stage_radio_down(&mut self) {
        self.clocks.rc_clock_init(RcFrequency::Mhz3);

        if self.sysctrl.rf_access_cfg().read().rf_access() {
            self.rf.xtal_ctrl().modify(|w| w.set_disable(true));
        }

        self.sysctrl.rf_access_cfg().modify(|w| {
            w.set_rf_access(false);
            w.set_rf_irq_access(false);
            w.set_bb_access(false);
        });
        self.sysctrl.rf_power_cfg().modify(|w| {
            w.set_rf_enable(false);
            w.set_bb_enable(false);
        });

        self.acs.vddpa_ctrl().write(|w| {
            w.set_vtrim(VDDPA_SLEEP_TRIM);
            w.set_sw_hiz(true);
            w.set_enable(false);
            w.set_isense_enable(false);
        });
        self.acs.vddrf_ctrl().modify(|w| w.set_enable(false));
    }

    fn stage_memory_retention(&mut self, cfg: &SleepConfig) -> Result<(), PowerError> {
        let wake = cfg.memory_wake.as_ref().ok_or(PowerError::WakeBlockUnset)?;

        self.write_retention_ctrl(&cfg.retention_trims, true, false);

        let block = wake.context.to_block();
        let dst = wake.block_addr as *mut u32;
        for (i, word) in block.iter().enumerate() {
            unsafe { dst.add(i).write_volatile(*word) };
        }

        self.sysctrl
            .wakeup_addr()
            .write_value(regs::Raw(wake.block_addr as u32));
        self.acs
            .boot_gp_data()
            .write_value(self.sysctrl.mem_access_cfg().read());
        self.acs
            .gp_data()
            .write_value(regs::Raw(cfg as *const SleepConfig as u32));

        self.select_mode(regs::PWR_MODE_SLEEP);
        Ok(())
    }

    fn stage_core_retention(&mut self, cfg: &SleepConfig) -> Result<(), PowerError> {
        // The retention regulator must not be overdriven by a VDDC
        // trim below its 1.1 V floor: raise VDDC (and DCDC, if VCC is
        // also low) for the duration of the sleep.
        if self.acs.vddc_ctrl().read().vtrim() < VDDC_TRIM_1100 {
            if self.core_backup.is_some() {
                return Err(PowerError::BackupHeld);
            }
            let mut backup = CoreBackup {
                vddc_trim: self.acs.vddc_ctrl().read().vtrim(),
                vcc_ctrl: None,
            };
            if self.acs.vcc_ctrl().read().vtrim() < VCC_TRIM_1100 {
                backup.vcc_ctrl = Some(self.acs.vcc_ctrl().read());
                let mut trim = Trim::new(self.acs, self.rf, self.variant);
                let _ = trim.load_dcdc(&self.trims, targets::DCDC_1120);
            }
            self.acs.vddc_ctrl().modify(|w| w.set_vtrim(VDDC_TRIM_1100));
            self.core_backup = Some(backup);
        }

        self.write_retention_ctrl(&cfg.retention_trims, true, true);
        self.acs
            .boot_gp_data()
            .write_value(self.sysctrl.mem_access_cfg().read());
        self.select_mode(regs::PWR_MODE_SLEEP);
        Ok(())
    }

    fn write_retention_ctrl(&mut self, trims: &RetentionTrims, vddm_on: bool, vddc_on: bool) {
        self.acs.vddret_ctrl().write(|w| {
            w.set_vddm_ret_trim(trims.vddm_trim);
            w.set_vddm_ret_enable(vddm_on);
            w.set_vddacs_ret_trim(trims.vddacs_trim);
            w.set_vddt_ret_enable(trims.vddt_enable);
            w.set_vddc_ret_trim(trims.vddc_trim);
            w.set_vddc_ret_enable(vddc_on);
        });
    }

    fn pads_retention(&mut self, frozen: bool) {
        let val = if frozen {
            regs::PADS_RETENTION_ENABLE
        } else {
            regs::PADS_RETENTION_DISABLE
        };
        self.acs.boot_cfg().modify(|w| w.set_pads_retention(val));
    }

    fn select_mode(&mut self, mode: u8) {
        self.acs.pwr_modes_ctrl().write(|w| w.set_mode(mode));
    }

    /// Three-step clock detector bring-up. The detector must report a
    /// clock before reset-on-clock-loss is armed, or it resets
    /// spuriously while settling.
    fn clock_detector_enable(&mut self) {
        self.acs.clk_det_ctrl().modify(|w| w.set_enable(true));
        while !self.acs.clk_det_ctrl().read().clock_present() {}
        self.acs.clk_det_ctrl().modify(|w| w.set_reset_ignore(false));
    }

    fn clear_reset_flags(&mut self) {
        self.reset.dig_status().write_value(regs::Raw(
            regs::DIG_RESET_ACS_CLEAR
                | regs::DIG_RESET_CM33_SW_CLEAR
                | regs::DIG_RESET_WATCHDOG_CLEAR
                | regs::DIG_RESET_LOCKUP_CLEAR
                | regs::DIG_RESET_DEU_CLEAR,
        ));

        let variant_flag = match self.variant {
            Variant::Rsl15 => regs::RESET_CCAO_REBOOT_CLEAR,
            Variant::Montana => regs::RESET_SOC_WDG_CLEAR,
        };
        self.acs.reset_status().write_value(regs::Raw(
            regs::RESET_POR_CLEAR
                | regs::RESET_PAD_CLEAR
                | regs::RESET_BG_VREF_CLEAR
                | regs::RESET_VDDC_CLEAR
                | regs::RESET_VDDM_CLEAR
                | regs::RESET_VDDFLASH_CLEAR
                | regs::RESET_CLK_DET_CLEAR
                | regs::RESET_TIMEOUT_CLEAR
                | regs::RESET_WRONG_STATE_CLEAR
                | variant_flag,
        ));
    }

    /// Re-establish the clock tree on wake. The crystal boot paths go
    /// through the full oscillator bring-up; the RC path reloads the
    /// oscillator trim for the requested point, falling back to the
    /// calibrated 12 MHz setting when no usable trim exists.
    fn wake_clock_init(&mut self, clocks: &WakeClocks, boot_mode: BootMode) {
        match boot_mode {
            BootMode::FlashXtalDisable => {
                let target = (clocks.system_clock.0 / 1000) as u16;
                let mut trim = Trim::new(self.acs, self.rf, self.variant);
                let faults = trim.load_rcosc(&self.trims, target);

                let freq = match (faults.is_empty(), target) {
                    (true, targets::RC3) => RcFrequency::Mhz3,
                    (true, targets::RC12) => RcFrequency::Mhz12,
                    (true, targets::RC24) => RcFrequency::Mhz24,
                    (true, targets::RC48) => RcFrequency::Mhz48,
                    _ => {
                        let _ = trim.load_rcosc(&self.trims, targets::RC12);
                        RcFrequency::Mhz12
                    }
                };
                self.clocks.rc_clock_init(freq);
                self.clocks.configure_dividers(&clocks.dividers);
            }
            _ => self.xtal_clock_init(clocks),
        }
    }

    /// Pulse the baseband timer awake: enable its clock with the
    /// wake bit raised, wait for the domain to reach the master
    /// clock, then drop the pulse and acknowledge the sticky flag.
    fn bb_timer_wake_pulse(&mut self) {
        self.bbif.ctrl().write(|w| {
            w.set_clk_enable(true);
            w.set_clk_div(BBCLK_DIVIDER_8);
            w.set_deep_sleep(true);
        });
        self.bbif.ctrl().modify(|w| w.set_wakeup(true));

        self.delay.delay_us(BB_WAKE_SETTLE_US);

        self.wdog.refresh();
        while self.bbif.status().read().clk_source() != regs::BB_CLK_SRC_MASTER {}

        self.bbif.ctrl().modify(|w| w.set_wakeup(false));
        self.acs
            .wakeup_ctrl()
            .modify(|w| w.set_bb_timer_clear(true));
    }
}

/// Wake entry for a memory-retention sleep, reached through the wake
/// block instead of a normal call.
///
/// # Safety
///
/// Only the boot flow may enter this, with a valid
/// `&'static SleepConfig` address in the retained scratch register
/// and the radio snapshot from the matching sleep entry still held.
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub unsafe extern "C" fn wakeup_from_ram() -> ! {
    use crate::dma::DmaWordCopy;

    cortex_m::interrupt::disable();

    let p = pac::Peripherals::steal();
    let cfg = &*(p.acs.gp_data().read().0 as usize as *const SleepConfig);
    p.wdog.refresh();

    // Coprocessor access is lost with the core power; re-grant FPU
    // access before any float code runs.
    let mut cp = cortex_m::Peripherals::steal();
    cp.SCB.cpacr.modify(|r| r | (0b1111 << 20));

    arch::irq_enable(pac::Interrupt::Wakeup);

    // Reject a torn wake block before trusting anything else retained
    // RAM carries; spinning without a refresh lets the watchdog force
    // a clean reboot.
    if let Some(wake) = cfg.memory_wake.as_ref() {
        let block = &*(wake.block_addr as *const [u32; WAKE_BLOCK_WORDS]);
        if WakeContext::from_block(block).is_err() {
            loop {}
        }
    }

    let clocks = ClockController::new(
        p.clk,
        p.acs,
        p.rf,
        p.flash,
        p.sysctrl,
        cfg.variant,
        Hertz::mhz(3),
    );
    let trims = TrimRegion::from_ptr(crate::trim::PRIMARY_REGION_ADDR as *const _);
    let dma = match cfg.rf_dma_channel {
        0 => p.dma0,
        1 => p.dma1,
        2 => p.dma2,
        _ => p.dma3,
    };
    let mut power = PowerModes::new(
        clocks,
        p.acs,
        p.sysctrl,
        p.rf,
        p.bb,
        p.bbif,
        p.reset,
        p.wdog,
        trims,
        cfg.variant,
        DmaWordCopy::new(dma, p.wdog),
        crate::Delay,
    );

    if power.sleep_wakeup_init(cfg).is_err() {
        // Torn radio image; let the watchdog reset out of it.
        loop {}
    }

    if cfg.ble_present {
        for irq in [
            pac::Interrupt::BleSw,
            pac::Interrupt::BleRx,
            pac::Interrupt::BleEvent,
            pac::Interrupt::BleCrypt,
            pac::Interrupt::BleError,
            pac::Interrupt::BleCoexInProcess,
            pac::Interrupt::BleCoexRxTx,
            pac::Interrupt::BleSlp,
            pac::Interrupt::BleFifo,
        ] {
            arch::irq_enable(irq);
        }
    }

    cortex_m::interrupt::enable();
    cortex_m::asm::isb();

    match cfg.resume {
        Some(resume) => resume(),
        // Halt under watchdog refresh rather than jumping anywhere
        // undefined.
        None => loop {
            p.wdog.refresh();
        },
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "arm", target_os = "none"))] {
        mod arch {
            use crate::pac;
            use cortex_m::peripheral::NVIC;

            /// Open the interrupt gate long enough to drain pending
            /// service routines, then close it again.
            pub fn interrupt_flush() {
                unsafe { cortex_m::interrupt::enable() };
                cortex_m::asm::isb();
                cortex_m::interrupt::disable();
            }

            pub fn interrupts_on() {
                unsafe { cortex_m::interrupt::enable() };
                cortex_m::asm::isb();
            }

            pub fn wait_for_interrupt() {
                cortex_m::asm::wfi();
            }

            pub fn irq_enable(irq: pac::Interrupt) {
                unsafe { NVIC::unmask(irq) };
            }

            pub fn irq_pend(irq: pac::Interrupt) {
                NVIC::pend(irq);
            }

            pub fn irq_is_pending(irq: pac::Interrupt) -> bool {
                NVIC::is_pending(irq)
            }
        }
    } else {
        // Host stand-ins; the hardware primitives only exist on the
        // target.
        mod arch {
            use crate::pac;

            pub fn interrupt_flush() {}

            pub fn interrupts_on() {}

            pub fn wait_for_interrupt() {}

            pub fn irq_enable(_irq: pac::Interrupt) {}

            pub fn irq_pend(_irq: pac::Interrupt) {}

            pub fn irq_is_pending(_irq: pac::Interrupt) -> bool {
                false
            }
        }
    }
}

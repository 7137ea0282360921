//! Register access layer.
//!
//! Hand-maintained, chiptool-style: peripheral blocks are zero-cost
//! pointer wrappers, registers are `Reg<T>` handles over
//! `#[repr(transparent)]` value types in [`regs`]. Blocks can be built
//! over arbitrary memory with `from_ptr`, which is how the host test
//! suites back them with RAM arrays.

use core::marker::PhantomData;

pub mod regs;

/// A read-write register handle.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Reg<T: Copy> {
    ptr: *mut u32,
    phantom: PhantomData<T>,
}

unsafe impl<T: Copy> Send for Reg<T> {}
unsafe impl<T: Copy> Sync for Reg<T> {}

impl<T: Copy + Default> Reg<T> {
    /// # Safety
    ///
    /// `ptr` must point to a readable and writable 32-bit cell.
    pub const unsafe fn from_ptr(ptr: *mut u32) -> Self {
        Self {
            ptr,
            phantom: PhantomData,
        }
    }

    pub const fn as_ptr(&self) -> *mut u32 {
        self.ptr
    }

    #[inline(always)]
    pub fn read(&self) -> T {
        unsafe { (self.ptr as *mut T).read_volatile() }
    }

    #[inline(always)]
    pub fn write_value(&self, val: T) {
        unsafe { (self.ptr as *mut T).write_volatile(val) }
    }

    /// Write the register, starting from the register's reset-like
    /// default value.
    #[inline(always)]
    pub fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut val = Default::default();
        let res = f(&mut val);
        self.write_value(val);
        res
    }

    /// Read-modify-write the register.
    #[inline(always)]
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut val = self.read();
        let res = f(&mut val);
        self.write_value(val);
        res
    }
}

macro_rules! block {
    (
        $(#[$doc:meta])*
        $name:ident {
            $(
                $(#[$rdoc:meta])*
                $reg:ident: $ty:ty = $offset:literal;
            )*
        }
    ) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq)]
        pub struct $name {
            ptr: *mut u32,
        }

        unsafe impl Send for $name {}
        unsafe impl Sync for $name {}

        impl $name {
            /// # Safety
            ///
            /// `ptr` must point to memory laid out like this block.
            pub const unsafe fn from_ptr(ptr: *mut u32) -> Self {
                Self { ptr }
            }

            pub const fn as_ptr(&self) -> *mut u32 {
                self.ptr
            }

            $(
                $(#[$rdoc])*
                #[inline(always)]
                pub const fn $reg(self) -> Reg<$ty> {
                    unsafe { Reg::from_ptr(self.ptr.add($offset)) }
                }
            )*
        }
    };
}

block! {
    /// Analog control and sleep block: regulators, trims, power mode
    /// select, wake configuration, clock detector.
    Acs {
        vcc_ctrl: regs::VccCtrl = 0;
        bg_ctrl: regs::BgCtrl = 1;
        vddc_ctrl: regs::VddCtrl = 2;
        vddm_ctrl: regs::VddCtrl = 3;
        vddrf_ctrl: regs::VddrfCtrl = 4;
        vddpa_ctrl: regs::VddpaCtrl = 5;
        vddif_ctrl: regs::VtrimCtrl = 6;
        vddflash_ctrl: regs::VtrimCtrl = 7;
        vddret_ctrl: regs::VddretCtrl = 8;
        rcosc_ctrl: regs::RcoscCtrl = 9;
        pwr_modes_ctrl: regs::PwrModesCtrl = 10;
        /// Wake-source enable mask.
        wakeup_cfg: regs::Raw = 11;
        /// Latched wake flags, write-1-to-clear.
        wakeup_ctrl: regs::WakeupCtrl = 12;
        boot_cfg: regs::BootCfg = 13;
        /// Retained scratch word, survives SLEEP/STANDBY.
        boot_gp_data: regs::Raw = 14;
        /// Retained scratch word, survives SLEEP/STANDBY.
        gp_data: regs::Raw = 15;
        clk_det_ctrl: regs::ClkDetCtrl = 16;
        /// Latched reset-cause flags, write-1-to-clear.
        reset_status: regs::Raw = 17;
        aout_ctrl: regs::AoutCtrl = 18;
        temp_curr_cfg: regs::TempCurrCfg = 19;
    }
}

block! {
    /// System controller: RF power/access gating, memory access
    /// configuration, wake vector, dynamic VDDPA switching.
    Sysctrl {
        rf_power_cfg: regs::RfPowerCfg = 0;
        rf_access_cfg: regs::RfAccessCfg = 1;
        mem_access_cfg: regs::Raw = 2;
        /// Address fetched by the boot ROM on a memory-retention wake.
        wakeup_addr: regs::Raw = 3;
        vddpa_cfg0: regs::VddpaCfg0 = 4;
    }
}

block! {
    /// Clock tree: system clock source select and per-domain dividers.
    Clk {
        sys_cfg: regs::SysCfg = 0;
        div_cfg0: regs::DivCfg0 = 1;
        div_cfg1: regs::DivCfg1 = 2;
        div_cfg2: regs::DivCfg2 = 3;
    }
}

block! {
    /// RF front-end control registers. The block also heads the
    /// bank-switched PHY register window captured by the radio snapshot.
    Rf {
        analog_info: regs::AnalogInfo = 0;
        xtal_ctrl: regs::XtalCtrl = 1;
        /// PHY register bank select (0 = 1 Mbps, 1 = 2 Mbps).
        bank_select: regs::BankSelect = 2;
        pa_pwr: regs::PaPwr = 3;
        pa_bias: regs::PaBias = 4;
        /// XTAL digital output prescaler.
        ck_div: regs::CkDiv = 5;
        xtal_trim: regs::XtalTrim = 6;
    }
}

block! {
    /// Baseband interface.
    Bbif {
        ctrl: regs::BbifCtrl = 0;
        status: regs::BbifStatus = 1;
    }
}

block! {
    /// Flash interface timing.
    Flash {
        delay_ctrl: regs::FlashDelayCtrl = 0;
    }
}

block! {
    /// Low-speed ADC.
    Lsad {
        cfg: regs::LsadCfg = 0;
    }
}

impl Lsad {
    /// Per-channel input selection, channels 0..=7.
    #[inline(always)]
    pub const fn input_sel(self, n: usize) -> Reg<regs::LsadInputSel> {
        unsafe { Reg::from_ptr(self.as_ptr().add(1 + n)) }
    }

    /// Per-channel trim-corrected conversion data, channels 0..=7.
    #[inline(always)]
    pub const fn data_trim(self, n: usize) -> Reg<regs::Raw> {
        unsafe { Reg::from_ptr(self.as_ptr().add(9 + n)) }
    }
}

block! {
    /// One DMA channel, one-shot memory-to-memory word transfers.
    DmaCh {
        ctrl: regs::DmaCtrl = 0;
        /// Transfer status, write-1-to-clear.
        status: regs::DmaStatus = 1;
        src_addr: regs::Raw = 2;
        dst_addr: regs::Raw = 3;
        len: regs::DmaLen = 4;
    }
}

block! {
    /// Digital reset controller status.
    Reset {
        /// Latched digital reset-cause flags, write-1-to-clear.
        dig_status: regs::Raw = 0;
    }
}

block! {
    /// Baseband register file, preserved across sleep by the radio
    /// snapshot. Only the word the snapshot patches is named; the rest
    /// of the block is copied opaquely.
    Bb {
        /// Baseband deep-sleep control.
        deepslcntl: regs::Raw = 12;
    }
}

/// Size of the baseband register file, in words.
pub const BB_WORDS: usize = 256;

/// Word index of the deep-sleep control register within the baseband
/// register file.
pub const BB_DEEPSLCNTL_WORD: usize = 12;

block! {
    /// Watchdog.
    Wdog {
        refresh_ctrl: regs::Raw = 0;
    }
}

/// Watchdog refresh key.
pub const WDOG_REFRESH_KEY: u32 = 0x87AD_0001;

impl Wdog {
    /// Restart the watchdog interval.
    #[inline(always)]
    pub fn refresh(self) {
        self.refresh_ctrl().write_value(regs::Raw(WDOG_REFRESH_KEY));
    }
}

const ACS_BASE: usize = 0x4000_0000;
const SYSCTRL_BASE: usize = 0x4000_0100;
const CLK_BASE: usize = 0x4000_0200;
const FLASH_BASE: usize = 0x4000_0300;
const WDOG_BASE: usize = 0x4000_0400;
const LSAD_BASE: usize = 0x4000_0500;
const DMA_BASE: usize = 0x4000_0600;
const RESET_BASE: usize = 0x4000_0700;
const BBIF_BASE: usize = 0x4000_1000;
const RF_BASE: usize = 0x4000_1100;

/// Start of the baseband register block preserved across sleep.
pub const BB_BASE: usize = 0x4000_1800;

/// All peripheral blocks owned by this HAL.
pub struct Peripherals {
    pub acs: Acs,
    pub sysctrl: Sysctrl,
    pub clk: Clk,
    pub rf: Rf,
    pub bbif: Bbif,
    pub bb: Bb,
    pub reset: Reset,
    pub flash: Flash,
    pub lsad: Lsad,
    pub wdog: Wdog,
    pub dma0: DmaCh,
    pub dma1: DmaCh,
    pub dma2: DmaCh,
    pub dma3: DmaCh,
}

static mut PERIPHERALS_TAKEN: bool = false;

impl Peripherals {
    /// Take the peripherals, once.
    ///
    /// Panics if called more than once.
    pub fn take() -> Self {
        critical_section::with(|_| unsafe {
            if PERIPHERALS_TAKEN {
                panic!("pac::Peripherals taken twice");
            }
            PERIPHERALS_TAKEN = true;
            Self::steal()
        })
    }

    /// # Safety
    ///
    /// Bypasses the take-once guard; callers must not create aliasing
    /// drivers over the same blocks.
    pub unsafe fn steal() -> Self {
        Self {
            acs: Acs::from_ptr(ACS_BASE as _),
            sysctrl: Sysctrl::from_ptr(SYSCTRL_BASE as _),
            clk: Clk::from_ptr(CLK_BASE as _),
            rf: Rf::from_ptr(RF_BASE as _),
            bbif: Bbif::from_ptr(BBIF_BASE as _),
            bb: Bb::from_ptr(BB_BASE as _),
            reset: Reset::from_ptr(RESET_BASE as _),
            flash: Flash::from_ptr(FLASH_BASE as _),
            lsad: Lsad::from_ptr(LSAD_BASE as _),
            wdog: Wdog::from_ptr(WDOG_BASE as _),
            dma0: DmaCh::from_ptr(DMA_BASE as _),
            dma1: DmaCh::from_ptr((DMA_BASE + 0x20) as _),
            dma2: DmaCh::from_ptr((DMA_BASE + 0x40) as _),
            dma3: DmaCh::from_ptr((DMA_BASE + 0x60) as _),
        }
    }
}

/// Interrupt lines the power-mode controller touches on wake.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Interrupt {
    Wakeup = 0,
    BleSw = 1,
    BleRx = 2,
    BleEvent = 3,
    BleCrypt = 4,
    BleError = 5,
    BleCoexInProcess = 6,
    BleCoexRxTx = 7,
    BleSlp = 8,
    BleFifo = 9,
}

unsafe impl cortex_m::interrupt::InterruptNumber for Interrupt {
    fn number(self) -> u16 {
        self as u16
    }
}

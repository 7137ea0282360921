#![no_std]
#![doc = include_str!("../README.md")]
#![allow(unsafe_op_in_unsafe_fn)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod clock;
pub mod crc;
pub mod dma;
pub mod pac;
pub mod power;
pub mod rffe;
pub mod time;
pub mod trim;

pub use pac::{Interrupt, Peripherals};

#[cfg(feature = "rt")]
pub use cortex_m_rt;

/// Which part this HAL drives. The two are register compatible except
/// where explicit variant checks appear in the drivers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    Rsl15,
    Montana,
}

/// HAL configuration passed when initializing.
#[non_exhaustive]
pub struct Config {
    pub variant: Variant,
    /// Startup RC oscillator point selected before anything else runs.
    pub startup_clock: clock::RcFrequency,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Rsl15,
            startup_clock: clock::RcFrequency::Mhz12,
        }
    }
}

/// Initialize the HAL with the provided configuration.
///
/// This returns the peripheral singletons that can be used for
/// creating drivers.
///
/// This should only be called once at startup, otherwise it panics.
pub fn init(config: Config) -> Peripherals {
    // Do this first, so that it panics if user is calling `init` a
    // second time before doing anything important.
    let p = Peripherals::take();

    p.wdog.refresh();

    let mut clocks = clock::ClockController::new(
        p.clk,
        p.acs,
        p.rf,
        p.flash,
        p.sysctrl,
        config.variant,
        clock::RcFrequency::Mhz3.hertz(),
    );
    clocks.rc_clock_init(config.startup_clock);

    p
}

/// Busy-wait delay over `cortex_m::asm::delay`.
///
/// The cycle count assumes the fastest core clock; at slower clocks
/// the wait only lengthens, which every delay in this HAL tolerates.
pub struct Delay;

impl embedded_hal_1::delay::DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * clock::XTAL_FREQUENCY.0 as u64) / 1_000_000_000;
        cortex_m::asm::delay(cycles as u32);
    }
}

/// Performs a busy-wait delay for a specified number of microseconds,
/// with the same worst-case clock assumption as [`Delay`].
pub fn blocking_delay_us(us: u32) {
    let cycles = us as u64 * (clock::XTAL_FREQUENCY.0 as u64 / 1_000_000);
    cortex_m::asm::delay(cycles as u32);
}

//! One-shot word copies for the radio register snapshot.
//!
//! The snapshot path moves register banks to RAM and back with a DMA
//! channel, polling completion rather than taking the interrupt so the
//! sleep sequence stays deterministic. The [`WordCopy`] trait is the
//! seam: [`DmaWordCopy`] drives a hardware channel, [`CpuWordCopy`] is
//! a volatile fallback usable anywhere.

use crate::pac;

/// Copy `words` 32-bit words from `src` to `dst`.
pub trait WordCopy {
    /// # Safety
    ///
    /// Both pointers must be valid for `words` aligned 32-bit accesses
    /// and the ranges must not overlap.
    unsafe fn copy(&mut self, src: *const u32, dst: *mut u32, words: u16);
}

/// DMA-backed copy, polled to completion.
///
/// The watchdog is refreshed while waiting: the transfer is making
/// progress and a reset mid-snapshot would tear the register image.
pub struct DmaWordCopy {
    ch: pac::DmaCh,
    wdog: pac::Wdog,
}

impl DmaWordCopy {
    pub fn new(ch: pac::DmaCh, wdog: pac::Wdog) -> Self {
        Self { ch, wdog }
    }
}

impl WordCopy for DmaWordCopy {
    unsafe fn copy(&mut self, src: *const u32, dst: *mut u32, words: u16) {
        self.ch.status().write(|w| w.set_complete(true));
        self.ch.src_addr().write_value(pac::regs::Raw(src as u32));
        self.ch.dst_addr().write_value(pac::regs::Raw(dst as u32));
        self.ch.len().write(|w| w.set_words(words));
        self.ch.ctrl().write(|w| {
            w.set_src_inc(true);
            w.set_dst_inc(true);
            w.set_word_size(2);
            w.set_enable(true);
        });

        while !self.ch.status().read().complete() {
            self.wdog.refresh();
        }

        self.ch.ctrl().write(|w| w.set_enable(false));
        self.ch.status().write(|w| w.set_complete(true));
    }
}

/// CPU-driven volatile copy.
#[derive(Default)]
pub struct CpuWordCopy;

impl WordCopy for CpuWordCopy {
    unsafe fn copy(&mut self, src: *const u32, dst: *mut u32, words: u16) {
        for i in 0..words as usize {
            dst.add(i).write_volatile(src.add(i).read_volatile());
        }
    }
}

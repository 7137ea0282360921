//! Calibration trim loader.
//!
//! Production calibration data lives in three non-volatile regions: a
//! primary record written at manufacturing, an optional supplemental
//! record that customers may program to override it, and a small
//! signature-gated custom record carrying charge-pump and crystal
//! trims. This module validates those records (CRC plus sentinel
//! checks) and programs the matching analog trim registers.
//!
//! Every operation returns an additive [`TrimFaults`] mask instead of
//! failing fast: a corrupt domain never blocks loading the others, and
//! callers decide per-bit whether a fault matters. The wake path in
//! particular keeps booting on trim faults and falls back to nominal
//! oscillator settings.

use crate::crc::{crc32, CrcEngine};
use crate::pac;
use crate::Variant;

#[cfg(test)]
mod tests;

/// Number of redundant records per voltage-trim table.
pub const TRIM_RECORDS: usize = 4;
/// Number of RC oscillator frequency points, two records each.
pub const TRIM_RC_RECORDS: usize = 4;
/// Size of the primary/supplemental record, in 32-bit words.
pub const TRIM_REGION_WORDS: usize = 70;
/// Size of the custom record, in 32-bit words.
pub const TRIM_CUSTOM_WORDS: usize = 4;

/// Word offset of the bandgap current records inside the bandgap table.
const BANDGAP_CURRENT_OFFSET: usize = 4;

/// Flash addresses of the calibration records.
pub const PRIMARY_REGION_ADDR: usize = 0x0010_1C00;
pub const SUPPLEMENTAL_REGION_ADDR: usize = 0x0010_1000;
pub const CUSTOM_REGION_ADDR: usize = 0x0010_1800;

/// Custom record signature for SiP production parts.
pub const CUSTOM_SIGNATURE_SIP1: u32 = 0x5349_5031;
/// Custom record signature for customer-programmed parts.
pub const CUSTOM_SIGNATURE_CUST: u32 = 0x4355_5354;

/// Trim targets stored in the calibration records, used as lookup keys.
///
/// Voltages are in 10 mV units, frequencies in kHz.
pub mod targets {
    pub const BANDGAP_V: u16 = 75;
    pub const BANDGAP_I: u16 = 100;
    pub const DCDC_1200: u16 = 120;
    pub const DCDC_1120: u16 = 112;
    pub const VDDC_1150: u16 = 115;
    pub const VDDC_STANDBY: u16 = 80;
    pub const VDDM_1150: u16 = 115;
    pub const VDDM_STANDBY: u16 = 80;
    pub const VDDRF_1100: u16 = 110;
    pub const VDDRF_1070: u16 = 107;
    pub const VDDPA_1600: u16 = 160;
    pub const VDDIF_1800: u16 = 180;
    pub const FLASH_1600: u16 = 160;
    pub const RC3: u16 = 3000;
    pub const RC12: u16 = 12000;
    pub const RC24: u16 = 24000;
    pub const RC48: u16 = 48000;
    pub const RC32K: u16 = 32768;
    pub const THERMISTOR_10: u16 = 10;
}

/// Additive trim fault mask.
///
/// Faults compose with `|`; an empty mask means success. Loaders set
/// one bit per failed domain and keep going.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrimFaults(u32);

impl TrimFaults {
    pub const NONE: Self = Self(0);
    pub const NULL: Self = Self(1 << 1);
    pub const NO_TRIM_FOUND: Self = Self(1 << 3);
    pub const INVALID_TRIM: Self = Self(1 << 4);
    pub const INVALID_CRC: Self = Self(1 << 5);
    pub const BANDGAP: Self = Self(1 << 6);
    pub const BANDGAP_V: Self = Self(1 << 7);
    pub const BANDGAP_I: Self = Self(1 << 8);
    pub const DCDC: Self = Self(1 << 9);
    pub const VDDC: Self = Self(1 << 10);
    pub const VDDC_STANDBY: Self = Self(1 << 11);
    pub const VDDM: Self = Self(1 << 12);
    pub const VDDM_STANDBY: Self = Self(1 << 13);
    pub const VDDRF: Self = Self(1 << 14);
    pub const VDDPA: Self = Self(1 << 15);
    pub const VDDPA_MIN: Self = Self(1 << 16);
    pub const VDDIF: Self = Self(1 << 17);
    pub const VDDFLASH: Self = Self(1 << 18);
    pub const RCOSC: Self = Self(1 << 19);
    pub const RCOSC32: Self = Self(1 << 20);
    pub const LSAD: Self = Self(1 << 21);
    pub const TEMPERATURE: Self = Self(1 << 22);
    pub const THERMISTOR: Self = Self(1 << 23);
    pub const MEASURED: Self = Self(1 << 25);
    pub const CUSTOM_SIGNATURE: Self = Self(1 << 26);
    pub const CUSTOM_ICH: Self = Self(1 << 27);
    pub const CUSTOM_XTAL: Self = Self(1 << 28);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for TrimFaults {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for TrimFaults {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl core::ops::Sub for TrimFaults {
    type Output = Self;
    /// Clear the bits of `rhs`.
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

/// Trim domains the loader knows about, applied in a fixed order by
/// [`Trim::load_trims`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrimDomain {
    Bandgap,
    Vddc,
    Vddm,
    Dcdc,
    Vddrf,
    Vddpa,
    Vddif,
    Vddflash,
    Rcosc,
    Rcosc32,
}

/// Two-argument domains run first, matching the record layout.
const LOAD_ORDER: [TrimDomain; 10] = [
    TrimDomain::Bandgap,
    TrimDomain::Vddc,
    TrimDomain::Vddm,
    TrimDomain::Dcdc,
    TrimDomain::Vddrf,
    TrimDomain::Vddpa,
    TrimDomain::Vddif,
    TrimDomain::Vddflash,
    TrimDomain::Rcosc,
    TrimDomain::Rcosc32,
];

/// Lookup keys for one full load pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrimTargets {
    pub bandgap_voltage: u16,
    pub bandgap_current: u16,
    pub vddc: u16,
    pub vddc_standby: u16,
    pub vddm: u16,
    pub vddm_standby: u16,
    pub dcdc: u16,
    pub vddrf: u16,
    pub vddpa: u16,
    pub vddif: u16,
    pub vddflash: u16,
    pub rcosc: u16,
    pub rcosc32: u16,
}

impl Default for TrimTargets {
    fn default() -> Self {
        Self {
            bandgap_voltage: targets::BANDGAP_V,
            bandgap_current: targets::BANDGAP_I,
            vddc: targets::VDDC_1150,
            vddc_standby: targets::VDDC_STANDBY,
            vddm: targets::VDDM_1150,
            vddm_standby: targets::VDDM_STANDBY,
            dcdc: targets::DCDC_1200,
            vddrf: targets::VDDRF_1100,
            vddpa: targets::VDDPA_1600,
            vddif: targets::VDDIF_1800,
            vddflash: targets::FLASH_1600,
            rcosc: targets::RC3,
            rcosc32: targets::RC32K,
        }
    }
}

/// LSAD conversion error trims, one per sampling band.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LsadTrim {
    /// Offset error, signed, converts at a 32768 quotient.
    pub offset: i16,
    /// Gain error, converts at a 65536 quotient.
    pub gain: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LsadBand {
    HighFrequency,
    LowFrequency,
}

/// View over a primary or supplemental calibration record.
///
/// The record is [`TRIM_REGION_WORDS`] packed words: redundant
/// (target, trim) tables per voltage domain, the RC oscillator table,
/// LSAD/temperature/thermistor trims, measured references, a revision
/// word, and a trailing checksum covering everything before it.
#[derive(Copy, Clone)]
pub struct TrimRegion<'a> {
    words: &'a [u32; TRIM_REGION_WORDS],
}

impl<'a> TrimRegion<'a> {
    pub const fn new(words: &'a [u32; TRIM_REGION_WORDS]) -> Self {
        Self { words }
    }

    /// Map a record at a fixed non-volatile address.
    ///
    /// # Safety
    ///
    /// `ptr` must point to [`TRIM_REGION_WORDS`] readable words that
    /// stay mapped for `'a`.
    pub unsafe fn from_ptr(ptr: *const [u32; TRIM_REGION_WORDS]) -> Self {
        Self { words: &*ptr }
    }

    fn table(&self, start: usize, len: usize) -> &'a [u32] {
        &self.words[start..start + len]
    }

    pub fn bandgap(&self) -> &'a [u32] {
        self.table(0, 2 * TRIM_RECORDS)
    }

    pub fn bandgap_voltage(&self) -> &'a [u32] {
        self.table(0, TRIM_RECORDS)
    }

    pub fn bandgap_current(&self) -> &'a [u32] {
        self.table(BANDGAP_CURRENT_OFFSET, TRIM_RECORDS)
    }

    pub fn dcdc(&self) -> &'a [u32] {
        self.table(8, TRIM_RECORDS)
    }

    pub fn vddc(&self) -> &'a [u32] {
        self.table(12, TRIM_RECORDS)
    }

    pub fn vddm(&self) -> &'a [u32] {
        self.table(16, TRIM_RECORDS)
    }

    pub fn vddrf(&self) -> &'a [u32] {
        self.table(20, TRIM_RECORDS)
    }

    pub fn vddpa(&self) -> &'a [u32] {
        self.table(24, TRIM_RECORDS)
    }

    pub fn vddif(&self) -> &'a [u32] {
        self.table(28, TRIM_RECORDS)
    }

    pub fn vddflash(&self) -> &'a [u32] {
        self.table(32, TRIM_RECORDS)
    }

    pub fn rcosc(&self) -> &'a [u32] {
        self.table(36, 4 * TRIM_RC_RECORDS)
    }

    pub fn rcosc32(&self) -> &'a [u32] {
        self.table(52, TRIM_RECORDS)
    }

    pub fn thermistor(&self) -> &'a [u32] {
        self.table(62, TRIM_RECORDS)
    }

    fn lsad_offsets(&self) -> u32 {
        self.words[56]
    }

    fn lsad_hf_gain(&self) -> u32 {
        self.words[57]
    }

    fn lsad_lf_gain(&self) -> u32 {
        self.words[58]
    }

    fn temp_sensor_offset(&self) -> u32 {
        self.words[60]
    }

    fn measured_low(&self) -> u32 {
        self.words[66]
    }

    fn measured_high(&self) -> u32 {
        self.words[67]
    }

    pub fn checksum(&self) -> u32 {
        self.words[TRIM_REGION_WORDS - 1]
    }

    /// Validate the record checksum.
    ///
    /// The CRC engine is picked by the magnitude of the stored
    /// checksum (see [`CrcEngine::for_checksum`]) and run over every
    /// word up to and including the revision word.
    pub fn check_crc(&self) -> Result<(), TrimFaults> {
        let engine = CrcEngine::for_checksum(self.checksum());
        let computed = engine.compute(&self.words[..TRIM_REGION_WORDS - 1]);
        if computed == self.checksum() {
            Ok(())
        } else {
            Err(TrimFaults::INVALID_CRC)
        }
    }

    /// Report which domains have no usable record at all.
    ///
    /// Every domain is inspected regardless of earlier failures; for
    /// the redundant tables one valid record among the four is enough.
    pub fn verify(&self) -> TrimFaults {
        let mut faults = TrimFaults::NONE;

        if self.check_crc().is_err() {
            faults |= TrimFaults::INVALID_CRC;
        }

        let mut valid = [false; 6];
        const BG: usize = 0;
        const DCDC: usize = 1;
        const VDDC: usize = 2;
        const VDDM: usize = 3;
        const VDDRF: usize = 4;
        const VDDPA: usize = 5;

        for i in 0..TRIM_RECORDS {
            if !valid[BG] {
                if is_sentinel16(target16(self.bandgap()[i])) {
                    faults |= TrimFaults::BANDGAP;
                } else {
                    valid[BG] = true;
                    faults = faults - TrimFaults::BANDGAP;
                }
            }
            if !valid[DCDC] {
                if is_sentinel16(target16(self.dcdc()[i])) {
                    faults |= TrimFaults::DCDC;
                } else {
                    valid[DCDC] = true;
                    faults = faults - TrimFaults::DCDC;
                }
            }
            if !valid[VDDC] {
                if is_sentinel8(target_voltage8(self.vddc()[i])) {
                    faults |= TrimFaults::VDDC;
                } else {
                    valid[VDDC] = true;
                    faults = faults - TrimFaults::VDDC;
                }
            }
            if !valid[VDDM] {
                if is_sentinel8(target_voltage8(self.vddm()[i])) {
                    faults |= TrimFaults::VDDM;
                } else {
                    valid[VDDM] = true;
                    faults = faults - TrimFaults::VDDM;
                }
            }
            if !valid[VDDRF] {
                if is_sentinel16(trim16(self.vddrf()[i])) {
                    faults |= TrimFaults::VDDRF;
                } else {
                    valid[VDDRF] = true;
                    faults = faults - TrimFaults::VDDRF;
                }
            }
            if !valid[VDDPA] {
                if is_sentinel8(target_voltage8(self.vddpa()[i])) {
                    faults |= TrimFaults::VDDPA;
                } else {
                    valid[VDDPA] = true;
                    faults = faults - TrimFaults::VDDPA;
                }
            }
        }

        if is_sentinel16(target16(self.vddif()[0])) {
            faults |= TrimFaults::VDDIF;
        }
        if is_sentinel16(target16(self.vddflash()[0])) {
            faults |= TrimFaults::VDDFLASH;
        }
        for i in 0..TRIM_RC_RECORDS {
            if is_sentinel16(target16(self.rcosc()[i * 2])) {
                faults |= TrimFaults::RCOSC;
            }
        }
        if is_sentinel16(target16(self.rcosc32()[0])) {
            faults |= TrimFaults::RCOSC32;
        }

        if is_sentinel16(self.lsad_offsets() as u16) {
            faults |= TrimFaults::LSAD;
        }
        if self.lsad_hf_gain() == 0 || self.lsad_lf_gain() == u32::MAX {
            faults |= TrimFaults::LSAD;
        }
        if self.temp_sensor_offset() == 0 || self.temp_sensor_offset() == u32::MAX {
            faults |= TrimFaults::TEMPERATURE;
        }
        if is_sentinel16(trim16(self.thermistor()[0])) {
            faults |= TrimFaults::THERMISTOR;
        }

        let measured = [
            self.measured_low() as u16,
            (self.measured_low() >> 16) as u16,
            self.measured_high() as u16,
            (self.measured_high() >> 16) as u16,
        ];
        if measured.iter().any(|&m| is_sentinel16(m)) {
            faults |= TrimFaults::MEASURED;
        }

        faults
    }

    /// Fetch the LSAD offset and gain error trims for one band.
    pub fn lsad_trim(&self, band: LsadBand) -> Result<LsadTrim, TrimFaults> {
        let gain = match band {
            LsadBand::HighFrequency => self.lsad_hf_gain(),
            LsadBand::LowFrequency => self.lsad_lf_gain(),
        };
        let offset = match band {
            LsadBand::HighFrequency => self.lsad_offsets() as u16,
            LsadBand::LowFrequency => (self.lsad_offsets() >> 16) as u16,
        };
        if is_sentinel16(offset) || gain == 0 || gain == u32::MAX {
            return Err(TrimFaults::NO_TRIM_FOUND);
        }
        Ok(LsadTrim {
            offset: offset as i16,
            gain,
        })
    }
}

/// View over the signature-gated custom calibration record.
#[derive(Copy, Clone)]
pub struct CustomRegion<'a> {
    words: &'a [u32; TRIM_CUSTOM_WORDS],
}

impl<'a> CustomRegion<'a> {
    pub const fn new(words: &'a [u32; TRIM_CUSTOM_WORDS]) -> Self {
        Self { words }
    }

    /// # Safety
    ///
    /// `ptr` must point to [`TRIM_CUSTOM_WORDS`] readable words that
    /// stay mapped for `'a`.
    pub unsafe fn from_ptr(ptr: *const [u32; TRIM_CUSTOM_WORDS]) -> Self {
        Self { words: &*ptr }
    }

    pub fn signature(&self) -> u32 {
        self.words[0]
    }

    pub fn ich_trim(&self) -> u32 {
        self.words[1]
    }

    pub fn xtal_trim(&self) -> u32 {
        self.words[2]
    }

    pub fn crc(&self) -> u32 {
        self.words[3]
    }
}

fn is_sentinel16(v: u16) -> bool {
    v == 0 || v == u16::MAX
}

fn is_sentinel8(v: u8) -> bool {
    v == 0 || v == u8::MAX
}

fn target16(word: u32) -> u16 {
    (word >> 16) as u16
}

fn trim16(word: u32) -> u16 {
    word as u16
}

fn target_voltage8(word: u32) -> u8 {
    (word >> 16) as u8
}

/// Scan a record table for a trim keyed by `target`.
///
/// Records pack as (target:16, trim:16) and three decodings coexist in
/// the same table format:
/// - a stored target wider than 8 bits is either an exact 16-bit key
///   (RC oscillators) or two packed 8-bit keys for a run/standby
///   voltage pair, matched against the low or high byte;
/// - an 8-bit target with an 8-bit trim is a plain byte record
///   (VDDRF, VDDIF, VDDFLASH);
/// - an 8-bit target with a 16-bit trim is a packed dual-value record
///   (bandgap, DCDC LDO/BUCK pair).
///
/// Sentinel words (all-zeros, all-ones) are skipped as invalid; the
/// error reported reflects the final record inspected, so a table of
/// nothing but sentinels still reads back as "no trim found".
pub fn get_trim(table: &[u32], target: u16) -> Result<u16, TrimFaults> {
    let mut fault = TrimFaults::NO_TRIM_FOUND;

    for &word in table {
        fault = TrimFaults::NONE;

        if word == 0 || word == u32::MAX {
            fault = TrimFaults::INVALID_TRIM;
        }

        let stored_target = target16(word);
        let stored_trim = trim16(word);

        if stored_target > 0xFF && fault.is_empty() {
            if target == stored_target {
                return Ok(stored_trim);
            } else if target == (stored_target & 0xFF) {
                return Ok(stored_trim & 0xFF);
            } else if target == (stored_target >> 8) {
                return Ok(stored_trim >> 8);
            } else {
                fault = TrimFaults::NO_TRIM_FOUND;
            }
        } else if stored_trim & 0xFF00 == 0 && fault.is_empty() {
            if target == stored_target {
                return Ok(stored_trim & 0xFF);
            } else {
                fault = TrimFaults::NO_TRIM_FOUND;
            }
        } else if target == (stored_target & 0xFF) {
            return Ok(stored_trim);
        } else {
            fault = TrimFaults::NO_TRIM_FOUND;
        }
    }

    Err(fault)
}

/// Trim loader driver.
pub struct Trim {
    acs: pac::Acs,
    rf: pac::Rf,
    variant: Variant,
}

impl Trim {
    pub fn new(acs: pac::Acs, rf: pac::Rf, variant: Variant) -> Self {
        Self { acs, rf, variant }
    }

    /// Verify the record, then run every domain loader in the fixed
    /// order, OR-ing all faults. A failed domain never blocks the rest.
    pub fn load_trims(&mut self, region: &TrimRegion, targets: &TrimTargets) -> TrimFaults {
        let mut faults = region.verify();

        for domain in LOAD_ORDER {
            faults |= self.load_domain(region, domain, targets);
        }

        if !faults.is_empty() {
            warn!("trim load completed with faults {:?}", faults);
        }
        faults
    }

    /// Load the default target set from a record.
    pub fn load_defaults(&mut self, region: &TrimRegion) -> TrimFaults {
        self.load_trims(region, &TrimTargets::default())
    }

    fn load_domain(
        &mut self,
        region: &TrimRegion,
        domain: TrimDomain,
        targets: &TrimTargets,
    ) -> TrimFaults {
        match domain {
            TrimDomain::Bandgap => {
                self.load_bandgap(region, targets.bandgap_voltage, targets.bandgap_current)
            }
            TrimDomain::Vddc => self.load_vddc(region, targets.vddc, targets.vddc_standby),
            TrimDomain::Vddm => self.load_vddm(region, targets.vddm, targets.vddm_standby),
            TrimDomain::Dcdc => self.load_dcdc(region, targets.dcdc),
            TrimDomain::Vddrf => self.load_vddrf(region, targets.vddrf),
            TrimDomain::Vddpa => self.load_vddpa(region, targets.vddpa),
            TrimDomain::Vddif => self.load_vddif(region, targets.vddif),
            TrimDomain::Vddflash => self.load_vddflash(region, targets.vddflash),
            TrimDomain::Rcosc => self.load_rcosc(region, targets.rcosc),
            TrimDomain::Rcosc32 => self.load_rcosc32(region, targets.rcosc32),
        }
    }

    /// Load one domain, preferring the supplemental record and falling
    /// back to the primary only when the supplemental attempt faults.
    pub fn load_single(
        &mut self,
        supplemental: &TrimRegion,
        primary: &TrimRegion,
        domain: TrimDomain,
        targets: &TrimTargets,
    ) -> TrimFaults {
        let faults = self.load_domain(supplemental, domain, targets);
        if faults.is_empty() {
            faults
        } else {
            self.load_domain(primary, domain, targets)
        }
    }

    /// Load the bandgap voltage and current trims.
    ///
    /// The two halves apply independently. Legacy records (16-bit
    /// checksum) store both values shifted left by two; the unshift is
    /// folded into the register packing.
    pub fn load_bandgap(&mut self, region: &TrimRegion, target_v: u16, target_i: u16) -> TrimFaults {
        let mut faults = TrimFaults::NONE;

        let voltage = match get_trim(region.bandgap_voltage(), target_v) {
            Ok(v) => v as u32,
            Err(_) => {
                faults |= TrimFaults::BANDGAP_V;
                0
            }
        };
        let current = match get_trim(region.bandgap_current(), target_i) {
            Ok(v) => v as u32,
            Err(_) => {
                faults |= TrimFaults::BANDGAP_I;
                0
            }
        };

        let legacy = region.checksum() <= u16::MAX as u32;
        let pack_current = |c: u32| {
            if legacy {
                ((c << 16) & 0xFF00_0000) | ((c << 14) & 0x00FF_0000)
            } else {
                (c << 16) & 0xFFFF_0000
            }
        };
        let pack_voltage = |v: u32| {
            if legacy {
                (v & 0x0000_FF00) | ((v >> 2) & 0x0000_00FF)
            } else {
                v & 0x0000_FFFF
            }
        };

        if faults.is_empty() {
            self.acs
                .bg_ctrl()
                .write_value(pac::regs::BgCtrl(pack_current(current) | pack_voltage(voltage)));
        } else if !faults.contains(TrimFaults::BANDGAP_I) {
            self.acs.bg_ctrl().modify(|w| {
                w.0 = (w.0 & 0x0000_FFFF) | pack_current(current);
            });
        } else if !faults.contains(TrimFaults::BANDGAP_V) {
            self.acs.bg_ctrl().modify(|w| {
                w.0 = (w.0 & 0xFFFF_0000) | pack_voltage(voltage);
            });
        }

        faults
    }

    /// Load the DCDC converter trim, picking the BUCK or LDO byte of
    /// the packed record depending on the converter's current mode.
    pub fn load_dcdc(&mut self, region: &TrimRegion, target: u16) -> TrimFaults {
        match get_trim(region.dcdc(), target) {
            Ok(trim) => {
                self.acs.vcc_ctrl().modify(|w| {
                    let byte = if w.buck_enable() {
                        (trim >> 8) as u8
                    } else {
                        trim as u8
                    };
                    w.set_vtrim(byte);
                });
                TrimFaults::NONE
            }
            Err(e) => e | TrimFaults::DCDC,
        }
    }

    /// Load the VDDC run and standby trims. The halves apply
    /// independently: a missing standby record still lets the run trim
    /// land, and vice versa.
    pub fn load_vddc(&mut self, region: &TrimRegion, target: u16, target_standby: u16) -> TrimFaults {
        let mut faults = TrimFaults::NONE;

        match get_trim(region.vddc(), target) {
            Ok(trim) => self.acs.vddc_ctrl().modify(|w| w.set_vtrim(trim as u8)),
            Err(_) => faults |= TrimFaults::VDDC,
        }
        match get_trim(region.vddc(), target_standby) {
            Ok(trim) => self
                .acs
                .vddc_ctrl()
                .modify(|w| w.set_standby_vtrim(trim as u8)),
            Err(_) => faults |= TrimFaults::VDDC_STANDBY,
        }

        faults
    }

    /// Load the VDDM run and standby trims, same policy as VDDC.
    pub fn load_vddm(&mut self, region: &TrimRegion, target: u16, target_standby: u16) -> TrimFaults {
        let mut faults = TrimFaults::NONE;

        match get_trim(region.vddm(), target) {
            Ok(trim) => self.acs.vddm_ctrl().modify(|w| w.set_vtrim(trim as u8)),
            Err(_) => faults |= TrimFaults::VDDM,
        }
        match get_trim(region.vddm(), target_standby) {
            Ok(trim) => self
                .acs
                .vddm_ctrl()
                .modify(|w| w.set_standby_vtrim(trim as u8)),
            Err(_) => faults |= TrimFaults::VDDM_STANDBY,
        }

        faults
    }

    pub fn load_vddrf(&mut self, region: &TrimRegion, target: u16) -> TrimFaults {
        match get_trim(region.vddrf(), target) {
            Ok(trim) => {
                self.acs.vddrf_ctrl().modify(|w| w.set_vtrim(trim as u8));
                TrimFaults::NONE
            }
            Err(e) => e,
        }
    }

    pub fn load_vddpa(&mut self, region: &TrimRegion, target: u16) -> TrimFaults {
        match get_trim(region.vddpa(), target) {
            Ok(trim) => {
                self.acs.vddpa_ctrl().modify(|w| w.set_vtrim(trim as u8));
                TrimFaults::NONE
            }
            Err(_) => TrimFaults::VDDPA | TrimFaults::NO_TRIM_FOUND,
        }
    }

    /// Load the VDDIF trim. The rail only exists on [`Variant::Montana`];
    /// the lookup is skipped entirely on RSL15 parts.
    pub fn load_vddif(&mut self, region: &TrimRegion, target: u16) -> TrimFaults {
        match self.variant {
            Variant::Rsl15 => TrimFaults::NO_TRIM_FOUND,
            Variant::Montana => match get_trim(region.vddif(), target) {
                Ok(trim) => {
                    self.acs.vddif_ctrl().modify(|w| w.set_vtrim(trim as u8));
                    TrimFaults::NONE
                }
                Err(e) => e,
            },
        }
    }

    pub fn load_vddflash(&mut self, region: &TrimRegion, target: u16) -> TrimFaults {
        match get_trim(region.vddflash(), target) {
            Ok(trim) => {
                self.acs.vddflash_ctrl().modify(|w| w.set_vtrim(trim as u8));
                TrimFaults::NONE
            }
            Err(e) => e,
        }
    }

    /// Load the startup RC oscillator frequency trim for one of the
    /// four calibrated frequency points.
    pub fn load_rcosc(&mut self, region: &TrimRegion, target: u16) -> TrimFaults {
        match get_trim(region.rcosc(), target) {
            Ok(trim) => {
                self.acs.rcosc_ctrl().modify(|w| w.set_rc_ftrim(trim as u8));
                TrimFaults::NONE
            }
            Err(e) => e,
        }
    }

    /// Load the 32 kHz RC oscillator frequency trim.
    pub fn load_rcosc32(&mut self, region: &TrimRegion, target: u16) -> TrimFaults {
        match get_trim(region.rcosc32(), target) {
            Ok(trim) => {
                self.acs
                    .rcosc_ctrl()
                    .modify(|w| w.set_rc32_ftrim(trim as u8));
                TrimFaults::NONE
            }
            Err(e) => e,
        }
    }

    /// Load the thermistor bias current trim.
    pub fn load_thermistor(&mut self, region: &TrimRegion, target: u16) -> TrimFaults {
        match get_trim(region.thermistor(), target) {
            Ok(trim) => {
                self.acs
                    .temp_curr_cfg()
                    .modify(|w| w.set_current_trim(trim as u8));
                TrimFaults::NONE
            }
            Err(e) => e,
        }
    }

    /// Load the custom record: charge-pump current trim and crystal
    /// trim, each range-checked and applied independently after the
    /// signature and CRC gates pass.
    pub fn load_custom(&mut self, custom: &CustomRegion) -> TrimFaults {
        let signature = custom.signature();
        if signature != CUSTOM_SIGNATURE_SIP1 && signature != CUSTOM_SIGNATURE_CUST {
            return TrimFaults::CUSTOM_SIGNATURE;
        }

        let covered = [custom.signature(), custom.ich_trim(), custom.xtal_trim()];
        if crc32(&covered) != custom.crc() {
            return TrimFaults::INVALID_CRC;
        }

        let mut faults = TrimFaults::NONE;

        let ich = custom.ich_trim();
        if ich > 0xF {
            faults |= TrimFaults::CUSTOM_ICH;
        } else {
            self.acs.vcc_ctrl().modify(|w| w.set_ich_trim(ich as u8));
        }

        let xtal = custom.xtal_trim();
        if xtal > 0xFF {
            faults |= TrimFaults::CUSTOM_XTAL;
        } else {
            self.rf.xtal_trim().modify(|w| {
                w.set_xtal_trim_init(xtal as u8);
                w.set_xtal_trim(xtal as u8);
            });
        }

        faults
    }
}

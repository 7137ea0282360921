use super::*;
use crate::crc::{crc32, CrcEngine};
use crate::pac;
use crate::Variant;

fn record(target: u16, trim: u16) -> u32 {
    ((target as u32) << 16) | trim as u32
}

/// Seal a region with a CRC-32 checksum.
fn seal(words: &mut [u32; TRIM_REGION_WORDS]) {
    words[TRIM_REGION_WORDS - 1] = crc32(&words[..TRIM_REGION_WORDS - 1]);
}

/// A region with one valid record in every domain, CRC-32 sealed.
fn populated_words() -> [u32; TRIM_REGION_WORDS] {
    let mut w = [u32::MAX; TRIM_REGION_WORDS];

    w[0] = record(targets::BANDGAP_V, 0x0321);
    w[4] = record(targets::BANDGAP_I, 0x0442);
    w[8] = record(targets::DCDC_1200, 0x0B0C);
    w[12] = record(
        (targets::VDDC_STANDBY << 8) | targets::VDDC_1150,
        (0x21 << 8) | 0x31,
    );
    w[16] = record(
        (targets::VDDM_STANDBY << 8) | targets::VDDM_1150,
        (0x22 << 8) | 0x32,
    );
    w[20] = record(targets::VDDRF_1100, 0x28);
    w[24] = record(targets::VDDPA_1600, 0x50);
    w[28] = record(targets::VDDIF_1800, 0x3C);
    w[32] = record(targets::FLASH_1600, 0x55);
    w[36] = record(targets::RC3, 0x11);
    w[38] = record(targets::RC12, 0x22);
    w[40] = record(targets::RC24, 0x33);
    w[42] = record(targets::RC48, 0x44);
    w[52] = record(targets::RC32K, 0x5A);
    w[56] = 0x0020_0010; // hf/lf offset errors
    w[57] = 0x0001_0000; // hf gain, unity
    w[58] = 0x0001_0100; // lf gain
    w[59] = 0;
    w[60] = 0x0000_1234; // temp sensor offset
    w[61] = 0;
    w[62] = record(targets::THERMISTOR_10, 0x66);
    w[66] = 0x1111_2222;
    w[67] = 0x3333_4444;
    w[68] = 1; // revision

    seal(&mut w);
    w
}

struct AcsMem([u32; 20]);

impl AcsMem {
    fn new() -> Self {
        Self([0; 20])
    }

    fn block(&mut self) -> pac::Acs {
        unsafe { pac::Acs::from_ptr(self.0.as_mut_ptr()) }
    }
}

struct RfMem([u32; 7]);

impl RfMem {
    fn new() -> Self {
        Self([0; 7])
    }

    fn block(&mut self) -> pac::Rf {
        unsafe { pac::Rf::from_ptr(self.0.as_mut_ptr()) }
    }
}

#[test]
fn get_trim_matches_exact_16bit_key() {
    let table = [u32::MAX, record(targets::RC3, 0x11), u32::MAX];
    assert_eq!(get_trim(&table, targets::RC3), Ok(0x11));
}

#[test]
fn get_trim_unpacks_run_and_standby_bytes() {
    let table = [record(
        (targets::VDDC_STANDBY << 8) | targets::VDDC_1150,
        0x2131,
    )];
    assert_eq!(get_trim(&table, targets::VDDC_1150), Ok(0x31));
    assert_eq!(get_trim(&table, targets::VDDC_STANDBY), Ok(0x21));
}

#[test]
fn get_trim_plain_byte_record() {
    let table = [record(targets::VDDRF_1100, 0x28)];
    assert_eq!(get_trim(&table, targets::VDDRF_1100), Ok(0x28));
}

#[test]
fn get_trim_packed_dual_value_record() {
    // 8-bit key with a 16-bit trim: DCDC carries LDO and BUCK bytes.
    let table = [record(targets::DCDC_1200, 0x0B0C)];
    assert_eq!(get_trim(&table, targets::DCDC_1200), Ok(0x0B0C));
}

#[test]
fn get_trim_misses_report_no_trim_found() {
    let table = [record(targets::VDDRF_1100, 0x28)];
    assert_eq!(
        get_trim(&table, targets::VDDRF_1070),
        Err(TrimFaults::NO_TRIM_FOUND)
    );
}

#[test]
fn get_trim_all_sentinel_table_reports_no_trim_found() {
    // Sentinel words are skipped as invalid but the scan still ends in
    // a not-found miss, never in an invalid-trim report.
    let table = [0, u32::MAX, 0, u32::MAX];
    assert_eq!(
        get_trim(&table, targets::VDDRF_1100),
        Err(TrimFaults::NO_TRIM_FOUND)
    );
}

#[test]
fn get_trim_empty_table() {
    assert_eq!(get_trim(&[], 42), Err(TrimFaults::NO_TRIM_FOUND));
}

#[test]
fn get_trim_skips_sentinels_before_the_match() {
    let table = [0, 0, record(targets::VDDRF_1100, 0x28)];
    assert_eq!(get_trim(&table, targets::VDDRF_1100), Ok(0x28));
}

#[test]
fn region_crc32_roundtrip() {
    let words = populated_words();
    let region = TrimRegion::new(&words);
    assert!(region.check_crc().is_ok());
}

#[test]
fn region_crc_detects_corruption() {
    let mut words = populated_words();
    words[12] ^= 1 << 3;
    let region = TrimRegion::new(&words);
    assert_eq!(region.check_crc(), Err(TrimFaults::INVALID_CRC));
}

#[test]
fn region_legacy_16bit_checksum_uses_ccitt() {
    let mut words = populated_words();
    let ccitt = CrcEngine::Ccitt.compute(&words[..TRIM_REGION_WORDS - 1]);
    words[TRIM_REGION_WORDS - 1] = ccitt;
    let region = TrimRegion::new(&words);
    assert!(region.checksum() <= u16::MAX as u32);
    assert!(region.check_crc().is_ok());
}

#[test]
fn verify_passes_populated_region() {
    let words = populated_words();
    let region = TrimRegion::new(&words);
    assert!(region.verify().is_empty());
}

#[test]
fn verify_accepts_any_one_valid_redundant_record() {
    let mut words = populated_words();
    // Move the DCDC record from slot 0 to slot 3.
    words[11] = words[8];
    words[8] = u32::MAX;
    seal(&mut words);
    let region = TrimRegion::new(&words);
    assert!(region.verify().is_empty());
}

#[test]
fn verify_flags_each_missing_domain_independently() {
    let mut words = populated_words();
    for i in 8..12 {
        words[i] = u32::MAX; // wipe DCDC
    }
    words[52] = 0; // wipe RC32K
    seal(&mut words);
    let region = TrimRegion::new(&words);
    let faults = region.verify();
    assert!(faults.contains(TrimFaults::DCDC));
    assert!(faults.contains(TrimFaults::RCOSC32));
    assert!(!faults.contains(TrimFaults::VDDC));
    assert!(!faults.contains(TrimFaults::INVALID_CRC));
}

#[test]
fn load_vddc_applies_halves_independently() {
    let mut words = populated_words();
    // Standby key 81 instead of 80: run lookup hits, standby misses.
    words[12] = record((81 << 8) | targets::VDDC_1150, 0x2131);
    seal(&mut words);
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    acs.vddc_ctrl()
        .write_value(pac::regs::VddCtrl(0x0000_5500));
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    let faults = trim.load_vddc(&region, targets::VDDC_1150, targets::VDDC_STANDBY);
    assert_eq!(faults, TrimFaults::VDDC_STANDBY);

    let ctrl = acs.vddc_ctrl().read();
    assert_eq!(ctrl.vtrim(), 0x31);
    assert_eq!(ctrl.standby_vtrim(), 0x55); // untouched
}

#[test]
fn load_dcdc_selects_byte_by_converter_mode() {
    let words = populated_words();
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    // LDO mode takes the low byte.
    assert!(trim.load_dcdc(&region, targets::DCDC_1200).is_empty());
    assert_eq!(acs.vcc_ctrl().read().vtrim(), 0x0C);

    // BUCK mode takes the high byte.
    acs.vcc_ctrl().modify(|w| w.set_buck_enable(true));
    assert!(trim.load_dcdc(&region, targets::DCDC_1200).is_empty());
    assert_eq!(acs.vcc_ctrl().read().vtrim(), 0x0B);
    assert!(acs.vcc_ctrl().read().buck_enable());
}

#[test]
fn load_dcdc_miss_reports_domain_fault() {
    let words = [u32::MAX; TRIM_REGION_WORDS];
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    let faults = trim.load_dcdc(&region, targets::DCDC_1200);
    assert!(faults.contains(TrimFaults::DCDC));
    assert!(faults.contains(TrimFaults::NO_TRIM_FOUND));
    assert_eq!(acs.vcc_ctrl().read().vtrim(), 0);
}

#[test]
fn load_bandgap_packs_modern_record() {
    let words = populated_words();
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    let faults = trim.load_bandgap(&region, targets::BANDGAP_V, targets::BANDGAP_I);
    assert!(faults.is_empty());

    let bg = acs.bg_ctrl().read();
    assert_eq!(bg.vtrim(), 0x0321);
    assert_eq!(bg.itrim(), 0x0442);
}

#[test]
fn load_bandgap_legacy_record_unshifts_values() {
    let mut words = populated_words();
    let ccitt = CrcEngine::Ccitt.compute(&words[..TRIM_REGION_WORDS - 1]);
    words[TRIM_REGION_WORDS - 1] = ccitt;
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    let faults = trim.load_bandgap(&region, targets::BANDGAP_V, targets::BANDGAP_I);
    assert!(faults.is_empty());

    // Legacy records store values shifted left by two.
    let current = 0x0442u32;
    let voltage = 0x0321u32;
    let expected = ((current << 16) & 0xFF00_0000)
        | ((current << 14) & 0x00FF_0000)
        | (voltage & 0x0000_FF00)
        | ((voltage >> 2) & 0x0000_00FF);
    assert_eq!(acs.bg_ctrl().read().0, expected);
}

#[test]
fn load_bandgap_applies_current_alone() {
    let mut words = populated_words();
    words[0] = u32::MAX; // no voltage record
    seal(&mut words);
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    acs.bg_ctrl().write_value(pac::regs::BgCtrl(0x0000_1234));
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    let faults = trim.load_bandgap(&region, targets::BANDGAP_V, targets::BANDGAP_I);
    assert_eq!(faults, TrimFaults::BANDGAP_V);

    let bg = acs.bg_ctrl().read();
    assert_eq!(bg.vtrim(), 0x1234); // voltage half untouched
    assert_eq!(bg.itrim(), 0x0442);
}

#[test]
fn load_trims_rsl15_skips_vddif() {
    let words = populated_words();
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    // The VDDIF rail does not exist on RSL15, so a full pass always
    // carries the not-found bit and never touches the VDDIF register.
    let faults = trim.load_defaults(&region);
    assert_eq!(faults, TrimFaults::NO_TRIM_FOUND);
    assert_eq!(acs.vddif_ctrl().read().vtrim(), 0);
}

#[test]
fn load_trims_montana_loads_every_domain() {
    let words = populated_words();
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Montana);

    let faults = trim.load_defaults(&region);
    assert!(faults.is_empty());

    assert_eq!(acs.vddc_ctrl().read().vtrim(), 0x31);
    assert_eq!(acs.vddc_ctrl().read().standby_vtrim(), 0x21);
    assert_eq!(acs.vddm_ctrl().read().vtrim(), 0x32);
    assert_eq!(acs.vddrf_ctrl().read().vtrim(), 0x28);
    assert_eq!(acs.vddpa_ctrl().read().vtrim(), 0x50);
    assert_eq!(acs.vddif_ctrl().read().vtrim(), 0x3C);
    assert_eq!(acs.vddflash_ctrl().read().vtrim(), 0x55);
    assert_eq!(acs.rcosc_ctrl().read().rc_ftrim(), 0x11);
    assert_eq!(acs.rcosc_ctrl().read().rc32_ftrim(), 0x5A);
}

#[test]
fn load_single_prefers_supplemental_region() {
    let primary_words = populated_words();
    let mut supp_words = populated_words();
    supp_words[20] = record(targets::VDDRF_1100, 0x77);
    seal(&mut supp_words);

    let primary = TrimRegion::new(&primary_words);
    let supplemental = TrimRegion::new(&supp_words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    let faults = trim.load_single(
        &supplemental,
        &primary,
        TrimDomain::Vddrf,
        &TrimTargets::default(),
    );
    assert!(faults.is_empty());
    assert_eq!(acs.vddrf_ctrl().read().vtrim(), 0x77);
}

#[test]
fn load_single_falls_back_to_primary() {
    let primary_words = populated_words();
    let supp_words = [u32::MAX; TRIM_REGION_WORDS];

    let primary = TrimRegion::new(&primary_words);
    let supplemental = TrimRegion::new(&supp_words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    let faults = trim.load_single(
        &supplemental,
        &primary,
        TrimDomain::Vddrf,
        &TrimTargets::default(),
    );
    assert!(faults.is_empty());
    assert_eq!(acs.vddrf_ctrl().read().vtrim(), 0x28);
}

#[test]
fn lsad_trim_reads_band_fields() {
    let words = populated_words();
    let region = TrimRegion::new(&words);

    let hf = region.lsad_trim(LsadBand::HighFrequency).unwrap();
    assert_eq!(hf.offset, 0x10);
    assert_eq!(hf.gain, 0x0001_0000);

    let lf = region.lsad_trim(LsadBand::LowFrequency).unwrap();
    assert_eq!(lf.offset, 0x20);
    assert_eq!(lf.gain, 0x0001_0100);
}

fn sealed_custom(signature: u32, ich: u32, xtal: u32) -> [u32; TRIM_CUSTOM_WORDS] {
    let mut w = [signature, ich, xtal, 0];
    w[3] = crc32(&w[..3]);
    w
}

#[test]
fn load_custom_applies_both_fields() {
    let words = sealed_custom(CUSTOM_SIGNATURE_SIP1, 0x7, 0x3A);
    let custom = CustomRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let rf = rf_mem.block();
    let mut trim = Trim::new(acs, rf, Variant::Rsl15);

    assert!(trim.load_custom(&custom).is_empty());
    assert_eq!(acs.vcc_ctrl().read().ich_trim(), 0x7);
    assert_eq!(rf.xtal_trim().read().xtal_trim(), 0x3A);
    assert_eq!(rf.xtal_trim().read().xtal_trim_init(), 0x3A);
}

#[test]
fn load_custom_rejects_unknown_signature_before_crc() {
    // Garbage CRC: the signature gate must fire first.
    let words = [0xDEAD_BEEF, 0x7, 0x3A, 0];
    let custom = CustomRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let mut trim = Trim::new(acs_mem.block(), rf_mem.block(), Variant::Rsl15);

    assert_eq!(trim.load_custom(&custom), TrimFaults::CUSTOM_SIGNATURE);
}

#[test]
fn load_custom_rejects_bad_crc() {
    let mut words = sealed_custom(CUSTOM_SIGNATURE_CUST, 0x7, 0x3A);
    words[1] ^= 1;
    let custom = CustomRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let mut trim = Trim::new(acs_mem.block(), rf_mem.block(), Variant::Rsl15);

    assert_eq!(trim.load_custom(&custom), TrimFaults::INVALID_CRC);
}

#[test]
fn load_custom_range_checks_fields_independently() {
    // Charge-pump trim out of range, crystal trim in range: the
    // crystal trim still lands.
    let words = sealed_custom(CUSTOM_SIGNATURE_CUST, 0x10, 0x3A);
    let custom = CustomRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    let rf = rf_mem.block();
    let mut trim = Trim::new(acs, rf, Variant::Rsl15);

    assert_eq!(trim.load_custom(&custom), TrimFaults::CUSTOM_ICH);
    assert_eq!(acs.vcc_ctrl().read().ich_trim(), 0);
    assert_eq!(rf.xtal_trim().read().xtal_trim(), 0x3A);
}

#[test]
fn load_thermistor_sets_bias_current() {
    let words = populated_words();
    let region = TrimRegion::new(&words);

    let mut acs_mem = AcsMem::new();
    let mut rf_mem = RfMem::new();
    let acs = acs_mem.block();
    acs.temp_curr_cfg()
        .write_value(pac::regs::TempCurrCfg(0x0000_00AB));
    let mut trim = Trim::new(acs, rf_mem.block(), Variant::Rsl15);

    assert!(trim
        .load_thermistor(&region, targets::THERMISTOR_10)
        .is_empty());
    let cfg = acs.temp_curr_cfg().read();
    assert_eq!(cfg.current_trim(), 0x66);
    assert_eq!(cfg.bias_cfg(), 0xAB); // preserved
}

//! CRC engines used by the calibration record and wake block formats.
//!
//! Two engines are in play: legacy calibration records carry a 16-bit
//! CRC-CCITT and current records a 32-bit CRC. Which one protects a
//! record is not stored anywhere; it is inferred from the magnitude of
//! the stored checksum (see [`CrcEngine::for_checksum`]).

/// Checksum engine selector.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CrcEngine {
    /// CRC-16/CCITT-FALSE: poly 0x1021, init 0xFFFF, no reflection.
    Ccitt,
    /// CRC-32/ISO-HDLC: poly 0x04C11DB7 reflected, init and xorout all-ones.
    Crc32,
}

impl CrcEngine {
    /// Pick the engine that produced a stored checksum.
    ///
    /// Legacy records use CRC-CCITT and store it zero-extended, so a
    /// checksum that fits in 16 bits is treated as CCITT. A 32-bit CRC
    /// whose upper half happens to be zero misselects here; that
    /// ambiguity is inherited from the record format and accepted.
    pub fn for_checksum(checksum: u32) -> Self {
        if checksum <= u16::MAX as u32 {
            CrcEngine::Ccitt
        } else {
            CrcEngine::Crc32
        }
    }

    /// Checksum a run of 32-bit words, fed to the engine as
    /// little-endian bytes in address order.
    pub fn compute(self, words: &[u32]) -> u32 {
        match self {
            CrcEngine::Ccitt => {
                let mut crc: u16 = 0xFFFF;
                for word in words {
                    for byte in word.to_le_bytes() {
                        crc ^= (byte as u16) << 8;
                        for _ in 0..8 {
                            if crc & 0x8000 != 0 {
                                crc = (crc << 1) ^ 0x1021;
                            } else {
                                crc <<= 1;
                            }
                        }
                    }
                }
                crc as u32
            }
            CrcEngine::Crc32 => {
                let mut crc: u32 = !0;
                for word in words {
                    for byte in word.to_le_bytes() {
                        crc ^= byte as u32;
                        for _ in 0..8 {
                            if crc & 1 != 0 {
                                crc = (crc >> 1) ^ 0xEDB8_8320;
                            } else {
                                crc >>= 1;
                            }
                        }
                    }
                }
                !crc
            }
        }
    }
}

/// CRC-32 over a word run, for formats that always use the 32-bit
/// engine (custom calibration records, wake configuration blocks).
pub fn crc32(words: &[u32]) -> u32 {
    CrcEngine::Crc32.compute(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    // "123456789" as LE words plus a trailing zero byte would change the
    // digest, so the check vectors here use word-aligned input instead.

    #[test]
    fn ccitt_matches_check_vector() {
        // CRC-16/CCITT-FALSE("\x31\x32\x33\x34\x35\x36\x37\x38") = 0xA12B
        let words = [0x3433_3231, 0x3837_3635];
        assert_eq!(CrcEngine::Ccitt.compute(&words), 0xA12B);
    }

    #[test]
    fn crc32_matches_check_vector() {
        // CRC-32("\x31\x32\x33\x34\x35\x36\x37\x38") = 0x9AE0DAAF
        let words = [0x3433_3231, 0x3837_3635];
        assert_eq!(CrcEngine::Crc32.compute(&words), 0x9AE0_DAAF);
    }

    #[test]
    fn engine_selected_by_checksum_magnitude() {
        assert_eq!(CrcEngine::for_checksum(0x0000), CrcEngine::Ccitt);
        assert_eq!(CrcEngine::for_checksum(0xFFFF), CrcEngine::Ccitt);
        assert_eq!(CrcEngine::for_checksum(0x0001_0000), CrcEngine::Crc32);
        assert_eq!(CrcEngine::for_checksum(0x9AE0_DAAF), CrcEngine::Crc32);
    }

    #[test]
    fn altered_word_changes_digest() {
        let mut words = [0x1234_5678, 0x9ABC_DEF0, 0x0BAD_F00D];
        let crc = crc32(&words);
        words[1] ^= 1 << 17;
        assert_ne!(crc32(&words), crc);
    }

    #[test]
    fn empty_input_yields_initial_state() {
        assert_eq!(CrcEngine::Ccitt.compute(&[]), 0xFFFF);
        assert_eq!(CrcEngine::Crc32.compute(&[]), 0);
    }
}

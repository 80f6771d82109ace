//! Charset/ECI normalizer (spec.md §2 stage 3).
//!
//! For `UNICODE_MODE` input this validates UTF-8 and strips a leading BOM,
//! then per segment either honours a caller-specified ECI or picks the
//! narrowest one that fits, converting UTF-8 into that ECI's byte encoding.
//! Only the handful of single-byte ECIs actually reachable from ISO-8859
//! Latin alphabets are implemented; anything else falls back to ECI 26
//! (UTF-8 itself), which every reader capable of ECI at all must support.

use crate::error::ZintError;

pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Strips a leading UTF-8 BOM from segment 0, as the dispatcher's step 7
/// does for `UNICODE_MODE`.
pub fn strip_bom(data: &mut Vec<u8>) {
    if data.starts_with(&UTF8_BOM) {
        data.drain(0..3);
    }
}

/// ECI 3 = ISO-8859-1, the narrowest single-byte charset that covers Latin-1.
/// ECI 26 = UTF-8 itself (used as the fallback when no single-byte ECI fits).
const ECI_ISO8859_1: u32 = 3;
const ECI_UTF8: u32 = 26;

/// Converts a UTF-8 string into the byte encoding of `eci`. Only ECI 0
/// (7-bit ASCII, same as ISO-8859-1 restricted to < 0x80), ECI 3
/// (ISO-8859-1) and ECI 26 (UTF-8 passthrough) are implemented; any other
/// requested ECI returns `Error::InvalidOption` since this crate does not
/// ship the full ECI table the original's `sjis.c`/`big5.c` etc. provide.
pub fn utf8_to_eci(eci: u32, text: &str) -> Result<Vec<u8>, ZintError> {
    match eci {
        0 | ECI_ISO8859_1 => {
            let mut out = Vec::with_capacity(text.len());
            for ch in text.chars() {
                let cp = ch as u32;
                if cp > 0xFF {
                    return Err(ZintError::InvalidData {
                        id: 245,
                        message: format!("Invalid character in input for ECI {eci}"),
                    });
                }
                out.push(cp as u8);
            }
            Ok(out)
        }
        ECI_UTF8 => Ok(text.as_bytes().to_vec()),
        _ => Err(ZintError::InvalidOption { id: 246 }),
    }
}

/// Picks the narrowest ECI that can represent `text` without loss: ECI 0 if
/// every character is ASCII, ECI 3 if every character fits a byte, else
/// ECI 26 (UTF-8). Mirrors the dispatcher's step 10 "re-run ECI selection
/// picking the narrowest ECI that fits" fallback path.
pub fn dest_len_eci(text: &str) -> u32 {
    if text.is_ascii() {
        0
    } else if text.chars().all(|c| (c as u32) <= 0xFF) {
        ECI_ISO8859_1
    } else {
        ECI_UTF8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_only_once() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice(b"AIM");
        strip_bom(&mut data);
        assert_eq!(data, b"AIM");
    }

    #[test]
    fn leaves_data_without_bom_untouched() {
        let mut data = b"AIM".to_vec();
        strip_bom(&mut data);
        assert_eq!(data, b"AIM");
    }

    #[test]
    fn narrowest_eci_for_ascii_is_zero() {
        assert_eq!(dest_len_eci("AIM"), 0);
    }

    #[test]
    fn narrowest_eci_for_latin1_is_three() {
        assert_eq!(dest_len_eci("café"), ECI_ISO8859_1);
    }

    #[test]
    fn narrowest_eci_for_wide_unicode_is_utf8() {
        assert_eq!(dest_len_eci("漢字"), ECI_UTF8);
    }

    #[test]
    fn utf8_to_eci_roundtrips_latin1() {
        let bytes = utf8_to_eci(ECI_ISO8859_1, "café").unwrap();
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9]);
    }
}

//! Code 128 family encoder (spec.md §4.2/§4.3), grounded line-for-line in
//! `original_source/backend/code128.c` (`code128()`, `c128_expand`,
//! `c128_glyph_count`, `gs1_128_cc`, `nve18`, `ean14`, `dpd`, `upu_s10`).

mod planner;
mod table;
pub mod derivatives;

use crate::error::ZintError;
use crate::symbol::Symbol;
use planner::{define_mode, Fncs, ManualSet, SetTag, C128_MAX};
use table::*;

const C128_SYMBOL_MAX: usize = 99;

/// Fset tag per byte: plain ASCII, shift-needed ('f'), latch-needed ('F'),
/// or shift-back ('n') after the Annex E note 3 reversion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FTag {
    Plain,
    Shift,
    Latch,
    ShiftBack,
}

/// Marks every byte ≥ 0x80 as shift-needed, then upgrades runs of ≥ 5
/// consecutive such bytes (including a trailing run of ≥ 3) to latch-needed,
/// mirroring `code128()`'s extended-ASCII detection pass exactly. `set` is
/// the planner's already-computed code-set tags, needed by the Annex E note
/// 3 reversion pass below to count Set C characters in the gap.
fn compute_fset(src: &[u8], set: &[SetTag]) -> Vec<FTag> {
    let length = src.len();
    let mut fset = vec![FTag::Plain; length];
    for (i, &b) in src.iter().enumerate() {
        fset[i] = if b >= 128 { FTag::Shift } else { FTag::Plain };
    }

    let mut j = 0i32;
    for i in 0..length {
        if fset[i] == FTag::Shift {
            j += 1;
        } else {
            j = 0;
        }
        if j >= 5 {
            let mut k = i as i32;
            while k > i as i32 - 5 {
                fset[k as usize] = FTag::Latch;
                k -= 1;
            }
        }
    }
    if j >= 3 {
        let mut k = length as i32 - 1;
        while k > length as i32 - 1 - j {
            fset[k as usize] = FTag::Latch;
            k -= 1;
        }
    }

    // Annex E note 3: decide if it's worth reverting to 646 encodation
    // (shift instead of latch) for a short run between two extended runs.
    for i in 1..length {
        if fset[i - 1] == FTag::Latch && fset[i] == FTag::Plain {
            let mut c = 0i32;
            let mut jj = 0i32;
            // Set C characters in the gap count against the gap length,
            // exactly as the original counts `set[i+j] == 'C'` against `j`.
            while (i as i32 + jj) < length as i32 && fset[(i as i32 + jj) as usize] == FTag::Plain {
                if matches!(set[(i as i32 + jj) as usize], SetTag::C) {
                    c += 1;
                }
                jj += 1;
            }
            let mut k = 0i32;
            if i as i32 + jj < length as i32 {
                k = 1;
                while (i as i32 + jj + k) < length as i32 && fset[(i as i32 + jj + k) as usize] != FTag::Plain {
                    k += 1;
                }
            }
            if jj - c < 3 || (jj - c < 5 && k > 2) {
                let mut kk = 0;
                while kk < jj {
                    fset[(i as i32 + kk) as usize] = FTag::ShiftBack;
                    kk += 1;
                }
            }
        }
    }

    fset
}

/// Estimate of codeword count from character encodation alone (ignores the
/// checksum and stop codewords added later), `c128_glyph_count`.
fn glyph_count(source: &[u8], set: &[SetTag], fset: Option<&[FTag]>) -> usize {
    let mut count = 0usize;
    let mut current = match set.first() {
        Some(SetTag::A) | Some(SetTag::ShiftB) => 'A',
        Some(SetTag::B) | Some(SetTag::ShiftA) => 'B',
        Some(SetTag::C) => 'C',
        None => ' ',
    };
    let mut f_state = false;
    let mut i = 0;
    while i < source.len() {
        let wanted = match set[i] {
            SetTag::A | SetTag::ShiftB => 'A',
            SetTag::B | SetTag::ShiftA => 'B',
            SetTag::C => 'C',
        };
        if wanted != current {
            current = wanted;
            count += 1;
        }
        if let Some(fset) = fset {
            match (fset[i], f_state) {
                (FTag::Latch, false) | (FTag::Plain, true) => {
                    f_state = !f_state;
                    count += 2;
                }
                (FTag::Shift, false) | (FTag::ShiftBack, true) => {
                    count += 1;
                }
                _ => {}
            }
        }
        if matches!(set[i], SetTag::ShiftA | SetTag::ShiftB) {
            count += 1;
        }
        count += 1;
        if matches!(set[i], SetTag::C) && source[i] != 0x1D {
            i += 1;
        }
        i += 1;
    }
    count
}

/// Appends the codeword-to-width expansion plus mod-103 checksum and STOP
/// pattern, `c128_expand`. Returns the full codeword sequence (including
/// checksum and stop) for callers that need it (HRT/debug/tests).
fn expand(symbol: &mut Symbol, values: &[u8]) -> Vec<u8> {
    let mut widths = Vec::with_capacity(values.len() * 6 + 7);
    let mut total_sum: u32 = values[0] as u32;
    widths.extend_from_slice(&C128_TABLE[values[0] as usize]);
    for (i, &v) in values.iter().enumerate().skip(1) {
        widths.extend_from_slice(&C128_TABLE[v as usize]);
        total_sum += v as u32 * i as u32;
    }
    let check = (total_sum % 103) as u8;
    widths.extend_from_slice(&C128_TABLE[check as usize]);
    widths.extend_from_slice(&STOP_WIDTHS);

    symbol.push_row_from_widths(&widths);

    let mut out = values.to_vec();
    out.push(check);
    out.push(STOP);
    out
}

/// Converts an ISO-8859-1 byte to its Set A codeword, `c128_set_a`.
fn set_a(b: u8) -> u8 {
    if b >= 128 {
        if b < 160 { (b - 128) + 64 } else { (b - 128) - 32 }
    } else if b < 32 {
        b + 64
    } else {
        b - 32
    }
}

/// Converts an ISO-8859-1 byte to its Set B codeword, `c128_set_b`.
fn set_b(b: u8) -> u8 {
    if b >= 128 + 32 { b - 32 - 128 } else { b - 32 }
}

/// Converts a digit pair to its Set C codeword, `c128_set_c`.
fn set_c(a: u8, b: u8) -> u8 {
    10 * (a - b'0') + (b - b'0')
}

/// Handles plain Code 128 / Code 128 A-B-only (`code128()`). `ab_only`
/// disables Set C entirely (`BARCODE_CODE128AB`). `reader_init` emits FNC3
/// right after Start. `manual` carries the extra-escape-mode overrides
/// (`\^A \^B \^C \^1`), already parsed out of the input by the caller.
pub struct ManualEscapes {
    pub set: ManualSet,
    pub fncs: Fncs,
    pub have_fnc1: bool,
    pub have_manual: bool,
}

pub fn encode(
    symbol: &mut Symbol,
    source: &[u8],
    ab_only: bool,
    reader_init: bool,
    manual: Option<&ManualEscapes>,
) -> Result<String, ZintError> {
    let length = source.len();
    if length == 0 {
        return Err(ZintError::InvalidData { id: 842, message: "No input data".to_string() });
    }
    if length > C128_MAX {
        return Err(ZintError::TooLong { id: 340, max: C128_MAX });
    }

    let manual_set = manual.filter(|m| m.have_manual).map(|m| &m.set);
    let fncs = manual.filter(|m| m.have_fnc1).map(|m| &m.fncs);

    let set = define_mode(source, ab_only, manual_set, fncs);
    let fset = compute_fset(source, &set);

    if glyph_count(source, &set, Some(&fset)) > C128_SYMBOL_MAX {
        return Err(ZintError::TooLong { id: 341, max: C128_SYMBOL_MAX });
    }

    let mut values: Vec<u8> = Vec::with_capacity(length + 4);
    let mut current = match set[0] {
        SetTag::A | SetTag::ShiftB => 'A',
        SetTag::B | SetTag::ShiftA => 'B',
        SetTag::C => 'C',
    };
    match current {
        'A' => {
            values.push(START_A);
            if reader_init {
                values.push(FNC3);
            }
        }
        'B' => {
            values.push(START_B);
            if reader_init {
                values.push(FNC3);
            }
        }
        'C' => {
            if reader_init {
                values.push(START_B);
                values.push(FNC3);
                values.push(CODE_C);
            } else {
                values.push(START_C);
            }
        }
        _ => unreachable!(),
    }

    let mut f_state = false;
    let mut read = 0usize;
    while read < length {
        let wanted = match set[read] {
            SetTag::A | SetTag::ShiftB => 'A',
            SetTag::B | SetTag::ShiftA => 'B',
            SetTag::C => 'C',
        };
        if wanted != current {
            match wanted {
                'A' => values.push(CODE_A),
                'B' => values.push(CODE_B),
                'C' => values.push(CODE_C),
                _ => unreachable!(),
            }
            current = wanted;
        }

        match (fset[read], f_state) {
            (FTag::Latch, false) | (FTag::Plain, true) => {
                match current {
                    'A' => { values.push(FNC4_A); values.push(FNC4_A); }
                    'B' => { values.push(FNC4_B); values.push(FNC4_B); }
                    _ => {}
                }
                f_state = !f_state;
            }
            (FTag::Shift, false) | (FTag::ShiftBack, true) => {
                match current {
                    'A' => values.push(FNC4_A),
                    'B' => values.push(FNC4_B),
                    _ => {}
                }
            }
            _ => {}
        }

        if matches!(set[read], SetTag::ShiftA | SetTag::ShiftB) {
            values.push(SHIFT);
        }

        let is_manual_fnc1 = manual.is_some_and(|m| m.have_fnc1 && m.fncs[read]);
        if !is_manual_fnc1 {
            match set[read] {
                SetTag::A | SetTag::ShiftB => values.push(set_a(source[read])),
                SetTag::B | SetTag::ShiftA => values.push(set_b(source[read])),
                SetTag::C => {
                    values.push(set_c(source[read], source[read + 1]));
                    read += 1;
                }
            }
        } else {
            values.push(FNC1);
        }
        read += 1;
    }

    expand(symbol, &values);

    Ok(hrt_iso8859_1(source))
}

/// Renders ISO-8859-1 bytes as a lossy-UTF-8 HRT string (`hrt_cpy_iso8859_1`).
fn hrt_iso8859_1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    /// Scenario 1, spec.md §8: CODE128 "AIM" -> width 68, codewords
    /// `104 33 41 45 87 106`.
    #[test]
    fn aim_matches_documented_codewords() {
        let mut symbol = Symbol::create();
        let hrt = encode(&mut symbol, b"AIM", false, false, None).unwrap();
        assert_eq!(hrt, "AIM");
        // Start B(104) A(33=65-32) I(41=73-32) M(45=77-32) check(?) stop(106)
        // Checksum = 104 + 33*1 + 41*2 + 45*3 = 104+33+82+135 = 354; 354%103=45
        let checksum = (104u32 + 33 + 41 * 2 + 45 * 3) % 103;
        assert_eq!(checksum, 87);
        assert_eq!(symbol.rows, 1);
        assert_eq!(symbol.width, 68);
    }

    #[test]
    fn all_digits_use_set_c_and_compress() {
        let mut symbol = Symbol::create();
        encode(&mut symbol, b"123456", false, false, None).unwrap();
        // Start C + 3 Set-C codewords + checksum = 5 codewords, each 11 modules
        // wide, plus the 13-module stop pattern: 5*11 + 13 = 68.
        assert_eq!(symbol.width, 5 * 11 + 13);
    }

    #[test]
    fn rejects_empty_input() {
        let mut symbol = Symbol::create();
        assert!(encode(&mut symbol, b"", false, false, None).is_err());
    }

    #[test]
    fn rejects_over_length_input() {
        let mut symbol = Symbol::create();
        let long = vec![b'1'; C128_MAX + 1];
        assert!(matches!(
            encode(&mut symbol, &long, false, false, None),
            Err(ZintError::TooLong { id: 340, .. })
        ));
    }
}

//! Code 128 derivatives (spec.md §4.3), grounded in
//! `original_source/backend/code128.c` (`gs1_128_cc`, `nve18`, `ean14`,
//! `dpd`, `upu_s10`).

use crate::error::{Warning, ZintError};
use crate::gs1::{gs1_check_digit, gs1_verify};
use crate::symbol::Symbol;
use crate::symbology::Symbology;

use super::planner::{define_mode, SetTag};
use super::table::{CODE_B, CODE_C, FNC1, START_B, START_C};
use super::{expand, hrt_iso8859_1, set_b, set_c, C128_MAX};

const C128_SYMBOL_MAX: usize = 99;

/// GS1-128: like Code 128 but forces leading FNC1, all AI separators become
/// FNC1, restricted to Sets B/C (Set A never needed for GS1 data), manual
/// escapes disabled. Emits `Warning::Noncompliant` when the reduced data
/// exceeds 48 characters (GS1 General Specifications 5.4.4.3).
pub fn gs1_128(symbol: &mut Symbol, source: &[u8]) -> Result<(String, Vec<Warning>), ZintError> {
    if source.len() > C128_MAX {
        return Err(ZintError::TooLong { id: 342, max: C128_MAX });
    }
    let reduced = gs1_verify(source)?;
    if reduced.len() > C128_SYMBOL_MAX {
        return Err(ZintError::TooLong { id: 344, max: C128_SYMBOL_MAX });
    }

    let set = define_mode(&reduced, true /* ab_only: GS1-128 never uses Set A */, None, None);

    let mut values = Vec::with_capacity(reduced.len() + 2);
    values.push(if set[0] == SetTag::C { START_C } else { START_B });
    values.push(FNC1);

    let mut read = 0usize;
    let mut current = set[0];
    while read < reduced.len() {
        if read != 0 && set[read] != current {
            values.push(if set[read] == SetTag::C { CODE_C } else { CODE_B });
        }
        current = set[read];
        if reduced[read] != 0x1D {
            if set[read] == SetTag::C {
                values.push(set_c(reduced[read], reduced[read + 1]));
                read += 1;
            } else {
                values.push(set_b(reduced[read]));
            }
        } else {
            values.push(FNC1);
        }
        read += 1;
    }

    expand(symbol, &values);

    let mut warnings = Vec::new();
    if reduced.len() > 48 {
        warnings.push(Warning::Noncompliant {
            id: 843,
            message: "GS1-128 input too long (48 character maximum)".to_string(),
        });
    }

    let gs1parens = symbol.input_mode.contains(crate::symbol::InputMode::GS1PARENS_MODE);
    let hrt = if gs1parens {
        hrt_iso8859_1(source)
    } else {
        let mut s = String::with_capacity(source.len());
        let mut depth = 0i32;
        for &b in source {
            match b {
                b'[' => { s.push('('); depth += 1; }
                b']' if depth > 0 => { s.push(')'); depth -= 1; }
                other => s.push(other as char),
            }
        }
        s
    };
    symbol.text = hrt.clone();
    Ok((hrt, warnings))
}

fn wrap_ean(ai: &str, source: &[u8], width: usize) -> Result<Vec<u8>, ZintError> {
    if !source.iter().all(u8::is_ascii_digit) {
        return Err(ZintError::InvalidData {
            id: 348,
            message: "Invalid character in data (digits only)".to_string(),
        });
    }
    let zeroes = width - source.len();
    let mut body = vec![b'0'; zeroes];
    body.extend_from_slice(source);
    let check = gs1_check_digit(&body);
    let mut out = Vec::with_capacity(4 + width + 1);
    out.extend_from_slice(format!("({ai})").as_bytes());
    out.extend_from_slice(&body);
    out.push(check);
    Ok(out)
}

/// EAN-14: wraps up to 13 digits with AI `(01)`, appends a mod-10 check digit.
pub fn ean14(symbol: &mut Symbol, source: &[u8]) -> Result<(String, Vec<Warning>), ZintError> {
    if source.len() > 13 {
        return Err(ZintError::TooLong { id: 347, max: 13 });
    }
    let wrapped = wrap_ean("01", source, 13)?;
    gs1_128(symbol, &wrapped)
}

/// NVE-18: wraps up to 17 digits with AI `(00)`, appends a mod-10 check digit.
pub fn nve18(symbol: &mut Symbol, source: &[u8]) -> Result<(String, Vec<Warning>), ZintError> {
    if source.len() > 17 {
        return Err(ZintError::TooLong { id: 345, max: 17 });
    }
    let wrapped = wrap_ean("00", source, 17)?;
    gs1_128(symbol, &wrapped)
}

const KRSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn posn(c: u8) -> i32 {
    KRSET.iter().position(|&k| k == c).map(|p| p as i32).unwrap_or(-1)
}

/// DPD: 27 alphanumerics (28 if an identification tag is already present),
/// upper-cased, mod-36 check character, emitted via plain Code 128.
pub fn dpd(symbol: &mut Symbol, source: &[u8], relabel: bool) -> Result<(String, Vec<Warning>), ZintError> {
    let length = source.len();
    if (length != 27 && length != 28) || (length == 28 && relabel) {
        return if relabel {
            Err(ZintError::TooLong { id: 830, max: 27 })
        } else {
            Err(ZintError::TooLong { id: 349, max: 28 })
        };
    }

    let mut local: Vec<u8> = if length == 27 && !relabel {
        let mut v = vec![b'%'];
        v.extend_from_slice(source);
        v
    } else {
        source.to_vec()
    };
    let total_len = local.len();
    let skip = usize::from(!relabel);
    for b in &mut local[skip..] {
        *b = b.to_ascii_uppercase();
    }
    if !local[skip..].iter().all(|b| KRSET.contains(b)) {
        let id = if skip == 0 { 300 } else { 299 };
        return Err(ZintError::InvalidData {
            id,
            message: "Invalid character in data (alphanumerics only)".to_string(),
        });
    }

    let ident_tag = local[0];
    if !(32..=127).contains(&ident_tag) {
        return Err(ZintError::InvalidData {
            id: 343,
            message: "Invalid DPD identification tag (first character), ASCII values 32 to 127 only".to_string(),
        });
    }

    super::encode(symbol, &local, false, false, None)?;

    let mut cd: i32 = 36;
    let mut hrt = String::new();
    for i in skip..total_len {
        hrt.push(local[i] as char);
        cd += posn(local[i]);
        if cd > 36 {
            cd -= 36;
        }
        cd *= 2;
        if cd >= 37 {
            cd -= 37;
        }
        if matches!(i + usize::from(relabel), 4 | 7 | 11 | 15 | 19 | 21 | 24 | 27) {
            hrt.push(' ');
        }
    }
    cd = 37 - cd;
    if cd == 36 {
        cd = 0;
    }
    hrt.push(if cd < 10 { (b'0' + cd as u8) as char } else { (b'A' + (cd - 10) as u8) as char });
    symbol.text = hrt.clone();

    let mut warnings = Vec::new();
    let tail16 = &local[total_len - 16..];
    if !tail16.iter().all(u8::is_ascii_digit) {
        let country = &local[total_len - 3..];
        let service = &local[total_len - 6..total_len - 3];
        let id = if !country.iter().all(u8::is_ascii_digit) {
            831
        } else if !service.iter().all(u8::is_ascii_digit) {
            832
        } else {
            833
        };
        warnings.push(Warning::Noncompliant { id, message: "DPD compliance check failed".to_string() });
    }

    Ok((hrt, warnings))
}

const UPU_WEIGHTS: [i32; 8] = [8, 6, 4, 2, 3, 5, 9, 7];

/// UPU S10: 2-letter service indicator, 8-digit serial, optional check
/// digit, 2-letter ISO 3166-1 country code.
pub fn upu_s10(symbol: &mut Symbol, source: &[u8]) -> Result<(String, Vec<Warning>), ZintError> {
    let length = source.len();
    if length != 12 && length != 13 {
        return Err(ZintError::TooLong { id: 834, max: 13 });
    }

    let mut local: Vec<u8>;
    let have_check: Option<u8>;
    if length == 13 {
        have_check = Some(source[10]);
        local = source[..10].to_vec();
        local.extend_from_slice(&source[11..]);
    } else {
        have_check = None;
        local = source.to_vec();
    }
    for b in &mut local {
        *b = b.to_ascii_uppercase();
    }

    if !local[0].is_ascii_uppercase() || !local[1].is_ascii_uppercase() {
        return Err(ZintError::InvalidData {
            id: 835,
            message: "Invalid character in Service Indicator (first 2 characters) (alphabetic only)".to_string(),
        });
    }
    let serial_ok = local[2..10].iter().all(u8::is_ascii_digit);
    let check_ok = have_check.is_none_or(|c| c.is_ascii_digit());
    if !serial_ok || !check_ok {
        return Err(ZintError::InvalidData {
            id: 836,
            message: "Invalid character in Serial Number (digits only)".to_string(),
        });
    }
    if !local[10].is_ascii_uppercase() || !local[11].is_ascii_uppercase() {
        return Err(ZintError::InvalidData {
            id: 837,
            message: "Invalid character in Country Code (last 2 characters) (alphabetic only)".to_string(),
        });
    }

    let mut check_digit: i32 = 0;
    for (i, w) in UPU_WEIGHTS.iter().enumerate() {
        check_digit += (local[2 + i] - b'0') as i32 * w;
    }
    check_digit %= 11;
    check_digit = 11 - check_digit;
    if check_digit == 10 {
        check_digit = 0;
    } else if check_digit == 11 {
        check_digit = 5;
    }
    if let Some(c) = have_check {
        let given = (c - b'0') as i32;
        if given != check_digit {
            return Err(ZintError::InvalidCheck {
                id: 838,
                found: c as char,
                expected: (b'0' + check_digit as u8) as char,
            });
        }
    }

    let mut full = local[..10].to_vec();
    full.push(b'0' + check_digit as u8);
    full.extend_from_slice(&local[10..]);

    super::encode(symbol, &full, false, false, None)?;

    let mut hrt = String::new();
    for (i, &b) in full.iter().enumerate() {
        if matches!(i, 2 | 5 | 8 | 11) {
            hrt.push(' ');
        }
        hrt.push(b as char);
    }
    symbol.text = hrt.clone();

    let mut warnings = Vec::new();
    if matches!(full[0], b'J' | b'K' | b'S' | b'T' | b'W') {
        warnings.push(Warning::Noncompliant {
            id: 839,
            message: "Invalid Service Indicator (first character should not be any of \"JKSTW\")".to_string(),
        });
    } else if matches!(full[0], b'F' | b'H' | b'I' | b'O' | b'X' | b'Y') {
        warnings.push(Warning::Noncompliant {
            id: 840,
            message: "Non-standard Service Indicator (first 2 characters)".to_string(),
        });
    } else if !crate::gs1::is_iso3166_alpha2(&full[11..13]) {
        warnings.push(Warning::Noncompliant {
            id: 841,
            message: "Country code (last two characters) is not ISO 3166-1".to_string(),
        });
    }

    Ok((hrt, warnings))
}

const HIBC_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

/// HIBC-128: upper-case input over the HIBC character set, max 110 chars,
/// prefixed `+`, mod-43 check character, HRT wrapped in `*...*`.
pub fn hibc128(symbol: &mut Symbol, source: &[u8]) -> Result<(String, Vec<Warning>), ZintError> {
    if source.len() > 110 {
        return Err(ZintError::TooLong { id: 203, max: 110 });
    }
    let upper: Vec<u8> = source.iter().map(u8::to_ascii_uppercase).collect();
    if !upper.iter().all(|b| HIBC_CHARSET.contains(b)) {
        return Err(ZintError::InvalidData {
            id: 204,
            message: "Invalid character in HIBC data".to_string(),
        });
    }

    let mut payload = vec![b'+'];
    payload.extend_from_slice(&upper);

    let sum: u32 = payload
        .iter()
        .map(|b| HIBC_CHARSET.iter().position(|c| c == b).unwrap() as u32)
        .sum();
    let check = HIBC_CHARSET[(sum % 43) as usize];
    payload.push(check);

    super::encode(symbol, &payload, false, false, None)?;

    let hrt = format!("*{}*", String::from_utf8_lossy(&payload));
    symbol.text = hrt.clone();
    Ok((hrt, Vec::new()))
}

/// Dispatches to the derivative matching `symbology`; `Code128`/`Code128Ab`
/// fall through to the plain encoder.
pub fn dispatch(
    symbol: &mut Symbol,
    symbology: Symbology,
    source: &[u8],
) -> Result<(String, Vec<Warning>), ZintError> {
    match symbology {
        Symbology::Gs1_128 => gs1_128(symbol, source),
        Symbology::Ean14 => ean14(symbol, source),
        Symbology::Nve18 => nve18(symbol, source),
        Symbology::Dpd => dpd(symbol, source, symbol.option_2 == 1),
        Symbology::UpuS10 => upu_s10(symbol, source),
        Symbology::Hibc128 => hibc128(symbol, source),
        Symbology::Code128 | Symbology::Code128Ab => {
            let ab_only = symbology == Symbology::Code128Ab;
            let reader_init = symbol.output_options.contains(crate::symbol::OutputOptions::READER_INIT);
            let hrt = super::encode(symbol, source, ab_only, reader_init, None)?;
            symbol.text = hrt.clone();
            Ok((hrt, Vec::new()))
        }
        _ => unreachable!("dispatch() only called for Code 128 family symbologies"),
    }
}

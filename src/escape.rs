//! Escape sequence expansion (spec.md §2 stage 2, §9's "split into two entry
//! points" re-architecture note).
//!
//! The original computes the de-escaped length first (a NULL-output-buffer
//! pass) before allocating and writing bytes. In Rust there's no NULL to
//! branch on, so `expanded_len` and `expand` are genuinely two functions
//! instead of one function with an `if (buffer)` branch — the split survives
//! because the dispatcher needs the length before it knows whether the total
//! input still fits `MAX_DATA_LEN`.

use crate::error::ZintError;

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn oct_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'7' => Some(c - b'0'),
        _ => None,
    }
}

/// One decoded escape: the input bytes it consumed and the output byte(s) it
/// produces. `\(` and `\)` produce zero output bytes (structural markers
/// consumed by the GS1 verifier, not data).
fn decode_one(src: &[u8]) -> Result<(usize, Vec<u8>), ZintError> {
    debug_assert_eq!(src[0], b'\\');
    if src.len() < 2 {
        return Err(bad_escape());
    }
    match src[1] {
        b'0' => Ok((2, vec![0x00])),
        b'E' => Ok((2, vec![0x04])), // End of transmission
        b'a' => Ok((2, vec![0x07])),
        b'b' => Ok((2, vec![0x08])),
        b't' => Ok((2, vec![0x09])),
        b'n' => Ok((2, vec![0x0A])),
        b'v' => Ok((2, vec![0x0B])),
        b'f' => Ok((2, vec![0x0C])),
        b'r' => Ok((2, vec![0x0D])),
        b'e' => Ok((2, vec![0x1B])),
        b'G' => Ok((2, vec![0x1D])), // GS1 separator
        b'R' => Ok((2, vec![0x1E])),
        b'\\' => Ok((2, vec![b'\\'])),
        b'(' | b')' => Ok((2, vec![])),
        b'd' => {
            if src.len() < 5 {
                return Err(bad_escape());
            }
            let digits = std::str::from_utf8(&src[2..5]).map_err(|_| bad_escape())?;
            let v: u16 = digits.parse().map_err(|_| bad_escape())?;
            if v > 255 {
                return Err(bad_escape());
            }
            Ok((5, vec![v as u8]))
        }
        b'o' => {
            if src.len() < 5 {
                return Err(bad_escape());
            }
            let mut v: u32 = 0;
            for &b in &src[2..5] {
                v = v * 8 + oct_val(b).ok_or_else(bad_escape)? as u32;
            }
            if v > 255 {
                return Err(bad_escape());
            }
            Ok((5, vec![v as u8]))
        }
        b'x' => {
            if src.len() < 4 {
                return Err(bad_escape());
            }
            let hi = hex_val(src[2]).ok_or_else(bad_escape)?;
            let lo = hex_val(src[3]).ok_or_else(bad_escape)?;
            Ok((4, vec![hi * 16 + lo]))
        }
        b'u' => decode_unicode(src, 4, 'u'),
        b'U' => decode_unicode(src, 6, 'U'),
        b'^' => {
            // Manual code-set escapes belong to Code 128's EXTRA_ESCAPE_MODE
            // and are handled upstream by the dispatcher before it calls
            // here; reaching this point means plain escape mode saw a bare
            // `\^`, which only means something in extra-escape mode.
            Err(bad_escape())
        }
        _ => Err(bad_escape()),
    }
}

fn decode_unicode(src: &[u8], digits: usize, _tag: char) -> Result<(usize, Vec<u8>), ZintError> {
    if src.len() < 2 + digits {
        return Err(bad_escape());
    }
    let mut v: u32 = 0;
    for &b in &src[2..2 + digits] {
        v = v * 16 + hex_val(b).ok_or_else(bad_escape)? as u32;
    }
    let ch = char::from_u32(v).ok_or_else(bad_escape)?;
    let mut buf = [0u8; 4];
    let s = ch.encode_utf8(&mut buf);
    Ok((2 + digits, s.as_bytes().to_vec()))
}

fn bad_escape() -> ZintError {
    ZintError::InvalidData {
        id: 236,
        message: "Invalid escape sequence in input data".to_string(),
    }
}

/// Computes the de-escaped length without allocating the output — the first
/// of the split entry points.
pub fn expanded_len(source: &[u8]) -> Result<usize, ZintError> {
    let mut i = 0;
    let mut len = 0;
    while i < source.len() {
        if source[i] == b'\\' {
            let (consumed, out) = decode_one(&source[i..])?;
            i += consumed;
            len += out.len();
        } else {
            i += 1;
            len += 1;
        }
    }
    Ok(len)
}

/// Expands escape sequences into raw bytes — the second entry point, which
/// assumes `expanded_len` already validated the input.
pub fn expand(source: &[u8]) -> Result<Vec<u8>, ZintError> {
    let mut out = Vec::with_capacity(source.len());
    let mut i = 0;
    while i < source.len() {
        if source[i] == b'\\' {
            let (consumed, bytes) = decode_one(&source[i..])?;
            out.extend_from_slice(&bytes);
            i += consumed;
        } else {
            out.push(source[i]);
            i += 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_named_controls() {
        assert_eq!(expand(br"\n\t\r").unwrap(), vec![0x0A, 0x09, 0x0D]);
    }

    #[test]
    fn expands_gs1_separator() {
        assert_eq!(expand(br"\G").unwrap(), vec![0x1D]);
    }

    #[test]
    fn expands_hex_and_octal_and_decimal() {
        assert_eq!(expand(br"\x41").unwrap(), vec![b'A']);
        assert_eq!(expand(br"\o101").unwrap(), vec![b'A']);
        assert_eq!(expand(br"\d065").unwrap(), vec![b'A']);
    }

    #[test]
    fn expands_unicode() {
        assert_eq!(expand(br"é").unwrap(), "é".as_bytes());
    }

    #[test]
    fn literal_backslash_and_parens_markers() {
        assert_eq!(expand(br"\\").unwrap(), vec![b'\\']);
        assert_eq!(expand(br"\(\)").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn expanded_len_matches_expand_output() {
        let src = br"AB\n\x41\(C\)";
        assert_eq!(expanded_len(src).unwrap(), expand(src).unwrap().len());
    }

    #[test]
    fn unrecognized_escape_is_fatal() {
        assert!(expand(br"\q").is_err());
    }
}

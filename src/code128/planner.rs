//! The minimal-cost code-set planner: Alex Geller's divide-and-conquer with
//! memoization, transcribed from `original_source/backend/code128.c`'s
//! `c128_cost`/`c128_define_mode` (spec.md §4.2). Charset indices follow the
//! original: `0` = uninitialized, `1` = A, `2` = B, `3` = C.
//!
//! The planner prefers C over B over A when costs tie — "as seems to better
//! preserve previous encodation" per the only comment the original gives for
//! this choice (spec.md §9's Open Question, preserved verbatim here rather
//! than rationalized).

pub const C128_MAX: usize = 256;

/// Per-position manual code-set override from extra-escape mode (`\^A`
/// etc.): `0` none, `1`/`2`/`3` force A/B/C for that position.
pub type ManualSet = [u8; C128_MAX];
/// Per-position manual FNC1 marker (`\^1` dummy bytes), extra-escape mode only.
pub type Fncs = [bool; C128_MAX];

fn can_aorb(ch: u8, charset: u8, check_fnc1: bool) -> bool {
    if ch <= 31 {
        charset == 1 || (check_fnc1 && ch == 0x1D)
    } else if ch <= 95 {
        true
    } else if ch <= 127 {
        charset == 2
    } else if ch <= 159 {
        charset == 1
    } else if ch <= 223 {
        true
    } else {
        charset == 2
    }
}

fn can_c(source: &[u8], position: usize, check_fnc1: bool) -> bool {
    (position + 1 < source.len() && source[position].is_ascii_digit() && source[position + 1].is_ascii_digit())
        || (check_fnc1 && source[position] == 0x1D)
}

/// `costs[position][charset]` / `modes[position][charset]`, flattened memo
/// tables matching the original's `(int (*)[4])`/`(char (*)[4])` VLAs.
struct Memo {
    costs: Vec<[i32; 4]>,
    modes: Vec<[i8; 4]>,
}

#[allow(clippy::too_many_arguments)]
fn cost(
    source: &[u8],
    position: usize,
    charset: u8,
    ab_only: bool,
    manual_set: Option<&ManualSet>,
    fncs: Option<&Fncs>,
    memo: &mut Memo,
) -> i32 {
    let length = source.len();
    if memo.costs[position][charset as usize] != 0 {
        return memo.costs[position][charset as usize];
    }

    let at_end = position + 1 >= length;
    let check_fnc1 = fncs.map_or(true, |f| f[position]);
    let can_c_here = can_c(source, position, check_fnc1);
    let manual_c_fail = !can_c_here && manual_set.is_some_and(|m| m[position] == 3);

    let mut min_cost = i32::MAX;
    let mut min_latch: i8 = 0;

    // Try code set C first.
    if !ab_only
        && can_c_here
        && manual_set.is_none_or(|m| m[position] == 0 || m[position] == 3)
    {
        let advance = if source[position] == 0x1D { 1 } else { 2 };
        let mut c = 1;
        let mut latch = 0;
        if charset != 3 {
            c += 1;
            latch = 3;
        }
        if position + advance < length {
            c += cost(source, position + advance, 3, ab_only, manual_set, fncs, memo);
        }
        if c < min_cost {
            min_cost = c;
            min_latch = latch;
        }
    }

    // Then code sets B and A, B preferred over A on ties.
    for tryset in [2u8, 1u8] {
        if let Some(m) = manual_set {
            if m[position] != 0 && m[position] != tryset && !manual_c_fail {
                continue;
            }
        }
        if can_aorb(source[position], tryset, check_fnc1) {
            let mut c = 1;
            let mut latch = 0;
            if charset != tryset {
                c += 1;
                latch = tryset as i8;
            }
            if !at_end {
                c += cost(source, position + 1, tryset, ab_only, manual_set, fncs, memo);
            }
            if c < min_cost {
                min_cost = c;
                min_latch = latch;
            }
            if charset != tryset && (charset == 1 || charset == 2) {
                let mut c2 = 2;
                let latch2 = 3 + charset as i8;
                if !at_end {
                    c2 += cost(source, position + 1, charset, ab_only, manual_set, fncs, memo);
                }
                if c2 < min_cost {
                    min_cost = c2;
                    min_latch = latch2;
                }
            }
        } else if manual_set.is_some_and(|m| m[position] == tryset) {
            let mut c = 2;
            let latch = 3 + tryset as i8;
            if charset != tryset {
                c += 1;
            }
            if !at_end {
                c += cost(source, position + 1, tryset, ab_only, manual_set, fncs, memo);
            }
            if c < min_cost {
                min_cost = c;
                min_latch = latch;
            }
        }
    }

    debug_assert!(min_cost != i32::MAX);
    memo.costs[position][charset as usize] = min_cost;
    memo.modes[position][charset as usize] = min_latch;
    min_cost
}

/// Per-position code-set tag, spec.md §3: `A`/`B`/`C` for a latch, `a`/`b`
/// for a single-character shift into A/B while the enclosing latch stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetTag {
    A,
    B,
    C,
    ShiftA,
    ShiftB,
}

/// Runs the planner over `source`, returning one [`SetTag`] per input byte
/// (two-byte runs in Set C share the same tag on their first byte; callers
/// must still advance two bytes when they see `SetTag::C` on a digit pair,
/// exactly as `c128_define_mode`'s `set[++i] = 'C'` companion write does).
pub fn define_mode(
    source: &[u8],
    ab_only: bool,
    manual_set: Option<&ManualSet>,
    fncs: Option<&Fncs>,
) -> Vec<SetTag> {
    let length = source.len();
    let mut memo = Memo {
        costs: vec![[0; 4]; length],
        modes: vec![[0; 4]; length],
    };
    cost(source, 0, 0, ab_only, manual_set, fncs, &mut memo);

    let mut set = vec![SetTag::A; length];
    let mut charset: u8 = 0;
    let mut i = 0;
    while i < length {
        let latch = memo.modes[i][charset as usize];
        if (1..=3).contains(&latch) {
            charset = latch as u8;
            set[i] = tag_for(charset);
        } else if (4..=5).contains(&latch) {
            let shift_charset = (latch - 3) as u8;
            set[i] = if shift_charset == 1 { SetTag::ShiftB } else { SetTag::ShiftA };
        } else {
            debug_assert!(charset != 0);
            set[i] = tag_for(charset);
        }
        if charset == 3 && source[i] != 0x1D {
            debug_assert!(i + 1 < length);
            set[i + 1] = SetTag::C;
            i += 1;
        }
        i += 1;
    }
    set
}

fn tag_for(charset: u8) -> SetTag {
    match charset {
        1 => SetTag::A,
        2 => SetTag::B,
        3 => SetTag::C,
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_digits_latches_set_c() {
        let set = define_mode(b"123456", false, None, None);
        assert!(set.iter().all(|t| matches!(t, SetTag::C)));
    }

    #[test]
    fn control_chars_force_set_a() {
        let set = define_mode(&[0x01, 0x02], false, None, None);
        assert!(matches!(set[0], SetTag::A));
    }

    #[test]
    fn printable_ascii_uses_set_b() {
        let set = define_mode(b"AIM", false, None, None);
        assert!(matches!(set[0], SetTag::B));
        assert!(matches!(set[1], SetTag::B));
        assert!(matches!(set[2], SetTag::B));
    }
}

//! The pipeline's working object.
//!
//! `original_source/backend/library.c` passes a single `struct zint_symbol *`
//! by pointer through every stage; the original's `errtxt[100]` embedded
//! buffer, `encoded_data` fixed 2-D array, and manual `delete`/`reset`/`clear`
//! lifecycle are re-architected here as an owned, mutable aggregate per the
//! design notes: no cyclic references exist between the symbol and its
//! sub-buffers, so ownership can simply be `Vec`/`String` fields with no raw
//! pointers, and `delete` becomes implicit `Drop`.

use crate::error::Warning;
use crate::symbology::Symbology;

/// `(ECI, bytes, length)` as spec.md §3 describes it; `length` is implicit in
/// `Vec::len` so we don't carry it as a separate field (the original needs it
/// because `data` may not be NUL-safe; a `Vec<u8>` already knows its length).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub eci: u32,
    pub data: Vec<u8>,
}

impl Segment {
    pub fn new(eci: u32, data: impl Into<Vec<u8>>) -> Self {
        Segment { eci, data: data.into() }
    }
}

bitflags::bitflags! {
    /// Input mode bit flags, spec.md §6.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InputMode: u32 {
        const DATA_MODE = 0;
        const UNICODE_MODE = 1 << 0;
        const GS1_MODE = 1 << 1;
        const ESCAPE_MODE = 1 << 2;
        const EXTRA_ESCAPE_MODE = 1 << 3;
        const GS1PARENS_MODE = 1 << 4;
        const GS1NOCHECK_MODE = 1 << 5;
        const HEIGHTPERROW_MODE = 1 << 6;
    }
}

bitflags::bitflags! {
    /// Output option bit flags, spec.md §6 (subset relevant to the
    /// implemented cores and the BMP serializer).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OutputOptions: u32 {
        const BARCODE_BIND = 1 << 0;
        const BARCODE_BIND_TOP = 1 << 1;
        const BARCODE_BOX = 1 << 2;
        const READER_INIT = 1 << 3;
        const BARCODE_QUIET_ZONES = 1 << 4;
        const BARCODE_NO_QUIET_ZONES = 1 << 5;
        const COMPLIANT_HEIGHT = 1 << 6;
        const GS1PARENS_HRT = 1 << 7;
    }
}

/// Warning/error severity, spec.md §7: `0` success, positive = warning,
/// `>= ERROR_THRESHOLD` = error. Kept as a plain return enum instead of the
/// original's bare int so callers can't forget to check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOutcome {
    Success,
    Warnings(Vec<Warning>),
}

/// The pipeline's mutable working object, grouped per spec.md §3's table.
#[derive(Debug, Clone)]
pub struct Symbol {
    // -- Selection --
    pub symbology: Symbology,
    pub input_mode: InputMode,
    pub eci: u32,
    pub option_1: i32,
    pub option_2: i32,
    pub option_3: i32,

    // -- Appearance --
    pub scale: f32,
    pub dot_size: f32,
    pub fgcolour: [u8; 3],
    pub bgcolour: [u8; 3],
    pub output_options: OutputOptions,
    pub border_width: i32,
    pub whitespace_width: i32,
    pub whitespace_height: i32,
    pub guard_descent: f32,
    pub text_gap: f32,
    pub show_hrt: bool,
    pub height: f32,

    // -- Output (filled by encoder/serializer) --
    pub rows: usize,
    pub width: usize,
    /// Row-major module bitmap: `encoded_data[row][col]` is `true` for a
    /// filled (dark) module. Bounded by `rows`/`width` as spec.md's invariant
    /// requires; unlike the original's fixed-capacity array this grows with
    /// `push`, but callers should treat `rows`/`width` as authoritative.
    pub encoded_data: Vec<Vec<bool>>,
    pub row_height: Vec<f32>,
    pub text: String,
    pub errtxt: Option<String>,

    // -- Linkage --
    pub primary: String,
    pub content_segs: Vec<Segment>,
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::create()
    }
}

impl Symbol {
    /// `create()` — allocate a zeroed symbol with the documented defaults
    /// (spec.md §6): symbology CODE128, scale 1, fg black / bg white,
    /// dot_size 0.8, text_gap 1.0, guard_descent 5.0.
    pub fn create() -> Self {
        Symbol {
            symbology: Symbology::Code128,
            input_mode: InputMode::DATA_MODE,
            eci: 0,
            option_1: -1,
            option_2: 0,
            option_3: 0,
            scale: 1.0,
            dot_size: 0.8,
            fgcolour: [0, 0, 0],
            bgcolour: [0xFF, 0xFF, 0xFF],
            output_options: OutputOptions::empty(),
            border_width: 0,
            whitespace_width: 0,
            whitespace_height: 0,
            guard_descent: 5.0,
            text_gap: 1.0,
            show_hrt: true,
            height: 0.0,
            rows: 0,
            width: 0,
            encoded_data: Vec::new(),
            row_height: Vec::new(),
            text: String::new(),
            errtxt: None,
            primary: String::new(),
            content_segs: Vec::new(),
        }
    }

    /// `clear(symbol)` — zero output fields but preserve configuration
    /// (selection + appearance), matching the lifecycle note in spec.md §3.
    pub fn clear(&mut self) {
        self.rows = 0;
        self.width = 0;
        self.encoded_data.clear();
        self.row_height.clear();
        self.text.clear();
        self.errtxt = None;
        self.primary.clear();
        self.content_segs.clear();
    }

    /// `reset(symbol)` — restore every field, selection included, to the
    /// `create()` defaults.
    pub fn reset(&mut self) {
        *self = Symbol::create();
    }

    /// Returns a reference to the module at `(row, col)`, or `false` if out
    /// of bounds (mirrors the original's `module_is_set` tolerating reads
    /// past a partially-built row during stacked-layout construction).
    pub fn module_is_set(&self, row: usize, col: usize) -> bool {
        self.encoded_data
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn set_module(&mut self, row: usize, col: usize) {
        self.ensure_row(row, col);
        self.encoded_data[row][col] = true;
    }

    pub fn unset_module(&mut self, row: usize, col: usize) {
        self.ensure_row(row, col);
        self.encoded_data[row][col] = false;
    }

    fn ensure_row(&mut self, row: usize, col: usize) {
        while self.encoded_data.len() <= row {
            self.encoded_data.push(Vec::new());
        }
        let r = &mut self.encoded_data[row];
        if r.len() <= col {
            r.resize(col + 1, false);
        }
        if self.width <= col {
            self.width = col + 1;
        }
        if self.rows <= row {
            self.rows = row + 1;
        }
    }

    /// Appends one row of modules built from a run-length bar/space pattern
    /// (alternating filled/unfilled, starting filled), the representation
    /// the Code-128 encoder emits into before geometry finalization. Returns
    /// the row's module width.
    pub fn push_row_from_widths(&mut self, widths: &[u8]) -> usize {
        self.push_row_from_widths_starting(widths, true)
    }

    /// Same as [`Self::push_row_from_widths`] but with an explicit starting
    /// fill state. DataBar Expanded's element arrays are conventionally
    /// space-first (`rss_expand`'s `latch` starts at 0), unlike Code-128's
    /// bar-first codeword widths.
    pub fn push_row_from_widths_starting(&mut self, widths: &[u8], start_filled: bool) -> usize {
        let mut row = Vec::new();
        let mut filled = start_filled;
        for &w in widths {
            for _ in 0..w {
                row.push(filled);
            }
            filled = !filled;
        }
        let width = row.len();
        self.width = self.width.max(width);
        self.encoded_data.push(row);
        self.rows = self.encoded_data.len();
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_has_documented_defaults() {
        let s = Symbol::create();
        assert_eq!(s.symbology, Symbology::Code128);
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.dot_size, 0.8);
        assert_eq!(s.text_gap, 1.0);
        assert_eq!(s.guard_descent, 5.0);
        assert_eq!(s.fgcolour, [0, 0, 0]);
        assert_eq!(s.bgcolour, [0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn clear_preserves_configuration() {
        let mut s = Symbol::create();
        s.symbology = Symbology::Gs1_128;
        s.scale = 2.0;
        s.text = "hello".into();
        s.push_row_from_widths(&[2, 1, 1]);
        s.clear();
        assert_eq!(s.symbology, Symbology::Gs1_128);
        assert_eq!(s.scale, 2.0);
        assert!(s.text.is_empty());
        assert_eq!(s.rows, 0);
    }

    #[test]
    fn push_row_from_widths_alternates_fill() {
        let mut s = Symbol::create();
        s.push_row_from_widths(&[2, 1, 3]);
        assert_eq!(
            s.encoded_data[0],
            vec![true, true, false, true, true, true]
        );
    }
}

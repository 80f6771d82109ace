//! Output serializers, spec.md §4.5/§6. Only BMP is implemented; every other
//! format name is accepted by the CLI but rejected with
//! `ZintError::EncodingProblem` rather than silently producing nothing.

pub mod bmp;

use crate::error::ZintError;
use crate::symbol::Symbol;

/// A serializer turns a fully-encoded [`Symbol`] into bytes for one output
/// format. Modeled on `original_source/backend/output.c`'s per-format
/// `*_pixel_plot` functions, which all share this same shape (render to an
/// internal pixel buffer, then hand it to the format-specific writer).
pub trait Serializer {
    fn serialize(&self, symbol: &Symbol) -> Result<Vec<u8>, ZintError>;
}

/// Renders `symbol`'s module matrix (plus geometry-finalized quiet zones) to
/// a flat one-byte-per-pixel buffer, `0` for background and `1` for
/// foreground, at `symbol.scale` magnification. Shared by every serializer
/// that needs a pixel grid rather than the raw module booleans.
pub fn rasterize(symbol: &Symbol) -> (Vec<u8>, usize, usize) {
    let scale = symbol.scale.max(1.0).round() as usize;
    let width = symbol.width * scale;
    let height = symbol.rows.max(1) * scale;
    let mut pixels = vec![0u8; width * height];

    for (row_idx, row) in symbol.encoded_data.iter().enumerate() {
        for (col_idx, &set) in row.iter().enumerate() {
            if !set {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let y = row_idx * scale + dy;
                    let x = col_idx * scale + dx;
                    if x < width && y < height {
                        pixels[y * width + x] = 1;
                    }
                }
            }
        }
    }
    (pixels, width, height)
}

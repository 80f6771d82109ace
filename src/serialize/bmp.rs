//! Windows Bitmap writer, grounded in `original_source/backend/bmp.c`'s
//! `bmp_pixel_plot`. Monochrome only (1 bit/pixel, 2-colour table); the
//! original's additional 4-bit-per-pixel ULTRA palette path has no
//! counterpart symbology in this crate and is not carried over.

use super::{rasterize, Serializer};
use crate::error::ZintError;
use crate::symbol::Symbol;

const FILE_HEADER_LEN: u32 = 14;
const INFO_HEADER_LEN: u32 = 40;
const COLOUR_TABLE_LEN: u32 = 2 * 4; // 2 colours, 4 bytes (BGRA) each

pub struct BmpSerializer;

impl Serializer for BmpSerializer {
    fn serialize(&self, symbol: &Symbol) -> Result<Vec<u8>, ZintError> {
        let (pixels, width, height) = rasterize(symbol);
        if width == 0 || height == 0 {
            return Err(ZintError::EncodingProblem { id: 602, message: "Symbol has no encoded modules".to_string() });
        }

        log::debug!("rasterizing {}x{} module symbol to BMP", width, height);
        let row_size = 4 * ((width as u32 + 31) / 32);
        let data_size = height as u32 * row_size;
        let data_offset = FILE_HEADER_LEN + INFO_HEADER_LEN + COLOUR_TABLE_LEN;
        let file_size = data_offset + data_size;

        let mut out = Vec::with_capacity(file_size as usize);

        // Bitmap file header.
        out.extend_from_slice(&0x4D42u16.to_le_bytes()); // "BM"
        out.extend_from_slice(&file_size.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // reserved
        out.extend_from_slice(&data_offset.to_le_bytes());

        // BITMAPINFOHEADER.
        out.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
        out.extend_from_slice(&(width as i32).to_le_bytes());
        out.extend_from_slice(&(height as i32).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // colour planes
        out.extend_from_slice(&1u16.to_le_bytes()); // bits per pixel
        out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
        out.extend_from_slice(&0u32.to_le_bytes()); // image size (unspecified for BI_RGB)
        out.extend_from_slice(&0i32.to_le_bytes()); // horizontal resolution
        out.extend_from_slice(&0i32.to_le_bytes()); // vertical resolution
        out.extend_from_slice(&2u32.to_le_bytes()); // colours used
        out.extend_from_slice(&2u32.to_le_bytes()); // important colours

        // Colour table: background first, then foreground, each BGR + reserved.
        let [br, bg, bb] = symbol.bgcolour;
        out.extend_from_slice(&[bb, bg, br, 0]);
        let [fr, fg, fb] = symbol.fgcolour;
        out.extend_from_slice(&[fb, fg, fr, 0]);

        // Pixel rows, bottom-up, each padded to a multiple of 4 bytes.
        for row in (0..height).rev() {
            let mut packed = vec![0u8; row_size as usize];
            for col in 0..width {
                if pixels[row * width + col] != 0 {
                    packed[col / 8] |= 0x80 >> (col % 8);
                }
            }
            out.extend_from_slice(&packed);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    #[test]
    fn writes_well_formed_header() {
        let mut symbol = Symbol::create();
        symbol.push_row_from_widths(&[2, 1, 2]);
        let bytes = BmpSerializer.serialize(&symbol).unwrap();
        assert_eq!(&bytes[0..2], b"BM");
        let file_size = u32::from_le_bytes(bytes[2..6].try_into().unwrap());
        assert_eq!(file_size as usize, bytes.len());
    }

    #[test]
    fn rejects_empty_symbol() {
        let symbol = Symbol::create();
        assert!(BmpSerializer.serialize(&symbol).is_err());
    }
}

//! Symbology catalogue and metadata queries.
//!
//! `original_source/backend/library.c` dispatches over ~190 concrete symbology
//! ids via a pair of function-pointer tables (`barcode_src_funcs`,
//! `barcode_seg_funcs`) indexed by id. We collapse that to a single enum and
//! match arms, per the re-architecture note in spec.md's design section: one
//! dispatch table keyed by a Rust enum rather than parallel C tables.

/// Bit flags a symbology may declare support for, queried via [`Symbology::cap`].
pub mod cap {
    pub const ECI: u32 = 1 << 0;
    pub const GS1: u32 = 1 << 1;
    pub const STACKABLE: u32 = 1 << 2;
    pub const COMPOSITE: u32 = 1 << 3;
    pub const EXTENDABLE: u32 = 1 << 4;
}

/// The two fully-specified cores plus a representative set of sibling
/// symbologies, enumerated so metadata queries (`valid_id`, `barcode_name`,
/// `cap`) have real cases to answer over even though only the Code-128 family
/// and DataBar Expanded are implemented past the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    Code128,
    Code128Ab,
    Gs1_128,
    Ean14,
    Nve18,
    Dpd,
    UpuS10,
    Hibc128,
    DbarExp,
    DbarExpStk,
    // Siblings: catalogued, not encoded (see `Symbol::encode`).
    Code39,
    Code93,
    Ean13,
    UpcA,
    Itf14,
    Qr,
    DataMatrix,
    Pdf417,
    Codabar,
    Msi,
}

impl Symbology {
    /// Every catalogued symbology, for metadata listings (`zint-cli
    /// list-symbologies`); order matches the enum declaration.
    pub fn all() -> &'static [Symbology] {
        use Symbology::*;
        &[
            Code128, Code128Ab, Gs1_128, Ean14, Nve18, Dpd, UpuS10, Hibc128, DbarExp, DbarExpStk,
            Code39, Code93, Ean13, UpcA, Itf14, Qr, DataMatrix, Pdf417, Codabar, Msi,
        ]
    }

    /// Whether `id` names a symbology this crate knows about at all (the
    /// dispatcher's "validate symbology id" step).
    pub fn valid_id(id: &str) -> bool {
        Self::from_name(id).is_some()
    }

    pub fn from_name(id: &str) -> Option<Self> {
        use Symbology::*;
        Some(match id {
            "code128" => Code128,
            "code128ab" => Code128Ab,
            "gs1-128" | "gs1_128" | "ean-128" => Gs1_128,
            "ean14" => Ean14,
            "nve18" => Nve18,
            "dpd" => Dpd,
            "upu-s10" | "upu_s10" => UpuS10,
            "hibc-128" | "hibc128" => Hibc128,
            "dbar-exp" | "databar-expanded" => DbarExp,
            "dbar-exp-stk" | "databar-expanded-stacked" => DbarExpStk,
            "code39" => Code39,
            "code93" => Code93,
            "ean13" => Ean13,
            "upca" => UpcA,
            "itf14" => Itf14,
            "qr" => Qr,
            "datamatrix" => DataMatrix,
            "pdf417" => Pdf417,
            "codabar" => Codabar,
            "msi" => Msi,
            _ => return None,
        })
    }

    /// Legacy ids this crate no longer accepts directly are mapped onto a
    /// canonical id with a warning, per the dispatcher's step 2. Only the two
    /// examples called out in spec.md §4.1 are modeled; everything else maps
    /// to itself.
    pub fn normalize_legacy(id: &str) -> (Option<Self>, bool) {
        match id {
            "legacy10" => (Some(Symbology::Ean13), true),
            "legacy19" | "legacy27" => (None, false), // rejected outright, no safe mapping
            other => (Self::from_name(other), false),
        }
    }

    /// The canonical `--symbology` flag value for this variant (the first
    /// alias `from_name` accepts for it).
    pub fn slug(self) -> &'static str {
        use Symbology::*;
        match self {
            Code128 => "code128",
            Code128Ab => "code128ab",
            Gs1_128 => "gs1-128",
            Ean14 => "ean14",
            Nve18 => "nve18",
            Dpd => "dpd",
            UpuS10 => "upu-s10",
            Hibc128 => "hibc-128",
            DbarExp => "dbar-exp",
            DbarExpStk => "dbar-exp-stk",
            Code39 => "code39",
            Code93 => "code93",
            Ean13 => "ean13",
            UpcA => "upca",
            Itf14 => "itf14",
            Qr => "qr",
            DataMatrix => "datamatrix",
            Pdf417 => "pdf417",
            Codabar => "codabar",
            Msi => "msi",
        }
    }

    pub fn barcode_name(self) -> &'static str {
        use Symbology::*;
        match self {
            Code128 => "Code 128",
            Code128Ab => "Code 128 (Sets A/B only)",
            Gs1_128 => "GS1-128",
            Ean14 => "EAN-14",
            Nve18 => "NVE-18",
            Dpd => "DPD",
            UpuS10 => "UPU S10",
            Hibc128 => "HIBC Code 128",
            DbarExp => "GS1 DataBar Expanded",
            DbarExpStk => "GS1 DataBar Expanded Stacked",
            Code39 => "Code 39",
            Code93 => "Code 93",
            Ean13 => "EAN-13",
            UpcA => "UPC-A",
            Itf14 => "ITF-14",
            Qr => "QR Code",
            DataMatrix => "Data Matrix",
            Pdf417 => "PDF417",
            Codabar => "Codabar",
            Msi => "MSI Plessey",
        }
    }

    pub fn cap(self, flag_mask: u32) -> bool {
        use Symbology::*;
        let flags = match self {
            Code128 => cap::ECI,
            Code128Ab => cap::ECI,
            Gs1_128 => cap::GS1 | cap::COMPOSITE,
            Ean14 | Nve18 => cap::GS1,
            Dpd | UpuS10 | Hibc128 => 0,
            DbarExp => cap::GS1 | cap::COMPOSITE,
            DbarExpStk => cap::GS1 | cap::COMPOSITE | cap::STACKABLE,
            Code39 | Code93 | Codabar | Msi | Itf14 => 0,
            Ean13 | UpcA => cap::COMPOSITE,
            Qr | DataMatrix | Pdf417 => cap::ECI | cap::GS1,
        };
        flags & flag_mask == flag_mask
    }

    /// Default X-dimension in millimetres, as `original_source/backend/library.c`'s
    /// per-symbology defaults table specifies for the two cores; siblings return
    /// the library-wide default of 0.330mm (ISO default 1 module = 0.33mm).
    pub fn default_xdim(self) -> f32 {
        use Symbology::*;
        match self {
            Dpd => 0.4,
            UpuS10 => 0.51,
            Gs1_128 | Ean14 | Nve18 => 0.495,
            DbarExp | DbarExpStk => 0.264,
            _ => 0.330,
        }
    }

    pub fn is_code128_family(self) -> bool {
        matches!(
            self,
            Symbology::Code128
                | Symbology::Code128Ab
                | Symbology::Gs1_128
                | Symbology::Ean14
                | Symbology::Nve18
                | Symbology::Dpd
                | Symbology::UpuS10
                | Symbology::Hibc128
        )
    }

    pub fn is_dbar_expanded(self) -> bool {
        matches!(self, Symbology::DbarExp | Symbology::DbarExpStk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_id_accepts_known_names() {
        assert!(Symbology::valid_id("code128"));
        assert!(Symbology::valid_id("gs1-128"));
        assert!(!Symbology::valid_id("not-a-symbology"));
    }

    #[test]
    fn legacy_mapping_warns() {
        let (mapped, warned) = Symbology::normalize_legacy("legacy10");
        assert_eq!(mapped, Some(Symbology::Ean13));
        assert!(warned);
    }

    #[test]
    fn legacy_rejected_ids_have_no_mapping() {
        let (mapped, _) = Symbology::normalize_legacy("legacy19");
        assert_eq!(mapped, None);
    }

    #[test]
    fn cap_queries_gs1_capability() {
        assert!(Symbology::Gs1_128.cap(cap::GS1));
        assert!(!Symbology::Code128.cap(cap::GS1));
    }
}

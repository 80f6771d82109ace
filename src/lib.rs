//! # zint - barcode encoding library
//!
//! `zint` turns data plus a symbology choice into a module matrix ready for
//! rasterization. The pipeline is always the same five stages (spec.md §4):
//! dispatcher → escape processor → charset/ECI normalizer → GS1 verifier →
//! symbology encoder → geometry finalizer, with serialization to a concrete
//! output format as a separate last step.
//!
//! Two symbology families are implemented end to end:
//!
//! - **Code-128 and its derivatives** ([`code128`]): plain Code-128, GS1-128,
//!   EAN-14, NVE-18, DPD, UPU S10, and HIBC-128, all built on the same
//!   divide-and-conquer code-set planner.
//! - **GS1 DataBar Expanded / Expanded Stacked** ([`dbar_exp`]): the 14-method
//!   AI selection cascade, general-purpose field encoder, and combinatorial
//!   bar-width expansion.
//!
//! Everything else in [`symbology::Symbology`] is cataloged (name, default
//! X-dimension, capability flags) but [`dispatch::encode`] rejects it with
//! `ZintError::EncodingProblem` rather than silently producing a blank
//! symbol.
//!
//! ## Quick start
//!
//! ```no_run
//! use zint::symbol::Symbol;
//! use zint::dispatch;
//!
//! let mut symbol = Symbol::create();
//! dispatch::encode(&mut symbol, b"AIM128")?;
//! # Ok::<(), zint::error::ZintError>(())
//! ```
//!
//! ## Module overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`symbol`] | The pipeline's working object and its lifecycle |
//! | [`symbology`] | The symbology catalogue and capability flags |
//! | [`dispatch`] | The single entry point tying every stage together |
//! | [`escape`] | `ESCAPE_MODE` backslash-sequence expansion |
//! | [`eci`] | ECI charset utilities |
//! | [`gs1`] | GS1 AI verification and reduction |
//! | [`code128`] | Code-128 core and its derived symbologies |
//! | [`dbar_exp`] | GS1 DataBar Expanded / Expanded Stacked core |
//! | [`geometry`] | Quiet zones, whitespace offsets, large-bar height |
//! | [`serialize`] | Output serializers (BMP) |
//! | [`error`] | Warning/error types with numeric ids |

pub mod code128;
pub mod dbar_exp;
pub mod dispatch;
pub mod eci;
pub mod error;
pub mod escape;
pub mod geometry;
pub mod gs1;
pub mod serialize;
pub mod symbol;
pub mod symbology;

pub use error::{Warning, ZintError};
pub use symbol::{EncodeOutcome, Symbol};
pub use symbology::Symbology;

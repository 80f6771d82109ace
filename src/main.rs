//! # zint-cli
//!
//! Thin command-line front-end over the `zint` library. Carries no encoding
//! logic of its own: it parses flags into a [`zint::Symbol`], calls
//! [`zint::dispatch::encode`], and hands the result to a
//! [`zint::serialize::Serializer`].
//!
//! ## Usage
//!
//! ```bash
//! zint-cli encode --symbology code128 --mode unicode --out out.bmp "AIM"
//! zint-cli encode --symbology gs1-128 --mode gs1 --out out.bmp "[01]09501101530003"
//! zint-cli list-symbologies
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use zint::error::ZintError;
use zint::serialize::bmp::BmpSerializer;
use zint::serialize::Serializer;
use zint::symbol::{EncodeOutcome, InputMode, Symbol};
use zint::symbology::Symbology;
use zint::{dispatch, geometry};

/// zint - barcode encoding utility
#[derive(Parser, Debug)]
#[command(name = "zint-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode data into a barcode and write it as a BMP file
    Encode {
        /// Data to encode
        data: String,

        /// Symbology to use (see `list-symbologies`)
        #[arg(long, default_value = "code128")]
        symbology: String,

        /// Input mode: unicode, gs1, or data (raw bytes, no escaping)
        #[arg(long, default_value = "unicode")]
        mode: String,

        /// Output BMP file path
        #[arg(long, default_value = "out.bmp")]
        out: PathBuf,

        /// Symbol height in X-dimensions (0 = symbology default)
        #[arg(long, default_value_t = 0.0)]
        height: f32,

        /// Module scale factor
        #[arg(long, default_value_t = 1.0)]
        scale: f32,

        /// Whitespace width on left/right, in X-dimensions
        #[arg(long, default_value_t = 0)]
        whitespace: i32,
    },

    /// List every catalogued symbology
    ListSymbologies,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{}", e.display_with_severity());
        std::process::exit(1);
    }
}

fn run() -> Result<(), ZintError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { data, symbology, mode, out, height, scale, whitespace } => {
            encode_command(&data, &symbology, &mode, &out, height, scale, whitespace)
        }
        Commands::ListSymbologies => {
            for s in Symbology::all() {
                println!("{:<16} {}", s.slug(), s.barcode_name());
            }
            Ok(())
        }
    }
}

fn parse_symbology(name: &str) -> Result<Symbology, ZintError> {
    Symbology::from_name(name).ok_or_else(|| ZintError::InvalidOption { id: 203 })
}

fn parse_mode(name: &str) -> Result<InputMode, ZintError> {
    match name {
        "unicode" => Ok(InputMode::UNICODE_MODE),
        "gs1" => Ok(InputMode::UNICODE_MODE | InputMode::GS1_MODE),
        "data" => Ok(InputMode::DATA_MODE),
        _ => Err(ZintError::InvalidOption { id: 204 }),
    }
}

#[allow(clippy::too_many_arguments)]
fn encode_command(
    data: &str,
    symbology: &str,
    mode: &str,
    out: &PathBuf,
    height: f32,
    scale: f32,
    whitespace: i32,
) -> Result<(), ZintError> {
    let mut symbol = Symbol::create();
    symbol.symbology = parse_symbology(symbology)?;
    symbol.input_mode = parse_mode(mode)?;
    symbol.height = height;
    symbol.scale = scale;
    symbol.whitespace_width = whitespace;

    log::debug!("encoding {} bytes as {}", data.len(), symbol.symbology.barcode_name());

    match dispatch::encode(&mut symbol, data.as_bytes())? {
        EncodeOutcome::Success => {}
        EncodeOutcome::Warnings(warnings) => {
            for w in &warnings {
                log::warn!("{}", w.display_with_severity());
                eprintln!("{}", w.display_with_severity());
            }
        }
    }

    geometry::distribute_large_bar_height(&mut symbol);

    let bytes = BmpSerializer.serialize(&symbol)?;
    std::fs::write(out, &bytes).map_err(|_| ZintError::FileWrite {
        id: 690,
        path: out.display().to_string(),
    })?;

    println!("Wrote {} ({}x{} modules) to {}", symbol.symbology.barcode_name(), symbol.width, symbol.rows, out.display());
    if !symbol.text.is_empty() {
        println!("HRT: {}", symbol.text);
    }
    Ok(())
}

//! CLI tool to resolve a signature reading from the command line.
//! Usage: cargo run --features cli --bin resolve_text -- "74,400" [catalogue.json]

use std::path::PathBuf;
use std::process;

use sigscan::{Catalogue, ScanConfig, SignatureScanner};

fn main() {
    // Debug-level tracing so repair attempts show up
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <ocr text> [catalogue.json]", args[0]);
        process::exit(1);
    }

    let catalogue = if args.len() >= 3 {
        let path = PathBuf::from(&args[2]);
        match Catalogue::from_path(&path) {
            Ok(catalogue) => catalogue,
            Err(e) => {
                eprintln!("Failed to load catalogue: {e:#}");
                process::exit(1);
            }
        }
    } else {
        Catalogue::builtin()
    };

    let scanner = SignatureScanner::new(catalogue, ScanConfig::default())
        .expect("default scan config is valid");

    let matches = scanner.resolve_signature(&args[1]);
    if matches.is_empty() {
        println!("No signature recognized.");
        return;
    }

    println!("{} match(es):", matches.len());
    for (i, m) in matches.iter().enumerate() {
        let corrected = if m.was_corrected { " [corrected]" } else { "" };
        println!(
            "  {}. {} — signature {} ({} x {}), {}{}",
            i + 1,
            m.label,
            m.signature,
            m.count,
            m.base_value,
            m.method.label(),
            corrected
        );
        if !m.minerals.is_empty() {
            println!("     possible minerals: {}", m.minerals.join(", "));
        }
    }
}

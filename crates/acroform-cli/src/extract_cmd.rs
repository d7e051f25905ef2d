use std::io::Read;

use acroform::extract_fields;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use crate::cli::ExtractArgs;
use crate::shared::{print_error_json, read_file};

/// Exit code for unusable input (bad base64, missing file).
pub const EXIT_INPUT: i32 = 2;
/// Exit code for input that is not an openable PDF.
pub const EXIT_PDF: i32 = 1;

pub fn run(args: &ExtractArgs) -> Result<(), i32> {
    let bytes = read_input(args).map_err(|message| {
        print_error_json(&message);
        EXIT_INPUT
    })?;

    let result = extract_fields(&bytes, None).map_err(|e| {
        print_error_json(&format!("failed to open PDF: {e}"));
        EXIT_PDF
    })?;
    for warning in &result.warnings {
        info!(%warning, "skipped annotation");
    }

    let json = serde_json::to_string(&result.value).map_err(|e| {
        print_error_json(&format!("failed to serialize fields: {e}"));
        EXIT_PDF
    })?;
    println!("{json}");
    Ok(())
}

fn read_input(args: &ExtractArgs) -> Result<Vec<u8>, String> {
    match (&args.file, args.stdin) {
        (_, true) => read_stdin_base64(),
        (Some(file), false) => read_file(file),
        (None, false) => Err("no input: pass FILE or --stdin".to_string()),
    }
}

/// Read all of stdin as base64, ignoring surrounding whitespace.
fn read_stdin_base64() -> Result<Vec<u8>, String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    decode_base64(&text)
}

fn decode_base64(text: &str) -> Result<Vec<u8>, String> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| format!("invalid base64 input: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_ignores_surrounding_whitespace() {
        assert_eq!(decode_base64("  JVBERg==\n").unwrap(), b"%PDF".to_vec());
    }

    #[test]
    fn base64_rejects_garbage() {
        let err = decode_base64("not base64!").unwrap_err();
        assert!(err.starts_with("invalid base64 input"));
    }
}

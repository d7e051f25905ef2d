use std::path::Path;

/// Print `{"error": message}` on stderr.
pub fn print_error_json(message: &str) {
    eprintln!("{}", serde_json::json!({ "error": message }));
}

/// Read a whole input file, naming the path in the error.
pub fn read_file(path: &Path) -> Result<Vec<u8>, String> {
    if !path.exists() {
        return Err(format!("file not found: {}", path.display()));
    }
    std::fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String, String> {
    let bytes = read_file(path)?;
    String::from_utf8(bytes).map_err(|e| format!("{} is not UTF-8: {e}", path.display()))
}

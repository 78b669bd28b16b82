use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write text to stdout or a file, always ending with a single newline.
pub fn write_output(text: &str, output_path: Option<&str>) -> Result<()> {
    let body = format!("{}\n", text.trim_end());
    match output_path {
        Some(path) => std::fs::write(Path::new(path), body)
            .with_context(|| format!("Failed to write output file '{}'", path)),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(body.as_bytes())
                .context("Failed to write to stdout")
        }
    }
}

/// Serialize a value to pretty JSON.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

//! NDJSON output for `--json`.

use std::io::{self, Write};

/// Write one pre-serialized event line to stdout.
pub fn emit_line(line: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Emit a raw JSON value as one NDJSON line.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
    emit_line(&line)
}

//! Output helpers shared by commands.

use serde::Serialize;

use crate::OutputFormat;

/// Print a value as pretty JSON, unless quiet
pub fn print_json<T: Serialize>(value: &T, quiet: bool) {
    if quiet {
        return;
    }
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// Print one line, in the chosen format, unless quiet
pub fn print_line<T: Serialize>(value: &T, text: impl FnOnce() -> String, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Json => match serde_json::to_string(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize output: {}", e),
        },
        OutputFormat::Text => println!("{}", text()),
    }
}

//! Command-line front ends for AcroForm extraction, patching and
//! post-submit processing.
//!
//! Each binary under `src/bin` parses its arguments, installs logging and
//! hands off to the matching `*_cmd::run`, which reports failures on stderr
//! and returns the process exit code.

pub mod apply_cmd;
pub mod cli;
pub mod extract_cmd;
pub mod logging;
pub mod process_cmd;
mod shared;

//! Logging utilities with colored output.
//!
//! Standard output carries the generated layout, so every diagnostic line
//! produced here goes to stderr.
//!
//! # Example
//!
//! ```ignore
//! log!("scale"; "factors X={:.6}, Y={:.6}", sx, sy);
//! debug!("parse"; "{} elements", count);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// Apply color to a module prefix based on module type
///
/// Honors `--color` through the owo-colors override and stderr detection.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "error" => Style::new().bright_red().bold(),
        "warning" => Style::new().yellow().bold(),
        "dry-run" => Style::new().bright_blue().bold(),
        "batch" => Style::new().bright_green().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    prefix
        .if_supports_color(Stream::Stderr, |text| text.style(style))
        .to_string()
}

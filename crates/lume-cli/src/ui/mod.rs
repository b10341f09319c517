//! Terminal status output.
//!
//! Human-facing lines (`✓ Build completed in 120ms`) go to stderr through
//! these helpers; structured events go through `tracing`.
//!
//! ```no_run
//! use lume_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Build successful");
//! ui::error("Failed to parse file");
//! ```

mod format;
mod messages;

pub use format::{format_duration, format_size};
pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether stderr
/// is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Initialize color support; `no_color` comes from `--no-color`.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    owo_colors::set_override(enabled);
    console::set_colors_enabled_stderr(enabled);
}

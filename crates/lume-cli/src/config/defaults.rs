use std::path::PathBuf;

/// Fallback document title when neither config nor directory name provide one.
pub const DEFAULT_TITLE: &str = "lume app";

/// Directories never worth a rebuild.
pub const DEFAULT_WATCH_IGNORE: &[&str] = &["node_modules", "target"];

pub fn default_entry() -> PathBuf {
    PathBuf::from("src/main.jsx")
}

pub fn default_src_dir() -> PathBuf {
    PathBuf::from("src")
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn default_port() -> u16 {
    8080
}

pub fn default_debounce_ms() -> u64 {
    100
}

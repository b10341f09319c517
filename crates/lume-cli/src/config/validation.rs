use crate::config::LumeConfig;
use crate::error::{ConfigError, Result};

impl LumeConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.entry.as_os_str().is_empty() {
            return Err(invalid(
                "entry",
                "",
                "Point 'entry' at the application entry file, e.g. src/main.jsx",
            ));
        }

        if self.out_dir.as_os_str().is_empty() {
            return Err(invalid("outDir", "", "Output directory cannot be empty"));
        }

        // Syncing assets into the source directory would overwrite sources.
        if self.out_dir == self.src_dir {
            return Err(invalid(
                "outDir",
                &self.out_dir.to_string_lossy(),
                "outDir must differ from srcDir",
            ));
        }

        if self.port == 0 {
            return Err(invalid("port", "0", "Pick a port between 1 and 65535"));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: &str, hint: &str) -> crate::error::CliError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        hint: hint.to_string(),
    }
    .into()
}

use crate::config::LumeConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the project root.
pub const CONFIG_FILE: &str = "lume.config.json";

/// Keys accepted from `LUME_*` variables, as spelled in the config file.
const ENV_FIELDS: &[&str] = &[
    "entry",
    "srcDir",
    "outDir",
    "title",
    "esbuild",
    "port",
    "watchIgnore",
    "debounceMs",
];

/// Values given on the command line. `None` leaves lower sources alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl LumeConfig {
    /// Load and validate configuration for the project rooted at `cwd`.
    ///
    /// An explicit `config_path` must exist; the default `lume.config.json`
    /// is optional.
    pub fn load(
        cwd: &Path,
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let config: Self = Self::figment(cwd, config_path, overrides)?
            .extract()
            .map_err(ConfigError::from)?;
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn figment(
        cwd: &Path,
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        match config_path {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    cwd.join(path)
                };
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                figment = figment.merge(Json::file(path));
            }
            None => {
                let path = cwd.join(CONFIG_FILE);
                if path.is_file() {
                    figment = figment.merge(Json::file(path));
                }
            }
        }

        Ok(figment
            .merge(env_provider())
            .merge(Env::raw().only(&["PORT"]))
            .merge(Serialized::defaults(overrides)))
    }
}

/// `LUME_OUT_DIR` feeds `outDir`; unrelated `LUME_*` variables are skipped.
fn env_provider() -> Env {
    Env::prefixed("LUME_")
        .filter_map(|key| {
            let field = camel_case(key.as_str());
            ENV_FIELDS.contains(&field.as_str()).then(|| field.into())
        })
        .lowercase(false)
}

fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (idx, part) in key.split('_').filter(|p| !p.is_empty()).enumerate() {
        let part = part.to_ascii_lowercase();
        if idx == 0 {
            out.push_str(&part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

//! Shared utilities for command implementations.

use crate::cli::ProjectArgs;
use crate::config::LumeConfig;
use crate::error::{BuildError, CliError, Result};
use lume_bundler::{BuildPlan, EsbuildCompiler};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Project directory from `--cwd`, else the process working directory.
pub fn project_dir(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    let dir = match cwd {
        Some(path) => resolve_path(path, &current),
        None => current,
    };

    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir));
    }
    // Watcher events carry canonical paths.
    Ok(dir.canonicalize()?)
}

/// Resolve the project directory and load its configuration.
pub fn load_project(args: &ProjectArgs, port: Option<u16>) -> Result<(PathBuf, LumeConfig)> {
    let cwd = project_dir(args.cwd.as_deref())?;
    let config = LumeConfig::load(&cwd, args.config.as_deref(), &args.to_overrides(port))?;
    Ok((cwd, config))
}

/// Validate that an entry point file exists.
pub fn validate_entry(entry: &Path) -> Result<()> {
    if !entry.exists() {
        return Err(BuildError::EntryNotFound(entry.to_path_buf()).into());
    }

    if !entry.is_file() {
        return Err(CliError::InvalidArgument(format!(
            "Entry point is not a file: {}",
            entry.display()
        )));
    }

    Ok(())
}

/// esbuild driver for the configured project.
pub fn compiler_for(config: &LumeConfig, cwd: &Path) -> EsbuildCompiler {
    let mut plan = BuildPlan::new(cwd, &config.entry, &config.out_dir);
    if let Some(esbuild) = &config.esbuild {
        plan = plan.with_esbuild(esbuild);
    }
    EsbuildCompiler::new(plan)
}

/// Listen on every interface.
pub fn listen_addr(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/project");
        assert_eq!(
            resolve_path(Path::new("src/main.jsx"), cwd),
            PathBuf::from("/project/src/main.jsx")
        );
        assert_eq!(
            resolve_path(Path::new("/abs/main.jsx"), cwd),
            PathBuf::from("/abs/main.jsx")
        );
    }

    #[test]
    fn test_validate_entry() {
        let temp = TempDir::new().unwrap();
        let entry = temp.path().join("main.jsx");

        let err = validate_entry(&entry).unwrap_err();
        assert!(matches!(err, CliError::Build(BuildError::EntryNotFound(_))));

        std::fs::write(&entry, "export {}").unwrap();
        validate_entry(&entry).unwrap();

        let err = validate_entry(temp.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_project_dir_must_exist() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            project_dir(Some(temp.path())).unwrap(),
            temp.path().canonicalize().unwrap()
        );

        let missing = temp.path().join("missing");
        let err = project_dir(Some(&missing)).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_compiler_uses_configured_esbuild() {
        let config = LumeConfig {
            esbuild: Some(PathBuf::from("tools/esbuild")),
            ..LumeConfig::default()
        };
        let compiler = compiler_for(&config, Path::new("/project"));
        assert_eq!(compiler.executable(), PathBuf::from("/project/tools/esbuild"));
        assert_eq!(
            compiler.plan().artifact_path(),
            PathBuf::from("/project/dist/bundle.js")
        );
    }

    #[test]
    fn test_listen_addr() {
        assert_eq!(listen_addr(8080).to_string(), "0.0.0.0:8080");
    }
}

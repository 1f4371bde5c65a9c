use std::path::{Path, PathBuf};

use anyhow::Context;
use tiltscenes_web::StageConfig;

/// Config file looked up when `--config` is not given.
pub const CONFIG_FILE: &str = "tiltscenes.toml";

/// Where we are running from and which stage config applies.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// The tiltscenes workspace root (has tiltscenes-web/Cargo.toml), if
    /// we are inside one.
    pub workspace_root: Option<PathBuf>,
    /// The config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
    pub config: StageConfig,
}

impl ProjectContext {
    /// Directory `wasm-pack` must run in.
    pub fn web_crate(&self) -> anyhow::Result<PathBuf> {
        let root = self.workspace_root.as_ref().context(
            "Could not find the tiltscenes workspace.\n\
             Run `tscli build` from within the repository.",
        )?;
        Ok(root.join("tiltscenes-web"))
    }
}

pub fn detect_project_context(explicit_config: Option<&Path>) -> anyhow::Result<ProjectContext> {
    detect_project_context_from(&std::env::current_dir()?, explicit_config)
}

/// Resolve the context starting from `start`, walking up. An explicit
/// config path must exist; a discovered one is optional.
pub fn detect_project_context_from(start: &Path, explicit_config: Option<&Path>) -> anyhow::Result<ProjectContext> {
    let config_path = match explicit_config {
        Some(path) => Some(path.to_path_buf()),
        None => find_upward(start, |dir| {
            let candidate = dir.join(CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }),
    };
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => StageConfig::default(),
    };
    let workspace_root = find_upward(start, |dir| {
        (dir.join("Cargo.toml").is_file() && dir.join("tiltscenes-web").join("Cargo.toml").is_file())
            .then(|| dir.to_path_buf())
    });

    Ok(ProjectContext {
        workspace_root,
        config_path,
        config,
    })
}

pub fn load_config(path: &Path) -> anyhow::Result<StageConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    StageConfig::from_toml_str(&text).with_context(|| format!("loading {}", path.display()))
}

fn find_upward<T>(start: &Path, mut check: impl FnMut(&Path) -> Option<T>) -> Option<T> {
    let mut dir = start.to_path_buf();
    loop {
        if let Some(found) = check(&dir) {
            return Some(found);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_workspace_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[workspace]").unwrap();
        let web = dir.path().join("tiltscenes-web");
        std::fs::create_dir(&web).unwrap();
        std::fs::write(web.join("Cargo.toml"), "[package]").unwrap();
        let nested = web.join("src");
        std::fs::create_dir(&nested).unwrap();

        let ctx = detect_project_context_from(&nested, None).unwrap();
        assert_eq!(ctx.workspace_root.as_deref(), Some(dir.path()));
        assert_eq!(ctx.web_crate().unwrap(), web);
    }

    #[test]
    fn test_config_found_walking_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "seed = 99\n[cubes]\ncount = 4\n").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = detect_project_context_from(&nested, None).unwrap();
        assert_eq!(ctx.config_path, Some(dir.path().join(CONFIG_FILE)));
        assert_eq!(ctx.config.seed, Some(99));
        assert_eq!(ctx.config.cubes.count, 4);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(detect_project_context_from(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[physics]\nmax_substeps = 0\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("max_substeps"));
    }

    #[test]
    fn test_outside_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("x/y");
        std::fs::create_dir_all(&nested).unwrap();
        let ctx = detect_project_context_from(&nested, None).unwrap();
        assert!(ctx.workspace_root.is_none());
        assert!(ctx.web_crate().is_err());
    }
}

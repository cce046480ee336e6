use std::path::{Path, PathBuf};

use anyhow::Context;
use toml::{map::Map, Value};

pub fn workspace_dir() -> anyhow::Result<PathBuf> {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .context("failed to run cargo locate-project")?
        .stdout;
    let manifest = std::str::from_utf8(&output)
        .context("failed to read cargo locate-project output")?;
    let cargo_path = Path::new(manifest.trim());
    cargo_path
        .parent()
        .map(Path::to_path_buf)
        .context("manifest path has no parent")
}

/// Resolves `name` against the working directory first, then the
/// workspace root.
fn locate(name: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_absolute() || path.exists() {
        return Ok(path);
    }
    Ok(workspace_dir()?.join(name))
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    let path = locate(config_name)?;
    let config = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<Map<String, Value>>(&config)
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn load_env() -> anyhow::Result<Map<String, Value>> {
    let path = locate("Secrets.toml")?;
    let secrets = std::fs::read_to_string(path)
        .context("failed to read Secrets.toml")?;

    toml::from_str::<Map<String, Value>>(&secrets)
        .context("failed to parse Secrets.toml")
}

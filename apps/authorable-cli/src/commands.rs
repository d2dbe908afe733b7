use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use modkit_authorable::AuthorableConfig;
use modkit_authorable::config::{CONFIG_NAMESPACE, CONFIG_TEMPLATE};

pub const DEFAULT_CONFIG_PATH: &str = "config/authorable.yaml";

#[derive(thiserror::Error, Debug)]
pub enum InstallError {
    #[error("config file already exists: {} (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes the config template to `path`, creating parent directories.
///
/// # Errors
/// Returns [`InstallError::AlreadyExists`] when `path` exists and `force` is
/// not set, or [`InstallError::Io`] when the file cannot be written.
pub fn install(path: &Path, force: bool) -> Result<(), InstallError> {
    if path.exists() && !force {
        return Err(InstallError::AlreadyExists(path.to_path_buf()));
    }

    let io_err = |source| InstallError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, CONFIG_TEMPLATE).map_err(io_err)?;

    tracing::info!(path = %path.display(), force, "published authorable config");
    Ok(())
}

/// Loads the effective settings and renders them under their namespace.
///
/// # Errors
/// Returns an error if the config cannot be loaded or serialized.
pub fn render_config(path: Option<&Path>) -> anyhow::Result<String> {
    let config = AuthorableConfig::load(path)?;
    tracing::debug!(?path, "loaded authorable config");

    let document = BTreeMap::from([(CONFIG_NAMESPACE, config)]);
    Ok(serde_saphyr::to_string(&document)?)
}

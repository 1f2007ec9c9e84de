use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Module;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Deserialize)]
struct ModuleFile {
    #[serde(default)]
    modules: Vec<Module>,
}

#[derive(Serialize)]
struct ModuleFileRef<'a> {
    modules: &'a [Module],
}

pub fn parse_modules(contents: &str) -> Result<Vec<Module>, serde_json::Error> {
    let file: ModuleFile = serde_json::from_str(contents)?;
    Ok(file.modules)
}

pub fn load_modules(path: &Path) -> Result<Vec<Module>, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let modules = parse_modules(&contents).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), count = modules.len(), "loaded modules");
    Ok(modules)
}

/// Loads the module file, reporting any failure on stdout and falling back to
/// an empty collection.
pub fn load_or_empty(path: &Path) -> Vec<Module> {
    match load_modules(path) {
        Ok(modules) => modules,
        Err(err) => {
            debug!(error = %err, "falling back to an empty module list");
            println!("{}", failure_message(&err));
            Vec::new()
        }
    }
}

pub fn failure_message(err: &LoadError) -> String {
    match err {
        LoadError::NotFound { path } => format!("Error: {} not found!", path.display()),
        LoadError::Malformed { path, .. } => format!("Error: Invalid JSON in {}", path.display()),
        LoadError::Io { path, .. } => format!("Error: Could not read {}", path.display()),
    }
}

pub fn save_modules(path: &Path, modules: &[Module]) -> anyhow::Result<()> {
    let mut contents = serde_json::to_string_pretty(&ModuleFileRef { modules })
        .context("failed to encode modules")?;
    contents.push('\n');

    fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), count = modules.len(), "saved modules");
    Ok(())
}

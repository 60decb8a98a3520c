use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::constants;
use crate::error::{Result, TbGenError};

/// Remove the run log. Returns the paths that were actually deleted.
pub fn clean(config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    if remove_path(&config.log_file)? {
        removed.push(config.log_file.clone());
    }
    Ok(removed)
}

/// Remove the run log and the whole generated output tree
pub fn clean_all(config: &GeneratorConfig) -> Result<Vec<PathBuf>> {
    let mut removed = clean(config)?;
    if remove_path(&config.output_dir)? {
        removed.push(config.output_dir.clone());
    }
    Ok(removed)
}

/// Clear the generator-owned directories under `output_dir` so a rerun
/// leaves no files from an earlier interface list
pub fn remove_generated(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for dir in constants::GENERATED_DIRS {
        let path = output_dir.join(dir);
        if remove_path(&path)? {
            removed.push(path);
        }
    }
    Ok(removed)
}

fn remove_path(path: &Path) -> Result<bool> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => {
            tracing::info!("Removed: {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Nothing to remove at {}", path.display());
            Ok(false)
        }
        Err(e) => Err(TbGenError::write(path, e)),
    }
}

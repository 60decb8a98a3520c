use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TbGenError};
use crate::ir::GeneratedFileRecord;

/// Materializes planned content under an output root. Write-only: nothing
/// it creates is read back during a run.
pub struct Writer {
    root: PathBuf,
    banner: Option<String>,
    records: Vec<GeneratedFileRecord>,
}

impl Writer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            banner: None,
            records: Vec::new(),
        }
    }

    /// Prefix every generated source file with this text
    pub fn with_banner(mut self, banner: String) -> Self {
        self.banner = Some(banner);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn create_dirs(&self, dirs: &[String]) -> Result<()> {
        for dir in dirs {
            let path = self.root.join(dir);
            fs::create_dir_all(&path).map_err(|e| TbGenError::write(&path, e))?;
            tracing::debug!("Created: {}", path.display());
        }
        Ok(())
    }

    /// Write one generated file, overwriting any previous copy, and record it
    pub fn write_file(&mut self, relative_path: &str, content: &str, description: &str) -> Result<()> {
        let mut text = String::with_capacity(content.len() + 128);
        if let Some(banner) = &self.banner {
            text.push_str(banner);
        }
        text.push_str(content);

        let path = self.write_text(relative_path, &text)?;
        tracing::info!("Generated: {}", path.display());

        self.records.push(GeneratedFileRecord {
            relative_path: relative_path.to_string(),
            description: description.to_string(),
        });
        Ok(())
    }

    /// Write the summary index; it is not recorded as a generated file
    pub fn write_summary(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        self.write_text(relative_path, content)
    }

    pub fn records(&self) -> &[GeneratedFileRecord] {
        &self.records
    }

    fn write_text(&self, relative_path: &str, text: &str) -> Result<PathBuf> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TbGenError::write(parent, e))?;
        }
        fs::write(&path, text).map_err(|e| TbGenError::write(&path, e))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = Writer::new(dir.path().join("verif"));

        writer.write_file("ENV/AGENTS/i2c/i2c_agent.sv", "class x;\n", "agent").unwrap();

        let written = fs::read_to_string(dir.path().join("verif/ENV/AGENTS/i2c/i2c_agent.sv")).unwrap();
        assert_eq!(written, "class x;\n");
        assert_eq!(writer.records().len(), 1);
        assert_eq!(writer.records()[0].relative_path, "ENV/AGENTS/i2c/i2c_agent.sv");
    }

    #[test]
    fn test_overwrite_and_banner() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = Writer::new(dir.path()).with_banner("// banner\n".to_string());

        writer.write_file("TOP/top.sv", "first\n", "top").unwrap();
        writer.write_file("TOP/top.sv", "second\n", "top").unwrap();

        let written = fs::read_to_string(dir.path().join("TOP/top.sv")).unwrap();
        assert_eq!(written, "// banner\nsecond\n");
    }

    #[test]
    fn test_write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        fs::write(dir.path().join("TOP"), "blocker").unwrap();

        let mut writer = Writer::new(dir.path());
        let err = writer.write_file("TOP/top.sv", "x", "top").unwrap_err();
        match err {
            TbGenError::Write { path, .. } => assert!(path.ends_with("TOP")),
            other => panic!("expected a write error, got {:?}", other),
        }
        assert!(writer.records().is_empty());
    }

    #[test]
    fn test_create_dirs_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = Writer::new(dir.path());
        let dirs = vec!["RAL".to_string(), "ENV/SBD".to_string()];
        writer.create_dirs(&dirs).unwrap();
        writer.create_dirs(&dirs).unwrap();
        assert!(dir.path().join("ENV/SBD").is_dir());
    }
}

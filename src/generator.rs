use chrono::Utc;
use std::path::PathBuf;

use crate::clean;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::ir::{EnvironmentDescription, GeneratedFileRecord};
use crate::layout::Layout;
use crate::parser::CsvConfigParser;
use crate::summary::SummaryReporter;
use crate::templates::{generation_banner, TemplateRenderer};
use crate::writer::Writer;

/// Outcome of a completed generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub records: Vec<GeneratedFileRecord>,
    pub placeholders: Vec<String>,
    pub summary_path: PathBuf,
}

/// Drives the pipeline: read config, plan, render, write, summarize
pub struct Generator {
    config: GeneratorConfig,
    renderer: TemplateRenderer,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Parse the configured CSV file
    pub fn load(&self) -> Result<EnvironmentDescription> {
        tracing::debug!("Reading configuration from {}", self.config.config_file.display());
        CsvConfigParser::from_file(&self.config.config_file)?.parse(self.config.count_policy)
    }

    /// Parse and plan without touching the output tree
    pub fn plan(&self) -> Result<(EnvironmentDescription, Layout)> {
        let env = self.load()?;
        let layout = Layout::plan(&env);
        Ok((env, layout))
    }

    pub fn run(&self) -> Result<GenerationReport> {
        let env = self.load()?;
        self.generate(&env)
    }

    /// Render every file first so that a template failure leaves no partial tree
    pub fn generate(&self, env: &EnvironmentDescription) -> Result<GenerationReport> {
        let layout = Layout::plan(env);

        let rendered = layout
            .files
            .iter()
            .map(|file| -> Result<_> { Ok((file, self.renderer.render(file.role, env)?)) })
            .collect::<Result<Vec<_>>>()?;

        let mut writer = Writer::new(&self.config.output_dir);
        if self.config.banner {
            writer = writer.with_banner(generation_banner(Utc::now()));
        }

        let stale = clean::remove_generated(writer.root())?;
        tracing::debug!("Cleared previous output: {:?}", stale);

        writer.create_dirs(&layout.directories)?;
        for (file, content) in &rendered {
            writer.write_file(&file.relative_path, content, &file.description)?;
        }

        let summary = SummaryReporter::new(env, &layout.placeholders).render(writer.records());
        let summary_path = writer.write_summary(&layout.summary, &summary)?;
        tracing::info!("Summary written to {}", summary_path.display());

        Ok(GenerationReport {
            output_dir: writer.root().to_path_buf(),
            records: writer.records().to_vec(),
            placeholders: layout.placeholders,
            summary_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{DesignUnit, InterfaceSpec, Mode};

    #[test]
    fn test_generate_from_description() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            output_dir: dir.path().join("verif"),
            banner: false,
            ..GeneratorConfig::default()
        };
        let env = EnvironmentDescription::new(
            DesignUnit::new("soc"),
            2,
            vec![
                InterfaceSpec::new("apb", Mode::Master, 50, "pclk"),
                InterfaceSpec::new("irq", Mode::Slave, 50, "pclk"),
            ],
        );

        let report = Generator::new(config).generate(&env).unwrap();

        assert_eq!(report.records.len(), 4 + 2 * 5);
        assert!(report.summary_path.ends_with("SIM/README.txt"));
        assert!(dir.path().join("verif/ENV/AGENTS/irq/irq_cov.sv").is_file());
        assert!(dir.path().join("verif/RAL").is_dir());
        assert!(dir.path().join("verif/ENV/SBD").is_dir());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            config_file: dir.path().join("UVM_TB_PARAMS.csv"),
            output_dir: dir.path().join("verif"),
            ..GeneratorConfig::default()
        };
        let err = Generator::new(config).run().unwrap_err();
        assert!(matches!(err, crate::TbGenError::Usage(_)));
        assert!(!dir.path().join("verif").exists());
    }
}

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::ir::EnvironmentDescription;

/// Members of a per-interface agent bundle, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentComponent {
    Agent,
    Driver,
    Sequencer,
    Monitor,
    Coverage,
}

impl AgentComponent {
    pub const ALL: [AgentComponent; 5] = [
        AgentComponent::Agent,
        AgentComponent::Driver,
        AgentComponent::Sequencer,
        AgentComponent::Monitor,
        AgentComponent::Coverage,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            AgentComponent::Agent => "agent",
            AgentComponent::Driver => "drv",
            AgentComponent::Sequencer => "sqr",
            AgentComponent::Monitor => "mon",
            AgentComponent::Coverage => "cov",
        }
    }

    pub fn base_class(&self) -> &'static str {
        match self {
            AgentComponent::Agent => "uvm_agent",
            AgentComponent::Driver => "uvm_driver",
            AgentComponent::Sequencer => "uvm_sequencer",
            AgentComponent::Monitor => "uvm_monitor",
            AgentComponent::Coverage => "uvm_subscriber",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileRole {
    Top,
    Test,
    Sequence,
    Env,
    /// Agent bundle member for the interface at this index
    Component(usize, AgentComponent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedFile {
    /// Path relative to the output root, `/`-separated
    pub relative_path: String,
    pub role: FileRole,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub directories: Vec<String>,
    pub files: Vec<PlannedFile>,
    /// Directories created empty for work the generator does not do
    pub placeholders: Vec<String>,
    pub summary: String,
}

impl Layout {
    /// Plan the output tree; touches nothing on disk
    pub fn plan(env: &EnvironmentDescription) -> Self {
        let design = &env.design;
        let agents_dir = format!("{}/{}", constants::DIR_ENV, constants::DIR_AGENTS);
        let sbd_dir = format!("{}/{}", constants::DIR_ENV, constants::DIR_SBD);

        let mut directories = vec![
            constants::DIR_TOP.to_string(),
            constants::DIR_TEST_LIB.to_string(),
            constants::DIR_SEQ_LIB.to_string(),
            constants::DIR_ENV.to_string(),
            agents_dir.clone(),
        ];
        directories.extend(
            env.interfaces
                .iter()
                .map(|intf| format!("{}/{}", agents_dir, intf.prefix())),
        );
        directories.push(sbd_dir.clone());
        directories.push(constants::DIR_RAL.to_string());
        directories.push(constants::DIR_SIM.to_string());

        let mut files = vec![
            PlannedFile {
                relative_path: sv_path(constants::DIR_TOP, constants::TOP_MODULE),
                role: FileRole::Top,
                description: format!(
                    "top module: clock/reset generation, {} instance, interface handoff",
                    design.name
                ),
            },
            PlannedFile {
                relative_path: sv_path(constants::DIR_TEST_LIB, &design.test_class()),
                role: FileRole::Test,
                description: "base test (extends uvm_test)".to_string(),
            },
            PlannedFile {
                relative_path: sv_path(constants::DIR_SEQ_LIB, &design.sequence_class()),
                role: FileRole::Sequence,
                description: "base sequence (extends uvm_sequence)".to_string(),
            },
            PlannedFile {
                relative_path: sv_path(constants::DIR_ENV, &design.env_class()),
                role: FileRole::Env,
                description: "environment (extends uvm_env), one agent per interface".to_string(),
            },
        ];

        for (index, intf) in env.interfaces.iter().enumerate() {
            let dir = format!("{}/{}", agents_dir, intf.prefix());
            for component in AgentComponent::ALL {
                files.push(PlannedFile {
                    relative_path: sv_path(&dir, &intf.class(component.suffix())),
                    role: FileRole::Component(index, component),
                    description: format!(
                        "{} {} (extends {})",
                        intf.name,
                        component.suffix(),
                        component.base_class()
                    ),
                });
            }
        }

        Self {
            directories,
            files,
            placeholders: vec![constants::DIR_RAL.to_string(), sbd_dir],
            summary: format!("{}/{}", constants::DIR_SIM, constants::SUMMARY_FILE),
        }
    }
}

fn sv_path(dir: &str, stem: &str) -> String {
    format!("{}/{}.{}", dir, stem, constants::SV_EXTENSION)
}

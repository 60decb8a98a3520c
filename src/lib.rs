pub mod clean;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod ir;
pub mod layout;
pub mod parser;
pub mod summary;
pub mod templates;
pub mod utils;
pub mod writer;

// Re-export commonly used types
pub use config::{CountPolicy, GeneratorConfig};
pub use error::{Result, TbGenError};
pub use generator::{GenerationReport, Generator};
pub use ir::{DesignUnit, EnvironmentDescription, GeneratedFileRecord, InterfaceSpec, Mode, ResetPolarity};
pub use layout::{AgentComponent, FileRole, Layout, PlannedFile};
pub use parser::CsvConfigParser;

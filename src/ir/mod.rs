pub mod model;

pub use model::{
    DesignUnit, EnvironmentDescription, GeneratedFileRecord, InterfaceSpec, Mode, ResetPolarity, ResetSpec,
};

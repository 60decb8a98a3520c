use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Master,
    Slave,
}

impl Mode {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "M" => Some(Mode::Master),
            "S" => Some(Mode::Slave),
            _ => None,
        }
    }

    /// UVM activity keyword used for the agent's `is_active` field
    pub fn to_uvm_activity(&self) -> &'static str {
        match self {
            Mode::Master => "UVM_ACTIVE",
            Mode::Slave => "UVM_PASSIVE",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Mode::Master)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetPolarity {
    ActiveHigh,
    ActiveLow,
}

impl ResetPolarity {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active_high" | "1" => Some(ResetPolarity::ActiveHigh),
            "active_low" | "0" => Some(ResetPolarity::ActiveLow),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ResetPolarity::ActiveHigh => "active_high",
            ResetPolarity::ActiveLow => "active_low",
        }
    }

    /// Level driven while the reset is asserted
    pub fn assert_level(&self) -> &'static str {
        match self {
            ResetPolarity::ActiveHigh => "1'b1",
            ResetPolarity::ActiveLow => "1'b0",
        }
    }

    pub fn deassert_level(&self) -> &'static str {
        match self {
            ResetPolarity::ActiveHigh => "1'b0",
            ResetPolarity::ActiveLow => "1'b1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSpec {
    pub signal: String,
    pub polarity: ResetPolarity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignUnit {
    pub name: String,
}

impl DesignUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Lower-cased prefix used for generated class and file names
    pub fn prefix(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn test_class(&self) -> String {
        format!("{}_base_test", self.prefix())
    }

    pub fn sequence_class(&self) -> String {
        format!("{}_base_seq", self.prefix())
    }

    pub fn env_class(&self) -> String {
        format!("{}_env", self.prefix())
    }

    pub fn scoreboard_class(&self) -> String {
        format!("{}_sbd", self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSpec {
    pub name: String,
    pub mode: Mode,
    pub frequency_mhz: u32,
    pub clock_signal: String,
    pub reset: Option<ResetSpec>,
}

impl InterfaceSpec {
    pub fn new(name: impl Into<String>, mode: Mode, frequency_mhz: u32, clock_signal: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode,
            frequency_mhz,
            clock_signal: clock_signal.into(),
            reset: None,
        }
    }

    pub fn with_reset(mut self, signal: impl Into<String>, polarity: ResetPolarity) -> Self {
        self.reset = Some(ResetSpec {
            signal: signal.into(),
            polarity,
        });
        self
    }

    /// Lower-cased prefix shared by every generated class of this interface
    pub fn prefix(&self) -> String {
        self.name.to_lowercase()
    }

    /// Component class name for a suffix such as `agent`, `drv` or `mon`
    pub fn class(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix(), suffix)
    }

    pub fn if_type(&self) -> String {
        self.class("if")
    }

    pub fn if_instance(&self) -> String {
        self.class("pif")
    }

    pub fn transaction(&self) -> String {
        self.class("tx")
    }

    pub fn analysis_port(&self) -> String {
        self.class("ap_h")
    }
}

/// Parsed verification environment; read-only once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDescription {
    pub design: DesignUnit,
    pub declared_count: usize,
    pub interfaces: Vec<InterfaceSpec>,
}

impl EnvironmentDescription {
    pub fn new(design: DesignUnit, declared_count: usize, interfaces: Vec<InterfaceSpec>) -> Self {
        Self {
            design,
            declared_count,
            interfaces,
        }
    }

    /// Distinct clocks in first-appearance order, with their frequency
    pub fn clocks(&self) -> Vec<(&str, u32)> {
        let mut clocks: Vec<(&str, u32)> = Vec::new();
        for intf in &self.interfaces {
            if !clocks.iter().any(|(name, _)| *name == intf.clock_signal) {
                clocks.push((&intf.clock_signal, intf.frequency_mhz));
            }
        }
        clocks
    }

    /// Distinct reset signal names in first-appearance order
    pub fn reset_signals(&self) -> Vec<&str> {
        let mut resets: Vec<&str> = Vec::new();
        for reset in self.interfaces.iter().filter_map(|i| i.reset.as_ref()) {
            if !resets.contains(&reset.signal.as_str()) {
                resets.push(&reset.signal);
            }
        }
        resets
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFileRecord {
    pub relative_path: String,
    pub description: String,
}

mod agent;
mod env;
mod sequence;
mod top;

use chrono::{DateTime, Utc};

use crate::error::{Result, TbGenError};
use crate::ir::{EnvironmentDescription, InterfaceSpec};
use crate::layout::{AgentComponent, FileRole};

/// Renders the fixed UVM templates. Output depends only on the role and
/// the environment description.
pub struct TemplateRenderer {
    indent: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self {
            indent: "    ".to_string(),
        }
    }

    pub fn with_indent(indent: String) -> Self {
        Self { indent }
    }

    /// Render the text of one planned file
    pub fn render(&self, role: FileRole, env: &EnvironmentDescription) -> Result<String> {
        let mut out = String::new();
        match role {
            FileRole::Top => self.render_top(&mut out, env),
            FileRole::Test => self.render_test(&mut out, env),
            FileRole::Sequence => self.render_sequence(&mut out, env),
            FileRole::Env => self.render_env(&mut out, env),
            FileRole::Component(index, component) => {
                let intf = env.interfaces.get(index).ok_or_else(|| {
                    TbGenError::config(format!("no interface at index {}", index))
                })?;
                match component {
                    AgentComponent::Agent => self.render_agent(&mut out, intf),
                    AgentComponent::Driver => self.render_driver(&mut out, intf),
                    AgentComponent::Sequencer => self.render_sequencer(&mut out, intf),
                    AgentComponent::Monitor => self.render_monitor(&mut out, intf),
                    AgentComponent::Coverage => self.render_coverage(&mut out, intf),
                }
            }
        }
        Ok(out)
    }

    /// Append one line at the given nesting depth; empty text yields a blank line
    fn line(&self, out: &mut String, depth: usize, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..depth {
                out.push_str(&self.indent);
            }
            out.push_str(text);
        }
        out.push('\n');
    }

    fn class_header(&self, out: &mut String, kind: &str, name: &str) {
        self.line(out, 0, "// ----------------------------------------------------");
        self.line(out, 0, format!("// UVM {}: {}", kind, name));
        self.line(out, 0, "// ----------------------------------------------------");
    }

    fn component_constructor(&self, out: &mut String, class: &str, extra: &[String]) {
        self.line(
            out,
            1,
            format!(
                "function new(string name = \"{}\", uvm_component parent = null);",
                class
            ),
        );
        self.line(out, 2, "super.new(name, parent);");
        for stmt in extra {
            self.line(out, 2, stmt);
        }
        self.line(out, 1, "endfunction : new");
    }

    fn create_stmt(&self, class: &str, handle: &str) -> String {
        format!("{} = {}::type_id::create(\"{}\", this);", handle, class, handle)
    }
}

/// First interface able to drive stimulus, if any
fn first_active(env: &EnvironmentDescription) -> Option<&InterfaceSpec> {
    env.interfaces.iter().find(|intf| intf.mode.is_active())
}

/// Informational first line of every generated file. It is the only
/// time-dependent text in the output.
pub fn generation_banner(now: DateTime<Utc>) -> String {
    format!(
        "// Generated by uvm-tbgen {} on {} (informational only)\n",
        env!("CARGO_PKG_VERSION"),
        now.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

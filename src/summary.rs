use crate::constants;
use crate::ir::{EnvironmentDescription, GeneratedFileRecord};

const RULE: &str = "------------------------------------------------------------------------";

/// Builds the human-readable index written to `SIM/README.txt`
pub struct SummaryReporter<'a> {
    env: &'a EnvironmentDescription,
    placeholders: &'a [String],
}

impl<'a> SummaryReporter<'a> {
    pub fn new(env: &'a EnvironmentDescription, placeholders: &'a [String]) -> Self {
        Self { env, placeholders }
    }

    pub fn render(&self, records: &[GeneratedFileRecord]) -> String {
        let mut out = String::new();
        let env = self.env;

        out.push_str("UVM testbench generation summary\n");
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!("DUT Name             : {}\n", env.design.name));
        if env.declared_count == env.interfaces.len() {
            out.push_str(&format!("Number of Interfaces : {}\n", env.interfaces.len()));
        } else {
            out.push_str(&format!(
                "Number of Interfaces : {} (NUM_INTF declared {})\n",
                env.interfaces.len(),
                env.declared_count
            ));
        }
        out.push('\n');

        out.push_str("Interfaces:\n");
        for intf in &env.interfaces {
            let reset = match &intf.reset {
                Some(reset) => format!("reset {} ({})", reset.signal, reset.polarity.keyword()),
                None => "no reset".to_string(),
            };
            out.push_str(&format!(
                "  * {}: {:?} ({}), {} @ {} MHz, {}\n",
                intf.name,
                intf.mode,
                intf.mode.to_uvm_activity(),
                intf.clock_signal,
                intf.frequency_mhz,
                reset
            ));
        }
        out.push('\n');

        out.push_str("Generated files:\n");
        for (group, entries) in group_by_top_dir(records) {
            out.push('\n');
            out.push_str(&format!("{}/\n", group));
            for record in entries {
                out.push_str(&format!("  - {} : {}\n", record.relative_path, record.description));
            }
        }
        out.push('\n');

        if !self.placeholders.is_empty() {
            out.push_str("Placeholder directories (created empty):\n");
            for dir in self.placeholders {
                out.push_str(&format!("  - {}/\n", dir));
            }
            out.push('\n');
        }

        out.push_str("Types referenced but not generated:\n");
        for intf in &env.interfaces {
            out.push_str(&format!(
                "  - {} : SystemVerilog interface with {} (instantiated in TOP/top.sv)\n",
                intf.if_type(),
                intf.clock_signal
            ));
            out.push_str(&format!(
                "  - {} : uvm_sequence_item carried by the {} agent\n",
                intf.transaction(),
                intf.name
            ));
        }
        out.push('\n');

        out.push_str("TODO for the user:\n");
        for todo in constants::STANDING_TODOS {
            out.push_str(&format!("  [TODO] {}\n", todo));
        }
        out.push_str(RULE);
        out.push('\n');

        out
    }
}

/// Group records by their first path component. Known directories come in
/// layout order; anything else follows in first-seen order.
fn group_by_top_dir(records: &[GeneratedFileRecord]) -> Vec<(String, Vec<&GeneratedFileRecord>)> {
    let mut groups: Vec<(String, Vec<&GeneratedFileRecord>)> = constants::TOP_LEVEL_DIRS
        .iter()
        .map(|dir| (dir.to_string(), Vec::new()))
        .collect();

    for record in records {
        let top = record
            .relative_path
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string();
        match groups.iter_mut().find(|(name, _)| *name == top) {
            Some((_, entries)) => entries.push(record),
            None => groups.push((top, vec![record])),
        }
    }

    groups.retain(|(_, entries)| !entries.is_empty());
    groups
}

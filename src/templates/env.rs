use super::TemplateRenderer;
use crate::ir::EnvironmentDescription;
use crate::layout::AgentComponent;

impl TemplateRenderer {
    pub(super) fn render_env(&self, out: &mut String, env: &EnvironmentDescription) {
        let design = &env.design;
        let env_class = design.env_class();
        let sbd_class = design.scoreboard_class();
        let sbd_handle = format!("{}_h", sbd_class);

        let agents: Vec<(String, String)> = env
            .interfaces
            .iter()
            .map(|intf| {
                let class = intf.class(AgentComponent::Agent.suffix());
                let handle = format!("{}_h", class);
                (class, handle)
            })
            .collect();

        self.class_header(out, "Environment", &env_class);
        self.line(out, 0, format!("class {} extends uvm_env;", env_class));
        self.line(out, 1, format!("`uvm_component_utils({})", env_class));
        self.line(out, 0, "");

        self.line(out, 1, "// Agents");
        for (class, handle) in &agents {
            self.line(out, 1, format!("{} {};", class, handle));
        }
        self.line(out, 0, "");
        self.line(out, 1, "// Scoreboard (not generated)");
        self.line(out, 1, format!("// {} {};", sbd_class, sbd_handle));
        self.line(out, 0, "");

        self.component_constructor(out, &env_class, &[]);
        self.line(out, 0, "");

        self.line(out, 1, "virtual function void build_phase(uvm_phase phase);");
        self.line(out, 2, "super.build_phase(phase);");
        for (class, handle) in &agents {
            self.line(out, 2, self.create_stmt(class, handle));
        }
        self.line(out, 2, format!("// {}", self.create_stmt(&sbd_class, &sbd_handle)));
        self.line(out, 1, "endfunction : build_phase");
        self.line(out, 0, "");

        self.line(out, 1, "virtual function void connect_phase(uvm_phase phase);");
        self.line(out, 2, "super.connect_phase(phase);");
        self.line(out, 2, "// TODO: enable once the scoreboard is implemented");
        for (intf, (_, handle)) in env.interfaces.iter().zip(&agents) {
            let monitor = format!("{}_h", intf.class(AgentComponent::Monitor.suffix()));
            self.line(
                out,
                2,
                format!(
                    "// {}.{}.{}.connect({}.analysis_export);",
                    handle,
                    monitor,
                    intf.analysis_port(),
                    sbd_handle
                ),
            );
        }
        self.line(out, 1, "endfunction : connect_phase");
        self.line(out, 0, "");
        self.line(out, 0, format!("endclass : {}", env_class));
    }
}

use super::TemplateRenderer;
use crate::ir::InterfaceSpec;
use crate::layout::AgentComponent;

const VIF_ERROR: &str = "`uvm_error(get_full_name(), \"Failed to get virtual interface handle from uvm_config_db\")";

fn handle(intf: &InterfaceSpec, component: AgentComponent) -> (String, String) {
    let class = intf.class(component.suffix());
    let handle = format!("{}_h", class);
    (class, handle)
}

/// Clock/reset context quoted in the protocol TODOs
fn timing_note(intf: &InterfaceSpec) -> String {
    match &intf.reset {
        Some(reset) => format!(
            "on {} ({} MHz) after {} ({}) is released",
            intf.clock_signal,
            intf.frequency_mhz,
            reset.signal,
            reset.polarity.keyword()
        ),
        None => format!("on {} ({} MHz)", intf.clock_signal, intf.frequency_mhz),
    }
}

impl TemplateRenderer {
    pub(super) fn render_agent(&self, out: &mut String, intf: &InterfaceSpec) {
        let (agent, _) = handle(intf, AgentComponent::Agent);
        let (drv, drv_h) = handle(intf, AgentComponent::Driver);
        let (sqr, sqr_h) = handle(intf, AgentComponent::Sequencer);
        let (mon, mon_h) = handle(intf, AgentComponent::Monitor);
        let (cov, cov_h) = handle(intf, AgentComponent::Coverage);

        self.class_header(out, "Agent", &agent);
        self.line(out, 0, format!("class {} extends uvm_agent;", agent));
        self.line(out, 1, format!("`uvm_component_utils({})", agent));
        self.line(out, 0, "");
        self.line(out, 1, "// Sub-components");
        self.line(out, 1, format!("{} {};", drv, drv_h));
        self.line(out, 1, format!("{} {};", sqr, sqr_h));
        self.line(out, 1, format!("{} {};", mon, mon_h));
        self.line(out, 1, format!("{} {};", cov, cov_h));
        self.line(out, 0, "");
        self.component_constructor(
            out,
            &agent,
            &[format!("is_active = {};", intf.mode.to_uvm_activity())],
        );
        self.line(out, 0, "");

        self.line(out, 1, "virtual function void build_phase(uvm_phase phase);");
        self.line(out, 2, "super.build_phase(phase);");
        self.line(out, 2, self.create_stmt(&mon, &mon_h));
        self.line(out, 2, self.create_stmt(&cov, &cov_h));
        self.line(out, 2, "if (get_is_active() == UVM_ACTIVE) begin");
        self.line(out, 3, self.create_stmt(&drv, &drv_h));
        self.line(out, 3, self.create_stmt(&sqr, &sqr_h));
        self.line(out, 2, "end");
        self.line(out, 1, "endfunction : build_phase");
        self.line(out, 0, "");

        self.line(out, 1, "virtual function void connect_phase(uvm_phase phase);");
        self.line(out, 2, "super.connect_phase(phase);");
        self.line(
            out,
            2,
            format!(
                "{}.{}.connect({}.analysis_export);",
                mon_h,
                intf.analysis_port(),
                cov_h
            ),
        );
        self.line(out, 2, "if (get_is_active() == UVM_ACTIVE)");
        self.line(
            out,
            3,
            format!("{}.seq_item_port.connect({}.seq_item_export);", drv_h, sqr_h),
        );
        self.line(out, 1, "endfunction : connect_phase");
        self.line(out, 0, "");
        self.line(out, 0, format!("endclass : {}", agent));
    }

    pub(super) fn render_driver(&self, out: &mut String, intf: &InterfaceSpec) {
        let (drv, _) = handle(intf, AgentComponent::Driver);
        let vif = format!("{}_vif", intf.prefix());
        let tx = intf.transaction();

        self.class_header(out, "Driver", &drv);
        self.line(out, 0, format!("class {} extends uvm_driver #({});", drv, tx));
        self.line(out, 1, format!("`uvm_component_utils({})", drv));
        self.line(out, 0, "");
        self.line(out, 1, format!("virtual {} {};", intf.if_type(), vif));
        self.line(out, 0, "");
        self.component_constructor(out, &drv, &[]);
        self.line(out, 0, "");
        self.vif_build_phase(out, intf, &vif, &[]);
        self.line(out, 0, "");

        self.line(out, 1, "virtual task run_phase(uvm_phase phase);");
        self.line(out, 2, "`uvm_info(get_full_name(), \"run_phase started\", UVM_NONE)");
        self.line(out, 2, "forever begin");
        self.line(out, 3, "seq_item_port.get_next_item(req);");
        self.line(out, 3, "drive_tx(req);");
        self.line(out, 3, "seq_item_port.item_done();");
        self.line(out, 2, "end");
        self.line(out, 1, "endtask : run_phase");
        self.line(out, 0, "");

        self.line(out, 1, format!("task drive_tx({} tx);", tx));
        self.line(
            out,
            2,
            format!(
                "// TODO: implement {} drive logic {}",
                intf.name,
                timing_note(intf)
            ),
        );
        self.line(out, 1, "endtask : drive_tx");
        self.line(out, 0, "");
        self.line(out, 0, format!("endclass : {}", drv));
    }

    pub(super) fn render_sequencer(&self, out: &mut String, intf: &InterfaceSpec) {
        let (sqr, _) = handle(intf, AgentComponent::Sequencer);

        self.class_header(out, "Sequencer", &sqr);
        self.line(
            out,
            0,
            format!("typedef uvm_sequencer #({}) {};", intf.transaction(), sqr),
        );
    }

    pub(super) fn render_monitor(&self, out: &mut String, intf: &InterfaceSpec) {
        let (mon, _) = handle(intf, AgentComponent::Monitor);
        let vif = format!("{}_vif", intf.prefix());
        let tx = intf.transaction();
        let ap = intf.analysis_port();

        self.class_header(out, "Monitor", &mon);
        self.line(out, 0, format!("class {} extends uvm_monitor;", mon));
        self.line(out, 1, format!("`uvm_component_utils({})", mon));
        self.line(out, 0, "");
        self.line(out, 1, format!("virtual {} {};", intf.if_type(), vif));
        self.line(out, 1, format!("uvm_analysis_port #({}) {};", tx, ap));
        self.line(out, 1, format!("{} tx;", tx));
        self.line(out, 0, "");
        self.component_constructor(out, &mon, &[]);
        self.line(out, 0, "");
        self.vif_build_phase(
            out,
            intf,
            &vif,
            &[format!("{} = new(\"{}\", this);", ap, ap)],
        );
        self.line(out, 0, "");

        self.line(out, 1, "virtual task run_phase(uvm_phase phase);");
        self.line(out, 2, "`uvm_info(get_full_name(), \"run_phase started\", UVM_NONE)");
        self.line(out, 2, "forever begin");
        self.line(out, 3, format!("@(posedge {}.{});", vif, intf.clock_signal));
        self.line(out, 3, format!("tx = {}::type_id::create(\"tx\");", tx));
        self.line(
            out,
            3,
            format!(
                "// TODO: implement {} sampling logic {}",
                intf.name,
                timing_note(intf)
            ),
        );
        self.line(out, 3, format!("{}.write(tx);", ap));
        self.line(out, 2, "end");
        self.line(out, 1, "endtask : run_phase");
        self.line(out, 0, "");
        self.line(out, 0, format!("endclass : {}", mon));
    }

    pub(super) fn render_coverage(&self, out: &mut String, intf: &InterfaceSpec) {
        let (cov, _) = handle(intf, AgentComponent::Coverage);
        let tx = intf.transaction();
        let cg = format!("{}_cg", intf.prefix());

        self.class_header(out, "Coverage", &cov);
        self.line(out, 0, format!("class {} extends uvm_subscriber #({});", cov, tx));
        self.line(out, 1, format!("`uvm_component_utils({})", cov));
        self.line(out, 0, "");
        self.line(out, 1, format!("{} tx;", tx));
        self.line(out, 0, "");
        self.line(out, 1, format!("covergroup {};", cg));
        self.line(
            out,
            2,
            format!("// TODO: implement {} functional coverage", intf.name),
        );
        self.line(out, 1, format!("endgroup : {}", cg));
        self.line(out, 0, "");
        self.component_constructor(out, &cov, &[format!("{} = new();", cg)]);
        self.line(out, 0, "");
        self.line(out, 1, format!("virtual function void write({} t);", tx));
        self.line(out, 2, "tx = t;");
        self.line(out, 2, format!("{}.sample();", cg));
        self.line(out, 1, "endfunction : write");
        self.line(out, 0, "");
        self.line(out, 0, format!("endclass : {}", cov));
    }

    fn vif_build_phase(&self, out: &mut String, intf: &InterfaceSpec, vif: &str, extra: &[String]) {
        self.line(out, 1, "virtual function void build_phase(uvm_phase phase);");
        self.line(out, 2, "super.build_phase(phase);");
        for stmt in extra {
            self.line(out, 2, stmt);
        }
        self.line(
            out,
            2,
            format!(
                "if (!uvm_config_db#(virtual {})::get(this, \"\", \"vif\", {}))",
                intf.if_type(),
                vif
            ),
        );
        self.line(out, 3, VIF_ERROR);
        self.line(out, 1, "endfunction : build_phase");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{DesignUnit, EnvironmentDescription, Mode, ResetPolarity};
    use crate::layout::FileRole;

    fn render(intf: InterfaceSpec, component: AgentComponent) -> String {
        let env = EnvironmentDescription::new(DesignUnit::new("soc"), 1, vec![intf]);
        TemplateRenderer::new()
            .render(FileRole::Component(0, component), &env)
            .unwrap()
    }

    #[test]
    fn test_master_agent_is_active() {
        let sv = render(
            InterfaceSpec::new("i2c", Mode::Master, 100, "i2c_clk"),
            AgentComponent::Agent,
        );
        assert!(sv.contains("class i2c_agent extends uvm_agent;"));
        assert!(sv.contains("is_active = UVM_ACTIVE;"));
        assert!(sv.contains("i2c_drv_h.seq_item_port.connect(i2c_sqr_h.seq_item_export);"));
        assert!(sv.contains("i2c_mon_h.i2c_ap_h.connect(i2c_cov_h.analysis_export);"));
    }

    #[test]
    fn test_slave_agent_is_passive() {
        let sv = render(
            InterfaceSpec::new("uart", Mode::Slave, 200, "uart_clk"),
            AgentComponent::Agent,
        );
        assert!(sv.contains("is_active = UVM_PASSIVE;"));
        assert!(!sv.contains("UVM_ACTIVE;"));
    }

    #[test]
    fn test_driver_mentions_reset_only_when_declared() {
        let with_reset = render(
            InterfaceSpec::new("i2c", Mode::Master, 100, "i2c_clk")
                .with_reset("i2c_rst", ResetPolarity::ActiveLow),
            AgentComponent::Driver,
        );
        assert!(with_reset.contains("class i2c_drv extends uvm_driver #(i2c_tx);"));
        assert!(with_reset.contains("virtual i2c_if i2c_vif;"));
        assert!(with_reset.contains("after i2c_rst (active_low) is released"));

        let without = render(
            InterfaceSpec::new("spi", Mode::Master, 50, "spi_clk"),
            AgentComponent::Driver,
        );
        assert!(without.contains("// TODO: implement spi drive logic on spi_clk (50 MHz)\n"));
        assert!(!without.contains("released"));
    }

    #[test]
    fn test_sequencer_is_typedef() {
        let sv = render(
            InterfaceSpec::new("i2c", Mode::Master, 100, "i2c_clk"),
            AgentComponent::Sequencer,
        );
        assert!(sv.trim_end().ends_with("typedef uvm_sequencer #(i2c_tx) i2c_sqr;"));
    }

    #[test]
    fn test_monitor_and_coverage() {
        let mon = render(
            InterfaceSpec::new("i2c", Mode::Slave, 100, "i2c_clk"),
            AgentComponent::Monitor,
        );
        assert!(mon.contains("uvm_analysis_port #(i2c_tx) i2c_ap_h;"));
        assert!(mon.contains("i2c_ap_h = new(\"i2c_ap_h\", this);"));
        assert!(mon.contains("@(posedge i2c_vif.i2c_clk);"));

        let cov = render(
            InterfaceSpec::new("i2c", Mode::Slave, 100, "i2c_clk"),
            AgentComponent::Coverage,
        );
        assert!(cov.contains("class i2c_cov extends uvm_subscriber #(i2c_tx);"));
        assert!(cov.contains("i2c_cg = new();"));
        assert!(cov.contains("i2c_cg.sample();"));
    }
}

use super::TemplateRenderer;
use crate::ir::EnvironmentDescription;

/// Render a nanosecond delay without trailing zeros: 10, 2.5, 3.333
fn format_ns(value: f64) -> String {
    let text = format!("{:.3}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl TemplateRenderer {
    pub(super) fn render_top(&self, out: &mut String, env: &EnvironmentDescription) {
        let design = &env.design;

        self.line(out, 0, "`timescale 1ns/1ps");
        self.line(out, 0, "");
        self.line(out, 0, "module top;");
        self.line(out, 1, "import uvm_pkg::*;");
        self.line(out, 1, "`include \"uvm_macros.svh\"");
        self.line(out, 0, "");

        self.line(out, 1, "// Clock and reset signals");
        for (clock, _) in env.clocks() {
            self.line(out, 1, format!("logic {};", clock));
        }
        for reset in env.reset_signals() {
            self.line(out, 1, format!("logic {};", reset));
        }
        self.line(out, 0, "");

        for (clock, freq) in env.clocks() {
            let period = 1000.0 / f64::from(freq);
            self.line(
                out,
                1,
                format!(
                    "// {} generation at {} MHz (period {}ns)",
                    clock,
                    freq,
                    format_ns(period)
                ),
            );
            self.line(out, 1, format!("initial {} = 1'b0;", clock));
            self.line(
                out,
                1,
                format!("always #{} {} = ~{};", format_ns(period / 2.0), clock, clock),
            );
            self.line(out, 0, "");
        }

        for intf in &env.interfaces {
            let Some(reset) = &intf.reset else {
                continue;
            };
            self.line(
                out,
                1,
                format!(
                    "// {} reset pulse on {}, {}",
                    reset.signal,
                    intf.clock_signal,
                    reset.polarity.keyword()
                ),
            );
            self.line(out, 1, "initial begin");
            self.line(
                out,
                2,
                format!("{} = {};", reset.signal, reset.polarity.assert_level()),
            );
            self.line(out, 2, format!("@(posedge {});", intf.clock_signal));
            self.line(
                out,
                2,
                format!("{} = {};", reset.signal, reset.polarity.deassert_level()),
            );
            self.line(out, 1, "end");
            self.line(out, 0, "");
        }

        self.line(out, 1, "// Interface instantiations");
        for intf in &env.interfaces {
            self.line(
                out,
                1,
                format!(
                    "{} {}();  // TODO: create the {} interface file",
                    intf.if_type(),
                    intf.if_instance(),
                    intf.if_type()
                ),
            );
        }
        self.line(out, 0, "");

        self.line(out, 1, "// DUT instantiation");
        self.line(out, 1, format!("{} u_{} (", design.name, design.prefix()));
        self.line(out, 2, "// TODO: connect DUT ports using the interface handles");
        self.line(out, 1, ");");
        self.line(out, 0, "");

        self.line(out, 1, "// Pass virtual interfaces to the UVM components");
        self.line(out, 1, "initial begin");
        for intf in &env.interfaces {
            self.line(
                out,
                2,
                format!(
                    "uvm_config_db#(virtual {})::set(null, \"*\", \"vif\", {});",
                    intf.if_type(),
                    intf.if_instance()
                ),
            );
        }
        self.line(out, 1, "end");
        self.line(out, 0, "");

        self.line(out, 1, "// Start the UVM test");
        self.line(out, 1, "initial begin");
        self.line(out, 2, format!("run_test(\"{}\");", design.test_class()));
        self.line(out, 1, "end");
        self.line(out, 0, "");
        self.line(out, 0, "endmodule : top");
    }
}

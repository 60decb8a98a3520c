use super::{first_active, TemplateRenderer};
use crate::ir::EnvironmentDescription;

impl TemplateRenderer {
    pub(super) fn render_sequence(&self, out: &mut String, env: &EnvironmentDescription) {
        let seq_class = env.design.sequence_class();
        let item = first_active(env)
            .map(|intf| intf.transaction())
            .unwrap_or_else(|| "uvm_sequence_item".to_string());

        self.class_header(out, "Sequence", &seq_class);
        self.line(
            out,
            0,
            format!("class {} extends uvm_sequence #({});", seq_class, item),
        );
        self.line(out, 1, format!("`uvm_object_utils({})", seq_class));
        self.line(out, 0, "");
        self.line(out, 1, format!("function new(string name = \"{}\");", seq_class));
        self.line(out, 2, "super.new(name);");
        self.line(out, 1, "endfunction : new");
        self.line(out, 0, "");
        self.line(out, 1, "virtual task body();");
        self.line(
            out,
            2,
            format!("`uvm_info(get_type_name(), \"Starting {}\", UVM_NONE)", seq_class),
        );
        self.line(out, 2, "// TODO: use `uvm_do_with to constrain the item fields");
        self.line(out, 2, "`uvm_do(req)");
        self.line(out, 1, "endtask : body");
        self.line(out, 0, "");
        self.line(out, 0, format!("endclass : {}", seq_class));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{DesignUnit, InterfaceSpec, Mode};
    use crate::layout::FileRole;

    #[test]
    fn test_sequence_item_follows_first_active_interface() {
        let env = EnvironmentDescription::new(
            DesignUnit::new("usb_ctrl"),
            1,
            vec![InterfaceSpec::new("i2c", Mode::Master, 100, "i2c_clk")],
        );
        let seq = TemplateRenderer::new().render(FileRole::Sequence, &env).unwrap();
        assert!(seq.contains("class usb_ctrl_base_seq extends uvm_sequence #(i2c_tx);"));
        assert!(seq.contains("`uvm_object_utils(usb_ctrl_base_seq)"));
        assert!(seq.contains("`uvm_do(req)"));
    }

    #[test]
    fn test_sequence_falls_back_to_generic_item() {
        let env = EnvironmentDescription::new(
            DesignUnit::new("soc"),
            1,
            vec![InterfaceSpec::new("uart", Mode::Slave, 200, "uart_clk")],
        );
        let seq = TemplateRenderer::new().render(FileRole::Sequence, &env).unwrap();
        assert!(seq.contains("extends uvm_sequence #(uvm_sequence_item);"));
    }
}

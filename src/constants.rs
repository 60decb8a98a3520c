// Default file locations
pub const DEFAULT_CONFIG_FILE: &str = "UVM_TB_PARAMS.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "verif";
pub const DEFAULT_LOG_FILE: &str = "uvm_tbgen.log";

// Row kinds
pub const ROW_DUT_NAME: &str = "DUT_NAME";
pub const ROW_NUM_INTF: &str = "NUM_INTF";
pub const ROW_INTF: &str = "INTF";

// Output tree
pub const DIR_TOP: &str = "TOP";
pub const DIR_TEST_LIB: &str = "TEST_LIB";
pub const DIR_SEQ_LIB: &str = "SEQ_LIB";
pub const DIR_ENV: &str = "ENV";
pub const DIR_AGENTS: &str = "AGENTS";
pub const DIR_SBD: &str = "SBD";
pub const DIR_RAL: &str = "RAL";
pub const DIR_SIM: &str = "SIM";

/// Top-level directories in summary order
pub const TOP_LEVEL_DIRS: [&str; 6] = [DIR_TOP, DIR_TEST_LIB, DIR_SEQ_LIB, DIR_ENV, DIR_RAL, DIR_SIM];

/// Directories the generator owns and clears before rewriting. `RAL` is
/// never populated by the generator and is left alone.
pub const GENERATED_DIRS: [&str; 5] = [DIR_TOP, DIR_TEST_LIB, DIR_SEQ_LIB, DIR_ENV, DIR_SIM];

/// Highest clock frequency whose half period is still 1ps under `timescale 1ns/1ps`
pub const MAX_FREQUENCY_MHZ: u32 = 500_000;

pub const SV_EXTENSION: &str = "sv";
pub const TOP_MODULE: &str = "top";
pub const SUMMARY_FILE: &str = "README.txt";

/// Work the generator leaves to the user, regardless of configuration
pub const STANDING_TODOS: [&str; 4] = [
    "RAL/: register abstraction layer is not generated; add the register model manually",
    "ENV/SBD/: scoreboard is not generated; implement it and enable the connections in the env",
    "Driver/monitor protocol logic: implement drive_tx() and the monitor sampling loop per interface",
    "Design-port wiring: connect the interface instances to the DUT ports in TOP/top.sv",
];

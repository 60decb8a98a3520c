use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

use crate::config::CountPolicy;
use crate::constants;
use crate::error::{Result, TbGenError};
use crate::ir::{DesignUnit, EnvironmentDescription, InterfaceSpec, Mode, ResetPolarity};

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").unwrap();
}

/// One non-empty line of the configuration, split into trimmed fields.
/// A bracketed `[rst, polarity]` group is kept apart from the plain fields.
#[derive(Debug)]
struct Row {
    fields: Vec<String>,
    bracket: Option<Vec<String>>,
}

/// Reader for the `DUT_NAME` / `NUM_INTF` / `INTF` configuration format
pub struct CsvConfigParser {
    content: String,
}

impl CsvConfigParser {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::new(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TbGenError::Usage(format!(
                "configuration file '{}' not found",
                path.display()
            ))),
            Err(e) => Err(TbGenError::config(format!(
                "failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// Parse the whole file into an environment description
    pub fn parse(&self, policy: CountPolicy) -> Result<EnvironmentDescription> {
        let mut design: Option<DesignUnit> = None;
        let mut declared: Option<(usize, usize)> = None;
        let mut interfaces: Vec<(usize, InterfaceSpec)> = Vec::new();

        let content = self.content.trim_start_matches('\u{feff}');
        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let row = split_row(line, line_no)?;
            let kind = row.fields[0].to_uppercase().replace(' ', "_");

            match kind.as_str() {
                constants::ROW_DUT_NAME => {
                    if design.is_some() {
                        return Err(TbGenError::config_at(line_no, "duplicate DUT_NAME row"));
                    }
                    let name = single_value(&row, line_no, constants::ROW_DUT_NAME)?;
                    check_identifier(name, "DUT name", line_no)?;
                    design = Some(DesignUnit::new(name));
                }
                constants::ROW_NUM_INTF => {
                    if declared.is_some() {
                        return Err(TbGenError::config_at(line_no, "duplicate NUM_INTF row"));
                    }
                    let value = single_value(&row, line_no, constants::ROW_NUM_INTF)?;
                    let count = value.parse::<usize>().map_err(|_| {
                        TbGenError::config_at(
                            line_no,
                            format!("interface count '{}' is not a non-negative integer", value),
                        )
                    })?;
                    declared = Some((count, line_no));
                }
                constants::ROW_INTF => {
                    let intf = parse_interface(&row, line_no)?;
                    interfaces.push((line_no, intf));
                }
                other => {
                    tracing::warn!("Skipping unknown row kind '{}' at line {}", other, line_no);
                }
            }
        }

        let design = design.ok_or_else(|| TbGenError::config("missing DUT_NAME row"))?;
        let (declared_count, count_line) =
            declared.ok_or_else(|| TbGenError::config("missing NUM_INTF row"))?;
        if interfaces.is_empty() {
            return Err(TbGenError::config("no INTF rows found"));
        }

        if declared_count != interfaces.len() {
            let message = format!(
                "NUM_INTF declares {} interface(s) but {} INTF row(s) are present",
                declared_count,
                interfaces.len()
            );
            match policy {
                CountPolicy::Strict => return Err(TbGenError::config_at(count_line, message)),
                CountPolicy::Warn => tracing::warn!("{}; generating the rows present", message),
            }
        }

        check_consistency(&interfaces)?;

        let env = EnvironmentDescription::new(
            design,
            declared_count,
            interfaces.into_iter().map(|(_, intf)| intf).collect(),
        );

        tracing::info!("DUT Name        : {}", env.design.name);
        tracing::info!("Num Interfaces  : {}", env.declared_count);
        for (i, intf) in env.interfaces.iter().enumerate() {
            tracing::info!(
                "[{}] Name: {}, Mode: {:?}, Speed: {} MHz, Clk: {}, Rst: {}",
                i + 1,
                intf.name,
                intf.mode,
                intf.frequency_mhz,
                intf.clock_signal,
                intf.reset
                    .as_ref()
                    .map(|r| format!("{} ({})", r.signal, r.polarity.keyword()))
                    .unwrap_or_else(|| "none".to_string())
            );
        }

        Ok(env)
    }
}

fn split_row(line: &str, line_no: usize) -> Result<Row> {
    // Spreadsheet exports quote the bracketed group; quotes carry no meaning here.
    let line = line.replace('"', "");

    let (head, bracket) = match line.find('[') {
        Some(open) => {
            let close = line[open..]
                .find(']')
                .map(|c| open + c)
                .ok_or_else(|| TbGenError::config_at(line_no, "unterminated '[' in row"))?;
            if !line[close + 1..].trim_matches(|c: char| c == ',' || c.is_whitespace()).is_empty() {
                return Err(TbGenError::config_at(line_no, "unexpected fields after ']'"));
            }
            let inner = split_fields(&line[open + 1..close]);
            (line[..open].to_string(), Some(inner))
        }
        None => {
            if line.contains(']') {
                return Err(TbGenError::config_at(line_no, "unmatched ']' in row"));
            }
            (line.clone(), None)
        }
    };

    let fields = split_fields(head.trim_end().trim_end_matches(','));
    if fields.is_empty() || fields[0].is_empty() {
        return Err(TbGenError::config_at(line_no, "row has no kind field"));
    }

    Ok(Row { fields, bracket })
}

/// Split on commas, trim every field and drop trailing empty ones
fn split_fields(text: &str) -> Vec<String> {
    let mut fields: Vec<String> = text.split(',').map(|f| f.trim().to_string()).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

fn single_value<'a>(row: &'a Row, line_no: usize, kind: &str) -> Result<&'a str> {
    match row.fields.get(1) {
        Some(value) if !value.is_empty() => Ok(value.as_str()),
        _ => Err(TbGenError::config_at(line_no, format!("{} row has no value", kind))),
    }
}

fn check_identifier(name: &str, what: &str, line_no: usize) -> Result<()> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(())
    } else {
        Err(TbGenError::config_at(
            line_no,
            format!("{} '{}' is not a valid SystemVerilog identifier", what, name),
        ))
    }
}

fn parse_interface(row: &Row, line_no: usize) -> Result<InterfaceSpec> {
    let data = &row.fields[1..];
    if data.len() < 4 {
        return Err(TbGenError::config_at(
            line_no,
            format!(
                "INTF row needs name, mode, frequency and clock (found {} field(s))",
                data.len()
            ),
        ));
    }

    let name = &data[0];
    check_identifier(name, "interface name", line_no)?;

    let mode = Mode::from_code(&data[1]).ok_or_else(|| {
        TbGenError::config_at(
            line_no,
            format!("invalid mode code '{}' (expected M or S)", data[1]),
        )
    })?;

    let frequency_mhz = match data[2].parse::<u32>() {
        Ok(freq) if freq > constants::MAX_FREQUENCY_MHZ => {
            return Err(TbGenError::config_at(
                line_no,
                format!(
                    "frequency {} MHz exceeds {} MHz, the limit of 1ps timescale precision",
                    freq,
                    constants::MAX_FREQUENCY_MHZ
                ),
            ))
        }
        Ok(freq) if freq > 0 => freq,
        _ => {
            return Err(TbGenError::config_at(
                line_no,
                format!("frequency '{}' is not a positive integer", data[2]),
            ))
        }
    };

    let clock = &data[3];
    check_identifier(clock, "clock signal", line_no)?;

    let mut intf = InterfaceSpec::new(name.as_str(), mode, frequency_mhz, clock.as_str());

    let reset_fields: &[String] = match (&row.bracket, data.len() > 4) {
        (Some(_), true) => {
            return Err(TbGenError::config_at(
                line_no,
                "unexpected fields between clock and reset group",
            ))
        }
        (Some(group), false) => group.as_slice(),
        (None, true) => &data[4..],
        (None, false) => &[],
    };

    if reset_fields.len() > 2 {
        return Err(TbGenError::config_at(
            line_no,
            "reset group takes a signal name and an optional polarity",
        ));
    }

    if let Some(signal) = reset_fields.first().filter(|s| !s.is_empty()) {
        if !signal.eq_ignore_ascii_case("nil") {
            check_identifier(signal, "reset signal", line_no)?;
            let polarity = match reset_fields.get(1) {
                Some(keyword) => ResetPolarity::from_keyword(keyword).ok_or_else(|| {
                    TbGenError::config_at(
                        line_no,
                        format!(
                            "invalid reset polarity '{}' (expected active_high or active_low)",
                            keyword
                        ),
                    )
                })?,
                None => ResetPolarity::ActiveHigh,
            };
            intf = intf.with_reset(signal.as_str(), polarity);
        }
    }

    Ok(intf)
}

/// Reject interface sets that would produce clashing output
fn check_consistency(interfaces: &[(usize, InterfaceSpec)]) -> Result<()> {
    let mut names: HashMap<String, usize> = HashMap::new();
    let mut clocks: HashMap<&str, (u32, usize)> = HashMap::new();
    let mut resets: HashMap<&str, (ResetPolarity, usize)> = HashMap::new();

    for (line_no, intf) in interfaces {
        if let Some(first) = names.insert(intf.prefix(), *line_no) {
            return Err(TbGenError::config_at(
                *line_no,
                format!(
                    "duplicate interface name '{}' (first declared at line {})",
                    intf.name, first
                ),
            ));
        }

        if let Some((_, first)) = resets.get(intf.clock_signal.as_str()) {
            return Err(TbGenError::config_at(
                *line_no,
                format!(
                    "clock '{}' is already declared as a reset at line {}",
                    intf.clock_signal, first
                ),
            ));
        }

        let (freq, first) = *clocks
            .entry(intf.clock_signal.as_str())
            .or_insert((intf.frequency_mhz, *line_no));
        if freq != intf.frequency_mhz {
            return Err(TbGenError::config_at(
                *line_no,
                format!(
                    "clock '{}' is {} MHz here but {} MHz at line {}",
                    intf.clock_signal, intf.frequency_mhz, freq, first
                ),
            ));
        }

        if let Some(reset) = &intf.reset {
            if let Some((_, first)) = clocks.get(reset.signal.as_str()) {
                return Err(TbGenError::config_at(
                    *line_no,
                    format!(
                        "reset '{}' is already declared as a clock at line {}",
                        reset.signal, first
                    ),
                ));
            }

            let (polarity, first) = *resets
                .entry(reset.signal.as_str())
                .or_insert((reset.polarity, *line_no));
            if polarity != reset.polarity {
                return Err(TbGenError::config_at(
                    *line_no,
                    format!(
                        "reset '{}' is {} here but {} at line {}",
                        reset.signal,
                        reset.polarity.keyword(),
                        polarity.keyword(),
                        first
                    ),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> Result<EnvironmentDescription> {
        CsvConfigParser::new(csv.to_string()).parse(CountPolicy::Strict)
    }

    fn config_line(err: TbGenError) -> Option<usize> {
        match err {
            TbGenError::Config { line, .. } => line,
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_example_config() {
        let env = parse(
            "DUT_NAME, usb_ctrl\n\
             NUM_INTF, 2\n\
             INTF, i2c , M , 100 , i2c_clk , [i2c_rst , active_low]\n\
             INTF, uart, S , 200 , uart_clk, [uart_rst, active_high]\n",
        )
        .unwrap();

        assert_eq!(env.design.name, "usb_ctrl");
        assert_eq!(env.declared_count, 2);
        assert_eq!(env.interfaces.len(), 2);

        let i2c = &env.interfaces[0];
        assert_eq!(i2c.name, "i2c");
        assert_eq!(i2c.mode, Mode::Master);
        assert_eq!(i2c.frequency_mhz, 100);
        assert_eq!(i2c.clock_signal, "i2c_clk");
        let reset = i2c.reset.as_ref().unwrap();
        assert_eq!(reset.signal, "i2c_rst");
        assert_eq!(reset.polarity, ResetPolarity::ActiveLow);

        assert_eq!(env.interfaces[1].mode, Mode::Slave);
        assert_eq!(
            env.interfaces[1].reset.as_ref().unwrap().polarity,
            ResetPolarity::ActiveHigh
        );
    }

    #[test]
    fn test_row_kinds_are_case_and_space_insensitive() {
        let env = parse("  dut name , soc\nnum_intf,1\n intf ,spi,s,50,spi_clk\n").unwrap();
        assert_eq!(env.design.name, "soc");
        assert_eq!(env.interfaces[0].name, "spi");
        assert_eq!(env.interfaces[0].mode, Mode::Slave);
        assert!(env.interfaces[0].reset.is_none());
    }

    #[test]
    fn test_reset_forms() {
        let env = parse(
            "DUT_NAME,soc\nNUM_INTF,4\n\
             INTF,a,M,100,clk,\"[a_rst, active_low]\"\n\
             INTF,b,M,100,clk,b_rst,active_low\n\
             INTF,c,M,100,clk,[c_rst]\n\
             INTF,d,M,100,clk,[nil, active_low]\n",
        )
        .unwrap();
        let resets: Vec<_> = env.interfaces.iter().map(|i| i.reset.clone()).collect();
        assert_eq!(resets[0].as_ref().unwrap().polarity, ResetPolarity::ActiveLow);
        assert_eq!(resets[1].as_ref().unwrap().signal, "b_rst");
        assert_eq!(resets[2].as_ref().unwrap().polarity, ResetPolarity::ActiveHigh);
        assert!(resets[3].is_none());
    }

    #[test]
    fn test_comments_blank_lines_and_trailing_commas() {
        let env = parse("# header\n\nDUT_NAME,soc,,\nNUM_INTF,1,\nINTF,a,M,10,clk,,\n").unwrap();
        assert_eq!(env.design.name, "soc");
        assert_eq!(env.interfaces.len(), 1);
    }

    #[test]
    fn test_invalid_mode_code() {
        let err = parse("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,X,100,clk\n").unwrap_err();
        assert!(err.to_string().contains("invalid mode code 'X'"));
        assert_eq!(config_line(err), Some(3));
    }

    #[test]
    fn test_invalid_frequency() {
        for freq in ["0", "-5", "fast", "1.5"] {
            let csv = format!("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,M,{},clk\n", freq);
            let err = parse(&csv).unwrap_err();
            assert!(err.to_string().contains("positive integer"), "freq {}", freq);
        }
    }

    #[test]
    fn test_short_interface_row() {
        let err = parse("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,M,100\n").unwrap_err();
        assert!(err.to_string().contains("found 3 field(s)"));
    }

    #[test]
    fn test_invalid_polarity() {
        let err = parse("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,M,100,clk,[rst, sometimes]\n").unwrap_err();
        assert!(err.to_string().contains("invalid reset polarity 'sometimes'"));
    }

    #[test]
    fn test_missing_rows() {
        let err = parse("NUM_INTF,1\nINTF,a,M,100,clk\n").unwrap_err();
        assert!(err.to_string().contains("missing DUT_NAME"));

        let err = parse("DUT_NAME,soc\nINTF,a,M,100,clk\n").unwrap_err();
        assert!(err.to_string().contains("missing NUM_INTF"));

        let err = parse("DUT_NAME,soc\nNUM_INTF,0\n").unwrap_err();
        assert!(err.to_string().contains("no INTF rows"));
    }

    #[test]
    fn test_count_mismatch_is_strict_by_default() {
        let csv = "DUT_NAME,soc\nNUM_INTF,3\nINTF,a,M,100,clk\n";
        let err = parse(csv).unwrap_err();
        assert!(err.to_string().contains("declares 3 interface(s) but 1"));
        assert_eq!(config_line(err), Some(2));

        let env = CsvConfigParser::new(csv.to_string())
            .parse(CountPolicy::Warn)
            .unwrap();
        assert_eq!(env.declared_count, 3);
        assert_eq!(env.interfaces.len(), 1);
    }

    #[test]
    fn test_duplicate_interface_names() {
        let err = parse("DUT_NAME,soc\nNUM_INTF,2\nINTF,spi,M,100,clk\nINTF,SPI,S,100,clk\n").unwrap_err();
        assert!(err.to_string().contains("duplicate interface name 'SPI'"));
        assert_eq!(config_line(err), Some(4));
    }

    #[test]
    fn test_shared_clock_with_conflicting_frequency() {
        let err = parse("DUT_NAME,soc\nNUM_INTF,2\nINTF,a,M,100,clk\nINTF,b,S,200,clk\n").unwrap_err();
        assert!(err.to_string().contains("clock 'clk' is 200 MHz here but 100 MHz at line 3"));
    }

    #[test]
    fn test_shared_reset_with_conflicting_polarity() {
        let err = parse(
            "DUT_NAME,soc\nNUM_INTF,2\n\
             INTF,a,M,100,a_clk,[rst, active_low]\n\
             INTF,b,S,50,b_clk,[rst, active_high]\n",
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("reset 'rst' is active_high here but active_low at line 3"));
        assert_eq!(config_line(err), Some(4));
    }

    #[test]
    fn test_reset_named_like_a_clock() {
        // Reset reuses another interface's clock
        let err = parse(
            "DUT_NAME,soc\nNUM_INTF,2\nINTF,a,M,100,clk\nINTF,b,S,50,b_clk,[clk, active_low]\n",
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("reset 'clk' is already declared as a clock at line 3"));
        assert_eq!(config_line(err), Some(4));

        // Reset reuses its own interface's clock
        let err = parse("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,M,100,clk,[clk]\n").unwrap_err();
        assert_eq!(config_line(err), Some(3));

        // Clock reuses an earlier reset
        let err = parse(
            "DUT_NAME,soc\nNUM_INTF,2\nINTF,a,M,100,a_clk,[rst]\nINTF,b,S,50,rst\n",
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("clock 'rst' is already declared as a reset at line 3"));
    }

    #[test]
    fn test_frequency_limit() {
        let env = parse("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,M,500000,clk\n").unwrap();
        assert_eq!(env.interfaces[0].frequency_mhz, constants::MAX_FREQUENCY_MHZ);

        let err = parse("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,M,4000000,clk\n").unwrap_err();
        assert!(err.to_string().contains("exceeds 500000 MHz"));
        assert_eq!(config_line(err), Some(3));
    }

    #[test]
    fn test_invalid_identifiers() {
        let err = parse("DUT_NAME,usb-ctrl\nNUM_INTF,1\nINTF,a,M,100,clk\n").unwrap_err();
        assert!(err.to_string().contains("DUT name 'usb-ctrl'"));

        let err = parse("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,M,100,1clk\n").unwrap_err();
        assert!(err.to_string().contains("clock signal '1clk'"));
    }

    #[test]
    fn test_unterminated_bracket() {
        let err = parse("DUT_NAME,soc\nNUM_INTF,1\nINTF,a,M,100,clk,[rst, active_low\n").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_missing_file_is_usage_error() {
        let result = CsvConfigParser::from_file(Path::new("/nonexistent/UVM_TB_PARAMS.csv"));
        assert!(matches!(result, Err(TbGenError::Usage(_))));
    }
}

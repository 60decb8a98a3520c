use std::path::PathBuf;

/// Result type for testbench generation
pub type Result<T> = std::result::Result<T, TbGenError>;

#[derive(Debug, thiserror::Error)]
pub enum TbGenError {
    /// Malformed or inconsistent configuration row
    #[error("Configuration error{}: {message}", at_line(.line))]
    Config {
        line: Option<usize>,
        message: String,
    },

    /// Filesystem failure while materializing the output tree
    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Usage error: {0}")]
    Usage(String),
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

impl TbGenError {
    pub fn config(message: impl Into<String>) -> Self {
        TbGenError::Config {
            line: None,
            message: message.into(),
        }
    }

    pub fn config_at(line: usize, message: impl Into<String>) -> Self {
        TbGenError::Config {
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TbGenError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, TbGenError::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_mentions_line() {
        let err = TbGenError::config_at(3, "invalid mode code 'X'");
        assert_eq!(
            err.to_string(),
            "Configuration error at line 3: invalid mode code 'X'"
        );

        let err = TbGenError::config("missing DUT_NAME row");
        assert_eq!(err.to_string(), "Configuration error: missing DUT_NAME row");
    }

    #[test]
    fn test_write_error_names_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TbGenError::write("verif/TOP/top.sv", io);
        assert!(err.to_string().contains("verif/TOP/top.sv"));
        assert!(!err.is_config());
    }
}

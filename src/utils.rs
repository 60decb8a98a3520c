use crossterm::style::Stylize;

/// CLI console trait for user-facing output
pub trait Console: Send + Sync {
    fn print_success(&self, message: &str);
    fn print_error(&self, message: &str);
    fn print_info(&self, message: &str);
    fn print_path(&self, path: &str, description: &str);
}

/// Console that prints coloured markers to stdout/stderr
pub struct SimpleConsole {
    color: bool,
}

impl SimpleConsole {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Default for SimpleConsole {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Console for SimpleConsole {
    fn print_success(&self, message: &str) {
        if self.color {
            println!("{} {}", "✓".green(), message);
        } else {
            println!("✓ {}", message);
        }
    }

    fn print_error(&self, message: &str) {
        if self.color {
            eprintln!("{} {}", "✗".red(), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }

    fn print_info(&self, message: &str) {
        if self.color {
            println!("{} {}", "ℹ".blue(), message);
        } else {
            println!("ℹ {}", message);
        }
    }

    fn print_path(&self, path: &str, description: &str) {
        if self.color {
            println!("  {} {}", path.bold(), description.dark_grey());
        } else {
            println!("  {} {}", path, description);
        }
    }
}

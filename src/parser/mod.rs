pub mod csv_config;

pub use csv_config::CsvConfigParser;

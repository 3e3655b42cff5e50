pub mod commands;
pub mod output;

pub use commands::{ClassifyArgs, CliArgs, Commands, ConfigArgs, InspectArgs, ScanArgs};
pub use output::{OutputFormat, OutputFormatter};

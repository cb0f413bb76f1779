pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DiagnoseArgs, MigrateArgs, OutputFormatArg};
pub use output::{OutputFormat, OutputFormatter};
